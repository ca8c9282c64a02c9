use super::*;

use crate::instruction::Instruction::{Dbg, Hlt};

#[test]
fn advances() {
    let cpu = run_single(&ops![Dbg, Hlt]);
    assert_eq!(registers(&cpu, 0).pc, 1);
}
