use super::*;

use crate::instruction::Instruction::{Hlt, Nop};

#[test]
fn advances_without_effect() {
    let cpu = run_single(&ops![Nop, Nop, Hlt]);

    let registers = registers(&cpu, 0);
    assert_eq!(registers.val, 0);
    assert_eq!(registers.pc, 2);
    assert_eq!(registers.status2, Default::default());
}
