use super::*;

use crate::instruction::Instruction::{Ctc, Hlt};

#[test]
fn toggles() {
    let cpu = run_single(&ops![Ctc, Hlt]);
    assert!(registers(&cpu, 0).status1.ctc);
}

#[test]
fn toggles_back() {
    let cpu = run_single(&ops![Ctc, Ctc, Hlt]);
    assert!(!registers(&cpu, 0).status1.ctc);
}
