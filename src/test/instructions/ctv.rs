use super::*;

use crate::instruction::Instruction::{Ctv, Hlt};

#[test]
fn sets_from_operand() {
    let cpu = run_single(&ops![Ctv(true), Hlt]);
    assert!(registers(&cpu, 0).status1.ctc);
}

#[test]
fn clears_from_operand() {
    let cpu = run_single(&ops![Ctv(true), Ctv(false), Hlt]);
    assert!(!registers(&cpu, 0).status1.ctc);
}

#[test]
fn rejects_wide_operands() {
    let node = ("CTV".to_owned(), vec![2]);
    assert!(crate::instruction::create(&node).is_err());
}
