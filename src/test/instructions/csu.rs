use super::*;

use crate::instruction::Instruction::{Csu, Hlt, Lcl};

#[test]
fn subtracts_an_immediate() {
    let cpu = run_single(&ops![Lcl(9), Csu(Some(4)), Hlt]);

    let registers = registers(&cpu, 0);
    assert_eq!(registers.val, 5);
    assert!(!registers.status2.carry);
    assert!(!registers.status2.negative);
}

#[test]
fn borrows_below_zero() {
    let cpu = run_single(&ops![Csu(Some(1)), Hlt]);

    let registers = registers(&cpu, 0);
    assert_eq!(registers.val, 255);
    assert!(registers.status2.carry);
    assert!(registers.status2.negative);
    assert!(!registers.status2.zero);
}

#[test]
fn to_exactly_zero() {
    let cpu = run_single(&ops![Lcl(4), Csu(Some(4)), Hlt]);

    let registers = registers(&cpu, 0);
    assert_eq!(registers.val, 0);
    assert!(registers.status2.zero);
    assert!(!registers.status2.carry);
}
