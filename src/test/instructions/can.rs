use super::*;

use crate::instruction::Instruction::{Can, Hlt, Lcl};

#[test]
fn masks_the_accumulator() {
    let cpu = run_single(&ops![Lcl(12), Can(Some(10)), Hlt]);

    let registers = registers(&cpu, 0);
    assert_eq!(registers.val, 8);
    assert!(!registers.status2.carry);
    assert!(!registers.status2.zero);
}

#[test]
fn disjoint_masks_yield_zero() {
    let cpu = run_single(&ops![Lcl(12), Can(Some(3)), Hlt]);

    let registers = registers(&cpu, 0);
    assert_eq!(registers.val, 0);
    assert!(registers.status2.zero);
}
