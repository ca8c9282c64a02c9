use super::*;

use crate::instruction::Instruction::{Hlt, Lcl, Lsr};

#[test]
fn shifts_right() {
    let cpu = run_single(&ops![Lcl(8), Lsr, Hlt]);

    let registers = registers(&cpu, 0);
    assert_eq!(registers.val, 4);
    assert!(!registers.status2.carry);
}

#[test]
fn ejects_into_carry() {
    let cpu = run_single(&ops![Lcl(9), Lsr, Hlt]);

    let registers = registers(&cpu, 0);
    assert_eq!(registers.val, 4);
    assert!(registers.status2.carry);
}
