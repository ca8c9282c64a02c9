use super::*;

use crate::instruction::Instruction::{Hlt, Lch, Lcl, Lsl};

#[test]
fn shifts_left() {
    let cpu = run_single(&ops![Lcl(9), Lsl, Hlt]);

    let registers = registers(&cpu, 0);
    assert_eq!(registers.val, 18);
    assert!(!registers.status2.carry);
}

#[test]
fn ejects_into_carry() {
    let cpu = run_single(&ops![Lch(8), Lsl, Hlt]);

    let registers = registers(&cpu, 0);
    assert_eq!(registers.val, 0);
    assert!(registers.status2.carry);
    assert!(registers.status2.zero);
}
