use super::*;

use crate::instruction::Instruction::{Cad, Hlt, Lch, Lcl, Mux};

#[test]
fn adds_an_immediate() {
    let cpu = run_single(&ops![Lcl(4), Cad(Some(3)), Hlt]);
    assert_eq!(registers(&cpu, 0).val, 7);
}

#[test]
fn wraps_with_carry_and_overflow() {
    let cpu = run_single(&ops![Lcl(15), Lch(15), Cad(Some(1)), Hlt]);

    let registers = registers(&cpu, 0);
    assert_eq!(registers.val, 0);
    assert!(registers.status2.carry);
    assert!(registers.status2.zero);
    assert!(!registers.status2.overflow); // -1 + 1 is fine, signed
}

#[test]
fn signed_overflow() {
    let cpu = run_single(&ops![Lch(7), Lcl(15), Cad(Some(1)), Hlt]);

    let registers = registers(&cpu, 0);
    assert_eq!(registers.val, 0x80);
    assert!(registers.status2.overflow);
    assert!(registers.status2.negative);
    assert!(!registers.status2.carry);
}

#[test]
fn operand_defaults_to_the_preload() {
    // MUX 6 preloads the program counter, which is 1 by the time CAD runs.
    let cpu = run_single(&ops![Mux(6), Cad(None), Hlt]);
    assert_eq!(registers(&cpu, 0).val, 1);
}
