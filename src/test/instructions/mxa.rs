use super::*;

use crate::instruction::Instruction::{Csu, Hlt, Lch, Lcl, Mux, Mxa, Nop};

#[test]
fn adds_the_import() {
    let bank0 = ops![Lcl(4), Mux(2), Mxa, Hlt];
    let bank1 = ops![Lcl(3), Nop, Nop, Hlt];
    let mut cpu = machine(&[&bank0, &bank1], &[0, 1], [2, 1, 1]);
    cpu.start().unwrap();

    assert_eq!(registers(&cpu, 0).val, 7);
}

#[test]
fn negative_import_subtracts() {
    let bank0 = ops![Mux(2), Mxa, Hlt, Nop];
    let bank1 = ops![Csu(Some(2)), Nop, Nop, Hlt]; // neighbour: -2
    let mut cpu = machine(&[&bank0, &bank1], &[0, 1], [2, 1, 1]);
    cpu.start().unwrap();

    // 0 minus the 254 the neighbour exports, wrapped.
    assert_eq!(registers(&cpu, 0).val, 2);
    assert!(registers(&cpu, 0).status2.carry);
}

#[test]
fn wraps_with_carry_and_zero() {
    let bank0 = ops![Lcl(15), Lch(15), Mux(2), Mxa, Hlt];
    let bank1 = ops![Lcl(1), Nop, Nop, Nop, Hlt];
    let mut cpu = machine(&[&bank0, &bank1], &[0, 1], [2, 1, 1]);
    cpu.start().unwrap();

    let registers = registers(&cpu, 0);
    assert_eq!(registers.val, 0);
    assert!(registers.status2.carry);
    assert!(registers.status2.zero);
}
