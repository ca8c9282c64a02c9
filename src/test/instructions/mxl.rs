use super::*;

use crate::instruction::Instruction::{Csu, Hlt, Lcl, Mux, Mxl, Nop};

#[test]
fn loads_the_import_with_flags() {
    let bank0 = ops![Mux(2), Mxl, Hlt];
    let bank1 = ops![Lcl(7), Nop, Hlt];
    let mut cpu = machine(&[&bank0, &bank1], &[0, 1], [2, 1, 1]);
    cpu.start().unwrap();

    let registers = registers(&cpu, 0);
    assert_eq!(registers.val, 7);
    assert!(!registers.status2.negative);
    assert!(!registers.status2.zero);
}

#[test]
fn carries_the_neighbour_sign() {
    let bank0 = ops![Mux(2), Mxl, Hlt];
    let bank1 = ops![Csu(Some(1)), Nop, Hlt]; // neighbour negative
    let mut cpu = machine(&[&bank0, &bank1], &[0, 1], [2, 1, 1]);
    cpu.start().unwrap();

    let registers = registers(&cpu, 0);
    assert_eq!(registers.val, 255);
    assert!(registers.status2.negative);
}

#[test]
fn zero_import_sets_the_zero_flag() {
    let bank0 = ops![Mux(2), Mxl, Hlt];
    let bank1 = ops![Nop, Nop, Hlt];
    let mut cpu = machine(&[&bank0, &bank1], &[0, 1], [2, 1, 1]);
    cpu.start().unwrap();

    assert!(registers(&cpu, 0).status2.zero);
}
