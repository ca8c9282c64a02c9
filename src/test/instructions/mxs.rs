use super::*;

use crate::instruction::Instruction::{Csu, Hlt, Lcl, Mux, Mxs, Nop};

#[test]
fn subtracts_the_import() {
    let bank0 = ops![Lcl(9), Mux(2), Mxs, Hlt];
    let bank1 = ops![Lcl(3), Nop, Nop, Hlt];
    let mut cpu = machine(&[&bank0, &bank1], &[0, 1], [2, 1, 1]);
    cpu.start().unwrap();

    assert_eq!(registers(&cpu, 0).val, 6);
}

#[test]
fn negative_import_adds() {
    let bank0 = ops![Lcl(9), Mux(2), Mxs, Hlt];
    let bank1 = ops![Csu(Some(2)), Nop, Nop, Hlt]; // neighbour: -2
    let mut cpu = machine(&[&bank0, &bank1], &[0, 1], [2, 1, 1]);
    cpu.start().unwrap();

    // 9 plus the 254 the neighbour exports, wrapped.
    assert_eq!(registers(&cpu, 0).val, 7);
}
