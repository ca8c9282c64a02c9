use super::*;

use crate::instruction::Instruction::{Csu, Hlt, Mux, Mxd, Nop};

#[test]
fn copies_the_import_without_flags() {
    let bank0 = ops![Mux(2), Mxd, Hlt];
    let bank1 = ops![Csu(Some(1)), Nop, Hlt]; // neighbour val = 255, negative
    let mut cpu = machine(&[&bank0, &bank1], &[0, 1], [2, 1, 1]);
    cpu.start().unwrap();

    let registers = registers(&cpu, 0);
    assert_eq!(registers.val, 255);
    assert!(!registers.status2.negative);
    assert!(!registers.status2.zero);
}
