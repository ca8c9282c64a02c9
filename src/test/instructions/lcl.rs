use super::*;

use crate::instruction::Instruction::{Hlt, Lcl, Lch};

#[test]
fn loads_the_low_nibble() {
    let cpu = run_single(&ops![Lcl(2), Hlt]);
    assert_eq!(registers(&cpu, 0).val, 2);
}

#[test]
fn keeps_the_high_nibble() {
    let cpu = run_single(&ops![Lch(10), Lcl(2), Hlt]);
    assert_eq!(registers(&cpu, 0).val, 0xA2);
}
