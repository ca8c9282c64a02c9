use super::*;

use crate::instruction::Instruction::{Hlt, Lcl, Lch};

#[test]
fn loads_the_high_nibble() {
    // The canonical two-nibble load: 0x12 = 18.
    let cpu = run_single(&ops![Lcl(2), Lch(1), Hlt]);
    assert_eq!(registers(&cpu, 0).val, 18);
}

#[test]
fn keeps_the_low_nibble() {
    let cpu = run_single(&ops![Lcl(2), Lch(15), Hlt]);
    assert_eq!(registers(&cpu, 0).val, 0xF2);
}
