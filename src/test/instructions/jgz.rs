use super::*;

use crate::instruction::Instruction::{Cad, Hlt, Jgz};

#[test]
fn counts_up_to_the_sign_bit() {
    // Adds one and loops while the value is still strictly positive; the
    // loop exits once bit 7 turns the negative flag on.
    let cpu = run_single(&ops![Cad(Some(1)), Jgz(-1), Hlt]);
    assert_eq!(registers(&cpu, 0).val, 128);
}

#[test]
fn not_taken_on_zero() {
    let cpu = run_single(&ops![Cad(Some(0)), Jgz(-1), Hlt]);
    assert_eq!(registers(&cpu, 0).val, 0);
}
