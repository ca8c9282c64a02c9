use super::*;

use crate::instruction::Instruction::{Cad, Hlt, Jez, Lcl};

#[test]
fn taken_when_zero() {
    // CAD 0 leaves val at zero and raises the zero flag.
    let cpu = run_single(&ops![Cad(Some(0)), Jez(2), Lcl(5), Hlt]);
    assert_eq!(registers(&cpu, 0).val, 0);
}

#[test]
fn not_taken_otherwise() {
    let cpu = run_single(&ops![Cad(Some(1)), Jez(2), Lcl(5), Hlt]);
    assert_eq!(registers(&cpu, 0).val, 5);
}
