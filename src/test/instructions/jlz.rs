use super::*;

use crate::instruction::Instruction::{Csu, Hlt, Jlz, Lcl};

#[test]
fn taken_when_negative() {
    let cpu = run_single(&ops![Csu(Some(1)), Jlz(2), Lcl(5), Hlt]);
    assert_eq!(registers(&cpu, 0).val, 255);
}

#[test]
fn not_taken_otherwise() {
    let cpu = run_single(&ops![Jlz(2), Lcl(5), Hlt, Hlt]);
    assert_eq!(registers(&cpu, 0).val, 5);
}
