use super::*;

use crate::instruction::Instruction::{Hlt, Jmp, Lcl};

#[test]
fn skips_forward() {
    let cpu = run_single(&ops![Jmp(2), Lcl(5), Hlt]);

    // The load was jumped over.
    assert_eq!(registers(&cpu, 0).val, 0);
    assert_eq!(registers(&cpu, 0).pc, 2);
}

#[test]
fn wraps_around_the_bank() {
    // Jumping backwards from the first instruction lands on the last.
    let cpu = run_single(&ops![Jmp(-1), Lcl(5), Hlt]);
    assert_eq!(registers(&cpu, 0).val, 0);
}
