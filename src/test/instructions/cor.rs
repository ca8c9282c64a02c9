use super::*;

use crate::instruction::Instruction::{Cor, Hlt, Lcl};

#[test]
fn merges_into_the_accumulator() {
    let cpu = run_single(&ops![Lcl(12), Cor(Some(3)), Hlt]);

    let registers = registers(&cpu, 0);
    assert_eq!(registers.val, 15);
    assert!(!registers.status2.zero);
    assert!(!registers.status2.negative);
}
