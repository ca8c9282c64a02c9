use super::*;

use crate::instruction::Instruction::Hcf;

#[test]
fn aborts_the_simulation() {
    let mut cpu = single(&ops![Hcf]);
    let err = cpu.start().unwrap_err();

    assert_eq!(*err.kind(), ExceptionKind::CatastrophicHalt);
    // The failing core's registers ride along.
    assert_eq!(err.registers().map(|registers| registers.id), Some(0));
}
