use super::*;

use crate::instruction::Instruction::{Hlt, Lcl};

#[test]
fn halts_for_good() {
    let mut cpu = single(&ops![Hlt, Lcl(5)]);
    cpu.start().unwrap();

    assert!(cpu.grid().core(0).halted());
    assert_eq!(registers(&cpu, 0).pc, 0);

    // Further ticks are no-ops.
    assert!(!cpu.tick().unwrap());
    assert_eq!(registers(&cpu, 0).val, 0);
}

#[test]
fn halted_cores_are_invisible_to_neighbours() {
    let mut cpu = single(&ops![Hlt]);
    cpu.start().unwrap();

    assert_eq!(cpu.grid().core(0).get_from(false), None);
}
