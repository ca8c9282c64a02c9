use super::*;

use crate::instruction::Instruction::{Hlt, Lcl, Mux, Mxl, Syn};

#[test]
fn hides_the_core_for_one_preload_phase() {
    // Core 1 raises sync in tick 1, so core 0's import in tick 2 comes
    // back empty and its MXL stalls; the import succeeds in tick 3.
    let bank0 = ops![Mux(2), Mxl, Hlt];
    let bank1 = ops![Syn, Lcl(3), Hlt];
    let mut cpu = machine(&[&bank0, &bank1], &[0, 1], [2, 1, 1]);

    let _ = cpu.tick().unwrap();
    let _ = cpu.tick().unwrap();

    // The stalled import: preload cleared, program counter held.
    assert_eq!(registers(&cpu, 0).pc, 1);
    assert_eq!(registers(&cpu, 0).preload, None);

    while cpu.tick().unwrap() {}

    assert_eq!(registers(&cpu, 0).val, 3);
}

#[test]
fn advances_the_raising_core() {
    let cpu = run_single(&ops![Syn, Hlt]);
    assert_eq!(registers(&cpu, 0).pc, 1);
}
