use log::trace;

use crate::direction::{self, DecodedDirection, SpecialDirection};
use crate::error::Result;
use crate::instruction::{self, Outcome};
use crate::memory::Memory;
use crate::registers::Registers;

/// What the preload phase decided for one core. Computed against the
/// immutable tick-start state and committed afterwards, so no core ever
/// observes another core's same-tick mutations.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Staged {
    /// Nothing to import this tick.
    Keep,
    /// The neighbour was not ready; the preload register is emptied.
    Clear,
    /// A value peeked from a neighbour.
    Import { negative: bool, value: u8 },
    /// One of the core's own registers (`PC` or `MEMBANK` slots).
    Register(u8),
}

/// A single processor of the mesh.
///
/// Cores are owned by the grid and identify themselves by their linear
/// index; neighbour access goes through
/// [`CoreGrid::offset`](../grid/struct.CoreGrid.html#method.offset) rather
/// than any stored reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Core {
    registers: Registers,
    halted: bool,
}

impl Core {
    pub fn new(id: usize) -> Core {
        Core {
            registers: Registers::new(id),
            halted: false,
        }
    }

    /// Connects the core to its instruction bank.
    pub fn wire(&mut self, membank: u8) {
        self.registers.status2.membank = membank;
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn halted(&self) -> bool {
        self.halted
    }

    /// The read port a neighbour uses to import this core's accumulator.
    ///
    /// Returns `None` while the core is not ready: either `sync` is set or
    /// the core has halted. `ctc` selects between alternative outputs where
    /// a core variant supports that; the baseline export ignores it.
    pub fn get_from(&self, _ctc: bool) -> Option<(bool, u8)> {
        if self.registers.status1.sync || self.halted {
            return None;
        }
        Some((self.registers.status2.negative, self.registers.val))
    }

    /// Phase 1: decide what to load into the preload register.
    ///
    /// `lookup` resolves a direction tuple to the neighbour's export,
    /// failing with `SelfFetchForbidden` when the tuple leads back to this
    /// core. Never touches the program counter, memory or other cores.
    pub(crate) fn plan_preload<F>(&self, memory: &Memory, force: bool, lookup: F) -> Result<Staged>
    where
        F: FnOnce(&direction::CoreDirection) -> Result<Option<(bool, u8)>>,
    {
        if self.halted {
            return Ok(Staged::Keep);
        }

        let decoded = direction::decode(self.registers.status1.mux())
            .map_err(|err| err.with_registers(&self.registers))?;

        let direction = match decoded {
            DecodedDirection::Special(SpecialDirection::Pc) => {
                return Ok(Staged::Register(self.registers.pc));
            }
            DecodedDirection::Special(SpecialDirection::Membank) => {
                return Ok(Staged::Register(self.registers.status2.membank));
            }
            DecodedDirection::Core(direction) => direction,
        };

        // Peek at the instruction about to execute; only the MX imports
        // (or a forced preload) actually read the neighbour.
        let opcode = memory
            .fetch(self.registers.status2.membank, self.registers.pc)
            .map_err(|err| err.with_registers(&self.registers))?;
        let instruction =
            instruction::decode(opcode).map_err(|err| err.with_registers(&self.registers))?;

        if !force && !instruction.needs_import() {
            return Ok(Staged::Keep);
        }

        match lookup(&direction).map_err(|err| err.with_registers(&self.registers))? {
            Some((negative, value)) => Ok(Staged::Import { negative, value }),
            None => Ok(Staged::Clear),
        }
    }

    pub(crate) fn commit_preload(&mut self, staged: Staged) {
        match staged {
            Staged::Keep => {}
            Staged::Clear => {
                self.registers.preload = None;
            }
            Staged::Import { negative, value } => {
                self.registers.preload = Some(value);
                self.registers.preload_negative = negative;
            }
            Staged::Register(value) => {
                self.registers.preload = Some(value);
                self.registers.preload_negative = false;
            }
        }
    }

    /// Phase 2: fetch the instruction under the program counter and execute
    /// it. Returns whether the program counter advanced.
    pub fn fetch(&mut self, memory: &Memory) -> Result<bool> {
        if self.halted {
            return Ok(false);
        }

        // A sync raised by the previous instruction has covered exactly one
        // preload phase by now.
        self.registers.status1.sync = false;

        let opcode = memory
            .fetch(self.registers.status2.membank, self.registers.pc)
            .map_err(|err| err.with_registers(&self.registers))?;
        let instruction =
            instruction::decode(opcode).map_err(|err| err.with_registers(&self.registers))?;

        let outcome = instruction
            .execute(&mut self.registers, memory.bank_size())
            .map_err(|err| err.with_registers(&self.registers))?;

        self.registers.status2.unlock = false;
        match outcome {
            Outcome::Next => {
                self.registers.pc = (self.registers.pc + 1) % memory.bank_size();
                Ok(true)
            }
            Outcome::Hold => Ok(false),
            Outcome::Halt => {
                trace!("core {} halted", self.registers.id);
                self.halted = true;
                Ok(false)
            }
        }
    }
}
