use log::trace;

use crate::constants;
use crate::error::{CpuException, Result};
use crate::grid::CoreGrid;
use crate::instruction;
use crate::memory::Memory;
use crate::settings::Settings;
use crate::Variables;

/// The whole machine: settings, banked memory, the core grid and the
/// late-bindable variable slots reconstructed from the image.
#[derive(Clone, Debug)]
pub struct Cpu {
    settings: Settings,
    memory: Memory,
    grid: CoreGrid,
    variables: Variables,
}

impl Cpu {
    pub fn new(settings: Settings, memory: Memory, variables: Variables) -> Result<Cpu> {
        settings.validate()?;

        let mut grid = CoreGrid::new(&settings);
        for (id, &membank) in settings.mem_map.iter().enumerate() {
            grid.core_mut(id).wire(membank);
        }

        Ok(Cpu {
            settings,
            memory,
            grid,
            variables,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn grid(&self) -> &CoreGrid {
        &self.grid
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Late-binds a variable: patches the immediate nibble of every
    /// `LCL`/`LCH` load site recorded for slot `index`.
    pub fn set_argument(&mut self, index: usize, value: u8) -> Result<()> {
        if value > constants::IMMEDIATE_MAX {
            return Err(CpuException::overflowing_literal(i64::from(value)));
        }
        let sites = self
            .variables
            .get(index)
            .ok_or_else(|| CpuException::unassigned_variable(index))?;

        for &(bank_id, offset) in sites {
            let bank = self.memory.bank_mut(bank_id)?;
            let opcode = *bank
                .get(offset as usize)
                .ok_or_else(|| CpuException::bad_access(bank_id, offset))?;

            if !instruction::is_variable_site(opcode) {
                return Err(CpuException::unknown_opcode(opcode)
                    .with_location(bank_id, offset as usize + 1));
            }

            bank[offset as usize] = instruction::patch_immediate(opcode, value);
        }
        Ok(())
    }

    /// Advances every core by one tick: all preloads first, then all
    /// fetch-executes, so each import observes tick-start state only.
    /// Returns `false` once every core has halted.
    pub fn tick(&mut self) -> Result<bool> {
        for id in 0..self.grid.len() {
            self.grid.preload(id, &self.memory, false)?;
        }
        for id in 0..self.grid.len() {
            self.grid.fetch(id, &self.memory)?;
        }

        Ok((0..self.grid.len()).any(|id| !self.grid.core(id).halted()))
    }

    /// Runs the grid to termination and returns the result byte: the
    /// accumulator of core 0.
    pub fn start(&mut self) -> Result<u8> {
        let mut ticks = 0u64;
        while self.tick()? {
            ticks += 1;
        }
        trace!("grid halted after {} ticks", ticks);
        Ok(self.grid.core(0).registers().val)
    }
}
