use crate::error::{CpuException, Result};
use crate::settings::Settings;

/// The instruction store: a fixed number of fixed-size banks of opcode
/// bytes, zero-initialized (`0x00` is `NOP`).
///
/// Banks are written by the loader and by variable late-binding; the
/// pipeline only reads them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    banks: Vec<Vec<u8>>,
    bank_size: u8,
}

impl Memory {
    pub fn new(settings: &Settings) -> Memory {
        Memory {
            banks: vec![vec![0; settings.mem_size as usize]; settings.mem_number as usize],
            bank_size: settings.mem_size,
        }
    }

    pub fn banks(&self) -> usize {
        self.banks.len()
    }

    /// Instructions per bank.
    pub fn bank_size(&self) -> u8 {
        self.bank_size
    }

    pub fn bank(&self, id: u8) -> Result<&[u8]> {
        self.banks
            .get(id as usize)
            .map(Vec::as_slice)
            .ok_or_else(|| CpuException::bad_access(id, 0))
    }

    pub fn bank_mut(&mut self, id: u8) -> Result<&mut [u8]> {
        self.banks
            .get_mut(id as usize)
            .map(Vec::as_mut_slice)
            .ok_or_else(|| CpuException::bad_access(id, 0))
    }

    /// Reads the opcode at `pc` in the given bank.
    pub fn fetch(&self, bank: u8, pc: u8) -> Result<u8> {
        self.bank(bank)?
            .get(pc as usize)
            .copied()
            .ok_or_else(|| CpuException::bad_access(bank, pc))
    }
}
