use crate::constants;
use crate::error::{CpuException, Result};

/// First status register: neighbour selector and pipeline flags.
///
/// `mux` is a three-bit subfield, so the byte form needs explicit packing;
/// the flags are ordinary fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Status1 {
    mux: u8,
    pub ctc: bool,
    pub sync: bool,
}

impl Status1 {
    pub fn mux(&self) -> u8 {
        self.mux
    }

    /// Fails with `InvalidDirection` if the value does not fit three bits.
    pub fn set_mux(&mut self, mux: u8) -> Result<()> {
        if mux & !constants::MUX_MASK != 0 {
            return Err(CpuException::invalid_direction(mux));
        }
        self.mux = mux;
        Ok(())
    }

    pub fn pack(&self) -> u8 {
        self.mux
            | (self.ctc as u8) << constants::MUX_WIDTH
            | (self.sync as u8) << (constants::MUX_WIDTH + 1)
    }

    pub fn unpack(byte: u8) -> Status1 {
        Status1 {
            mux: byte & constants::MUX_MASK,
            ctc: byte >> constants::MUX_WIDTH & 1 != 0,
            sync: byte >> (constants::MUX_WIDTH + 1) & 1 != 0,
        }
    }
}

/// Second status register: current bank and condition flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Status2 {
    pub membank: u8,
    pub carry: bool,
    pub negative: bool,
    pub overflow: bool,
    pub zero: bool,
    pub unlock: bool,
}

/// The complete per-core register file, zeroed at construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    /// Arithmetic accumulator.
    pub val: u8,
    /// The byte most recently imported from a neighbour, if any.
    pub preload: Option<u8>,
    /// Sign flag that came along with `preload`.
    pub preload_negative: bool,
    /// Program counter, wraps modulo the bank size.
    pub pc: u8,
    pub status1: Status1,
    pub status2: Status2,
    /// Linear grid index of the owning core. Not instruction-addressable.
    pub id: usize,
}

impl Registers {
    pub fn new(id: usize) -> Registers {
        Registers {
            id,
            ..Registers::default()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn status1_round_trip() {
        for byte in 0u8..0b10_0000 {
            assert_eq!(Status1::unpack(byte).pack(), byte);
        }
    }

    #[test]
    fn set_mux_rejects_wide_values() {
        let mut status = Status1::default();
        assert!(status.set_mux(7).is_ok());
        assert!(status.set_mux(8).is_err());
        assert_eq!(status.mux(), 7);
    }
}
