//! Codec between the three-bit `mux` field and neighbour directions.
//!
//! Eight codes cover the core itself, five of the six axis-aligned
//! neighbours, and the two special slots that preload one of the core's own
//! registers instead of a neighbour value:
//!
//! | code | selects |
//! |------|---------|
//! | 0 | the core itself (`CURRENT` on every axis) |
//! | 1 | x `BEFORE` |
//! | 2 | x `AFTER` |
//! | 3 | y `BEFORE` |
//! | 4 | y `AFTER` |
//! | 5 | z `AFTER` |
//! | 6 | the program counter (`PC`) |
//! | 7 | the current memory bank (`MEMBANK`) |
//!
//! Diagonal tuples and z `BEFORE` have no code and cannot be encoded.

use crate::error::{CpuException, Result};

/// Position along one axis, relative to the observing core.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Before,
    Current,
    After,
}

/// Numeric forms substituted by the assembler preprocessor.
pub const BEFORE: i8 = -1;
pub const CURRENT: i8 = 0;
pub const AFTER: i8 = 1;

impl Direction {
    pub fn from_offset(offset: i8) -> Result<Direction> {
        match offset {
            BEFORE => Ok(Direction::Before),
            CURRENT => Ok(Direction::Current),
            AFTER => Ok(Direction::After),
            _ => Err(CpuException::invalid_direction(offset as u8)),
        }
    }

    pub fn offset(self) -> i8 {
        match self {
            Direction::Before => BEFORE,
            Direction::Current => CURRENT,
            Direction::After => AFTER,
        }
    }
}

/// A neighbour selector, one [`Direction`](enum.Direction.html) per axis.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CoreDirection {
    pub x: Direction,
    pub y: Direction,
    pub z: Direction,
}

impl CoreDirection {
    pub fn new(x: Direction, y: Direction, z: Direction) -> CoreDirection {
        CoreDirection { x, y, z }
    }

    /// `CURRENT` on every axis, i.e. the observing core itself.
    pub fn is_self(&self) -> bool {
        self.x == Direction::Current && self.y == Direction::Current && self.z == Direction::Current
    }
}

/// The reserved `mux` slots that read a register instead of a neighbour.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SpecialDirection {
    Pc,
    Membank,
}

impl SpecialDirection {
    /// The `mux` code, which is also the preprocessor substitution.
    pub fn code(self) -> u8 {
        match self {
            SpecialDirection::Pc => 6,
            SpecialDirection::Membank => 7,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DecodedDirection {
    Core(CoreDirection),
    Special(SpecialDirection),
}

const CODES: [(u8, (Direction, Direction, Direction)); 6] = [
    (0, (Direction::Current, Direction::Current, Direction::Current)),
    (1, (Direction::Before, Direction::Current, Direction::Current)),
    (2, (Direction::After, Direction::Current, Direction::Current)),
    (3, (Direction::Current, Direction::Before, Direction::Current)),
    (4, (Direction::Current, Direction::After, Direction::Current)),
    (5, (Direction::Current, Direction::Current, Direction::After)),
];

/// Encodes a direction tuple into its `mux` code.
///
/// Fails with `InvalidDirection` for tuples without a code (diagonals and
/// z `BEFORE`).
pub fn encode(direction: &CoreDirection) -> Result<u8> {
    let tuple = (direction.x, direction.y, direction.z);
    CODES
        .iter()
        .find(|(_, candidate)| *candidate == tuple)
        .map(|(code, _)| *code)
        .ok_or_else(|| CpuException::invalid_direction(pack_offsets(direction)))
}

/// Decodes a `mux` value.
///
/// Total on the three-bit range; anything wider fails with
/// `InvalidDirection`.
pub fn decode(mux: u8) -> Result<DecodedDirection> {
    if let Some((_, (x, y, z))) = CODES.iter().find(|(code, _)| *code == mux) {
        return Ok(DecodedDirection::Core(CoreDirection::new(*x, *y, *z)));
    }

    match mux {
        m if m == SpecialDirection::Pc.code() => {
            Ok(DecodedDirection::Special(SpecialDirection::Pc))
        }
        m if m == SpecialDirection::Membank.code() => {
            Ok(DecodedDirection::Special(SpecialDirection::Membank))
        }
        other => Err(CpuException::invalid_direction(other)),
    }
}

// Error payload for an unencodable tuple: the per-axis offsets squeezed
// into one diagnostic byte, two bits per axis, `BEFORE` = 0.
fn pack_offsets(direction: &CoreDirection) -> u8 {
    let bits = |d: Direction| (d.offset() + 1) as u8;
    bits(direction.x) << 4 | bits(direction.y) << 2 | bits(direction.z)
}
