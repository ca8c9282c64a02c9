//! Simulator for a spatial mesh of byte-wide cores.
//!
//! Cores are arranged in a three dimensional grid and have no shared data
//! memory; instead, a core imports values by *peeking* at a neighbour's
//! accumulator through a preload port. Which neighbour is observed is
//! selected by the three-bit `mux` field of the first status register
//! (see [`direction`](direction/index.html)).
//!
//! Each simulation tick has two phases: first every core runs its preload
//! phase, then every core fetches and executes a single instruction from
//! its memory bank. The phase split guarantees that an imported value is
//! always the neighbour's state from the start of the tick (see
//! [`Cpu::tick`](cpu/struct.Cpu.html#method.tick)).

pub mod constants;
pub mod core;
pub mod cpu;
pub mod direction;
pub mod error;
pub mod grid;
pub mod instruction;
pub mod memory;
pub mod registers;
pub mod settings;


/// Index of an instruction bank, as used by block labels in assembly source.
pub type BlockId = u8;

/// A parsed instruction: mnemonic plus raw byte arguments.
pub type AstNode = (String, Vec<u8>);

/// Late-bindable constant slots: for each variable letter (`a` = 0), the
/// `(bank, offset)` load sites that can be patched before a run.
pub type Variables = Vec<Vec<(BlockId, u8)>>;

pub use crate::core::Core;
pub use crate::cpu::Cpu;
pub use crate::error::{CpuException, ExceptionKind, Result};
pub use crate::grid::CoreGrid;
pub use crate::instruction::Instruction;
pub use crate::memory::Memory;
pub use crate::registers::Registers;
pub use crate::settings::{SettingMap, Settings};
