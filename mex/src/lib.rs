//! Runner for mesh programs: assembles or loads an image, then executes
//! the grid to termination.

use std::io::Read;

use meshcpu::error::Result;
use meshcpu::Cpu;


/// Builds a machine from assembly source.
pub fn prepare_source(source: &str) -> Result<Cpu> {
    let image = masm::assemble_source(source)?;
    masm::load_binary(&mut &image[..])
}

/// Builds a machine from a binary image.
pub fn prepare_image<R: Read>(reader: &mut R) -> Result<Cpu> {
    masm::load_binary(reader)
}

/// Assembles and runs a program, returning the result byte.
pub fn run_source(source: &str) -> Result<u8> {
    prepare_source(source)?.start()
}

/// Loads and runs an image, returning the result byte.
pub fn run_image<R: Read>(reader: &mut R) -> Result<u8> {
    prepare_image(reader)?.start()
}
