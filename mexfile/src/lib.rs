//! The binary image format of the mesh toolchain.
//!
//! An image carries everything the loader needs to reconstruct a runnable
//! machine: the settings header with the core-to-bank map, the variable
//! site table, and the instruction banks. All records are byte-oriented:
//!
//! ```text
//! [settings]        cores.x cores.y cores.z mem_number mem_size   (u8 each)
//! [core_to_mem_map] len, then len entries                         (u8 each)
//! [variables]       V, then per variable: K, then K (block, offset) pairs
//! [instructions]    until EOF: bank_id, count, count opcode bytes
//! ```
//!
//! Reading and writing is intentionally dumb; validating the counts against
//! the settings is the loader's business.

use byteorder::{ReadBytesExt, WriteBytesExt};
use std::fs::File;
use std::io::prelude::*;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use meshcpu::{Settings, Variables};

#[derive(Debug, PartialEq)]
pub struct Image {
    settings: Settings,
    variables: Variables,
    banks: Vec<(u8, Vec<u8>)>,
}

impl Image {
    pub fn from(settings: Settings, variables: Variables, banks: Vec<(u8, Vec<u8>)>) -> Image {
        Image {
            settings,
            variables,
            banks,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn banks(&self) -> &[(u8, Vec<u8>)] {
        &self.banks
    }

    pub fn into_parts(self) -> (Settings, Variables, Vec<(u8, Vec<u8>)>) {
        (self.settings, self.variables, self.banks)
    }
}

pub fn read<R: Read>(reader: &mut R) -> std::io::Result<Image> {
    let settings = Settings::load(reader)?;

    let variable_count = reader.read_u8()?;
    let mut variables = Vec::with_capacity(variable_count as usize);
    for _ in 0..variable_count {
        let site_count = reader.read_u8()?;
        let mut sites = Vec::with_capacity(site_count as usize);
        for _ in 0..site_count {
            let block = reader.read_u8()?;
            let offset = reader.read_u8()?;
            sites.push((block, offset));
        }
        variables.push(sites);
    }

    let mut banks = Vec::new();
    loop {
        // A clean end of stream is only legal between banks.
        let bank_id = match reader.read_u8() {
            Ok(bank_id) => bank_id,
            Err(ref err) if err.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(err) => return Err(err),
        };
        let count = reader.read_u8()?;
        let mut opcodes = vec![0; count as usize];
        reader.read_exact(&mut opcodes)?;
        banks.push((bank_id, opcodes));
    }

    Ok(Image::from(settings, variables, banks))
}

pub fn write<W: Write>(writer: &mut W, image: &Image) -> std::io::Result<()> {
    image.settings.dump(writer)?;

    debug_assert!(image.variables.len() <= 0xFF);
    writer.write_u8(image.variables.len() as u8)?;
    for sites in &image.variables {
        debug_assert!(sites.len() <= 0xFF);
        writer.write_u8(sites.len() as u8)?;
        for &(block, offset) in sites {
            writer.write_u8(block)?;
            writer.write_u8(offset)?;
        }
    }

    for (bank_id, opcodes) in &image.banks {
        debug_assert!(opcodes.len() <= 0xFF);
        writer.write_u8(*bank_id)?;
        writer.write_u8(opcodes.len() as u8)?;
        writer.write_all(&opcodes[..])?;
    }
    Ok(())
}

pub trait ReadMexExt: Read + Sized {
    fn read_mex(&mut self) -> std::io::Result<Image> {
        read(self)
    }
}

impl<R: Read + Sized> ReadMexExt for R {}

pub trait WriteMexExt: Write + Sized {
    fn write_mex(&mut self, image: &Image) -> std::io::Result<()> {
        write(self, image)
    }
}

impl<W: Write + Sized> WriteMexExt for W {}

pub fn read_file<P: AsRef<Path>>(path: P) -> std::io::Result<Image> {
    BufReader::new(File::open(path)?).read_mex()
}

pub fn write_file<P: AsRef<Path>>(path: P, image: &Image) -> std::io::Result<()> {
    BufWriter::new(File::create(path)?).write_mex(image)
}

#[cfg(test)]
mod test;
