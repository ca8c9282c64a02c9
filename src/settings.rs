use std::collections::BTreeMap;
use std::io::{Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt};

use crate::error::{CpuException, Result};

/// Raw `.name value[, value]*` directives collected by the assembler
/// parser; an ordered map so downstream output is deterministic.
pub type SettingMap = BTreeMap<String, Vec<u8>>;

/// The architectural parameters of a machine, as written in the source
/// header and serialized at the start of the binary image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Grid extents along x, y and z.
    pub cores: [u8; 3],
    /// Number of instruction banks.
    pub mem_number: u8,
    /// Instructions per bank.
    pub mem_size: u8,
    /// Core id to bank index, one entry per core.
    pub mem_map: Vec<u8>,
}

impl Settings {
    /// Builds and validates settings from parsed directives.
    pub fn from_map(map: &SettingMap) -> Result<Settings> {
        let cores = required(map, "cores")?;
        if cores.len() != 3 {
            return Err(CpuException::syntax(format!(
                ".cores expects 3 values, found {}",
                cores.len()
            )));
        }

        let settings = Settings {
            cores: [cores[0], cores[1], cores[2]],
            mem_number: scalar(map, "mem_number")?,
            mem_size: scalar(map, "mem_size")?,
            mem_map: required(map, "mem_map")?.clone(),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Total number of cores in the grid.
    pub fn core_count(&self) -> usize {
        self.cores.iter().map(|&extent| extent as usize).product()
    }

    pub fn validate(&self) -> Result<()> {
        if self.cores.iter().any(|&extent| extent == 0) {
            return Err(CpuException::syntax("core grid extents must be at least 1"));
        }
        if self.mem_number == 0 || self.mem_size == 0 {
            return Err(CpuException::syntax(
                "mem_number and mem_size must be at least 1",
            ));
        }
        if self.core_count() > 0xFF {
            return Err(CpuException::image_too_large(format!(
                "{} cores, the core map supports at most 255",
                self.core_count()
            )));
        }
        if self.mem_map.len() != self.core_count() {
            return Err(CpuException::syntax(format!(
                "mem_map has {} entries for {} cores",
                self.mem_map.len(),
                self.core_count()
            )));
        }
        if let Some(&bank) = self.mem_map.iter().find(|&&bank| bank >= self.mem_number) {
            return Err(CpuException::bad_access(bank, 0));
        }
        Ok(())
    }

    /// Writes the `[settings]` and `[core_to_mem_map]` image sections.
    pub fn dump<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for &extent in &self.cores {
            writer.write_u8(extent)?;
        }
        writer.write_u8(self.mem_number)?;
        writer.write_u8(self.mem_size)?;

        debug_assert!(self.mem_map.len() <= 0xFF);
        writer.write_u8(self.mem_map.len() as u8)?;
        writer.write_all(&self.mem_map)?;
        Ok(())
    }

    /// Reads back what [`dump`](#method.dump) wrote. Validation is left to
    /// the caller so a truncated stream surfaces as such.
    pub fn load<R: Read>(reader: &mut R) -> std::io::Result<Settings> {
        let mut cores = [0u8; 3];
        reader.read_exact(&mut cores)?;
        let mem_number = reader.read_u8()?;
        let mem_size = reader.read_u8()?;

        let map_len = reader.read_u8()?;
        let mut mem_map = vec![0; map_len as usize];
        reader.read_exact(&mut mem_map)?;

        Ok(Settings {
            cores,
            mem_number,
            mem_size,
            mem_map,
        })
    }
}

fn required<'a>(map: &'a SettingMap, name: &str) -> Result<&'a Vec<u8>> {
    map.get(name)
        .ok_or_else(|| CpuException::syntax(format!("missing .{} directive", name)))
}

fn scalar(map: &SettingMap, name: &str) -> Result<u8> {
    let values = required(map, name)?;
    if values.len() != 1 {
        return Err(CpuException::syntax(format!(
            ".{} expects 1 value, found {}",
            name,
            values.len()
        )));
    }
    Ok(values[0])
}
