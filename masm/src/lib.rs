//! Assembler for the [meshcpu](../meshcpu/index.html) processor mesh.
//!
//! The toolchain is a pipeline of four operations, each usable on its own:
//! [`preprocess`](fn.preprocess.html) rewrites the symbolic direction names
//! to their numeric forms, [`build_ast`](fn.build_ast.html) parses the text
//! into the abstract instruction stream, [`assemble`](fn.assemble.html)
//! emits the binary image, and [`load_binary`](fn.load_binary.html)
//! reconstructs a runnable [`Cpu`](../meshcpu/cpu/struct.Cpu.html) from an
//! image. [`assemble_source`](fn.assemble_source.html) chains the first
//! three.
//!
//! Parsing is implemented with [pest]; parse failures are reported as the
//! common [`CpuException`](../meshcpu/error/struct.CpuException.html)
//! family with the offending source line attached.
//!
//! # Mesh Assembly Language
//!
//! A program is a run of *settings* followed by labelled *blocks*. Blank
//! lines are skipped and `;` starts a comment that runs to the end of the
//! line.
//!
//! ## Settings
//!
//! Settings look like `.name value[, value]*`, appear before the first
//! block, and describe the machine the program expects:
//!
//! Directive     | Meaning
//! --------------|---------------------------------------------------
//! `.cores`      | grid extents along x, y and z
//! `.mem_number` | number of instruction banks
//! `.mem_size`   | instructions per bank
//! `.mem_map`    | bank wired to each core, one entry per core
//!
//! Every value must fit in a byte. A repeated directive overwrites the
//! earlier one.
//!
//! ## Blocks
//!
//! A line `N:` opens instruction bank `N`; the instructions that follow
//! are assembled into that bank in order. Once the first block has been
//! opened, no further settings are accepted.
//!
//! ## Instructions
//!
//! Three-letter mnemonics with an optional comma-separated argument list.
//! The special forms `LCL x` / `LCH x` (a single lowercase letter) declare
//! a *variable*: the letter names a late-bindable constant slot and the
//! assembler records the load site so a runner can patch the immediate
//! before starting the machine.
//!
//! Mnemonic | Arguments | Effect
//! ---------|-----------|------------------------------------------------
//! `NOP`    |           | does nothing
//! `SYN`    |           | hides the core from neighbours for one tick
//! `CTC`    |           | toggles the `ctc` bit
//! `CTV`    | `0` or `1`| sets the `ctc` bit
//! `DBG`    |           | emits the register file to the log
//! `HCF`    |           | halt and catch fire (aborts the simulation)
//! `HLT`    |           | halts the core
//! `MXD`    |           | `val` = import (raw copy)
//! `MXL`    |           | `val` = import, setting `zero`/`negative`
//! `MXA`    |           | `val` += import (sign-aware)
//! `MXS`    |           | `val` -= import (sign-aware)
//! `MUX`    | code, or one offset per axis | selects the import direction
//! `LCL`    | nibble or letter | loads the low nibble of `val`
//! `LCH`    | nibble or letter | loads the high nibble of `val`
//! `JLZ`    | offset    | jumps if `negative`
//! `JEZ`    | offset    | jumps if `zero`
//! `JGZ`    | offset    | jumps if neither `negative` nor `zero`
//! `JMP`    | offset    | always jumps
//! `LSL`    |           | shifts `val` left, ejecting into `carry`
//! `LSR`    |           | shifts `val` right, ejecting into `carry`
//! `CAD`    | optional nibble | adds the operand or the import to `val`
//! `CSU`    | optional nibble | subtracts the operand or the import
//! `CAN`    | optional nibble | ands the operand or the import
//! `COR`    | optional nibble | ors the operand or the import
//!
//! Jump offsets are relative to the jump itself and wrap inside the bank;
//! they must fit four-bit two's complement.
//!
//! ## Directions
//!
//! The preprocessor substitutes `BEFORE`, `CURRENT`, `AFTER`, `PC` and
//! `MEMBANK` with their numeric encodings before parsing. The substitution
//! is purely textual, exactly like the hardware vendor's tool: the names
//! are rewritten wherever they appear, comments included.
//!
//! [pest]: https://docs.rs/pest/

mod ast;
mod parser;


use std::io::{self, BufRead, Read, Write};

pub use crate::ast::{build_ast, Ast};

use meshcpu::direction::{self, SpecialDirection};
use meshcpu::error::{CpuException, Result};
use meshcpu::instruction;
use meshcpu::{Cpu, Memory, SettingMap, Settings, Variables};
use mexfile::Image;

/// Rewrites the reserved direction names to their numeric forms.
///
/// Purely lexical, line by line; no tokenization happens here.
pub fn preprocess<R: BufRead, W: Write>(input: R, output: &mut W) -> io::Result<()> {
    let substitutions = [
        ("BEFORE", direction::BEFORE.to_string()),
        ("CURRENT", direction::CURRENT.to_string()),
        ("AFTER", direction::AFTER.to_string()),
        ("PC", SpecialDirection::Pc.code().to_string()),
        ("MEMBANK", SpecialDirection::Membank.code().to_string()),
    ];

    for line in input.lines() {
        let mut line = line?;
        for (name, replacement) in &substitutions {
            line = line.replace(name, replacement);
        }
        writeln!(output, "{}", line)?;
    }
    Ok(())
}

/// Emits the binary image for a parsed program.
///
/// Encoding failures carry the bank id and the one-based instruction
/// position within the bank.
pub fn assemble<W: Write>(
    ast: &Ast,
    setting_map: &SettingMap,
    variables: &Variables,
    output: &mut W,
) -> Result<()> {
    let settings = Settings::from_map(setting_map)?;

    if variables.len() > 0xFF {
        return Err(CpuException::image_too_large(format!(
            "{} variables, the table supports at most 255",
            variables.len()
        )));
    }
    for (index, sites) in variables.iter().enumerate() {
        if sites.len() > 0xFF {
            return Err(CpuException::image_too_large(format!(
                "variable {} has {} load sites, at most 255 fit",
                index,
                sites.len()
            )));
        }
    }

    let mut banks = Vec::with_capacity(ast.len());
    for (&bank_id, nodes) in ast {
        if nodes.len() > 0xFF {
            return Err(CpuException::image_too_large(format!(
                "block {} exceeds 255 instructions",
                bank_id
            )));
        }

        let mut opcodes = Vec::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            let instruction = instruction::create(node)
                .map_err(|err| err.with_location(bank_id, index + 1))?;
            opcodes.push(instruction::dump(&instruction));
        }
        banks.push((bank_id, opcodes));
    }

    let image = Image::from(settings, variables.clone(), banks);
    mexfile::write(output, &image).map_err(CpuException::from)
}

/// Preprocesses, parses and assembles in one go, returning the image bytes.
pub fn assemble_source(input: &str) -> Result<Vec<u8>> {
    let mut preprocessed = Vec::new();
    preprocess(input.as_bytes(), &mut preprocessed)?;
    let text = String::from_utf8(preprocessed)
        .map_err(|err| CpuException::syntax(err.to_string()))?;

    let (ast, settings, variables) = build_ast(&text)?;

    let mut image = Vec::new();
    assemble(&ast, &settings, &variables, &mut image)?;
    Ok(image)
}

/// Reconstructs a runnable machine from a binary image.
///
/// The exact inverse of [`assemble`](fn.assemble.html): settings, the
/// core-to-bank map, the variable table, then banks until end of stream. A
/// stream that ends inside a record fails with `TruncatedImage`; a bank
/// that holds more instructions than `mem_size` fails with
/// `ImageTooLarge`.
pub fn load_binary<R: Read>(input: &mut R) -> Result<Cpu> {
    let image = mexfile::read(input).map_err(CpuException::from)?;
    let (settings, variables, banks) = image.into_parts();
    settings.validate()?;

    let mut memory = Memory::new(&settings);
    for (bank_id, opcodes) in banks {
        if opcodes.len() > settings.mem_size as usize {
            return Err(CpuException::image_too_large(format!(
                "using {} instructions out of a maximum of {} in membank {}",
                opcodes.len(),
                settings.mem_size,
                bank_id
            )));
        }
        let bank = memory.bank_mut(bank_id)?;
        bank[..opcodes.len()].copy_from_slice(&opcodes);
    }

    Cpu::new(settings, memory, variables)
}
