//! The instruction set, its byte encoding and its execution semantics.
//!
//! The factory of the hardware model is the pair [`create`](fn.create.html)
//! (mnemonic + arguments, used by the assembler) and
//! [`decode`](fn.decode.html) (raw opcode byte, used by the pipeline), with
//! [`dump`](fn.dump.html) as the inverse of `decode`. The constructor set is
//! closed and identical for every core, so there is no per-core registry;
//! the match arms below are the registration list.

use log::debug;
use num::FromPrimitive;
use num_derive::FromPrimitive;
use util::EnumFromStr;
use util_derive::EnumFromStr;

use crate::constants;
use crate::direction::{self, CoreDirection, Direction};
use crate::error::{CpuException, Result};
use crate::registers::Registers;
use crate::AstNode;

/// Every mnemonic of the source format.
#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumFromStr)]
pub enum Mnemonic {
    NOP,
    SYN,
    CTC,
    CTV,
    DBG,
    HCF,
    HLT,
    MXD,
    MXL,
    MXA,
    MXS,
    MUX,
    LCL,
    LCH,
    JLZ,
    JEZ,
    JGZ,
    JMP,
    LSL,
    LSR,
    CAD,
    CSU,
    CAN,
    COR,
}

// Selector values of the niladic family (high nibble 0x0).
#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive)]
enum Niladic {
    Nop = 0x0,
    Syn = 0x1,
    Ctc = 0x2,
    Dbg = 0x3,
    Hcf = 0x4,
    Hlt = 0x5,
    Mxd = 0x6,
    Mxl = 0x7,
    Mxa = 0x8,
    Mxs = 0x9,
    Lsl = 0xA,
    Lsr = 0xB,
    Cad = 0xC,
    Csu = 0xD,
    Can = 0xE,
    Cor = 0xF,
}

// Family tags of the immediate-carrying opcodes (high nibble).
#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive)]
enum Family {
    Ctv = 0x1,
    Mux = 0x2,
    Lcl = 0x3,
    Lch = 0x4,
    Jlz = 0x5,
    Jez = 0x6,
    Jgz = 0x7,
    Jmp = 0x8,
    CadImmediate = 0x9,
    CsuImmediate = 0xA,
    CanImmediate = 0xB,
    CorImmediate = 0xC,
}

/// One executable instruction.
///
/// The `CAD`/`CSU`/`CAN`/`COR` group combines `val` with the four-bit
/// immediate when one is given and with the preload register otherwise.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Instruction {
    Nop,
    Syn,
    Ctc,
    Ctv(bool),
    Dbg,
    Hcf,
    Hlt,
    Mxd,
    Mxl,
    Mxa,
    Mxs,
    Mux(u8),
    Lcl(u8),
    Lch(u8),
    Jlz(i8),
    Jez(i8),
    Jgz(i8),
    Jmp(i8),
    Lsl,
    Lsr,
    Cad(Option<u8>),
    Csu(Option<u8>),
    Can(Option<u8>),
    Cor(Option<u8>),
}

/// What the pipeline should do with the program counter after execution.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    /// Advance to the next instruction.
    Next,
    /// Keep the program counter as the instruction left it (stalls and
    /// taken jumps).
    Hold,
    /// The core is done; further steps are no-ops.
    Halt,
}

/// Builds an instruction from a parsed mnemonic and its raw arguments.
pub fn create(node: &AstNode) -> Result<Instruction> {
    let (name, args) = node;
    let mnemonic =
        Mnemonic::from_str(name).map_err(|_| CpuException::unknown_mnemonic(name.as_str()))?;

    match mnemonic {
        Mnemonic::NOP => niladic(mnemonic, args, Instruction::Nop),
        Mnemonic::SYN => niladic(mnemonic, args, Instruction::Syn),
        Mnemonic::CTC => niladic(mnemonic, args, Instruction::Ctc),
        Mnemonic::DBG => niladic(mnemonic, args, Instruction::Dbg),
        Mnemonic::HCF => niladic(mnemonic, args, Instruction::Hcf),
        Mnemonic::HLT => niladic(mnemonic, args, Instruction::Hlt),
        Mnemonic::MXD => niladic(mnemonic, args, Instruction::Mxd),
        Mnemonic::MXL => niladic(mnemonic, args, Instruction::Mxl),
        Mnemonic::MXA => niladic(mnemonic, args, Instruction::Mxa),
        Mnemonic::MXS => niladic(mnemonic, args, Instruction::Mxs),
        Mnemonic::LSL => niladic(mnemonic, args, Instruction::Lsl),
        Mnemonic::LSR => niladic(mnemonic, args, Instruction::Lsr),
        Mnemonic::CTV => {
            let value = single(mnemonic, args)?;
            if value > 1 {
                return Err(CpuException::overflowing_literal(i64::from(value)));
            }
            Ok(Instruction::Ctv(value != 0))
        }
        Mnemonic::MUX => create_mux(args),
        Mnemonic::LCL => Ok(Instruction::Lcl(nibble(mnemonic, args)?)),
        Mnemonic::LCH => Ok(Instruction::Lch(nibble(mnemonic, args)?)),
        Mnemonic::JLZ => Ok(Instruction::Jlz(jump_offset(mnemonic, args)?)),
        Mnemonic::JEZ => Ok(Instruction::Jez(jump_offset(mnemonic, args)?)),
        Mnemonic::JGZ => Ok(Instruction::Jgz(jump_offset(mnemonic, args)?)),
        Mnemonic::JMP => Ok(Instruction::Jmp(jump_offset(mnemonic, args)?)),
        Mnemonic::CAD => Ok(Instruction::Cad(optional_nibble(mnemonic, args)?)),
        Mnemonic::CSU => Ok(Instruction::Csu(optional_nibble(mnemonic, args)?)),
        Mnemonic::CAN => Ok(Instruction::Can(optional_nibble(mnemonic, args)?)),
        Mnemonic::COR => Ok(Instruction::Cor(optional_nibble(mnemonic, args)?)),
    }
}

// `MUX` accepts either the raw three-bit code or one offset per axis, the
// form the preprocessor produces from the direction names.
fn create_mux(args: &[u8]) -> Result<Instruction> {
    match args.len() {
        1 => {
            let code = args[0];
            if code & !constants::MUX_MASK != 0 {
                return Err(CpuException::invalid_direction(code));
            }
            Ok(Instruction::Mux(code))
        }
        3 => {
            let axis = |arg: u8| Direction::from_offset(arg as i8);
            let tuple = CoreDirection::new(axis(args[0])?, axis(args[1])?, axis(args[2])?);
            Ok(Instruction::Mux(direction::encode(&tuple)?))
        }
        found => Err(CpuException::bad_arity("MUX", "1 or 3", found)),
    }
}

fn niladic(mnemonic: Mnemonic, args: &[u8], instruction: Instruction) -> Result<Instruction> {
    if args.is_empty() {
        Ok(instruction)
    } else {
        Err(CpuException::bad_arity(
            format!("{:?}", mnemonic),
            "0",
            args.len(),
        ))
    }
}

fn single(mnemonic: Mnemonic, args: &[u8]) -> Result<u8> {
    if args.len() == 1 {
        Ok(args[0])
    } else {
        Err(CpuException::bad_arity(
            format!("{:?}", mnemonic),
            "1",
            args.len(),
        ))
    }
}

fn nibble(mnemonic: Mnemonic, args: &[u8]) -> Result<u8> {
    let value = single(mnemonic, args)?;
    if value > constants::IMMEDIATE_MAX {
        return Err(CpuException::overflowing_literal(i64::from(value)));
    }
    Ok(value)
}

fn optional_nibble(mnemonic: Mnemonic, args: &[u8]) -> Result<Option<u8>> {
    match args.len() {
        0 => Ok(None),
        1 => Ok(Some(nibble(mnemonic, args)?)),
        found => Err(CpuException::bad_arity(
            format!("{:?}", mnemonic),
            "0 or 1",
            found,
        )),
    }
}

// Jump offsets arrive as bytes; reinterpret as signed and require the
// four-bit two's complement range.
fn jump_offset(mnemonic: Mnemonic, args: &[u8]) -> Result<i8> {
    let offset = single(mnemonic, args)? as i8;
    if offset < constants::JUMP_OFFSET_MIN || offset > constants::JUMP_OFFSET_MAX {
        return Err(CpuException::overflowing_literal(i64::from(offset)));
    }
    Ok(offset)
}

/// Decodes a raw opcode byte.
pub fn decode(opcode: u8) -> Result<Instruction> {
    let family = opcode >> constants::FAMILY_OFFSET;
    let immediate = opcode & constants::IMMEDIATE_MASK;

    if family == 0 {
        let selector = match Niladic::from_u8(immediate) {
            Some(selector) => selector,
            None => return Err(CpuException::unknown_opcode(opcode)),
        };
        return Ok(match selector {
            Niladic::Nop => Instruction::Nop,
            Niladic::Syn => Instruction::Syn,
            Niladic::Ctc => Instruction::Ctc,
            Niladic::Dbg => Instruction::Dbg,
            Niladic::Hcf => Instruction::Hcf,
            Niladic::Hlt => Instruction::Hlt,
            Niladic::Mxd => Instruction::Mxd,
            Niladic::Mxl => Instruction::Mxl,
            Niladic::Mxa => Instruction::Mxa,
            Niladic::Mxs => Instruction::Mxs,
            Niladic::Lsl => Instruction::Lsl,
            Niladic::Lsr => Instruction::Lsr,
            Niladic::Cad => Instruction::Cad(None),
            Niladic::Csu => Instruction::Csu(None),
            Niladic::Can => Instruction::Can(None),
            Niladic::Cor => Instruction::Cor(None),
        });
    }

    let family = match Family::from_u8(family) {
        Some(family) => family,
        None => return Err(CpuException::unknown_opcode(opcode)),
    };

    match family {
        Family::Ctv if immediate <= 1 => Ok(Instruction::Ctv(immediate != 0)),
        Family::Ctv => Err(CpuException::unknown_opcode(opcode)),
        Family::Mux if immediate & !constants::MUX_MASK == 0 => Ok(Instruction::Mux(immediate)),
        Family::Mux => Err(CpuException::unknown_opcode(opcode)),
        Family::Lcl => Ok(Instruction::Lcl(immediate)),
        Family::Lch => Ok(Instruction::Lch(immediate)),
        Family::Jlz => Ok(Instruction::Jlz(sign_extend(immediate))),
        Family::Jez => Ok(Instruction::Jez(sign_extend(immediate))),
        Family::Jgz => Ok(Instruction::Jgz(sign_extend(immediate))),
        Family::Jmp => Ok(Instruction::Jmp(sign_extend(immediate))),
        Family::CadImmediate => Ok(Instruction::Cad(Some(immediate))),
        Family::CsuImmediate => Ok(Instruction::Csu(Some(immediate))),
        Family::CanImmediate => Ok(Instruction::Can(Some(immediate))),
        Family::CorImmediate => Ok(Instruction::Cor(Some(immediate))),
    }
}

/// Encodes an instruction into its opcode byte; the left inverse of
/// [`decode`](fn.decode.html).
pub fn dump(instruction: &Instruction) -> u8 {
    let tagged = |family: Family, immediate: u8| {
        (family as u8) << constants::FAMILY_OFFSET | immediate & constants::IMMEDIATE_MASK
    };

    match *instruction {
        Instruction::Nop => Niladic::Nop as u8,
        Instruction::Syn => Niladic::Syn as u8,
        Instruction::Ctc => Niladic::Ctc as u8,
        Instruction::Dbg => Niladic::Dbg as u8,
        Instruction::Hcf => Niladic::Hcf as u8,
        Instruction::Hlt => Niladic::Hlt as u8,
        Instruction::Mxd => Niladic::Mxd as u8,
        Instruction::Mxl => Niladic::Mxl as u8,
        Instruction::Mxa => Niladic::Mxa as u8,
        Instruction::Mxs => Niladic::Mxs as u8,
        Instruction::Lsl => Niladic::Lsl as u8,
        Instruction::Lsr => Niladic::Lsr as u8,
        Instruction::Cad(None) => Niladic::Cad as u8,
        Instruction::Csu(None) => Niladic::Csu as u8,
        Instruction::Can(None) => Niladic::Can as u8,
        Instruction::Cor(None) => Niladic::Cor as u8,
        Instruction::Ctv(value) => tagged(Family::Ctv, value as u8),
        Instruction::Mux(code) => tagged(Family::Mux, code),
        Instruction::Lcl(value) => tagged(Family::Lcl, value),
        Instruction::Lch(value) => tagged(Family::Lch, value),
        Instruction::Jlz(offset) => tagged(Family::Jlz, offset as u8),
        Instruction::Jez(offset) => tagged(Family::Jez, offset as u8),
        Instruction::Jgz(offset) => tagged(Family::Jgz, offset as u8),
        Instruction::Jmp(offset) => tagged(Family::Jmp, offset as u8),
        Instruction::Cad(Some(value)) => tagged(Family::CadImmediate, value),
        Instruction::Csu(Some(value)) => tagged(Family::CsuImmediate, value),
        Instruction::Can(Some(value)) => tagged(Family::CanImmediate, value),
        Instruction::Cor(Some(value)) => tagged(Family::CorImmediate, value),
    }
}

fn sign_extend(immediate: u8) -> i8 {
    ((immediate << constants::IMMEDIATE_WIDTH) as i8) >> constants::IMMEDIATE_WIDTH
}

/// Whether an opcode byte is an `LCL`/`LCH` encoding, i.e. a legal target
/// for variable late-binding.
pub fn is_variable_site(opcode: u8) -> bool {
    let family = opcode >> constants::FAMILY_OFFSET;
    family == Family::Lcl as u8 || family == Family::Lch as u8
}

/// Replaces the immediate nibble of an `LCL`/`LCH` opcode byte.
pub fn patch_immediate(opcode: u8, value: u8) -> u8 {
    opcode & constants::FAMILY_MASK | value & constants::IMMEDIATE_MASK
}

impl Instruction {
    /// Whether the preload phase must import a neighbour value for this
    /// instruction.
    pub fn needs_import(&self) -> bool {
        matches!(
            self,
            Instruction::Mxd | Instruction::Mxl | Instruction::Mxa | Instruction::Mxs
        )
    }

    /// Executes the instruction against a register file.
    ///
    /// `mem_size` bounds jump targets; the program counter stays inside the
    /// current bank.
    pub fn execute(&self, registers: &mut Registers, mem_size: u8) -> Result<Outcome> {
        match *self {
            Instruction::Nop => Ok(Outcome::Next),
            Instruction::Syn => {
                registers.status1.sync = true;
                Ok(Outcome::Next)
            }
            Instruction::Ctc => {
                registers.status1.ctc = !registers.status1.ctc;
                Ok(Outcome::Next)
            }
            Instruction::Ctv(value) => {
                registers.status1.ctc = value;
                Ok(Outcome::Next)
            }
            Instruction::Dbg => {
                debug!("core {}: {:?}", registers.id, registers);
                Ok(Outcome::Next)
            }
            Instruction::Hcf => Err(CpuException::catastrophic_halt()),
            Instruction::Hlt => Ok(Outcome::Halt),
            Instruction::Mxd => match registers.preload {
                Some(value) => {
                    registers.val = value;
                    Ok(Outcome::Next)
                }
                None => Ok(Outcome::Hold),
            },
            Instruction::Mxl => match registers.preload {
                Some(value) => {
                    registers.val = value;
                    registers.status2.zero = value == 0;
                    registers.status2.negative = registers.preload_negative;
                    Ok(Outcome::Next)
                }
                None => Ok(Outcome::Hold),
            },
            Instruction::Mxa => self.import_arithmetic(registers, false),
            Instruction::Mxs => self.import_arithmetic(registers, true),
            Instruction::Mux(code) => {
                registers.status1.set_mux(code)?;
                Ok(Outcome::Next)
            }
            Instruction::Lcl(value) => {
                registers.val = registers.val & constants::FAMILY_MASK | value;
                Ok(Outcome::Next)
            }
            Instruction::Lch(value) => {
                registers.val =
                    registers.val & constants::IMMEDIATE_MASK | value << constants::IMMEDIATE_WIDTH;
                Ok(Outcome::Next)
            }
            Instruction::Jlz(offset) => {
                let taken = registers.status2.negative;
                jump(registers, mem_size, offset, taken)
            }
            Instruction::Jez(offset) => {
                let taken = registers.status2.zero;
                jump(registers, mem_size, offset, taken)
            }
            Instruction::Jgz(offset) => {
                let taken = !registers.status2.negative && !registers.status2.zero;
                jump(registers, mem_size, offset, taken)
            }
            Instruction::Jmp(offset) => jump(registers, mem_size, offset, true),
            Instruction::Lsl => {
                registers.status2.carry = registers.val & 0x80 != 0;
                let result = registers.val << 1;
                registers.val = result;
                set_zero_negative(registers, result);
                Ok(Outcome::Next)
            }
            Instruction::Lsr => {
                registers.status2.carry = registers.val & 1 != 0;
                let result = registers.val >> 1;
                registers.val = result;
                set_zero_negative(registers, result);
                Ok(Outcome::Next)
            }
            Instruction::Cad(operand) => {
                let operand = resolve(registers, operand);
                add(registers, operand);
                Ok(Outcome::Next)
            }
            Instruction::Csu(operand) => {
                let operand = resolve(registers, operand);
                subtract(registers, operand);
                Ok(Outcome::Next)
            }
            Instruction::Can(operand) => {
                let operand = resolve(registers, operand);
                logic(registers, operand, |a, b| a & b);
                Ok(Outcome::Next)
            }
            Instruction::Cor(operand) => {
                let operand = resolve(registers, operand);
                logic(registers, operand, |a, b| a | b);
                Ok(Outcome::Next)
            }
        }
    }

    // MXA/MXS: fold the import into `val`, honouring the neighbour's sign
    // flag. Stalls until an import is present.
    fn import_arithmetic(&self, registers: &mut Registers, invert: bool) -> Result<Outcome> {
        let value = match registers.preload {
            Some(value) => value,
            None => return Ok(Outcome::Hold),
        };

        if registers.preload_negative != invert {
            subtract(registers, value);
        } else {
            add(registers, value);
        }
        Ok(Outcome::Next)
    }
}

// The CAD group reads an absent preload as zero; only the MX imports stall.
fn resolve(registers: &Registers, operand: Option<u8>) -> u8 {
    operand.unwrap_or_else(|| registers.preload.unwrap_or(0))
}

fn jump(registers: &mut Registers, mem_size: u8, offset: i8, taken: bool) -> Result<Outcome> {
    if !taken {
        return Ok(Outcome::Next);
    }

    let target = (i16::from(registers.pc) + i16::from(offset)).rem_euclid(i16::from(mem_size));
    registers.pc = target as u8;
    Ok(Outcome::Hold)
}

fn set_zero_negative(registers: &mut Registers, result: u8) {
    registers.status2.zero = result == 0;
    registers.status2.negative = result & 0x80 != 0;
}

fn add(registers: &mut Registers, operand: u8) {
    let (result, carry) = registers.val.overflowing_add(operand);
    let (_, overflow) = (registers.val as i8).overflowing_add(operand as i8);
    registers.status2.carry = carry;
    registers.status2.overflow = overflow;
    set_zero_negative(registers, result);
    registers.val = result;
}

fn subtract(registers: &mut Registers, operand: u8) {
    let (result, borrow) = registers.val.overflowing_sub(operand);
    let (_, overflow) = (registers.val as i8).overflowing_sub(operand as i8);
    registers.status2.carry = borrow;
    registers.status2.overflow = overflow;
    set_zero_negative(registers, result);
    registers.val = result;
}

fn logic(registers: &mut Registers, operand: u8, combine: fn(u8, u8) -> u8) {
    let result = combine(registers.val, operand);
    registers.status2.carry = false;
    registers.status2.overflow = false;
    set_zero_negative(registers, result);
    registers.val = result;
}
