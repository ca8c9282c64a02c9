use std::error::Error as StdError;
use std::fmt;
use std::io;

use crate::registers::Registers;

pub type Result<T> = std::result::Result<T, CpuException>;

/// The failure classes of the whole toolchain, from parsing to execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExceptionKind {
    /// A source line that matches no known form.
    Syntax(String),
    /// A setting or instruction argument outside its representable range.
    OverflowingLiteral(i64),
    UnknownMnemonic(String),
    UnknownOpcode(u8),
    BadArity {
        mnemonic: String,
        expected: &'static str,
        found: usize,
    },
    /// A variable slot with no recorded load site.
    UnassignedVariable(usize),
    /// An undecodable `mux` value or an unencodable direction tuple.
    InvalidDirection(u8),
    /// The core with the given id tried to preload from itself.
    SelfFetchForbidden(usize),
    /// The program executed `HCF`.
    CatastrophicHalt,
    /// A count in the binary image would not fit its length byte, or a bank
    /// holds more instructions than the configured bank size.
    ImageTooLarge(String),
    /// The binary image ended in the middle of a record.
    TruncatedImage,
    /// A bank or offset outside the configured memory layout.
    BadAccess { bank: u8, offset: u8 },
    Io(String),
}

impl fmt::Display for ExceptionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExceptionKind::Syntax(message) => write!(f, "syntax error: {}", message),
            ExceptionKind::OverflowingLiteral(value) => {
                write!(f, "literal {} does not fit in a byte", value)
            }
            ExceptionKind::UnknownMnemonic(name) => write!(f, "unknown mnemonic \"{}\"", name),
            ExceptionKind::UnknownOpcode(opcode) => write!(f, "unknown opcode {:#04x}", opcode),
            ExceptionKind::BadArity {
                mnemonic,
                expected,
                found,
            } => write!(
                f,
                "{} expects {} argument(s), found {}",
                mnemonic, expected, found
            ),
            ExceptionKind::UnassignedVariable(index) => {
                write!(f, "variable {} is unassigned", index)
            }
            ExceptionKind::InvalidDirection(value) => {
                write!(f, "invalid direction {:#04x}", value)
            }
            ExceptionKind::SelfFetchForbidden(id) => {
                write!(f, "core {} may not fetch from itself", id)
            }
            ExceptionKind::CatastrophicHalt => f.write_str("halt and catch fire"),
            ExceptionKind::ImageTooLarge(message) => write!(f, "image too large: {}", message),
            ExceptionKind::TruncatedImage => f.write_str("image ended in the middle of a record"),
            ExceptionKind::BadAccess { bank, offset } => {
                write!(f, "access outside memory at bank {}, offset {}", bank, offset)
            }
            ExceptionKind::Io(message) => write!(f, "i/o error: {}", message),
        }
    }
}

/// The single error family of the simulator.
///
/// Context is accumulated while an exception propagates: the parser attaches
/// source lines, the assembler bank and instruction positions, the core a
/// snapshot of its registers.
#[derive(Clone, Debug, PartialEq)]
pub struct CpuException {
    kind: ExceptionKind,
    line: Option<usize>,
    location: Option<(u8, usize)>,
    registers: Option<Registers>,
}

impl CpuException {
    pub fn new(kind: ExceptionKind) -> CpuException {
        CpuException {
            kind,
            line: None,
            location: None,
            registers: None,
        }
    }

    pub fn syntax<S: Into<String>>(message: S) -> CpuException {
        CpuException::new(ExceptionKind::Syntax(message.into()))
    }

    pub fn overflowing_literal(value: i64) -> CpuException {
        CpuException::new(ExceptionKind::OverflowingLiteral(value))
    }

    pub fn unknown_mnemonic<S: Into<String>>(name: S) -> CpuException {
        CpuException::new(ExceptionKind::UnknownMnemonic(name.into()))
    }

    pub fn unknown_opcode(opcode: u8) -> CpuException {
        CpuException::new(ExceptionKind::UnknownOpcode(opcode))
    }

    pub fn bad_arity<S: Into<String>>(
        mnemonic: S,
        expected: &'static str,
        found: usize,
    ) -> CpuException {
        CpuException::new(ExceptionKind::BadArity {
            mnemonic: mnemonic.into(),
            expected,
            found,
        })
    }

    pub fn unassigned_variable(index: usize) -> CpuException {
        CpuException::new(ExceptionKind::UnassignedVariable(index))
    }

    pub fn invalid_direction(value: u8) -> CpuException {
        CpuException::new(ExceptionKind::InvalidDirection(value))
    }

    pub fn self_fetch_forbidden(id: usize) -> CpuException {
        CpuException::new(ExceptionKind::SelfFetchForbidden(id))
    }

    pub fn catastrophic_halt() -> CpuException {
        CpuException::new(ExceptionKind::CatastrophicHalt)
    }

    pub fn image_too_large<S: Into<String>>(message: S) -> CpuException {
        CpuException::new(ExceptionKind::ImageTooLarge(message.into()))
    }

    pub fn truncated_image() -> CpuException {
        CpuException::new(ExceptionKind::TruncatedImage)
    }

    pub fn bad_access(bank: u8, offset: u8) -> CpuException {
        CpuException::new(ExceptionKind::BadAccess { bank, offset })
    }

    pub fn kind(&self) -> &ExceptionKind {
        &self.kind
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn location(&self) -> Option<(u8, usize)> {
        self.location
    }

    pub fn registers(&self) -> Option<&Registers> {
        self.registers.as_ref()
    }

    /// Attaches the source line, keeping an already recorded one.
    pub fn with_line(mut self, line: usize) -> CpuException {
        self.line.get_or_insert(line);
        self
    }

    /// Attaches the bank id and one-based instruction position.
    pub fn with_location(mut self, bank: u8, instruction: usize) -> CpuException {
        self.location.get_or_insert((bank, instruction));
        self
    }

    /// Attaches a register snapshot of the failing core.
    pub fn with_registers(mut self, registers: &Registers) -> CpuException {
        self.registers.get_or_insert_with(|| registers.clone());
        self
    }
}

impl fmt::Display for CpuException {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.kind.fmt(f)?;
        if let Some(line) = self.line {
            write!(f, " at line {}", line)?;
        }
        if let Some((bank, instruction)) = self.location {
            write!(f, " in bank {}, instruction {}", bank, instruction)?;
        }
        if let Some(ref registers) = self.registers {
            write!(f, " ({:?})", registers)?;
        }
        Ok(())
    }
}

impl StdError for CpuException {}

impl From<io::Error> for CpuException {
    fn from(err: io::Error) -> CpuException {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            CpuException::truncated_image()
        } else {
            CpuException::new(ExceptionKind::Io(err.to_string()))
        }
    }
}
