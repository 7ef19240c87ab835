use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorKind {
    Or,
    Xor,
    And,
    Shl,
    Shr,
    Add,
    Sub,
    Mul,
    Div,
}

impl std::fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperatorKind::Or => write!(f, "OR"),
            OperatorKind::Xor => write!(f, "XOR"),
            OperatorKind::And => write!(f, "AND"),
            OperatorKind::Shl => write!(f, "SHL"),
            OperatorKind::Shr => write!(f, "SHR"),
            OperatorKind::Add => write!(f, "ADD"),
            OperatorKind::Sub => write!(f, "SUB"),
            OperatorKind::Mul => write!(f, "MUL"),
            OperatorKind::Div => write!(f, "DIV"),
        }
    }
}

impl std::str::FromStr for OperatorKind {
    type Err = OpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperatorKind::all()
            .iter()
            .copied()
            .find(|kind| kind.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or(OpError::InvalidOperand)
    }
}

impl OperatorKind {
    pub fn all() -> &'static [OperatorKind] {
        &[
            OperatorKind::Or,
            OperatorKind::Xor,
            OperatorKind::And,
            OperatorKind::Shl,
            OperatorKind::Shr,
            OperatorKind::Add,
            OperatorKind::Sub,
            OperatorKind::Mul,
            OperatorKind::Div,
        ]
    }

    pub fn is_shift(&self) -> bool {
        matches!(self, OperatorKind::Shl | OperatorKind::Shr)
    }
}

/// Chunk size, in bytes, that a single operator application covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OperandWidth {
    #[default]
    Byte,
    Word,
    Dword,
    Qword,
}

impl OperandWidth {
    pub fn from_bytes(bytes: usize) -> Result<Self, OpError> {
        match bytes {
            1 => Ok(OperandWidth::Byte),
            2 => Ok(OperandWidth::Word),
            4 => Ok(OperandWidth::Dword),
            8 => Ok(OperandWidth::Qword),
            _ => Err(OpError::InvalidOperand),
        }
    }

    pub fn bytes(&self) -> usize {
        match self {
            OperandWidth::Byte => 1,
            OperandWidth::Word => 2,
            OperandWidth::Dword => 4,
            OperandWidth::Qword => 8,
        }
    }

    pub fn bits(&self) -> u32 {
        self.bytes() as u32 * 8
    }

    pub fn mask(&self) -> u64 {
        match self {
            OperandWidth::Qword => u64::MAX,
            _ => (1u64 << self.bits()) - 1,
        }
    }

    /// Reinterprets the low `bits()` of `raw` as a two's complement value.
    pub fn sign_extend(&self, raw: u64) -> i64 {
        let shift = 64 - self.bits();
        ((raw << shift) as i64) >> shift
    }
}

impl std::fmt::Display for OperandWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperandWidth::Byte => write!(f, "Byte"),
            OperandWidth::Word => write!(f, "Word"),
            OperandWidth::Dword => write!(f, "Dword"),
            OperandWidth::Qword => write!(f, "Qword"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Endianness {
    #[default]
    Little,
    Big,
}

/// Right-hand side of an operator. `value` holds the raw bits, already
/// truncated to `width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operand {
    value: u64,
    width: OperandWidth,
    signed: bool,
}

impl Operand {
    pub fn unsigned(value: u64, width: OperandWidth) -> Result<Self, OpError> {
        if value & !width.mask() != 0 {
            return Err(OpError::InvalidOperand);
        }
        Ok(Self {
            value,
            width,
            signed: false,
        })
    }

    pub fn signed(value: i64, width: OperandWidth) -> Result<Self, OpError> {
        if width.sign_extend(value as u64 & width.mask()) != value {
            return Err(OpError::InvalidOperand);
        }
        Ok(Self {
            value: value as u64 & width.mask(),
            width,
            signed: true,
        })
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn signed_value(&self) -> i64 {
        self.width.sign_extend(self.value)
    }

    pub fn width(&self) -> OperandWidth {
        self.width
    }

    pub fn is_signed(&self) -> bool {
        self.signed
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.signed {
            write!(f, "{} ({}, signed)", self.signed_value(), self.width)
        } else {
            write!(
                f,
                "0x{:0width$X} ({})",
                self.value,
                self.width,
                width = self.width.bytes() * 2
            )
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteRange {
    pub offset: u64,
    pub length: u64,
}

impl ByteRange {
    pub fn new(offset: u64, length: u64) -> Self {
        Self { offset, length }
    }

    /// Converts to an index range, provided the range is non-empty and ends
    /// inside a buffer of `buffer_len` bytes.
    pub fn to_index_range(&self, buffer_len: usize) -> Result<std::ops::Range<usize>, OpError> {
        if self.length == 0 {
            return Err(OpError::OutOfRange);
        }
        let end = self
            .offset
            .checked_add(self.length)
            .ok_or(OpError::OutOfRange)?;
        if end > buffer_len as u64 {
            return Err(OpError::OutOfRange);
        }
        let start = usize::try_from(self.offset).map_err(|_| OpError::OutOfRange)?;
        let end = usize::try_from(end).map_err(|_| OpError::OutOfRange)?;
        Ok(start..end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OpError {
    #[error("range lies outside the buffer")]
    OutOfRange,
    #[error("invalid operand")]
    InvalidOperand,
    #[error("division by zero")]
    DivideByZero,
}
