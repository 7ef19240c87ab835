use crate::buffer::ByteBuffer;
use crate::operation::{ByteRange, Endianness, OpError, Operand, OperandWidth, OperatorKind};
use log::debug;

/// Applies an operator chunk by chunk over a byte range.
///
/// The range is walked in strides of the operand width. Trailing bytes that
/// do not fill a whole chunk are left untouched. Every check runs before the
/// first write, so a returned error means the buffer was not modified.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperatorApplier {
    pub endianness: Endianness,
}

impl OperatorApplier {
    pub fn new(endianness: Endianness) -> Self {
        Self { endianness }
    }

    /// Returns the number of chunks written.
    pub fn apply<B: ByteBuffer + ?Sized>(
        &self,
        buffer: &mut B,
        range: ByteRange,
        kind: OperatorKind,
        operand: Operand,
    ) -> Result<usize, OpError> {
        let index_range = range.to_index_range(buffer.len())?;
        let width = operand.width();
        if index_range.len() < width.bytes() {
            return Err(OpError::InvalidOperand);
        }
        if kind.is_shift() && operand.is_signed() && operand.signed_value() < 0 {
            return Err(OpError::InvalidOperand);
        }
        if kind == OperatorKind::Div && operand.is_zero() {
            return Err(OpError::DivideByZero);
        }

        let bytes = buffer
            .bytes_mut(index_range)
            .ok_or(OpError::OutOfRange)?;

        let mut modified = 0;
        for chunk in bytes.chunks_exact_mut(width.bytes()) {
            let lhs = self.read_chunk(chunk);
            let result = compute(kind, lhs, operand);
            self.write_chunk(chunk, result);
            modified += 1;
        }

        debug!(
            "{} {} over {} bytes at 0x{:X}: {} chunk(s)",
            kind, operand, range.length, range.offset, modified
        );
        Ok(modified)
    }

    fn read_chunk(&self, chunk: &[u8]) -> u64 {
        let fold = |acc: u64, b: &u8| (acc << 8) | u64::from(*b);
        match self.endianness {
            Endianness::Little => chunk.iter().rev().fold(0, fold),
            Endianness::Big => chunk.iter().fold(0, fold),
        }
    }

    fn write_chunk(&self, chunk: &mut [u8], value: u64) {
        let len = chunk.len();
        for (i, byte) in chunk.iter_mut().enumerate() {
            let shift = match self.endianness {
                Endianness::Little => i * 8,
                Endianness::Big => (len - 1 - i) * 8,
            };
            *byte = (value >> shift) as u8;
        }
    }
}

/// Applies the operator with the default (little-endian) applier.
pub fn apply<B: ByteBuffer + ?Sized>(
    buffer: &mut B,
    range: ByteRange,
    kind: OperatorKind,
    operand: Operand,
) -> Result<usize, OpError> {
    OperatorApplier::default().apply(buffer, range, kind, operand)
}

/// Computes `lhs <kind> operand` modulo the operand width. The divisor must
/// already be known to be non-zero.
fn compute(kind: OperatorKind, lhs: u64, operand: Operand) -> u64 {
    let width: OperandWidth = operand.width();
    let bits = u64::from(width.bits());
    let rhs = operand.value();

    let result = match kind {
        OperatorKind::Or => lhs | rhs,
        OperatorKind::Xor => lhs ^ rhs,
        OperatorKind::And => lhs & rhs,
        OperatorKind::Shl => {
            if rhs >= bits {
                0
            } else {
                lhs << rhs
            }
        }
        OperatorKind::Shr => {
            if operand.is_signed() {
                // Shifting by bits - 1 already fills the chunk with the sign.
                let count = rhs.min(bits - 1);
                (width.sign_extend(lhs) >> count) as u64
            } else if rhs >= bits {
                0
            } else {
                lhs >> rhs
            }
        }
        OperatorKind::Add => lhs.wrapping_add(rhs),
        OperatorKind::Sub => lhs.wrapping_sub(rhs),
        OperatorKind::Mul => lhs.wrapping_mul(rhs),
        OperatorKind::Div => {
            if operand.is_signed() {
                width
                    .sign_extend(lhs)
                    .wrapping_div(width.sign_extend(rhs)) as u64
            } else {
                lhs / rhs
            }
        }
    };
    result & width.mask()
}
