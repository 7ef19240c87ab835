use crate::operation::{OpError, Operand, OperandWidth};

/// Parses operand text as typed into an operations form.
///
/// Digits are hexadecimal unless marked otherwise: `0x`, `$` or a trailing
/// `h` are explicit hex, `#` is decimal and `%` is binary. A leading
/// `-` is only accepted for signed operands. Hex and binary literals are raw
/// bits; for signed operands they are reinterpreted as two's complement.
pub fn parse_operand(text: &str, width: OperandWidth, signed: bool) -> Result<Operand, OpError> {
    let text = text.trim();
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, text),
    };

    let (radix, digits) = split_radix(body);
    let digits: String = digits.chars().filter(|c| *c != '_').collect();
    if digits.is_empty() || digits.starts_with('+') {
        return Err(OpError::InvalidOperand);
    }
    let magnitude = u64::from_str_radix(&digits, radix).map_err(|_| OpError::InvalidOperand)?;

    if negative {
        if !signed || magnitude > i64::MAX as u64 + 1 {
            return Err(OpError::InvalidOperand);
        }
        return Operand::signed((magnitude as i64).wrapping_neg(), width);
    }

    if !signed {
        return Operand::unsigned(magnitude, width);
    }

    if radix == 10 {
        let value = i64::try_from(magnitude).map_err(|_| OpError::InvalidOperand)?;
        Operand::signed(value, width)
    } else {
        let raw = Operand::unsigned(magnitude, width)?;
        Operand::signed(width.sign_extend(raw.value()), width)
    }
}

fn split_radix(body: &str) -> (u32, &str) {
    if let Some(rest) = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
        .or_else(|| body.strip_prefix('$'))
    {
        (16, rest)
    } else if let Some(rest) = body.strip_prefix('%') {
        (2, rest)
    } else if let Some(rest) = body.strip_prefix('#') {
        (10, rest)
    } else if let Some(rest) = body.strip_suffix('h').or_else(|| body.strip_suffix('H')) {
        (16, rest)
    } else {
        (16, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        for text in ["FF", "0xff", "$FF", "0FFh", " ff "] {
            let op = parse_operand(text, OperandWidth::Byte, false).unwrap();
            assert_eq!(op.value(), 0xFF, "input {:?}", text);
        }
        let op = parse_operand("DEAD_BEEF", OperandWidth::Dword, false).unwrap();
        assert_eq!(op.value(), 0xDEAD_BEEF);
    }

    #[test]
    fn test_parse_decimal_and_binary() {
        assert_eq!(
            parse_operand("#200", OperandWidth::Byte, false).unwrap().value(),
            200
        );
        assert_eq!(
            parse_operand("%1010", OperandWidth::Byte, false).unwrap().value(),
            0b1010
        );
        // A leading 0b is still hex.
        assert_eq!(
            parse_operand("0b", OperandWidth::Byte, false).unwrap().value(),
            0x0B
        );
    }

    #[test]
    fn test_parse_signed() {
        let op = parse_operand("-#1", OperandWidth::Word, true).unwrap();
        assert_eq!(op.signed_value(), -1);
        assert_eq!(op.value(), 0xFFFF);

        // Hex literals are raw bits.
        let op = parse_operand("80", OperandWidth::Byte, true).unwrap();
        assert_eq!(op.signed_value(), -128);

        // Decimal literals are values and must fit the signed range.
        assert_eq!(
            parse_operand("#128", OperandWidth::Byte, true),
            Err(OpError::InvalidOperand)
        );
        assert_eq!(
            parse_operand("-#128", OperandWidth::Byte, true).unwrap().value(),
            0x80
        );
        assert_eq!(
            parse_operand("-8000000000000000", OperandWidth::Qword, true)
                .unwrap()
                .signed_value(),
            i64::MIN
        );
    }

    #[test]
    fn test_parse_rejects() {
        assert_eq!(
            parse_operand("", OperandWidth::Byte, false),
            Err(OpError::InvalidOperand)
        );
        assert_eq!(
            parse_operand("0x", OperandWidth::Byte, false),
            Err(OpError::InvalidOperand)
        );
        assert_eq!(
            parse_operand("XYZ", OperandWidth::Byte, false),
            Err(OpError::InvalidOperand)
        );
        assert_eq!(
            parse_operand("100", OperandWidth::Byte, false),
            Err(OpError::InvalidOperand)
        );
        assert_eq!(
            parse_operand("-1", OperandWidth::Byte, false),
            Err(OpError::InvalidOperand)
        );
        assert_eq!(
            parse_operand("+1", OperandWidth::Byte, false),
            Err(OpError::InvalidOperand)
        );
    }
}
