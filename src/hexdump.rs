pub const BYTES_PER_ROW: usize = 16;

/// Formats `data` as classic hexdump rows. `base` is the offset of the first
/// byte; rows are aligned to 16-byte boundaries and padded where the data
/// does not cover the row.
pub fn format_rows(data: &[u8], base: usize) -> Vec<String> {
    let alignment_padding = base % BYTES_PER_ROW;
    let aligned_base = base - alignment_padding;
    let total_rows = (data.len() + alignment_padding).div_ceil(BYTES_PER_ROW);

    (0..total_rows)
        .map(|row_index| {
            let row_start = aligned_base + row_index * BYTES_PER_ROW;
            let mut hex_part = String::with_capacity(3 * BYTES_PER_ROW + 1);
            let mut ascii_part = String::with_capacity(BYTES_PER_ROW);

            for j in 0..BYTES_PER_ROW {
                let current = row_start + j;
                if current >= base && current < base + data.len() {
                    let b = data[current - base];
                    hex_part.push_str(&format!("{:02X} ", b));
                    ascii_part.push(printable(b));
                } else {
                    hex_part.push_str("   ");
                    ascii_part.push(' ');
                }

                if j == 7 {
                    hex_part.push(' ');
                }
            }

            format!("{:08X}  {:<49}| {}", row_start, hex_part, ascii_part)
        })
        .collect()
}

fn printable(byte: u8) -> char {
    if byte.is_ascii_graphic() || byte == b' ' {
        byte as char
    } else {
        '.'
    }
}
