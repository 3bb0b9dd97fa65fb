//! LEB128 encoding for `u32`.
//!
//! Seven value bits per byte, least significant group first; the high bit is
//! set on every byte except the last.

/// Longest encoding of a `u32`.
pub const MAX_VAR_U32_LEN: usize = 5;

/// Append the LEB128 encoding of `value` to `out`.
pub fn encode_var_u32(mut value: u32, out: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Encoded length in bytes: `ceil(bitlength(value) / 7)`, at least 1.
pub fn var_u32_len(value: u32) -> usize {
    let bits = 32 - value.leading_zeros() as usize;
    bits.div_ceil(7).max(1)
}

/// Decode a LEB128 `u32` from the start of `bytes`.
///
/// Returns the value and the number of bytes consumed, or `None` if the input
/// is truncated, longer than 5 bytes, or overflows 32 bits.
pub fn decode_var_u32(bytes: &[u8]) -> Option<(u32, usize)> {
    let mut result: u32 = 0;
    for (i, &byte) in bytes.iter().enumerate().take(MAX_VAR_U32_LEN) {
        let group = (byte & 0x7f) as u32;
        if i == MAX_VAR_U32_LEN - 1 && group > 0x0f {
            return None;
        }
        result |= group << (7 * i);
        if byte & 0x80 == 0 {
            return Some((result, i + 1));
        }
    }
    None
}
