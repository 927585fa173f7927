/// Longest LEB128 encoding of a u64
const MAX_VARINT_LEN: usize = 10;

/// Append `value` as LEB128, low seven bits first
pub fn encode_varint_u64(value: u64, buf: &mut Vec<u8>) {
    let mut rest = value;
    while rest >= 0x80 {
        buf.push((rest & 0x7F) as u8 | 0x80);
        rest >>= 7;
    }
    buf.push(rest as u8);
}

pub fn encode_varint(value: u32, buf: &mut Vec<u8>) {
    encode_varint_u64(u64::from(value), buf);
}

/// Decode a LEB128 u64 from the front of `buf`.
///
/// Returns the value and the number of bytes it took, or `None` when the
/// encoding runs off the end of `buf` or does not fit in 64 bits.
pub fn decode_varint_u64(buf: &[u8]) -> Option<(u64, usize)> {
    let mut value = 0u64;

    for (i, &byte) in buf.iter().take(MAX_VARINT_LEN).enumerate() {
        let bits = u64::from(byte & 0x7F);
        // The tenth byte only has room for the top bit
        if i == MAX_VARINT_LEN - 1 && bits > 1 {
            return None;
        }
        value |= bits << (7 * i);
        if byte & 0x80 == 0 {
            return Some((value, i + 1));
        }
    }

    None
}

/// Decode a LEB128 value that must fit in a u32
pub fn decode_varint(buf: &[u8]) -> Option<(u32, usize)> {
    decode_varint_u64(buf).and_then(|(value, len)| Some((u32::try_from(value).ok()?, len)))
}

/// Append a varint byte length followed by the UTF-8 bytes
pub fn encode_str(value: &str, buf: &mut Vec<u8>) {
    encode_varint_u64(value.len() as u64, buf);
    buf.extend_from_slice(value.as_bytes());
}
