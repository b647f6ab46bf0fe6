//! Little-endian integer encoding used by both file formats

/// Encode a 16-bit value, least significant byte first
pub fn encode_u16(value: u16) -> [u8; 2] {
    [(value & 0xFF) as u8, (value >> 8) as u8]
}

/// Encode a 32-bit value, least significant byte first
pub fn encode_u32(value: u32) -> [u8; 4] {
    [
        (value & 0xFF) as u8,
        ((value >> 8) & 0xFF) as u8,
        ((value >> 16) & 0xFF) as u8,
        (value >> 24) as u8,
    ]
}

/// Decode a 16-bit little-endian value
pub fn decode_u16(bytes: [u8; 2]) -> u16 {
    (bytes[0] as u16) | ((bytes[1] as u16) << 8)
}

/// Decode a 32-bit little-endian value
pub fn decode_u32(bytes: [u8; 4]) -> u32 {
    (bytes[0] as u32)
        | ((bytes[1] as u32) << 8)
        | ((bytes[2] as u32) << 16)
        | ((bytes[3] as u32) << 24)
}

/// Store a 32-bit value into `buf` at `offset`.
///
/// Writes that would run past the end of the buffer are ignored.
pub fn put_u32(buf: &mut [u8], offset: usize, value: u32) {
    if offset + 4 <= buf.len() {
        buf[offset..offset + 4].copy_from_slice(&encode_u32(value));
    }
}

/// Load a 32-bit value from `buf` at `offset`
pub fn get_u32(buf: &[u8], offset: usize) -> Option<u32> {
    let bytes = buf.get(offset..offset + 4)?;
    Some(decode_u32([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Load a 16-bit value from `buf` at `offset`
pub fn get_u16(buf: &[u8], offset: usize) -> Option<u16> {
    let bytes = buf.get(offset..offset + 2)?;
    Some(decode_u16([bytes[0], bytes[1]]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_order() {
        assert_eq!(encode_u16(0x0DC8), [0xC8, 0x0D]);
        assert_eq!(encode_u32(0x0000_0151), [0x51, 0x01, 0x00, 0x00]);
        assert_eq!(encode_u32(0x12345678), [0x78, 0x56, 0x34, 0x12]);
    }

    #[test]
    fn test_decode_matches_std() {
        for value in [0u32, 1, 0xFF, 0x1_0000, 1773400, u32::MAX] {
            assert_eq!(decode_u32(encode_u32(value)), value);
            assert_eq!(encode_u32(value), value.to_le_bytes());
        }
        assert_eq!(decode_u16([0xFF, 0xFF]), 0xFFFF);
    }

    #[test]
    fn test_put_leaves_neighbours() {
        let mut buf = [0xAAu8; 8];
        put_u32(&mut buf, 2, 0x04030201);
        assert_eq!(buf, [0xAA, 0xAA, 0x01, 0x02, 0x03, 0x04, 0xAA, 0xAA]);
    }

    #[test]
    fn test_out_of_range() {
        let mut buf = [0u8; 4];
        put_u32(&mut buf, 2, 0xFFFF_FFFF);
        assert_eq!(buf, [0; 4]);
        assert_eq!(get_u32(&buf, 1), None);
        assert_eq!(get_u16(&buf, 2), Some(0));
        assert_eq!(get_u16(&buf, 3), None);
    }
}
