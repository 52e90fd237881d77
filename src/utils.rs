/// Reassemble a little-endian two's-complement 16-bit value
pub fn le_i16(low: u8, high: u8) -> i16 {
    i16::from_le_bytes([low, high])
}

/// Split a 6-byte burst (X, Y, Z; low byte first) into signed axis values
pub fn decode_xyz(bytes: &[u8; 6]) -> [i16; 3] {
    [
        le_i16(bytes[0], bytes[1]),
        le_i16(bytes[2], bytes[3]),
        le_i16(bytes[4], bytes[5]),
    ]
}
