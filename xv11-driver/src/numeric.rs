pub(crate) fn to_u16_le(low: u8, high: u8) -> u16 {
    ((high as u16) << 8) + (low as u16)
}

/// Formats bytes as lowercase hex pairs separated by spaces.
pub fn to_hex_string(data: &[u8]) -> String {
    data.iter()
        .map(|e| format!("{:02x}", e))
        .collect::<Vec<_>>()
        .join(" ")
}
