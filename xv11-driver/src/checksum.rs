use crate::constants::{CHECKSUM_DATA_SIZE, CHECKSUM_FOLD_SHIFT, CHECKSUM_MASK};
use crate::numeric::to_u16_le;
use xv11_data::Frame;

/// Computes the XV11 checksum over the first 20 bytes of `frame`.
///
/// Each little-endian word is added after shifting the accumulator left by
/// one. The accumulator grows to about 26 bits before it is folded, so it
/// must not be truncated to 16 bits on the way.
pub fn calc_checksum(frame: &Frame) -> u16 {
    let bytes = frame.as_bytes();
    let cs: u32 = (0..CHECKSUM_DATA_SIZE)
        .step_by(2)
        .map(|i| to_u16_le(bytes[i], bytes[i + 1]) as u32)
        .fold(0u32, |acc, word| (acc << 1) + word);
    (((cs & CHECKSUM_MASK) + (cs >> CHECKSUM_FOLD_SHIFT)) & CHECKSUM_MASK) as u16
}
