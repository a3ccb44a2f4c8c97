use crate::checksum::calc_checksum;
use crate::constants::{MAX_INDEX, MIN_INDEX, START_MARKER};
use crate::error::Xv11Error;
use crate::numeric::to_hex_string;
use xv11_data::Frame;

/// Turns a flushed candidate into a frame if it has the fixed length.
pub(crate) fn to_frame(candidate: &[u8]) -> Result<Frame, Xv11Error> {
    Frame::try_from(candidate).map_err(|_| Xv11Error::InvalidFrameLength(candidate.len()))
}

pub(crate) fn is_start_marker(byte: u8) -> bool {
    byte == START_MARKER
}

fn err_if_invalid_start_marker(frame: &Frame) -> Result<(), Xv11Error> {
    match is_start_marker(frame.start_marker()) {
        true => Ok(()),
        false => Err(Xv11Error::InvalidStartMarker(frame.start_marker())),
    }
}

fn err_if_index_out_of_range(frame: &Frame) -> Result<(), Xv11Error> {
    match (MIN_INDEX..=MAX_INDEX).contains(&frame.index()) {
        true => Ok(()),
        false => Err(Xv11Error::IndexOutOfRange(frame.index())),
    }
}

pub(crate) fn err_if_checksum_mismatched(frame: &Frame) -> Result<(), Xv11Error> {
    let calculated = calc_checksum(frame);
    let expected = frame.stored_checksum();
    match calculated != expected {
        true => Err(Xv11Error::ChecksumMismatch(expected, calculated)),
        false => Ok(()),
    }
}

/// Checks the start marker, the rotation index and the checksum, in that
/// order, and reports the first one that fails.
pub fn validate_frame(frame: &Frame) -> Result<(), Xv11Error> {
    err_if_invalid_start_marker(frame)?;
    err_if_index_out_of_range(frame)?;
    err_if_checksum_mismatched(frame)?;
    Ok(())
}

/// Returns whether `frame` is a structurally valid XV11 frame.
pub fn is_valid_frame(frame: &Frame) -> bool {
    match validate_frame(frame) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!("rejected frame [{}]: {e}", to_hex_string(frame.as_bytes()));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::to_u16_le;

    fn zero_frame() -> [u8; 22] {
        let mut bytes = [0u8; 22];
        bytes[0] = 0xFA;
        bytes[1] = 0xA0;
        bytes[20] = 0x83;
        bytes[21] = 0x76;
        bytes
    }

    fn with_checksum(mut bytes: [u8; 22]) -> Frame {
        let cs = calc_checksum(&Frame::new(bytes)).to_le_bytes();
        bytes[20] = cs[0];
        bytes[21] = cs[1];
        Frame::new(bytes)
    }

    #[test]
    fn test_to_frame() {
        assert!(to_frame(&zero_frame()).is_ok());
        assert!(matches!(
            to_frame(&[0xFA, 0x01]),
            Err(Xv11Error::InvalidFrameLength(2))
        ));
        assert!(matches!(
            to_frame(&[]),
            Err(Xv11Error::InvalidFrameLength(0))
        ));
        assert!(matches!(
            to_frame(&[0xFA; 23]),
            Err(Xv11Error::InvalidFrameLength(23))
        ));
    }

    #[test]
    fn test_validate_frame() {
        let frame = Frame::new(zero_frame());
        assert!(matches!(validate_frame(&frame), Ok(())));
        assert!(is_valid_frame(&frame));

        let mut bytes = zero_frame();
        bytes[0] = 0xFB;
        assert!(matches!(
            validate_frame(&Frame::new(bytes)),
            Err(Xv11Error::InvalidStartMarker(0xFB))
        ));

        let mut bytes = zero_frame();
        bytes[1] = 0x10;
        assert!(matches!(
            validate_frame(&Frame::new(bytes)),
            Err(Xv11Error::IndexOutOfRange(0x10))
        ));

        let mut bytes = zero_frame();
        bytes[20] = 0x84;
        assert!(matches!(
            validate_frame(&Frame::new(bytes)),
            Err(Xv11Error::ChecksumMismatch(0x7684, 0x7683))
        ));
    }

    #[test]
    fn test_validate_frame_fails_fast() {
        // Bad marker and bad index: the marker is reported.
        let mut bytes = zero_frame();
        bytes[0] = 0x00;
        bytes[1] = 0x00;
        assert!(matches!(
            validate_frame(&Frame::new(bytes)),
            Err(Xv11Error::InvalidStartMarker(0x00))
        ));

        // Bad index and bad checksum: the index is reported.
        let mut bytes = zero_frame();
        bytes[1] = 0xFA;
        bytes[20] = 0x00;
        assert!(matches!(
            validate_frame(&Frame::new(bytes)),
            Err(Xv11Error::IndexOutOfRange(0xFA))
        ));
    }

    #[test]
    fn test_index_boundaries() {
        let frame_with_index = |index: u8| {
            let mut bytes = zero_frame();
            bytes[1] = index;
            with_checksum(bytes)
        };
        assert!(!is_valid_frame(&frame_with_index(0x9F)));
        assert!(is_valid_frame(&frame_with_index(0xA0)));
        assert!(is_valid_frame(&frame_with_index(0xC4)));
        assert!(is_valid_frame(&frame_with_index(0xF9)));
        assert!(!is_valid_frame(&frame_with_index(0xFA)));
        assert!(!is_valid_frame(&frame_with_index(0x00)));
        assert!(!is_valid_frame(&frame_with_index(0xFF)));
    }

    #[test]
    fn test_any_corrupted_byte_is_rejected() {
        let reference = zero_frame();
        for offset in 0..20 {
            for value in [0x01u8, 0x80, 0xFF] {
                let mut bytes = reference;
                bytes[offset] ^= value;
                assert!(
                    !is_valid_frame(&Frame::new(bytes)),
                    "offset {offset} xor {value:#04X}"
                );
            }
        }
    }

    #[test]
    fn test_single_bit_flips_are_rejected() {
        let frames = [
            zero_frame(),
            [
                0xFA, 0xF9, 0x40, 0x49, 0x10, 0x02, 0x33, 0x01, 0xAB, 0x00, 0x80, 0x0A, 0xFF, 0x01,
                0x22, 0x00, 0x00, 0x80, 0x5C, 0x03, 0x7C, 0x5E,
            ],
            [
                0xFA, 0xC5, 0x2C, 0x4B, 0x8C, 0x01, 0x5A, 0x00, 0x93, 0x01, 0x5E, 0x00, 0x9B, 0x01,
                0x59, 0x00, 0xA6, 0x01, 0x4C, 0x00, 0x44, 0x4A,
            ],
        ];
        for reference in frames {
            assert!(is_valid_frame(&Frame::new(reference)));
            for offset in 0..20 {
                for bit in 0..8 {
                    let mut bytes = reference;
                    bytes[offset] ^= 1 << bit;
                    assert!(!is_valid_frame(&Frame::new(bytes)));
                }
            }
        }
    }

    #[test]
    fn test_checksum_top_bit_is_compared() {
        let mut bytes = zero_frame();
        bytes[21] |= 0x80;
        let frame = Frame::new(bytes);
        assert_eq!(frame.stored_checksum(), to_u16_le(0x83, 0xF6));
        assert!(!is_valid_frame(&frame));
    }
}
