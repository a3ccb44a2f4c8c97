#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of bytes in one XV11 frame.
pub const FRAME_SIZE: usize = 22;
pub const START_OFFSET: usize = 0;
pub const INDEX_OFFSET: usize = 1;
pub const SPEED_OFFSET: usize = 2;
pub const SAMPLE_OFFSET: usize = 4;
pub const CHECKSUM_OFFSET: usize = 20;
/// Number of 16-bit sample words between the speed and checksum fields.
pub const N_SAMPLE_WORDS: usize = 8;

/// One fixed-length frame as received from the sensor.
///
/// The frame is only guaranteed to have the right length. Whether its
/// contents are valid is decided by the driver's validator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    bytes: [u8; FRAME_SIZE],
}

impl Frame {
    pub fn new(bytes: [u8; FRAME_SIZE]) -> Frame {
        Frame { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_SIZE] {
        &self.bytes
    }

    /// Byte at the start marker position.
    pub fn start_marker(&self) -> u8 {
        self.bytes[START_OFFSET]
    }

    /// Rotation sector identifier of the frame.
    pub fn index(&self) -> u8 {
        self.bytes[INDEX_OFFSET]
    }

    /// Motor speed field, not interpreted.
    pub fn speed_raw(&self) -> u16 {
        self.word_at(SPEED_OFFSET)
    }

    /// Range/intensity words, not interpreted.
    pub fn sample_words(&self) -> [u16; N_SAMPLE_WORDS] {
        let mut words = [0u16; N_SAMPLE_WORDS];
        for (i, w) in words.iter_mut().enumerate() {
            *w = self.word_at(SAMPLE_OFFSET + 2 * i);
        }
        words
    }

    /// Checksum carried by the frame itself.
    pub fn stored_checksum(&self) -> u16 {
        self.word_at(CHECKSUM_OFFSET)
    }

    fn word_at(&self, offset: usize) -> u16 {
        u16::from_le_bytes([self.bytes[offset], self.bytes[offset + 1]])
    }
}

impl From<[u8; FRAME_SIZE]> for Frame {
    fn from(bytes: [u8; FRAME_SIZE]) -> Self {
        Frame::new(bytes)
    }
}

impl TryFrom<&[u8]> for Frame {
    type Error = std::array::TryFromSliceError;

    fn try_from(candidate: &[u8]) -> Result<Self, Self::Error> {
        Ok(Frame::new(candidate.try_into()?))
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
