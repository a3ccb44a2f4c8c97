use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Xv11Error {
    #[error("Frame must be 22 bytes long. Actually {0} bytes.")]
    InvalidFrameLength(usize),
    #[error("Frame must start with 0xFA. Observed = {0:#04X}.")]
    InvalidStartMarker(u8),
    #[error("Frame index must lie in 0xA0..=0xF9. Observed = {0:#04X}.")]
    IndexOutOfRange(u8),
    #[error("Checksum mismatched. Calculated = {1:04X}, expected = {0:04X}.")]
    ChecksumMismatch(u16, u16),
    #[error("Operation timed out")]
    TimeoutError(),
    #[error(transparent)]
    SerialError(#[from] serialport::Error),
    #[error(transparent)]
    IoError(#[from] io::Error),
}
