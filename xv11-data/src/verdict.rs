use crate::frame::Frame;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Validation result of one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameVerdict {
    /// The frame that was checked.
    pub frame: Frame,
    /// Whether the start marker, index and checksum were all correct.
    pub valid: bool,
}
