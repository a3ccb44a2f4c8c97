use crate::numeric::to_hex_string;
use crate::packet::{is_start_marker, is_valid_frame, to_frame};
use xv11_data::{Frame, FrameVerdict, FRAME_SIZE};

/// Splits a byte stream into candidate frames at every start marker.
///
/// A candidate is only released when the next marker arrives, so the
/// bytes after the last marker stay buffered until the stream ends.
#[derive(Debug, Default)]
pub struct FrameSynchronizer {
    buffer: Vec<u8>,
}

impl FrameSynchronizer {
    pub fn new() -> FrameSynchronizer {
        FrameSynchronizer {
            buffer: Vec::with_capacity(FRAME_SIZE),
        }
    }

    /// Feeds one byte. Returns the previous candidate when `byte` starts a
    /// new one.
    pub fn push(&mut self, byte: u8) -> Option<Vec<u8>> {
        let flushed = if is_start_marker(byte) && !self.buffer.is_empty() {
            let next = Vec::with_capacity(FRAME_SIZE);
            Some(std::mem::replace(&mut self.buffer, next))
        } else {
            None
        };
        self.buffer.push(byte);
        flushed
    }

    /// Number of bytes of the candidate being assembled.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Drops the candidate being assembled.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}

/// Iterator over the candidate frames of a byte stream.
///
/// The trailing unterminated candidate is never yielded.
pub struct CandidateFrames<I> {
    bytes: I,
    synchronizer: FrameSynchronizer,
}

impl<I: Iterator<Item = u8>> Iterator for CandidateFrames<I> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        for byte in self.bytes.by_ref() {
            if let Some(candidate) = self.synchronizer.push(byte) {
                return Some(candidate);
            }
        }
        None
    }
}

pub fn candidate_frames<I>(bytes: I) -> CandidateFrames<I::IntoIter>
where
    I: IntoIterator<Item = u8>,
{
    CandidateFrames {
        bytes: bytes.into_iter(),
        synchronizer: FrameSynchronizer::new(),
    }
}

/// Keeps the candidates that have exactly the frame length.
pub(crate) fn accept_candidate(candidate: &[u8]) -> Option<Frame> {
    match to_frame(candidate) {
        Ok(frame) => Some(frame),
        Err(e) => {
            tracing::debug!("dropped candidate [{}]: {e}", to_hex_string(candidate));
            None
        }
    }
}

pub(crate) fn to_verdict(frame: Frame) -> FrameVerdict {
    FrameVerdict {
        valid: is_valid_frame(&frame),
        frame,
    }
}

/// Frames of the right length found in `bytes`, not yet validated.
pub fn fixed_frames<I>(bytes: I) -> impl Iterator<Item = Frame>
where
    I: IntoIterator<Item = u8>,
{
    candidate_frames(bytes).filter_map(|candidate| accept_candidate(&candidate))
}

/// Validates every fixed-length frame found in `bytes`.
pub fn frame_verdicts<I>(bytes: I) -> impl Iterator<Item = FrameVerdict>
where
    I: IntoIterator<Item = u8>,
{
    fixed_frames(bytes).map(to_verdict)
}
