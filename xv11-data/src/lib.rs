pub mod frame;
pub mod verdict;

pub use frame::{Frame, FRAME_SIZE};
pub use verdict::FrameVerdict;
