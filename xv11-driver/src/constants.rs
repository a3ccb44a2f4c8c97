pub(crate) const START_MARKER: u8 = 0xFA;
pub(crate) const MIN_INDEX: u8 = 0xA0;
pub(crate) const MAX_INDEX: u8 = 0xF9;
// The checksum covers everything before its own field
pub(crate) const CHECKSUM_DATA_SIZE: usize = 20;
pub(crate) const CHECKSUM_MASK: u32 = 0x7FFF;
pub(crate) const CHECKSUM_FOLD_SHIFT: u32 = 15;
pub(crate) const N_READ_TRIALS: usize = 3;
// Specific to the XV11 serial link
pub(crate) const LIDAR_BAUD_RATE: u32 = 115200;
pub(crate) const READ_TIMEOUT_MS: u64 = 10;
pub(crate) const SIGNAL_CHANNEL_CAPACITY: usize = 200;
pub(crate) const VERDICT_CHANNEL_CAPACITY: usize = 100;
