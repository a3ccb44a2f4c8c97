use std::sync::mpsc;

mod checksum;
mod constants;
mod driver_threads;
mod error;
mod numeric;
mod packet;
mod serial;
mod sync;
mod time;

use crate::constants::{
    LIDAR_BAUD_RATE, READ_TIMEOUT_MS, SIGNAL_CHANNEL_CAPACITY, VERDICT_CHANNEL_CAPACITY,
};
use crate::driver_threads::{parse_frames, read_device_signal};
use crate::serial::{flush, open_port};
use crossbeam_channel::bounded;
use xv11_data::FrameVerdict;

pub use crate::checksum::calc_checksum;
pub use crate::driver_threads::{join, DriverThreads};
pub use crate::error::Xv11Error;
pub use crate::numeric::to_hex_string;
pub use crate::packet::{is_valid_frame, validate_frame};
pub use crate::sync::{
    candidate_frames, fixed_frames, frame_verdicts, CandidateFrames, FrameSynchronizer,
};

/// Serial link settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverConfig {
    pub baud_rate: u32,
    pub read_timeout_ms: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            baud_rate: LIDAR_BAUD_RATE,
            read_timeout_ms: READ_TIMEOUT_MS,
        }
    }
}

/// Function to launch the XV11 driver with the default serial settings.
/// # Arguments
///
/// * `port_name` - Serial port name such as `/dev/ttyUSB0`.
pub fn run_driver(
    port_name: &str,
) -> Result<(DriverThreads, mpsc::Receiver<FrameVerdict>), Xv11Error> {
    run_driver_with_config(port_name, &DriverConfig::default())
}

/// Function to launch the XV11 driver.
///
/// One verdict is sent for every 22-byte frame found in the serial stream.
/// Dropping the returned `DriverThreads` stops both threads.
/// # Arguments
///
/// * `port_name` - Serial port name such as `/dev/ttyUSB0`.
/// * `config` - Serial link settings.
pub fn run_driver_with_config(
    port_name: &str,
    config: &DriverConfig,
) -> Result<(DriverThreads, mpsc::Receiver<FrameVerdict>), Xv11Error> {
    let mut port = open_port(port_name, config)?;
    tracing::info!("opened {} at {} baud", port_name, config.baud_rate);

    // Bytes left from before we started cannot be aligned anyway
    flush(&mut port)?;

    let (reader_terminator_tx, reader_terminator_rx) = bounded(10);
    let (parser_terminator_tx, parser_terminator_rx) = bounded(10);
    let (signal_tx, signal_rx) = mpsc::sync_channel::<Vec<u8>>(SIGNAL_CHANNEL_CAPACITY);

    let reader_thread = Some(std::thread::spawn(move || {
        read_device_signal(&mut port, signal_tx, reader_terminator_rx);
    }));

    let (verdict_tx, verdict_rx) = mpsc::sync_channel::<FrameVerdict>(VERDICT_CHANNEL_CAPACITY);
    let parser_thread = Some(std::thread::spawn(move || {
        parse_frames(signal_rx, parser_terminator_rx, verdict_tx);
    }));

    let driver_threads = DriverThreads {
        reader_thread,
        parser_thread,
        reader_terminator_tx,
        parser_terminator_tx,
    };

    Ok((driver_threads, verdict_rx))
}
