use crate::serial::{flush, get_n_read, read};
use crate::sync::{accept_candidate, to_verdict, FrameSynchronizer};
use crate::time::sleep_ms;
use crossbeam_channel::{Receiver, Sender};
use crossbeam_utils::Backoff;
use serialport::SerialPort;
use std::sync::mpsc;
use std::thread::JoinHandle;
use xv11_data::FrameVerdict;

/// Struct that contains driver threads.
pub struct DriverThreads {
    pub(crate) reader_terminator_tx: Sender<bool>,
    pub(crate) parser_terminator_tx: Sender<bool>,
    pub(crate) reader_thread: Option<JoinHandle<()>>,
    pub(crate) parser_thread: Option<JoinHandle<()>>,
}

pub(crate) fn read_device_signal(
    port: &mut Box<dyn SerialPort>,
    signal_tx: mpsc::SyncSender<Vec<u8>>,
    reader_terminator_rx: Receiver<bool>,
) {
    let backoff = Backoff::new();
    loop {
        if do_terminate(&reader_terminator_rx) {
            break;
        }

        let n_read: usize = get_n_read(port).unwrap_or(0);
        if n_read == 0 {
            wait(&backoff);
            continue;
        }

        match read(port, n_read) {
            Ok(signal) => {
                backoff.reset();
                if !send_or_terminate(&signal_tx, signal, &reader_terminator_rx) {
                    tracing::debug!("reader exits");
                    break;
                }
            }
            Err(e) => {
                tracing::error!("failed to read from the serial port: {e}");
                wait(&backoff);
            }
        }
    }

    if let Err(e) = flush(port) {
        tracing::warn!("failed to flush the serial port: {e}");
    }
}

pub(crate) fn parse_frames(
    signal_rx: mpsc::Receiver<Vec<u8>>,
    parser_terminator_rx: Receiver<bool>,
    verdict_tx: mpsc::SyncSender<FrameVerdict>,
) {
    let mut synchronizer = FrameSynchronizer::new();
    while !do_terminate(&parser_terminator_rx) {
        let signal = match signal_rx.recv_timeout(std::time::Duration::from_millis(10)) {
            Ok(signal) => signal,
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => return,
        };

        for byte in signal {
            let Some(candidate) = synchronizer.push(byte) else {
                continue;
            };
            let Some(frame) = accept_candidate(&candidate) else {
                continue;
            };
            if !send_or_terminate(&verdict_tx, to_verdict(frame), &parser_terminator_rx) {
                tracing::debug!("parser exits");
                return;
            }
        }
    }
}

/// Sends `item`, waiting while the channel is full. Gives up when the
/// receiver is gone or a terminate request arrives, and returns `false`.
pub(crate) fn send_or_terminate<T>(
    tx: &mpsc::SyncSender<T>,
    item: T,
    terminator_rx: &Receiver<bool>,
) -> bool {
    let backoff = Backoff::new();
    let mut item = item;
    loop {
        match tx.try_send(item) {
            Ok(()) => return true,
            Err(mpsc::TrySendError::Disconnected(_)) => return false,
            Err(mpsc::TrySendError::Full(rejected)) => {
                if do_terminate(terminator_rx) {
                    return false;
                }
                item = rejected;
                wait(&backoff);
            }
        }
    }
}

// Spin and yield first, then sleep so a stalled peer does not burn a core.
fn wait(backoff: &Backoff) {
    if backoff.is_completed() {
        sleep_ms(1);
    } else {
        backoff.snooze();
    }
}

pub(crate) fn do_terminate(terminator_rx: &Receiver<bool>) -> bool {
    terminator_rx.try_recv().unwrap_or(false)
}

/// Function to join driver threads.
/// This function is automatically called when `driver_threads` is dropped.
pub fn join(driver_threads: &mut DriverThreads) {
    // Either thread may already have exited on its own.
    let _ = driver_threads.reader_terminator_tx.send(true);
    let _ = driver_threads.parser_terminator_tx.send(true);

    if let Some(thread) = driver_threads.reader_thread.take() {
        if thread.join().is_err() {
            tracing::error!("reader thread panicked");
        }
    }
    if let Some(thread) = driver_threads.parser_thread.take() {
        if thread.join().is_err() {
            tracing::error!("parser thread panicked");
        }
    }
}

impl Drop for DriverThreads {
    fn drop(&mut self) {
        join(self);
    }
}
