use crate::constants::N_READ_TRIALS;
use crate::error::Xv11Error;
use crate::time::sleep_ms;
use crate::DriverConfig;
use serialport::SerialPort;
use std::io::Read;

/// Opens the sensor's serial port. The XV11 streams frames as soon as its
/// motor spins, so no command is sent.
pub(crate) fn open_port(
    port_name: &str,
    config: &DriverConfig,
) -> Result<Box<dyn SerialPort>, Xv11Error> {
    let port = serialport::new(port_name, config.baud_rate)
        .data_bits(serialport::DataBits::Eight)
        .parity(serialport::Parity::None)
        .stop_bits(serialport::StopBits::One)
        .timeout(std::time::Duration::from_millis(config.read_timeout_ms))
        .open()?;
    Ok(port)
}

pub(crate) fn get_n_read(port: &mut Box<dyn SerialPort>) -> Result<usize, Xv11Error> {
    let n_u32: u32 = port.bytes_to_read()?;
    Ok(n_u32.try_into().unwrap_or(0))
}

pub(crate) fn flush(port: &mut Box<dyn SerialPort>) -> Result<(), Xv11Error> {
    let n_read: usize = get_n_read(port).unwrap_or(0);
    if n_read == 0 {
        return Ok(());
    }
    let mut discarded: Vec<u8> = vec![0; n_read];
    port.read_exact(discarded.as_mut_slice())?;
    Ok(())
}

pub(crate) fn read(
    port: &mut Box<dyn SerialPort>,
    data_size: usize,
) -> Result<Vec<u8>, Xv11Error> {
    if data_size == 0 {
        return Ok(Vec::new());
    }
    for _ in 0..N_READ_TRIALS {
        let n_read: usize = get_n_read(port)?;

        if n_read < data_size {
            sleep_ms(10);
            continue;
        }

        let mut signal: Vec<u8> = vec![0; data_size];
        port.read_exact(signal.as_mut_slice())?;
        return Ok(signal);
    }
    Err(Xv11Error::TimeoutError())
}
