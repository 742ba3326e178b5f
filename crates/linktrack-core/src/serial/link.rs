use std::io::{Read, Write};
use std::time::Duration;

use crate::error::Result;

/// A byte link to the motor controller.
///
/// Reads must honor a bounded timeout (returning `TimedOut`, `WouldBlock` or
/// `Ok(0)` when idle) so the channel loop can observe stop requests.
pub trait SerialLink: Read + Write + Send {}

impl<T: Read + Write + Send> SerialLink for T {}

/// Opens links on behalf of the serial channel. Swappable in tests.
pub trait LinkOpener: Send + 'static {
    fn open(&mut self, port: &str, baud: u32, read_timeout: Duration) -> Result<Box<dyn SerialLink>>;
}

/// Opens real serial ports with fixed 8N1 framing.
#[cfg(feature = "hardware")]
#[derive(Clone, Copy, Debug, Default)]
pub struct SerialPortOpener;

#[cfg(feature = "hardware")]
impl LinkOpener for SerialPortOpener {
    fn open(&mut self, port: &str, baud: u32, read_timeout: Duration) -> Result<Box<dyn SerialLink>> {
        use serialport::{DataBits, FlowControl, Parity, StopBits};

        let port = serialport::new(port, baud)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(read_timeout)
            .open()
            .map_err(|e| crate::error::LinkTrackError::Serial(e.to_string()))?;
        Ok(Box::new(port))
    }
}

/// Names of the serial ports present on this machine, sorted.
#[cfg(feature = "hardware")]
pub fn available_ports() -> Result<Vec<String>> {
    let mut names: Vec<String> = serialport::available_ports()
        .map_err(|e| crate::error::LinkTrackError::Serial(e.to_string()))?
        .into_iter()
        .map(|p| p.port_name)
        .collect();
    names.sort();
    Ok(names)
}
