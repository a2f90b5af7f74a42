use crate::errors::{DriverError, DriverResult};
use std::time::Duration;

/// Byte-level capability injected into the mount controller. The controller
/// owns exactly one implementation for its whole lifetime; open/close/flush
/// bracket the receiver loop's run, reads and writes are otherwise plain
/// byte-level operations with no framing knowledge.
pub trait SerialPort: Send {
    fn open(&mut self) -> DriverResult<()>;
    fn close(&mut self) -> DriverResult<()>;
    fn is_open(&self) -> bool;
    fn bytes_to_read(&self) -> usize;
    /// Reads one byte. Returns `-1` when nothing is available (non-blocking)
    /// rather than erroring — an empty read is the expected common case at
    /// the ~500ms receiver cadence.
    fn read_byte(&mut self) -> i16;
    fn write(&mut self, bytes: &[u8]) -> DriverResult<()>;
    fn flush(&mut self) -> DriverResult<()>;
}

/// Default [`SerialPort`] backed by the `serialport` crate for enumerating
/// and opening COM ports.
pub struct SerialPortDevice {
    path: String,
    baud_rate: u32,
    timeout: Duration,
    port: Option<Box<dyn serialport::SerialPort>>,
}

impl SerialPortDevice {
    pub fn new(path: impl Into<String>, baud_rate: u32, timeout: Duration) -> Self {
        Self {
            path: path.into(),
            baud_rate,
            timeout,
            port: None,
        }
    }
}

impl SerialPort for SerialPortDevice {
    fn open(&mut self) -> DriverResult<()> {
        let port = serialport::new(&self.path, self.baud_rate)
            .timeout(self.timeout)
            .open()
            .map_err(|e| DriverError::Transport(e.to_string()))?;
        self.port = Some(port);
        Ok(())
    }

    fn close(&mut self) -> DriverResult<()> {
        self.port = None;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.port.is_some()
    }

    fn bytes_to_read(&self) -> usize {
        self.port
            .as_ref()
            .and_then(|p| p.bytes_to_read().ok())
            .unwrap_or(0) as usize
    }

    fn read_byte(&mut self) -> i16 {
        let Some(port) = self.port.as_mut() else {
            return -1;
        };
        let mut byte = [0u8; 1];
        match port.read(&mut byte) {
            Ok(1) => byte[0] as i16,
            _ => -1,
        }
    }

    fn write(&mut self, bytes: &[u8]) -> DriverResult<()> {
        let port = self.port.as_mut().ok_or(DriverError::Transport(
            "port is not open".to_string(),
        ))?;
        port.write_all(bytes)
            .map_err(|e| DriverError::Transport(e.to_string()))
    }

    fn flush(&mut self) -> DriverResult<()> {
        let Some(port) = self.port.as_mut() else {
            return Ok(());
        };
        port.flush()
            .map_err(|e| DriverError::Transport(e.to_string()))
    }
}
