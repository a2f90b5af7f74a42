//! In-memory [`SerialPort`] test double, `pub` so both unit tests and the
//! black-box tests under `tests/` can drive the transceiver loop and
//! pulser without real hardware.

use crate::errors::{DriverError, DriverResult};
use crate::serial::SerialPort;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockSerialHandle {
    inbound: Arc<Mutex<VecDeque<u8>>>,
    outbound: Arc<Mutex<Vec<u8>>>,
    opened: Arc<Mutex<bool>>,
}

impl MockSerialHandle {
    pub fn new() -> Self {
        Self {
            inbound: Arc::new(Mutex::new(VecDeque::new())),
            outbound: Arc::new(Mutex::new(Vec::new())),
            opened: Arc::new(Mutex::new(false)),
        }
    }

    /// A [`SerialPort`] sharing this handle's underlying buffers, suitable
    /// for handing to a `MountController` while the test retains `self` to
    /// feed bytes in and inspect bytes out.
    pub fn port(&self) -> MockSerialPort {
        MockSerialPort {
            inbound: self.inbound.clone(),
            outbound: self.outbound.clone(),
            opened: self.opened.clone(),
        }
    }

    pub fn push_inbound(&self, bytes: &[u8]) {
        self.inbound.lock().unwrap().extend(bytes.iter().copied());
    }

    pub fn written_bytes(&self) -> Vec<u8> {
        self.outbound.lock().unwrap().clone()
    }

    pub fn written_frame_count(&self) -> usize {
        self.written_bytes().len() / crate::frame::FRAME_LEN
    }

    pub fn is_open(&self) -> bool {
        *self.opened.lock().unwrap()
    }
}

impl Default for MockSerialHandle {
    fn default() -> Self {
        Self::new()
    }
}

pub struct MockSerialPort {
    inbound: Arc<Mutex<VecDeque<u8>>>,
    outbound: Arc<Mutex<Vec<u8>>>,
    opened: Arc<Mutex<bool>>,
}

impl SerialPort for MockSerialPort {
    fn open(&mut self) -> DriverResult<()> {
        *self.opened.lock().unwrap() = true;
        Ok(())
    }

    fn close(&mut self) -> DriverResult<()> {
        *self.opened.lock().unwrap() = false;
        Ok(())
    }

    fn is_open(&self) -> bool {
        *self.opened.lock().unwrap()
    }

    fn bytes_to_read(&self) -> usize {
        self.inbound.lock().unwrap().len()
    }

    fn read_byte(&mut self) -> i16 {
        match self.inbound.lock().unwrap().pop_front() {
            Some(b) => b as i16,
            None => -1,
        }
    }

    fn write(&mut self, bytes: &[u8]) -> DriverResult<()> {
        if !*self.opened.lock().unwrap() {
            return Err(DriverError::Transport("port is not open".to_string()));
        }
        self.outbound.lock().unwrap().extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> DriverResult<()> {
        Ok(())
    }
}
