use super::{FRAME_LEN, HEADER};
use crate::errors::DriverError;

const CAPACITY: usize = 256;

/// Bounded 256-byte circular buffer owned exclusively by the receiver loop.
///
/// `push_back` drops (fails) the incoming byte when full rather than
/// evicting older bytes — the framer will resynchronize on the next header
/// once room frees up. Noise preceding a located header is discarded as
/// soon as the header is found, whether or not a complete frame follows yet,
/// so stale bytes never pin down buffer capacity.
pub struct RingBuffer {
    buf: [u8; CAPACITY],
    head: usize,
    len: usize,
}

impl RingBuffer {
    pub fn new() -> Self {
        Self {
            buf: [0; CAPACITY],
            head: 0,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push_back(&mut self, byte: u8) -> Result<(), DriverError> {
        if self.len == CAPACITY {
            return Err(DriverError::Overflow);
        }
        let idx = (self.head + self.len) % CAPACITY;
        self.buf[idx] = byte;
        self.len += 1;
        Ok(())
    }

    fn at(&self, offset: usize) -> u8 {
        self.buf[(self.head + offset) % CAPACITY]
    }

    fn advance(&mut self, n: usize) {
        self.head = (self.head + n) % CAPACITY;
        self.len -= n;
    }

    fn find_header(&self) -> Option<usize> {
        if self.len < HEADER.len() {
            return None;
        }
        (0..=(self.len - HEADER.len()))
            .find(|&start| (0..HEADER.len()).all(|j| self.at(start + j) == HEADER[j]))
    }

    /// Locate the first header, discard any preceding noise, and — if a full
    /// 13-byte frame follows — consume and return it. Returns `None` when no
    /// header is present yet, or the header is present but the frame is
    /// still incomplete; the buffer is left positioned at the header start
    /// either way so the next append re-examines from there.
    pub fn try_extract_frame(&mut self) -> Option<[u8; FRAME_LEN]> {
        let start = self.find_header()?;
        if start > 0 {
            self.advance(start);
        }
        if self.len < FRAME_LEN {
            return None;
        }
        let mut frame = [0u8; FRAME_LEN];
        for (i, slot) in frame.iter_mut().enumerate() {
            *slot = self.at(i);
        }
        self.advance(FRAME_LEN);
        Some(frame)
    }
}

impl Default for RingBuffer {
    fn default() -> Self {
        Self::new()
    }
}
