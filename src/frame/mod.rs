pub mod codec;
pub mod ring_buffer;

pub use codec::{decode, encode, InboundFrame, OutboundCommand};
pub use ring_buffer::RingBuffer;

/// `0x55 0xAA 0x01 0x09` — the fixed 4-byte frame header.
pub const HEADER: [u8; 4] = [0x55, 0xAA, 0x01, 0x09];
/// Fixed frame length: 4-byte header, 1-byte command id, 8-byte payload.
pub const FRAME_LEN: usize = 13;
