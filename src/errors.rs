use std::fmt;
use std::io;

/// Error kinds surfaced by the mount controller.
///
/// `Domain`/`StateViolation`/`NotConnected` never touch the wire; `Transport`
/// wraps a serial I/O failure; `Overflow` is handled internally by the
/// framer and is exposed only so callers of the ring buffer directly (e.g.
/// in tests) can observe it.
#[derive(Debug, Clone)]
pub enum DriverError {
    Domain(String),
    NotConnected,
    StateViolation(String),
    Transport(String),
    Overflow,
}

pub type DriverResult<T> = Result<T, DriverError>;

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(msg) => write!(f, "domain error: {msg}"),
            Self::NotConnected => write!(f, "mount is not connected"),
            Self::StateViolation(msg) => write!(f, "state violation: {msg}"),
            Self::Transport(msg) => write!(f, "transport error: {msg}"),
            Self::Overflow => write!(f, "ring buffer overflow"),
        }
    }
}

impl std::error::Error for DriverError {}

impl From<io::Error> for DriverError {
    fn from(e: io::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<String> for DriverError {
    fn from(s: String) -> Self {
        Self::Transport(s)
    }
}
