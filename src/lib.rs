//! Host-side driver for a Bresser EXOS-II equatorial GoTo mount (firmware
//! V2.3) over a 9600-baud RS-232-class link: a binary frame codec, a
//! noise-tolerant receiver/framer, an inferred mount-state machine, and a
//! rate-paced directional motion pulser, wired together behind
//! [`controller::MountController`].

pub mod config;
pub mod controller;
pub mod errors;
pub mod frame;
pub mod observer;
pub mod pulser;
pub mod serial;
pub mod state;
pub mod test_util;
pub mod transceiver;
pub mod types;
pub mod util;

pub use controller::MountController;
pub use errors::{DriverError, DriverResult};
pub use observer::{NullObserver, TelemetryObserver};
pub use serial::{SerialPort, SerialPortDevice};
pub use state::MountState;
pub use types::{Degrees, Direction, EquatorialCoordinate, GeodeticCoordinate, Hours};
