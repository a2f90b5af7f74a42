use crate::frame::{codec, InboundFrame, RingBuffer};
use crate::observer::TelemetryObserver;
use crate::serial::SerialPort;
use crate::state::{on_telemetry, MountState};
use crate::types::{delta_magnitude, EquatorialCoordinate, GeodeticCoordinate};
use crate::util::GuardedCell;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// The receiver loop's cadence: sleep, then drain whatever is available.
const CADENCE: Duration = Duration::from_millis(500);

/// Single dedicated worker, run on its own thread by
/// [`crate::controller::MountController::start`]. Owns the ring buffer
/// exclusively — no other component reads it — and is the sole writer of
/// the pointing-coordinate and site-location cells.
///
/// Opens the port on entry and closes/flushes it on exit; an open failure
/// terminates the loop immediately and reverts the mount to `Disconnected`.
/// Shutdown is cooperative: `running` is checked at the top of every
/// cadence tick, so the loop wakes within one tick of being asked to stop.
pub fn run(
    serial: Arc<Mutex<Box<dyn SerialPort>>>,
    running: Arc<AtomicBool>,
    state: Arc<GuardedCell<MountState>>,
    pointing: Arc<GuardedCell<EquatorialCoordinate>>,
    site_location: Arc<GuardedCell<Option<GeodeticCoordinate>>>,
    observer: Arc<dyn TelemetryObserver>,
) {
    if let Err(e) = serial.lock().unwrap().open() {
        error!("receiver loop: failed to open serial port: {e}");
        running.store(false, Ordering::SeqCst);
        state.set(MountState::Disconnected);
        return;
    }

    let mut ring = RingBuffer::new();

    while running.load(Ordering::Acquire) {
        std::thread::sleep(CADENCE);
        if !running.load(Ordering::Acquire) {
            break;
        }

        {
            let mut port = serial.lock().unwrap();
            while port.bytes_to_read() > 0 {
                let byte = port.read_byte();
                if byte < 0 {
                    break;
                }
                if ring.push_back(byte as u8).is_err() {
                    warn!("receiver loop: ring buffer overflow, dropping byte");
                }
            }
        }

        while let Some(raw) = ring.try_extract_frame() {
            match codec::decode(&raw) {
                InboundFrame::PositionReport { ra, dec } => {
                    let prev = pointing.get();
                    let delta = delta_magnitude(prev, ra, dec);
                    pointing.set(EquatorialCoordinate {
                        ra,
                        dec,
                        captured_at: Some(Utc::now()),
                    });
                    let prev_state = state.get();
                    let next = on_telemetry(delta, prev_state);
                    if next != prev_state {
                        info!("mount state transitioned from {prev_state:?} to {next:?}");
                    }
                    state.set(next);
                    observer.on_pointing_coordinates_received(ra, dec);
                }
                InboundFrame::SiteLocationReport { lat, lon } => {
                    site_location.set(Some(GeodeticCoordinate { latitude: lat, longitude: lon }));
                    observer.on_site_location_received(lat, lon);
                }
                InboundFrame::Ignored(id) => {
                    debug!("receiver loop: ignored inbound frame id 0x{id:02X}");
                }
            }
        }
    }

    let mut port = serial.lock().unwrap();
    let _ = port.flush();
    let _ = port.close();
}
