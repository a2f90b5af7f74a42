use crate::errors::{DriverError, DriverResult};
use crate::frame::codec::{self, OutboundCommand};
use crate::observer::{NullObserver, TelemetryObserver};
use crate::pulser::Pulser;
use crate::serial::SerialPort;
use crate::state::MountState;
use crate::transceiver;
use crate::types::{Degrees, Direction, EquatorialCoordinate, GeodeticCoordinate, Hours};
use crate::util::GuardedCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use tracing::{error, info};

/// The public API surface: wires the serial capability, the guarded state
/// cells, the receiver loop and the motion pulser into a single owned unit.
/// A fresh controller starts `Disconnected` and may be `start()`ed and
/// `stop()`ped repeatedly across its lifetime.
pub struct MountController {
    serial: Arc<Mutex<Box<dyn SerialPort>>>,
    state: Arc<GuardedCell<MountState>>,
    pointing: Arc<GuardedCell<EquatorialCoordinate>>,
    site_location: Arc<GuardedCell<Option<GeodeticCoordinate>>>,
    running: Arc<AtomicBool>,
    observer: Arc<dyn TelemetryObserver>,
    pulser: Pulser,
    receiver_handle: Mutex<Option<JoinHandle<()>>>,
}

impl MountController {
    pub fn new(serial: Box<dyn SerialPort>) -> Self {
        Self::with_observer(serial, Arc::new(NullObserver))
    }

    pub fn with_observer(serial: Box<dyn SerialPort>, observer: Arc<dyn TelemetryObserver>) -> Self {
        let serial = Arc::new(Mutex::new(serial));
        Self {
            pulser: Pulser::new(serial.clone()),
            serial,
            state: Arc::new(GuardedCell::new(MountState::Disconnected)),
            pointing: Arc::new(GuardedCell::new(EquatorialCoordinate::UNKNOWN)),
            site_location: Arc::new(GuardedCell::new(None)),
            running: Arc::new(AtomicBool::new(false)),
            observer,
            receiver_handle: Mutex::new(None),
        }
    }

    fn require_connected(&self) -> DriverResult<()> {
        if self.state.get() == MountState::Disconnected {
            info!("operation rejected: mount is not connected");
            Err(DriverError::NotConnected)
        } else {
            Ok(())
        }
    }

    fn emit(&self, command: OutboundCommand) -> DriverResult<()> {
        let bytes = codec::encode(command)?;
        let result = self.serial.lock().unwrap().write(&bytes);
        if let Err(e) = &result {
            error!("transport error emitting command: {e}");
        }
        result
    }

    /// Opens the port and spawns the receiver loop and pulser. Post-state on
    /// success is `Unknown` — transport is up, no telemetry has arrived yet.
    pub fn start(&self) {
        self.running.store(true, Ordering::SeqCst);
        self.state.set(MountState::Unknown);

        self.pulser.start();

        let serial = self.serial.clone();
        let running = self.running.clone();
        let state = self.state.clone();
        let pointing = self.pointing.clone();
        let site_location = self.site_location.clone();
        let observer = self.observer.clone();
        let handle = std::thread::spawn(move || {
            transceiver::run(serial, running, state, pointing, site_location, observer)
        });
        *self.receiver_handle.lock().unwrap() = Some(handle);

        info!("mount controller started");
    }

    /// Stops the pulser, best-effort sends Disconnect, stops the receiver
    /// loop and joins both threads, closes the port, reverts to
    /// `Disconnected`. A stopped controller may be `start()`ed again.
    pub fn stop(&self) {
        self.pulser.stop_motion();
        self.pulser.stop();

        let _ = self.emit(OutboundCommand::Disconnect);

        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.receiver_handle.lock().unwrap().take() {
            let _ = handle.join();
        }

        self.state.set(MountState::Disconnected);
        info!("mount controller stopped");
    }

    pub fn park_position(&self) -> DriverResult<()> {
        self.require_connected()?;
        self.emit(OutboundCommand::Park)?;
        self.state.set(MountState::ParkingIssued);
        info!("park issued");
        Ok(())
    }

    pub fn go_to(&self, ra: Hours, dec: Degrees) -> DriverResult<()> {
        self.require_connected()?;
        self.emit(OutboundCommand::GoTo { ra, dec })
    }

    /// Valid only while `Tracking`; a caller outside that state receives
    /// `StateViolation`, matching the mount's calibration semantics (you
    /// can only tell it "you are here" while it's already settled on a
    /// target).
    pub fn sync(&self, ra: Hours, dec: Degrees) -> DriverResult<()> {
        if self.state.get() != MountState::Tracking {
            info!("Sync rejected: only valid while Tracking");
            return Err(DriverError::StateViolation(
                "Sync is only valid while Tracking".to_string(),
            ));
        }
        self.emit(OutboundCommand::Sync { ra, dec })
    }

    pub fn set_site_location(&self, lat: Degrees, lon: Degrees) -> DriverResult<()> {
        self.require_connected()?;
        self.emit(OutboundCommand::SetSiteLocation { lat, lon })
    }

    pub fn request_site_location(&self) -> DriverResult<()> {
        self.require_connected()?;
        self.emit(OutboundCommand::GetSiteLocation)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn set_date_time(
        &self,
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> DriverResult<()> {
        self.require_connected()?;
        self.emit(OutboundCommand::SetDateTime {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// `StopMotion` while `Disconnected` is a state violation, not a
    /// connectivity error — the mount has nothing to stop, which is a
    /// different failure than "no transport at all".
    pub fn stop_motion(&self) -> DriverResult<()> {
        if self.state.get() == MountState::Disconnected {
            info!("StopMotion rejected: mount is Disconnected");
            return Err(DriverError::StateViolation(
                "StopMotion while Disconnected".to_string(),
            ));
        }
        self.emit(OutboundCommand::StopMotion)
    }

    /// Valid only from `Tracking`; instructs the pulser and annotates the
    /// state as `MoveWhileTracking` ahead of telemetry confirmation.
    pub fn start_motion_to_direction(&self, direction: Direction, rate: u32) -> DriverResult<()> {
        if self.state.get() != MountState::Tracking {
            info!("StartMotionToDirection rejected: only valid while Tracking");
            return Err(DriverError::StateViolation(
                "StartMotionToDirection is only valid while Tracking".to_string(),
            ));
        }
        if rate == 0 {
            info!("StartMotionToDirection rejected: pulse rate must be greater than 0");
            return Err(DriverError::Domain(
                "pulse rate must be greater than 0".to_string(),
            ));
        }
        self.pulser.start_motion(direction, rate);
        self.state.set(MountState::MoveWhileTracking);
        Ok(())
    }

    /// Instructs the pulser to idle and returns the annotation to
    /// `Tracking`; the next telemetry sample may further settle it to
    /// `Idle` at Δ=0, same as any other Tracking→Idle transition.
    pub fn stop_motion_to_direction(&self) {
        self.pulser.stop_motion();
        if self.state.get() == MountState::MoveWhileTracking {
            self.state.set(MountState::Tracking);
        }
    }

    pub fn get_pointing_coordinates(&self) -> EquatorialCoordinate {
        self.pointing.get()
    }

    pub fn get_telescope_state(&self) -> MountState {
        self.state.get()
    }

    pub fn get_site_location(&self) -> Option<GeodeticCoordinate> {
        self.site_location.get()
    }
}
