use crate::frame::codec::{self, OutboundCommand};
use crate::serial::SerialPort;
use crate::types::{Direction, MotionPulseDescriptor, MAX_PULSE_RATE};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::error;

fn direction_command(direction: Direction) -> Option<OutboundCommand> {
    match direction {
        Direction::North => Some(OutboundCommand::MoveNorth),
        Direction::South => Some(OutboundCommand::MoveSouth),
        Direction::East => Some(OutboundCommand::MoveEast),
        Direction::West => Some(OutboundCommand::MoveWest),
        Direction::None => None,
    }
}

/// Rendezvous shared between the pulser thread and its caller: the
/// descriptor cell plus a condition variable guarding an `active` flag, so
/// the pulser can block when idle instead of busy-polling.
struct Shared {
    descriptor: Mutex<MotionPulseDescriptor>,
    active: Mutex<bool>,
    condvar: Condvar,
}

/// Converts a `(direction, rate)` descriptor into a periodic stream of
/// single-shot directional frames — the mount implements "move while
/// tracking" as repeated frames, not a continuous instruction, so ceasing
/// transmission is what halts motion.
pub struct Pulser {
    shared: Arc<Shared>,
    running: Arc<AtomicBool>,
    serial: Arc<Mutex<Box<dyn SerialPort>>>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Pulser {
    pub fn new(serial: Arc<Mutex<Box<dyn SerialPort>>>) -> Self {
        Self {
            shared: Arc::new(Shared {
                descriptor: Mutex::new(MotionPulseDescriptor::IDLE),
                active: Mutex::new(false),
                condvar: Condvar::new(),
            }),
            running: Arc::new(AtomicBool::new(false)),
            serial,
            handle: Mutex::new(None),
        }
    }

    pub fn start(&self) {
        self.running.store(true, Ordering::SeqCst);
        let shared = self.shared.clone();
        let running = self.running.clone();
        let serial = self.serial.clone();
        let handle = thread::spawn(move || Self::run_loop(shared, running, serial));
        *self.handle.lock().unwrap() = Some(handle);
    }

    fn run_loop(shared: Arc<Shared>, running: Arc<AtomicBool>, serial: Arc<Mutex<Box<dyn SerialPort>>>) {
        while running.load(Ordering::Acquire) {
            let mut active = shared.active.lock().unwrap();
            while !*active && running.load(Ordering::Acquire) {
                let (guard, _timeout) = shared
                    .condvar
                    .wait_timeout(active, Duration::from_millis(500))
                    .unwrap();
                active = guard;
            }
            if !running.load(Ordering::Acquire) {
                return;
            }
            drop(active);

            let descriptor = *shared.descriptor.lock().unwrap();
            if descriptor.is_idle() {
                *shared.active.lock().unwrap() = false;
                continue;
            }

            if let Some(command) = direction_command(descriptor.direction) {
                if let Ok(bytes) = codec::encode(command) {
                    let mut port = serial.lock().unwrap();
                    if let Err(e) = port.write(&bytes) {
                        error!("pulser: transport error emitting direction frame: {e}");
                    }
                }
            }

            let wait_ms = 1000 / descriptor.pulses_per_second.max(1) as u64;
            thread::sleep(Duration::from_millis(wait_ms));
        }
    }

    /// Begins (or retargets) a pulse stream. The caller has already
    /// rejected `rate == 0` as a domain error; exceeding the wire ceiling
    /// is the one case this clamps silently rather than failing.
    pub fn start_motion(&self, direction: Direction, rate: u32) {
        let clamped_rate = rate.min(MAX_PULSE_RATE).max(1);
        *self.shared.descriptor.lock().unwrap() = MotionPulseDescriptor {
            direction,
            pulses_per_second: clamped_rate,
        };
        *self.shared.active.lock().unwrap() = true;
        self.shared.condvar.notify_one();
    }

    pub fn stop_motion(&self) {
        *self.shared.descriptor.lock().unwrap() = MotionPulseDescriptor::IDLE;
        *self.shared.active.lock().unwrap() = false;
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.shared.condvar.notify_all();
        if let Some(handle) = self.handle.lock().unwrap().take() {
            let _ = handle.join();
        }
    }
}
