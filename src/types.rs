use chrono::{DateTime, Utc};

/// Right ascension, decimal hours in `[0, 24)`.
pub type Hours = f32;
/// Declination, latitude or longitude, decimal degrees.
pub type Degrees = f32;

/// A pointing coordinate as reported by the mount's telemetry, or requested
/// by a caller. `ra`/`dec` may be [`Degrees::NAN`]/[`Hours::NAN`] — the
/// "unknown" sentinel — until the first telemetry frame arrives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquatorialCoordinate {
    pub ra: Hours,
    pub dec: Degrees,
    pub captured_at: Option<DateTime<Utc>>,
}

impl EquatorialCoordinate {
    pub const UNKNOWN: Self = Self {
        ra: f32::NAN,
        dec: f32::NAN,
        captured_at: None,
    };

    pub fn is_unknown(&self) -> bool {
        self.ra.is_nan() || self.dec.is_nan()
    }
}

impl Default for EquatorialCoordinate {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

/// A site location as reported by the mount, or set by a caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticCoordinate {
    pub latitude: Degrees,
    pub longitude: Degrees,
}

/// A cardinal direction for manual motion, plus the inert `None` sentinel
/// used by an idle pulse descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
    None,
}

/// Descriptor consumed by the motion pulser: repeat a single-shot directional
/// frame `pulses_per_second` times a second. `{None, 0}` is the inert
/// sentinel the pulser idles on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionPulseDescriptor {
    pub direction: Direction,
    pub pulses_per_second: u32,
}

impl MotionPulseDescriptor {
    pub const IDLE: Self = Self {
        direction: Direction::None,
        pulses_per_second: 0,
    };

    pub fn is_idle(&self) -> bool {
        self.direction == Direction::None || self.pulses_per_second == 0
    }
}

impl Default for MotionPulseDescriptor {
    fn default() -> Self {
        Self::IDLE
    }
}

/// Scalar magnitude used to classify telemetry deltas against
/// [`TRACK_SLEW_THRESHOLD`]. This is the sign-preserving squared sum
/// `|Δra² + Δdec²|`, *not* the Euclidean norm — retained exactly as
/// specified; correctness of threshold classification depends on this
/// formulation, not on it being a true distance metric.
pub fn delta_magnitude(prev: EquatorialCoordinate, ra: Hours, dec: Degrees) -> f32 {
    let d_ra = ra - prev.ra;
    let d_dec = dec - prev.dec;
    (d_ra * d_ra + d_dec * d_dec).abs()
}

/// Derived from the manufacturer-stated tracking speed (~0.004 °/s) sampled
/// at the mount's ~1 Hz telemetry cadence.
pub const TRACK_SLEW_THRESHOLD: f32 = 0.0045;

/// Sustained wire throughput at 9600 baud with 13-byte frames is ~40 fps;
/// capped at half that to leave receive headroom on the half-duplex link.
pub const MAX_PULSE_RATE: u32 = 20;
