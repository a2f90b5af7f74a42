use crate::types::TRACK_SLEW_THRESHOLD;

/// Inferred mount behavioral state. Transitions are driven exclusively by
/// caller commands (entry annotations, e.g. [`Self::ParkingIssued`]) and by
/// telemetry deltas via [`on_telemetry`] — the engine never times a state
/// out on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountState {
    Disconnected,
    Unknown,
    ParkingIssued,
    SlewingToParkingPosition,
    Parked,
    Slewing,
    Tracking,
    MoveWhileTracking,
    Idle,
}

/// Classify a telemetry-reported delta magnitude against the current state
/// and produce the next state.
///
/// `MoveWhileTracking` is a caller-directed annotation exited only via
/// [`crate::controller::MountController::stop_motion_to_direction`], never by
/// telemetry — it is left untouched here regardless of `delta`.
///
/// The very first telemetry sample compares against the sentinel "unknown"
/// pointing coordinate, so `delta` is NaN; every comparison below is a `>`
/// comparison, which is false against NaN, so a first sample always falls
/// through to the `delta == 0` arm. From `Unknown` that resolves to `Parked`
/// — the documented resolution for the Unknown→Parked-vs-Tracking ambiguity
/// at Δ=0 — meaning the controller conservatively assumes stationary until a
/// second sample lets it measure real motion.
pub fn on_telemetry(delta: f32, prev: MountState) -> MountState {
    use MountState::*;

    if prev == MoveWhileTracking {
        return MoveWhileTracking;
    }

    if delta > TRACK_SLEW_THRESHOLD {
        match prev {
            ParkingIssued | SlewingToParkingPosition => SlewingToParkingPosition,
            _ => Slewing,
        }
    } else if delta > 0.0 {
        match prev {
            ParkingIssued | SlewingToParkingPosition => SlewingToParkingPosition,
            _ => Tracking,
        }
    } else {
        match prev {
            ParkingIssued | SlewingToParkingPosition | Unknown => Parked,
            Slewing | Tracking => Idle,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use MountState::*;

    #[test]
    fn threshold_classification_from_unknown() {
        assert_eq!(on_telemetry(0.0, Unknown), Parked);
        assert_eq!(on_telemetry(0.001, Unknown), Tracking);
        assert_eq!(on_telemetry(0.0045, Unknown), Tracking); // boundary inclusive
        assert_eq!(on_telemetry(0.01, Unknown), Slewing);
    }

    #[test]
    fn park_sequence_monotonicity() {
        let mut state = Tracking;
        state = ParkingIssued; // command-issued annotation, not telemetry
        state = on_telemetry(0.02, state);
        assert_eq!(state, SlewingToParkingPosition);
        state = on_telemetry(0.03, state);
        assert_eq!(state, SlewingToParkingPosition);
        state = on_telemetry(0.0, state);
        assert_eq!(state, Parked);
    }

    #[test]
    fn slewing_and_tracking_settle_to_idle_on_stop() {
        assert_eq!(on_telemetry(0.0, Slewing), Idle);
        assert_eq!(on_telemetry(0.0, Tracking), Idle);
    }

    #[test]
    fn move_while_tracking_is_sticky_against_telemetry() {
        assert_eq!(on_telemetry(0.0, MoveWhileTracking), MoveWhileTracking);
        assert_eq!(on_telemetry(1.0, MoveWhileTracking), MoveWhileTracking);
    }

    #[test]
    fn parked_and_idle_are_stable_at_zero_delta() {
        assert_eq!(on_telemetry(0.0, Parked), Parked);
        assert_eq!(on_telemetry(0.0, Idle), Idle);
    }
}
