use exos2_mount_driver::test_util::MockSerialHandle;
use exos2_mount_driver::{Direction, MountController};
use std::thread;
use std::time::Duration;

/// Drives a controller to `Tracking` by feeding one telemetry frame with a
/// small nonzero delta against the unknown sentinel — `Unknown -> Tracking`
/// at any Δ > 0, per the state table.
fn start_tracking(controller: &MountController, handle: &MockSerialHandle) {
    controller.start();
    thread::sleep(Duration::from_millis(50));
    let frame = exos2_mount_driver::frame::encode(exos2_mount_driver::frame::OutboundCommand::GoTo {
        ra: 1.0,
        dec: 1.0,
    })
    .unwrap();
    let mut telemetry = frame;
    telemetry[4] = 0xFF; // POSITION_REPORT
    handle.push_inbound(&telemetry);
    thread::sleep(Duration::from_millis(700));
}

#[test]
fn pulser_emits_within_expected_cadence_band() {
    let handle = MockSerialHandle::new();
    let controller = MountController::new(Box::new(handle.port()));

    start_tracking(&controller, &handle);
    assert_eq!(controller.get_telescope_state(), exos2_mount_driver::MountState::Tracking);

    let before = handle.written_frame_count();
    controller
        .start_motion_to_direction(Direction::East, 10)
        .expect("StartMotionToDirection should succeed from Tracking");

    thread::sleep(Duration::from_millis(1000));
    let during = handle.written_frame_count() - before;
    assert!(
        (8..=12).contains(&during),
        "expected 8-12 MOVE_EAST frames in ~1s at rate 10, got {during}"
    );

    controller.stop_motion_to_direction();
    let after_stop = handle.written_frame_count();
    thread::sleep(Duration::from_millis(200));
    let trailing = handle.written_frame_count() - after_stop;
    assert!(
        trailing <= 1,
        "frame emission should cease within one tick of StopMotionToDirection, got {trailing} more"
    );

    controller.stop();
}

#[test]
fn start_motion_to_direction_rejected_outside_tracking() {
    let handle = MockSerialHandle::new();
    let controller = MountController::new(Box::new(handle.port()));

    // Still Disconnected.
    let result = controller.start_motion_to_direction(Direction::East, 10);
    assert!(matches!(result, Err(exos2_mount_driver::DriverError::StateViolation(_))));
    assert_eq!(handle.written_frame_count(), 0);
}

#[test]
fn start_motion_to_direction_rejects_zero_rate() {
    let handle = MockSerialHandle::new();
    let controller = MountController::new(Box::new(handle.port()));

    start_tracking(&controller, &handle);
    assert_eq!(controller.get_telescope_state(), exos2_mount_driver::MountState::Tracking);

    let before = handle.written_frame_count();
    let result = controller.start_motion_to_direction(Direction::East, 0);
    assert!(matches!(result, Err(exos2_mount_driver::DriverError::Domain(_))));
    assert_eq!(controller.get_telescope_state(), exos2_mount_driver::MountState::Tracking);

    std::thread::sleep(Duration::from_millis(150));
    assert_eq!(
        handle.written_frame_count(),
        before,
        "a rejected rate should never reach the pulser"
    );

    controller.stop();
}
