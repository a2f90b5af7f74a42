use exos2_mount_driver::test_util::MockSerialHandle;
use exos2_mount_driver::MountController;
use std::time::{Duration, Instant};

/// Start -> Stop must complete without deadlock within roughly 2x the
/// receiver's ~500ms cadence, even with no telemetry at all.
#[test]
fn stop_completes_promptly_with_no_telemetry() {
    let handle = MockSerialHandle::new();
    let controller = MountController::new(Box::new(handle.port()));

    controller.start();
    std::thread::sleep(Duration::from_millis(50));

    let started_at = Instant::now();
    controller.stop();
    let elapsed = started_at.elapsed();

    assert!(
        elapsed < Duration::from_millis(1500),
        "stop() took {elapsed:?}, expected well under 2x the ~500ms receiver cadence"
    );
    assert_eq!(
        controller.get_telescope_state(),
        exos2_mount_driver::MountState::Disconnected
    );
}

#[test]
fn controller_can_restart_after_stop() {
    let handle = MockSerialHandle::new();
    let controller = MountController::new(Box::new(handle.port()));

    controller.start();
    std::thread::sleep(Duration::from_millis(50));
    controller.stop();

    controller.start();
    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(controller.get_telescope_state(), exos2_mount_driver::MountState::Unknown);
    controller.stop();
}
