use exos2_mount_driver::frame::{self, OutboundCommand};
use exos2_mount_driver::test_util::MockSerialHandle;
use exos2_mount_driver::{MountController, TelemetryObserver};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Captures every callback invocation instead of acting on it, so a test can
/// assert on exactly what the receiver loop dispatched and in what order.
#[derive(Default)]
struct CapturingObserver {
    pointing: Mutex<Vec<(f32, f32)>>,
    site_location: Mutex<Vec<(f32, f32)>>,
}

impl TelemetryObserver for CapturingObserver {
    fn on_pointing_coordinates_received(&self, ra: f32, dec: f32) {
        self.pointing.lock().unwrap().push((ra, dec));
    }

    fn on_site_location_received(&self, lat: f32, lon: f32) {
        self.site_location.lock().unwrap().push((lat, lon));
    }
}

fn inbound_frame(command: OutboundCommand, report_id: u8) -> [u8; 13] {
    let mut bytes = frame::encode(command).unwrap();
    bytes[4] = report_id;
    bytes
}

#[test]
fn observer_receives_pointing_and_site_location_callbacks() {
    let handle = MockSerialHandle::new();
    let observer = Arc::new(CapturingObserver::default());
    let controller = MountController::with_observer(Box::new(handle.port()), observer.clone());

    controller.start();
    thread::sleep(Duration::from_millis(50));

    let position = inbound_frame(OutboundCommand::GoTo { ra: 12.5, dec: -45.25 }, 0xFF);
    handle.push_inbound(&position);
    thread::sleep(Duration::from_millis(700));

    let site = inbound_frame(
        OutboundCommand::SetSiteLocation { lat: 33.75, lon: -117.125 },
        0xFE,
    );
    handle.push_inbound(&site);
    thread::sleep(Duration::from_millis(700));

    controller.stop();

    let pointing_calls = observer.pointing.lock().unwrap();
    assert_eq!(pointing_calls.as_slice(), &[(12.5, -45.25)]);

    let site_calls = observer.site_location.lock().unwrap();
    assert_eq!(site_calls.as_slice(), &[(33.75, -117.125)]);
}
