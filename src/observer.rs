/// Callback interface the controller's caller supplies; invoked synchronously
/// from the receiver loop thread as telemetry frames are decoded. This is a
/// back-reference, not an owner — the controller holds it behind an `Arc`
/// purely for sharing across threads, never forming a cycle back to itself.
pub trait TelemetryObserver: Send + Sync {
    fn on_pointing_coordinates_received(&self, ra: f32, dec: f32);
    fn on_site_location_received(&self, lat: f32, lon: f32);
}

/// An observer that does nothing; the default when a caller has no need to
/// react to telemetry beyond the controller's own observable fields.
pub struct NullObserver;

impl TelemetryObserver for NullObserver {
    fn on_pointing_coordinates_received(&self, _ra: f32, _dec: f32) {}
    fn on_site_location_received(&self, _lat: f32, _lon: f32) {}
}
