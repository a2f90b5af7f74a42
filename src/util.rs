use std::sync::Mutex;

/// A mutex-protected container holding a single, cheaply-copyable value.
///
/// Every piece of state shared between the caller thread, the receiver loop
/// and the motion pulser (current pointing, site location, mount state,
/// thread-running flags) is small and never inspected compositely with
/// another field, so a single-value cell is a simpler contract here than a
/// reader/writer lock over a larger struct.
pub struct GuardedCell<T: Copy>(Mutex<T>);

impl<T: Copy> GuardedCell<T> {
    pub fn new(value: T) -> Self {
        Self(Mutex::new(value))
    }

    pub fn get(&self) -> T {
        *self.0.lock().unwrap()
    }

    pub fn set(&self, value: T) {
        *self.0.lock().unwrap() = value;
    }
}
