//! Device tilt → camera offset.
//!
//! The first reading after permission is granted becomes the baseline;
//! later readings report the damped delta from it. Platforms that gate the
//! sensor behind a permission get exactly one prompt, triggered by the first
//! user interaction. A denied prompt is never retried.

/// Multiplier applied to the raw angle delta (degrees).
pub const ORIENTATION_DAMPING: f32 = 0.1;
/// Bound on each damped axis.
pub const ORIENTATION_LIMIT: f32 = 3.0;

/// Sensor permission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    NotRequested,
    Granted,
    Denied,
}

/// Platform tilt sensor.
pub trait OrientationSource {
    /// Ask the platform for sensor access. Called at most once.
    fn request_permission(&mut self) -> bool;
}

/// Desktop builds have no tilt sensor.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOrientationSensor;

impl OrientationSource for NoOrientationSensor {
    fn request_permission(&mut self) -> bool {
        false
    }
}

#[derive(Debug, Clone)]
pub struct OrientationSampler {
    permission: Permission,
    /// (gamma, beta) of the first reading
    baseline: Option<(f32, f32)>,
    x: f32,
    y: f32,
}

impl OrientationSampler {
    pub fn new() -> Self {
        Self {
            permission: Permission::NotRequested,
            baseline: None,
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }

    /// First generic user interaction: prompt for sensor access once.
    pub fn on_first_interaction(&mut self, source: &mut dyn OrientationSource) {
        if self.permission != Permission::NotRequested {
            return;
        }
        self.permission = if source.request_permission() {
            log::info!("Orientation access granted");
            Permission::Granted
        } else {
            log::debug!("Orientation access unavailable");
            Permission::Denied
        };
    }

    /// Feed a raw sensor reading: `gamma` is left/right tilt, `beta` front/back.
    pub fn on_reading(&mut self, gamma: f32, beta: f32) {
        if self.permission != Permission::Granted {
            return;
        }
        let (g0, b0) = *self.baseline.get_or_insert((gamma, beta));
        self.x = ((gamma - g0) * ORIENTATION_DAMPING).clamp(-ORIENTATION_LIMIT, ORIENTATION_LIMIT);
        self.y = ((beta - b0) * ORIENTATION_DAMPING).clamp(-ORIENTATION_LIMIT, ORIENTATION_LIMIT);
    }

    pub fn offset(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

impl Default for OrientationSampler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingSensor {
        grant: bool,
        requests: usize,
    }

    impl OrientationSource for CountingSensor {
        fn request_permission(&mut self) -> bool {
            self.requests += 1;
            self.grant
        }
    }

    fn granted() -> OrientationSampler {
        let mut s = OrientationSampler::new();
        s.on_first_interaction(&mut CountingSensor {
            grant: true,
            requests: 0,
        });
        s
    }

    #[test]
    fn permission_requested_once() {
        let mut sensor = CountingSensor {
            grant: false,
            requests: 0,
        };
        let mut s = OrientationSampler::new();
        s.on_first_interaction(&mut sensor);
        s.on_first_interaction(&mut sensor);
        s.on_first_interaction(&mut sensor);
        assert_eq!(sensor.requests, 1);
        assert_eq!(s.permission(), Permission::Denied);
    }

    #[test]
    fn readings_ignored_without_permission() {
        let mut s = OrientationSampler::new();
        s.on_reading(10.0, 10.0);
        s.on_reading(40.0, 40.0);
        assert_eq!(s.offset(), (0.0, 0.0));
    }

    #[test]
    fn first_reading_is_baseline() {
        let mut s = granted();
        s.on_reading(15.0, 45.0);
        assert_eq!(s.offset(), (0.0, 0.0));
        s.on_reading(25.0, 35.0);
        let (x, y) = s.offset();
        assert!((x - 1.0).abs() < 1e-5);
        assert!((y + 1.0).abs() < 1e-5);
    }

    #[test]
    fn deltas_are_clamped_per_axis() {
        let mut s = granted();
        s.on_reading(0.0, 0.0);
        s.on_reading(90.0, -5.0);
        let (x, y) = s.offset();
        assert_eq!(x, ORIENTATION_LIMIT);
        assert!((y + 0.5).abs() < 1e-5);
    }

    #[test]
    fn desktop_sensor_denies() {
        let mut s = OrientationSampler::new();
        s.on_first_interaction(&mut NoOrientationSensor);
        assert_eq!(s.permission(), Permission::Denied);
    }
}
