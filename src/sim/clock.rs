//! Frame clock
//!
//! Converts the host's monotonic millisecond timestamps into elapsed and
//! delta time in seconds. Deltas are not clamped; a backgrounded tab coming
//! back after minutes simply yields one very large step.

/// Elapsed/delta time for one frame, in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Time {
    /// Total time since the first frame
    pub time: f32,
    /// Time since the previous frame
    pub delta_time: f32,
}

/// Tracks frame timestamps and produces [`Time`] samples
#[derive(Debug, Clone, Default)]
pub struct Clock {
    epoch: Option<f64>,
    last: f64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next host timestamp (milliseconds) and get the frame's time.
    ///
    /// On the first call the timestamp becomes the epoch; `last` defaults to
    /// zero, so the first delta equals the total elapsed time.
    pub fn update(&mut self, timestamp_ms: f64) -> Time {
        let epoch = *self.epoch.get_or_insert(timestamp_ms);

        let time = ((timestamp_ms - epoch) / 1000.0) as f32;
        let delta_time = ((timestamp_ms - self.last) / 1000.0) as f32;
        self.last = timestamp_ms;

        Time { time, delta_time }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_delta_equals_time() {
        let mut clock = Clock::new();
        let t = clock.update(5000.0);
        assert_eq!(t.time, 0.0);
        assert_eq!(t.delta_time, 5.0);
    }

    #[test]
    fn test_steady_frames() {
        let mut clock = Clock::new();
        clock.update(1000.0);
        let t = clock.update(1016.0);
        assert!((t.time - 0.016).abs() < 1e-6);
        assert!((t.delta_time - 0.016).abs() < 1e-6);
        let t = clock.update(1032.0);
        assert!((t.time - 0.032).abs() < 1e-6);
        assert!((t.delta_time - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_tolerates_large_and_backwards_gaps() {
        let mut clock = Clock::new();
        clock.update(0.0);
        // Tab backgrounded for a minute
        let t = clock.update(60_000.0);
        assert!((t.delta_time - 60.0).abs() < 1e-3);
        // Non-monotonic host clock: negative delta, no panic
        let t = clock.update(59_000.0);
        assert!(t.delta_time < 0.0);
    }
}
