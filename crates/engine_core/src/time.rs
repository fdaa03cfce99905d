//! Simulation time driven by the host's frame deltas.

/// Accumulates host-supplied frame deltas into simulation time.
///
/// The clock never reads the wall clock: the driver hands it the delta of every
/// rendered frame, so replaying the same deltas replays the same time line.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    /// Duration of the last frame in seconds.
    delta: f32,
    /// Total simulated time in seconds.
    elapsed: f64,
    /// Frame count since start.
    frame_count: u64,
}

impl SimClock {
    /// Create a clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame. Negative deltas are the driver's bug and are
    /// applied as-is.
    pub fn advance(&mut self, delta: f32) {
        self.delta = delta;
        self.elapsed += delta as f64;
        self.frame_count += 1;
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed as f32
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
