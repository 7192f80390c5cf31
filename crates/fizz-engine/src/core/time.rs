/// Tick bookkeeping: how many ticks have run and how long the last one was.
///
/// The clock never reads system time. The driver either hands it a
/// timestamp (`record`) or an explicit delta (`advance`).
#[derive(Debug, Clone, Copy, Default)]
pub struct StepClock {
    /// Ticks elapsed.
    count: u64,
    /// Seconds covered by the most recent tick. Zero on the first tick.
    delta: f32,
    /// Timestamp of the most recent tick, in seconds.
    last: f64,
}

impl StepClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tick at timestamp `now` (seconds). Returns the tick's delta.
    pub fn record(&mut self, now: f64) -> f32 {
        self.delta = if self.count > 0 {
            sanitize_delta((now - self.last) as f32)
        } else {
            0.0
        };
        self.last = now;
        self.count += 1;
        self.delta
    }

    /// Record a tick covering `delta` seconds. Returns the delta actually used.
    pub fn advance(&mut self, delta: f32) -> f32 {
        self.delta = if self.count > 0 {
            sanitize_delta(delta)
        } else {
            0.0
        };
        self.last += self.delta as f64;
        self.count += 1;
        self.delta
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn last(&self) -> f64 {
        self.last
    }
}

fn sanitize_delta(delta: f32) -> f32 {
    if delta.is_finite() && delta >= 0.0 {
        delta
    } else {
        log::warn!("tick delta {} is not a forward time step, using 0", delta);
        0.0
    }
}
