//! Frame clock

/// Turns absolute timestamps into per-frame elapsed seconds.
///
/// The first frame reports zero. Elapsed time is never negative and is
/// capped at `max_frame_time` so a long stall (hidden tab, debugger) does not
/// arrive as one giant step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<f64>,
    max_frame_time: f32,
}

impl FrameClock {
    pub fn new(max_frame_time: f32) -> Self {
        Self {
            last: None,
            max_frame_time: max_frame_time.max(0.0),
        }
    }

    /// Elapsed seconds since the previous call
    pub fn tick(&mut self, now_secs: f64) -> f32 {
        let elapsed = match self.last {
            Some(last) if now_secs.is_finite() => (now_secs - last).max(0.0) as f32,
            _ => 0.0,
        };
        if now_secs.is_finite() {
            self.last = Some(now_secs);
        }
        elapsed.min(self.max_frame_time)
    }

    /// Forget the previous timestamp (after a pause)
    pub fn reset(&mut self) {
        self.last = None;
    }
}
