use std::time::{Duration, Instant};

/// Counts presented frames over a fixed window.
///
/// `record` returns the measured rate once per elapsed window and `None`
/// otherwise, so callers can log it without flooding.
#[derive(Debug, Clone)]
pub struct FrameRate {
    window: Duration,
    window_start: Option<Instant>,
    frames: u32,
}

impl FrameRate {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            window_start: None,
            frames: 0,
        }
    }

    pub fn record(&mut self, now: Instant) -> Option<f32> {
        let Some(start) = self.window_start else {
            self.window_start = Some(now);
            return None;
        };

        self.frames += 1;
        let elapsed = now.saturating_duration_since(start);
        if elapsed < self.window {
            return None;
        }

        let fps = self.frames as f32 / elapsed.as_secs_f32();
        self.window_start = Some(now);
        self.frames = 0;
        Some(fps)
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_once_per_window() {
        let mut rate = FrameRate::default();
        let base = Instant::now();
        assert_eq!(rate.record(base), None);

        let step = Duration::from_millis(10);
        let mut reports = Vec::new();
        for i in 1..=100 {
            if let Some(fps) = rate.record(base + step * i) {
                reports.push(fps);
            }
        }

        assert_eq!(reports.len(), 1);
        assert!((reports[0] - 100.0).abs() < 0.5);
    }
}
