use std::time::{Duration, Instant};

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy)]
pub struct FrameInfo {
    pub number: u64,
    pub time: f32,
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// Infinite iterator that yields frames no faster than a maximum rate.
/// Use this in a loop: `for frame in FramePacer::new(60.0) { ... }`
pub struct FramePacer {
    frame_number: u64,
    interval: Duration,
    start_time: Instant,
    last_frame_time: Option<Instant>,
}

impl FramePacer {
    /// Pacer capped at `max_fps`. Non-positive or non-finite rates are unpaced.
    pub fn new(max_fps: f32) -> Self {
        // Rates so small the interval overflows `Duration` are unpaced too
        let interval = if max_fps.is_finite() && max_fps > 0.0 {
            Duration::try_from_secs_f32(1.0 / max_fps).unwrap_or(Duration::ZERO)
        } else {
            Duration::ZERO
        };
        Self {
            frame_number: 0,
            interval,
            start_time: Instant::now(),
            last_frame_time: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Iterator for FramePacer {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        // First frame goes out immediately
        if let Some(last) = self.last_frame_time {
            let due = last + self.interval;
            let now = Instant::now();
            if due > now {
                std::thread::sleep(due - now);
            }
        }

        let now = Instant::now();
        let delta = self
            .last_frame_time
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32());
        let time = now.duration_since(self.start_time).as_secs_f32();

        let info = FrameInfo::new(self.frame_number, time, delta);

        self.frame_number += 1;
        self.last_frame_time = Some(now);

        Some(info)
    }
}
