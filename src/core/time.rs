//! Frame timing and interval timers

use std::time::{Duration, Instant};

/// Tracks frame timing and calculates FPS
pub struct FrameTimer {
    last_frame: Instant,
    delta: Duration,
    fps_timer: Instant,
    fps: f32,
    fps_frame_count: u32,
}

impl FrameTimer {
    /// Create a new frame timer
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            delta: Duration::ZERO,
            fps_timer: now,
            fps: 0.0,
            fps_frame_count: 0,
        }
    }

    /// Call once per frame to update timing.
    ///
    /// Returns true when the FPS estimate was refreshed this frame.
    pub fn tick(&mut self) -> bool {
        let now = Instant::now();
        self.delta = now - self.last_frame;
        self.last_frame = now;
        self.fps_frame_count += 1;

        // Update FPS every second
        let fps_elapsed = now - self.fps_timer;
        if fps_elapsed >= Duration::from_secs(1) {
            self.fps = self.fps_frame_count as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = 0;
            self.fps_timer = now;
            return true;
        }
        false
    }

    /// Get delta time as Duration
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Get current FPS (updated every second)
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot timer on a caller-supplied clock, re-armed explicitly after each firing.
///
/// Time is a `Duration` since the owner's epoch, so tests can drive it
/// deterministically. At most one deadline is pending at a time.
#[derive(Clone, Debug)]
pub struct IntervalTimer {
    interval: Duration,
    deadline: Option<Duration>,
}

impl IntervalTimer {
    /// Shortest accepted interval; a zero interval would fire forever at one instant
    pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

    /// Create a disarmed timer. Intervals below `MIN_INTERVAL` are raised to it.
    pub fn new(interval: Duration) -> Self {
        if interval < Self::MIN_INTERVAL {
            log::warn!("Timer interval {:?} raised to {:?}", interval, Self::MIN_INTERVAL);
        }
        Self {
            interval: interval.max(Self::MIN_INTERVAL),
            deadline: None,
        }
    }

    /// Get the interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Schedule the next firing one full interval after `from`.
    pub fn arm(&mut self, from: Duration) {
        self.deadline = Some(from + self.interval);
    }

    /// Cancel the pending firing. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Check whether a firing is pending
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fire if the deadline has passed.
    ///
    /// Disarms the timer and returns the deadline that fired, so the caller can
    /// re-arm from it without accumulating drift.
    pub fn poll(&mut self, now: Duration) -> Option<Duration> {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                Some(deadline)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_frame_timer_measures_delta() {
        let mut timer = FrameTimer::new();
        std::thread::sleep(ms(2));
        // The FPS estimate only refreshes once a second has passed
        assert!(!timer.tick());
        assert!(timer.delta() >= ms(2));
        assert_eq!(timer.fps(), 0.0);
    }

    #[test]
    fn test_disarmed_timer_never_fires() {
        let mut timer = IntervalTimer::new(ms(50));
        assert!(!timer.is_armed());
        assert_eq!(timer.poll(ms(1000)), None);
    }

    #[test]
    fn test_fires_once_at_deadline() {
        let mut timer = IntervalTimer::new(ms(50));
        timer.arm(ms(0));
        assert_eq!(timer.poll(ms(49)), None);
        assert_eq!(timer.poll(ms(50)), Some(ms(50)));
        assert_eq!(timer.poll(ms(100)), None);
    }

    #[test]
    fn test_rearm_from_fired_deadline() {
        let mut timer = IntervalTimer::new(ms(50));
        timer.arm(ms(0));
        let fired = timer.poll(ms(120)).unwrap();
        timer.arm(fired);
        assert_eq!(timer.poll(ms(99)), None);
        assert_eq!(timer.poll(ms(120)), Some(ms(100)));
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let mut timer = IntervalTimer::new(Duration::ZERO);
        assert_eq!(timer.interval(), IntervalTimer::MIN_INTERVAL);

        timer.arm(ms(10));
        assert_eq!(timer.poll(ms(10)), None);
        assert_eq!(timer.poll(ms(11)), Some(ms(11)));
        timer.arm(ms(11));
        assert_eq!(timer.poll(ms(11)), None);
    }

    #[test]
    fn test_cancel() {
        let mut timer = IntervalTimer::new(ms(50));
        timer.arm(ms(10));
        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert_eq!(timer.poll(ms(100)), None);
    }
}
