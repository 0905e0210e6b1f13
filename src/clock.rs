// Frame timing

use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time since the previous tick, clamped.
    pub dt: Duration,
    /// Time since the clock was created, unclamped.
    pub elapsed: Duration,
    pub frame_index: u64,
}

/// Produces `FrameTime` snapshots, one per presented frame.
///
/// Delta time is clamped so a stalled loop (window drag, debugger pause)
/// does not move the animation by a huge step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last: start,
            frame_index: 0,
            dt_min: Duration::from_micros(100),
            dt_max: Duration::from_millis(250),
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        let ft = FrameTime {
            dt,
            elapsed: now.saturating_duration_since(self.start),
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_reports_delta_and_elapsed() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);

        let first = clock.tick_at(start + Duration::from_millis(16));
        assert_eq!(first.dt, Duration::from_millis(16));
        assert_eq!(first.elapsed, Duration::from_millis(16));
        assert_eq!(first.frame_index, 0);

        let second = clock.tick_at(start + Duration::from_millis(40));
        assert_eq!(second.dt, Duration::from_millis(24));
        assert_eq!(second.elapsed, Duration::from_millis(40));
        assert_eq!(second.frame_index, 1);
    }

    #[test]
    fn delta_is_clamped_but_elapsed_is_not() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);

        let stalled = clock.tick_at(start + Duration::from_secs(3));
        assert_eq!(stalled.dt, Duration::from_millis(250));
        assert_eq!(stalled.elapsed, Duration::from_secs(3));

        let immediate = clock.tick_at(start + Duration::from_secs(3));
        assert_eq!(immediate.dt, Duration::from_micros(100));
    }
}
