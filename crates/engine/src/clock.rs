//! Frame clock: real elapsed time, clamped.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    cap: Duration,
}

impl FrameClock {
    pub fn new(cap: Duration) -> Self {
        Self::starting_at(Instant::now(), cap)
    }

    pub fn starting_at(start: Instant, cap: Duration) -> Self {
        Self { last: start, cap }
    }

    /// Seconds since the previous tick, at most the cap.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        elapsed.min(self.cap).as_secs_f32()
    }

    /// Forget time spent outside the loop (swaps, end screen).
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    pub fn cap(&self) -> Duration {
        self.cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAP: Duration = Duration::from_micros(33_333);

    #[test]
    fn short_frames_pass_through() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start, CAP);
        let dt = clock.tick_at(start + Duration::from_millis(10));
        assert!((dt - 0.010).abs() < 1e-6);
    }

    #[test]
    fn long_frames_are_clamped() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start, CAP);
        let dt = clock.tick_at(start + Duration::from_secs(2));
        assert_eq!(dt, CAP.as_secs_f32());

        // Measured from the previous tick's instant.
        let dt = clock.tick_at(start + Duration::from_millis(2005));
        assert!((dt - 0.005).abs() < 1e-6);
    }

    #[test]
    fn clock_never_goes_backwards() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut clock = FrameClock::starting_at(start, CAP);
        assert_eq!(clock.tick_at(start - Duration::from_millis(500)), 0.0);
    }
}
