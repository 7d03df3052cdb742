//! Wall-clock accumulators for codec and transfer intervals.

use std::time::{Duration, Instant};

/// Caller-owned timing accumulators for one configuration run.
///
/// Two running totals are kept across the life of a run: time spent in
/// the codec (compress + decompress) and time spent moving buffers
/// between device and host representations, plus a step counter. The
/// accumulators belong to whoever drives the sweep; they must be
/// [`reset`](StepTimings::reset) before a new configuration is
/// benchmarked so sweep points do not contaminate each other.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepTimings {
    codec: Duration,
    transfer: Duration,
    steps: u64,
}

impl StepTimings {
    /// Create zeroed accumulators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f`, charging its wall-clock time to the codec accumulator.
    pub fn time_codec<T>(&mut self, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        self.codec += start.elapsed();
        out
    }

    /// Run `f`, charging its wall-clock time to the transfer accumulator.
    pub fn time_transfer<T>(&mut self, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        self.transfer += start.elapsed();
        out
    }

    /// Count one completed optimization step.
    pub fn record_step(&mut self) {
        self.steps += 1;
    }

    /// Steps completed since the last reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Cumulative codec seconds since the last reset.
    pub fn codec_secs(&self) -> f64 {
        self.codec.as_secs_f64()
    }

    /// Cumulative transfer seconds since the last reset.
    pub fn transfer_secs(&self) -> f64 {
        self.transfer.as_secs_f64()
    }

    /// Mean codec seconds per step (0 when no steps ran).
    pub fn mean_codec_secs(&self) -> f64 {
        if self.steps == 0 {
            return 0.0;
        }
        self.codec_secs() / self.steps as f64
    }

    /// Mean transfer seconds per step (0 when no steps ran).
    pub fn mean_transfer_secs(&self) -> f64 {
        if self.steps == 0 {
            return 0.0;
        }
        self.transfer_secs() / self.steps as f64
    }

    /// Zero all accumulators, ready for the next configuration.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_new_is_zeroed() {
        let timings = StepTimings::new();
        assert_eq!(timings.steps(), 0);
        assert_eq!(timings.codec_secs(), 0.0);
        assert_eq!(timings.transfer_secs(), 0.0);
    }

    #[test]
    fn test_timed_sections_accumulate() {
        let mut timings = StepTimings::new();
        let out = timings.time_codec(|| {
            sleep(Duration::from_millis(5));
            7
        });
        assert_eq!(out, 7);
        timings.time_transfer(|| sleep(Duration::from_millis(5)));

        assert!(timings.codec_secs() >= 0.005);
        assert!(timings.transfer_secs() >= 0.005);
    }

    #[test]
    fn test_step_counter() {
        let mut timings = StepTimings::new();
        for _ in 0..3 {
            timings.record_step();
        }
        assert_eq!(timings.steps(), 3);
    }

    #[test]
    fn test_means() {
        let mut timings = StepTimings::new();
        assert_eq!(timings.mean_codec_secs(), 0.0);

        timings.time_codec(|| sleep(Duration::from_millis(4)));
        timings.record_step();
        timings.record_step();

        let mean = timings.mean_codec_secs();
        assert!(mean > 0.0 && mean <= timings.codec_secs());
        assert!((mean - timings.codec_secs() / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_reset() {
        let mut timings = StepTimings::new();
        timings.time_codec(|| sleep(Duration::from_millis(1)));
        timings.time_transfer(|| sleep(Duration::from_millis(1)));
        timings.record_step();

        timings.reset();
        assert_eq!(timings.steps(), 0);
        assert_eq!(timings.codec_secs(), 0.0);
        assert_eq!(timings.transfer_secs(), 0.0);
    }
}
