use crate::math::move_towards;
use std::time::Duration;

/// A [0, 1] quantity that is sampled on a fixed interval and smoothed in between.
///
/// `previous` and `current` are the two most recent samples. The displayed value
/// moves toward `current` at `1 / interval` per second, so any transition between
/// two samples is complete by the time the next sample is due.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampledValue {
    previous: f32,
    current: f32,
    value: f32,
    time_until_next_sample: f32,
    interval: f32,
}

impl SampledValue {
    /// Starts at 0.0 with a full interval before the first sample.
    pub fn new(interval: Duration) -> Self {
        let interval = interval.as_secs_f32();
        Self {
            previous: 0.0,
            current: 0.0,
            value: 0.0,
            time_until_next_sample: interval,
            interval,
        }
    }

    /// Jumps straight to `sample` with no transition and restarts the interval.
    pub fn seed(&mut self, sample: f32) {
        let sample = sample.clamp(0.0, 1.0);
        self.previous = sample;
        self.current = sample;
        self.value = sample;
        self.time_until_next_sample = self.interval;
    }

    /// Advances by `dt` seconds, taking a new sample from `sample` if one falls due,
    /// and returns the smoothed value.
    ///
    /// At most one sample is taken per call. Time left over after the sample point
    /// is spent moving toward the new sample.
    pub fn tick(&mut self, dt: f32, sample: impl FnOnce() -> f32) -> f32 {
        let dt = dt.max(0.0);
        self.time_until_next_sample -= dt;

        if self.time_until_next_sample > 0.0 {
            self.step(dt);
            return self.value;
        }

        let after_sample = (-self.time_until_next_sample).min(dt);
        self.step(dt - after_sample);

        self.previous = self.current;
        self.current = sample().clamp(0.0, 1.0);
        self.time_until_next_sample += self.interval;
        if self.time_until_next_sample <= 0.0 {
            self.time_until_next_sample = self.interval;
        }

        self.step(after_sample);
        self.value
    }

    fn step(&mut self, seconds: f32) {
        self.value = move_towards(self.value, self.current, seconds / self.interval);
    }

    /// Smoothed value in [0, 1]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// The sample taken before the latest one
    pub fn previous(&self) -> f32 {
        self.previous
    }

    /// The latest sample (the value being moved toward)
    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn time_until_next_sample(&self) -> f32 {
        self.time_until_next_sample
    }
}
