//! Mapping from simulated environment values to DSP filter parameters.
//!
//! Only the shape of these curves is a tuning detail; the engine's contract is
//! that they are driven by a single smoothed scalar each.

use crate::math::lerp;

/// Second-order curve `a·x² + b·x + c`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Quadratic {
    a: f32,
    b: f32,
    c: f32,
}

impl Quadratic {
    const fn new(a: f32, b: f32, c: f32) -> Self {
        Self { a, b, c }
    }

    fn eval(&self, x: f32) -> f32 {
        (self.a * x + self.b) * x + self.c
    }
}

// Small volumes favor early reflections, larger ones a longer tail.
const ROOM_CURVE: Quadratic = Quadratic::new(-2_400.0, 2_200.0, -600.0);
const DECAY_TIME_CURVE: Quadratic = Quadratic::new(-2.2, 4.0, 0.3);
const REFLECTIONS_LEVEL_CURVE: Quadratic = Quadratic::new(-800.0, -1_400.0, 200.0);
const REVERB_LEVEL_CURVE: Quadratic = Quadratic::new(-2_600.0, 2_400.0, -900.0);
const REVERB_DELAY_CURVE: Quadratic = Quadratic::new(0.02, 0.06, 0.005);

/// Reverb filter settings, in the units most game audio reverbs expect
/// (levels in millibels, times in seconds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverbParams {
    /// Room effect level at mid frequencies (mB, -10000..=0)
    pub room: f32,
    /// Late reverb decay time (s)
    pub decay_time: f32,
    /// Early reflections level relative to room (mB, -10000..=1000)
    pub reflections_level: f32,
    /// Late reverb level relative to room (mB, -10000..=2000)
    pub reverb_level: f32,
    /// Late reverb delay relative to the first reflection (s)
    pub reverb_delay: f32,
}

/// Reverb settings for a normalized physical volume in [0, 1].
pub fn reverb_params(normalized_volume: f32) -> ReverbParams {
    let v = normalized_volume.clamp(0.0, 1.0);
    ReverbParams {
        room: ROOM_CURVE.eval(v).clamp(-10_000.0, 0.0),
        decay_time: DECAY_TIME_CURVE.eval(v).clamp(0.1, 20.0),
        reflections_level: REFLECTIONS_LEVEL_CURVE.eval(v).clamp(-10_000.0, 1_000.0),
        reverb_level: REVERB_LEVEL_CURVE.eval(v).clamp(-10_000.0, 2_000.0),
        reverb_delay: REVERB_DELAY_CURVE.eval(v).clamp(0.0, 0.1),
    }
}

/// Low-pass cutoff for an occlusion amount in [0, 1]: `clear_hz` when nothing is
/// in the way, `occluded_hz` when fully blocked, linear in between.
pub fn low_pass_cutoff(occlusion: f32, clear_hz: f32, occluded_hz: f32) -> f32 {
    lerp(clear_hz, occluded_hz, occlusion)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverb_params_stay_in_range() {
        for i in 0..=100 {
            let params = reverb_params(i as f32 / 100.0);
            assert!((-10_000.0..=0.0).contains(&params.room));
            assert!((0.1..=20.0).contains(&params.decay_time));
            assert!((-10_000.0..=1_000.0).contains(&params.reflections_level));
            assert!((-10_000.0..=2_000.0).contains(&params.reverb_level));
            assert!((0.0..=0.1).contains(&params.reverb_delay));
        }
    }

    #[test]
    fn test_reverb_params_clamp_input() {
        assert_eq!(reverb_params(-3.0), reverb_params(0.0));
        assert_eq!(reverb_params(7.0), reverb_params(1.0));
    }

    #[test]
    fn test_small_rooms_favor_reflections_over_tail() {
        let closet = reverb_params(0.02);
        let hall = reverb_params(0.5);
        assert!(closet.decay_time < hall.decay_time);
        assert!(closet.reflections_level > hall.reflections_level);
        assert!(closet.reverb_delay < hall.reverb_delay);
    }

    #[test]
    fn test_low_pass_cutoff() {
        assert_eq!(low_pass_cutoff(0.0, 22_000.0, 2_000.0), 22_000.0);
        assert_eq!(low_pass_cutoff(1.0, 22_000.0, 2_000.0), 2_000.0);
        assert_eq!(low_pass_cutoff(0.5, 22_000.0, 2_000.0), 12_000.0);
    }
}
