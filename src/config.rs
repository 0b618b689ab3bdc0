//! Configuration for the PetalSonic channel engine

use crate::error::{PetalSonicError, Result};
use crate::scene::LayerMask;
use std::time::Duration;

/// Distance (in world units) a reverb probe ray travels before it is considered open space.
pub const DEFAULT_MAX_REVERB_DISTANCE: f32 = 50.0;

/// Configuration descriptor for a [`PetalSonicEngine`](crate::PetalSonicEngine)
#[derive(Debug, Clone)]
pub struct PetalSonicEngineDesc {
    /// Number of playback channels in the pool (maximum simultaneous sounds)
    pub pool_capacity: usize,
    /// How often dynamic reverb re-samples the physical volume around a sound
    pub reverb_sample_interval: Duration,
    /// How often dynamic occlusion re-tests line of sight to the listener
    pub occlusion_sample_interval: Duration,
    /// Cutoff distance for the six physical volume probe rays
    pub max_reverb_distance: f32,
    /// Cutoff distance for the occlusion ray
    pub max_occlusion_distance: f32,
    /// Physical volume that maps to a normalized value of 1.0
    pub max_physical_volume: f32,
    /// Layers ignored by every probe ray (the listener's own colliders)
    pub listener_layer: LayerMask,
    /// Low-pass cutoff applied to a sound with nothing between it and the listener
    pub clear_cutoff_hz: f32,
    /// Low-pass cutoff applied to a fully occluded sound
    pub occluded_cutoff_hz: f32,
    /// Used to compute start delays of distance-delayed sounds (units per second)
    pub speed_of_sound: f32,
    /// Number of undelivered events kept before new ones are dropped
    pub event_capacity: usize,
    /// Seed for pitch randomization (None seeds from the OS)
    pub pitch_seed: Option<u64>,
}

impl Default for PetalSonicEngineDesc {
    fn default() -> Self {
        Self {
            pool_capacity: 32,
            reverb_sample_interval: Duration::from_millis(700),
            occlusion_sample_interval: Duration::from_millis(100),
            max_reverb_distance: DEFAULT_MAX_REVERB_DISTANCE,
            max_occlusion_distance: 100.0,
            // Eight octant pyramids with every probe at its cutoff.
            max_physical_volume: 8.0 * DEFAULT_MAX_REVERB_DISTANCE.powi(3) / 3.0,
            listener_layer: LayerMask::NONE,
            clear_cutoff_hz: 22_000.0,
            occluded_cutoff_hz: 2_000.0,
            speed_of_sound: 343.0,
            event_capacity: 256,
            pitch_seed: None,
        }
    }
}

impl PetalSonicEngineDesc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool_capacity(mut self, capacity: usize) -> Self {
        self.pool_capacity = capacity;
        self
    }

    pub fn reverb_sample_interval(mut self, interval: Duration) -> Self {
        self.reverb_sample_interval = interval;
        self
    }

    pub fn occlusion_sample_interval(mut self, interval: Duration) -> Self {
        self.occlusion_sample_interval = interval;
        self
    }

    pub fn max_reverb_distance(mut self, distance: f32) -> Self {
        self.max_reverb_distance = distance;
        self
    }

    pub fn max_occlusion_distance(mut self, distance: f32) -> Self {
        self.max_occlusion_distance = distance;
        self
    }

    pub fn max_physical_volume(mut self, volume: f32) -> Self {
        self.max_physical_volume = volume;
        self
    }

    pub fn listener_layer(mut self, layer: LayerMask) -> Self {
        self.listener_layer = layer;
        self
    }

    pub fn cutoff_range(mut self, clear_hz: f32, occluded_hz: f32) -> Self {
        self.clear_cutoff_hz = clear_hz;
        self.occluded_cutoff_hz = occluded_hz;
        self
    }

    pub fn speed_of_sound(mut self, speed: f32) -> Self {
        self.speed_of_sound = speed;
        self
    }

    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    pub fn pitch_seed(mut self, seed: u64) -> Self {
        self.pitch_seed = Some(seed);
        self
    }

    /// Checks that the descriptor can drive an engine.
    pub fn validate(&self) -> Result<()> {
        if self.pool_capacity == 0 {
            return Err(PetalSonicError::Configuration(
                "pool_capacity must be at least 1".into(),
            ));
        }
        if self.reverb_sample_interval.is_zero() || self.occlusion_sample_interval.is_zero() {
            return Err(PetalSonicError::Configuration(
                "sample intervals must be non-zero".into(),
            ));
        }

        let positive = [
            ("max_reverb_distance", self.max_reverb_distance),
            ("max_occlusion_distance", self.max_occlusion_distance),
            ("max_physical_volume", self.max_physical_volume),
            ("speed_of_sound", self.speed_of_sound),
            ("occluded_cutoff_hz", self.occluded_cutoff_hz),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(PetalSonicError::Configuration(format!(
                    "{} must be a positive finite number (got {})",
                    name, value
                )));
            }
        }

        if self.clear_cutoff_hz < self.occluded_cutoff_hz {
            return Err(PetalSonicError::Configuration(format!(
                "clear_cutoff_hz ({}) is below occluded_cutoff_hz ({})",
                self.clear_cutoff_hz, self.occluded_cutoff_hz
            )));
        }
        if self.event_capacity == 0 {
            return Err(PetalSonicError::Configuration(
                "event_capacity must be at least 1".into(),
            ));
        }

        Ok(())
    }
}
