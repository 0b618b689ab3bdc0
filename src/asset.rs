//! Sound asset descriptors.
//!
//! A [`SoundAsset`] describes *what* to play and *how*: the clip, its base volume,
//! pitch variation, looping, priority, and which spatial features the sound wants.
//! Assets are owned by the caller's content system and only borrowed by the engine.

/// Importance of a sound when channels are scarce.
///
/// Ordered `None < Low < Medium < High < Essential`. A full pool lets a request
/// take over the channel of the lowest priority playing sound as long as the
/// request is at least that important.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    None,
    Low,
    #[default]
    Medium,
    High,
    Essential,
}

/// Loop mode for audio playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
    /// Play once; the channel is reclaimed when the clip ends
    #[default]
    Once,
    /// Loop until stopped or preempted
    Infinite,
}

/// Independent spatial features a sound may request.
///
/// "Dynamic" variants re-sample their property on a fixed interval for the lifetime
/// of the sound and smooth between samples. The plain variants sample once at start.
/// Every feature except `spatial` itself implies a 3D sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SoundFeatures {
    pub spatial: bool,
    pub simulated_reverb: bool,
    pub dynamic_simulated_reverb: bool,
    pub occlusion: bool,
    pub dynamic_occlusion: bool,
    pub distance_delayed: bool,
    /// Accepted for content compatibility; slapback echoes are not simulated.
    pub emits_slapbacks: bool,
    pub doppler: bool,
}

impl SoundFeatures {
    /// A plain 2D sound
    pub const NONE: Self = Self {
        spatial: false,
        simulated_reverb: false,
        dynamic_simulated_reverb: false,
        occlusion: false,
        dynamic_occlusion: false,
        distance_delayed: false,
        emits_slapbacks: false,
        doppler: false,
    };

    /// A positioned sound without any environment simulation
    pub const SPATIAL: Self = Self {
        spatial: true,
        ..Self::NONE
    };

    /// A positioned sound whose reverb and occlusion follow it around
    pub const DYNAMIC_ENVIRONMENT: Self = Self {
        spatial: true,
        simulated_reverb: true,
        dynamic_simulated_reverb: true,
        occlusion: true,
        dynamic_occlusion: true,
        ..Self::NONE
    };

    pub fn with_reverb(mut self, dynamic: bool) -> Self {
        self.spatial = true;
        self.simulated_reverb = true;
        self.dynamic_simulated_reverb = dynamic;
        self
    }

    pub fn with_occlusion(mut self, dynamic: bool) -> Self {
        self.spatial = true;
        self.occlusion = true;
        self.dynamic_occlusion = dynamic;
        self
    }

    pub fn with_distance_delay(mut self) -> Self {
        self.spatial = true;
        self.distance_delayed = true;
        self
    }

    pub fn with_doppler(mut self) -> Self {
        self.spatial = true;
        self.doppler = true;
        self
    }

    /// True if any requested feature needs a position in the world.
    pub fn requests_spatial(&self) -> bool {
        self.spatial
            || self.wants_reverb()
            || self.wants_occlusion()
            || self.distance_delayed
            || self.emits_slapbacks
            || self.doppler
    }

    /// Reverb is simulated, either once or continuously.
    pub fn wants_reverb(&self) -> bool {
        self.simulated_reverb || self.dynamic_simulated_reverb
    }

    /// Occlusion is simulated, either once or continuously.
    pub fn wants_occlusion(&self) -> bool {
        self.occlusion || self.dynamic_occlusion
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// Everything needed to start one sound.
///
/// `C` is the clip type of the [`OutputChannel`](crate::output::OutputChannel)
/// backend. A missing clip or a non-positive volume makes the asset unplayable.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundAsset<C> {
    pub clip: Option<C>,
    /// Base volume in [0, 1]
    pub volume: f32,
    /// Total pitch variation in [0, 1]; the played pitch lands within ±half of it
    pub pitch_bend: f32,
    pub features: SoundFeatures,
    pub loop_mode: LoopMode,
    pub priority: Priority,
}

impl<C> SoundAsset<C> {
    /// A full-volume, non-looping 2D sound with medium priority
    pub fn new(clip: C) -> Self {
        Self {
            clip: Some(clip),
            volume: 1.0,
            pitch_bend: 0.0,
            features: SoundFeatures::NONE,
            loop_mode: LoopMode::Once,
            priority: Priority::Medium,
        }
    }

    pub fn volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    pub fn pitch_bend(mut self, bend: f32) -> Self {
        self.pitch_bend = bend;
        self
    }

    pub fn features(mut self, features: SoundFeatures) -> Self {
        self.features = features;
        self
    }

    pub fn loop_mode(mut self, loop_mode: LoopMode) -> Self {
        self.loop_mode = loop_mode;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Returns true if the asset has a clip and an audible volume.
    pub fn is_playable(&self) -> bool {
        self.clip.is_some() && self.volume > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert!(Priority::None < Priority::Low);
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
        assert!(Priority::High < Priority::Essential);
    }

    #[test]
    fn test_feature_builders_are_independent() {
        let features = SoundFeatures::NONE.with_reverb(false).with_doppler();
        assert!(features.spatial);
        assert!(features.wants_reverb());
        assert!(!features.dynamic_simulated_reverb);
        assert!(!features.wants_occlusion());
        assert!(features.doppler);
        assert!(!features.distance_delayed);
    }

    #[test]
    fn test_requests_spatial() {
        assert!(!SoundFeatures::NONE.requests_spatial());
        assert!(SoundFeatures::SPATIAL.requests_spatial());

        let occlusion_only = SoundFeatures {
            dynamic_occlusion: true,
            ..SoundFeatures::NONE
        };
        assert!(occlusion_only.requests_spatial());
    }

    #[test]
    fn test_asset_playability() {
        assert!(SoundAsset::new("step").is_playable());
        assert!(!SoundAsset::new("step").volume(0.0).is_playable());

        let mut missing_clip = SoundAsset::new("step");
        missing_clip.clip = None;
        assert!(!missing_clip.is_playable());
    }
}
