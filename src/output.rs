//! Output channel abstraction.
//!
//! An [`OutputChannel`] is one voice of the host's audio backend: something that
//! can play a single clip at a time and exposes a reverb and a low-pass filter.
//! The engine owns one per pool slot and only ever talks to the backend through
//! this trait.

use crate::math::Vec3;
use crate::spatial::ReverbParams;
use std::time::Duration;

/// How much the backend's panner/attenuation applies to a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpatialBlend {
    /// Plays straight to the mix, position ignored
    #[default]
    TwoD,
    /// Positioned in the world relative to the listener
    ThreeD,
}

/// Everything the engine sets up before a channel starts playing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelSettings<'a, C> {
    pub clip: &'a C,
    pub looping: bool,
    /// Playback rate multiplier (1.0 = original pitch)
    pub pitch: f32,
    /// Effective output volume (asset volume × global volume)
    pub volume: f32,
    pub position: Vec3,
    /// 1.0 enables doppler shifting for this channel, 0.0 disables it
    pub doppler_level: f32,
}

/// One playback voice of the host audio backend.
pub trait OutputChannel {
    /// Backend specific clip reference
    type Clip;

    /// Loads a clip and its playback settings.
    ///
    /// Implementations must also reset per-sound state: spatial blend back to
    /// [`SpatialBlend::TwoD`] and both filters back to bypass.
    fn configure(&mut self, settings: ChannelSettings<'_, Self::Clip>);

    /// Starts playback immediately.
    fn play(&mut self);

    /// Starts playback after `delay`.
    ///
    /// While the delay is pending, [`is_playing`](Self::is_playing) must report
    /// true, or the engine will reclaim the channel as finished.
    fn play_delayed(&mut self, delay: Duration) {
        let _ = delay;
        self.play();
    }

    fn stop(&mut self);

    /// False once a one-shot clip has ended or the channel was stopped.
    fn is_playing(&self) -> bool;

    fn set_volume(&mut self, volume: f32);

    fn set_position(&mut self, position: Vec3);

    fn set_spatial_blend(&mut self, blend: SpatialBlend);

    fn set_reverb(&mut self, params: &ReverbParams);

    fn set_low_pass_cutoff(&mut self, cutoff_hz: f32);
}
