//! Recording output and scripted geometry for tests

use crate::asset::{Priority, SoundFeatures};
use crate::channel::{ChannelRecord, SoundId};
use crate::math::Vec3;
use crate::output::{ChannelSettings, OutputChannel, SpatialBlend};
use crate::scene::{LayerMask, RayHit, RayTracer};
use crate::spatial::{ReverbParams, SampledValue};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Output voice that remembers everything the engine told it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockOutput {
    pub clip: Option<&'static str>,
    pub looping: bool,
    pub pitch: f32,
    pub volume: f32,
    pub position: Vec3,
    pub doppler_level: f32,
    pub spatial_blend: SpatialBlend,
    pub reverb: Option<ReverbParams>,
    pub low_pass_cutoff: Option<f32>,
    pub playing: bool,
    pub start_delay: Option<Duration>,
    pub configure_count: usize,
    pub stop_count: usize,
}

impl MockOutput {
    /// Simulates the clip reaching its end.
    pub fn finish(&mut self) {
        self.playing = false;
    }
}

impl OutputChannel for MockOutput {
    type Clip = &'static str;

    fn configure(&mut self, settings: ChannelSettings<'_, Self::Clip>) {
        self.clip = Some(*settings.clip);
        self.looping = settings.looping;
        self.pitch = settings.pitch;
        self.volume = settings.volume;
        self.position = settings.position;
        self.doppler_level = settings.doppler_level;
        self.spatial_blend = SpatialBlend::TwoD;
        self.reverb = None;
        self.low_pass_cutoff = None;
        self.start_delay = None;
        self.configure_count += 1;
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn play_delayed(&mut self, delay: Duration) {
        self.start_delay = Some(delay);
        self.playing = true;
    }

    fn stop(&mut self) {
        self.playing = false;
        self.stop_count += 1;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn set_spatial_blend(&mut self, blend: SpatialBlend) {
        self.spatial_blend = blend;
    }

    fn set_reverb(&mut self, params: &ReverbParams) {
        self.reverb = Some(*params);
    }

    fn set_low_pass_cutoff(&mut self, cutoff_hz: f32) {
        self.low_pass_cutoff = Some(cutoff_hz);
    }
}

/// A minimal record for pool-level tests.
pub fn record(sound_id: SoundId, priority: Priority) -> ChannelRecord {
    ChannelRecord {
        sound_id,
        priority,
        features: SoundFeatures::NONE,
        owner: None,
        last_position: Vec3::ZERO,
        volume: 1.0,
        reverb: SampledValue::new(Duration::from_millis(700)),
        occlusion: SampledValue::new(Duration::from_millis(100)),
    }
}

/// The inside of an axis-aligned box.
#[derive(Debug, Clone, Copy)]
pub struct RoomTracer {
    min: Vec3,
    max: Vec3,
}

impl RoomTracer {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn centered(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }
}

impl RayTracer for RoomTracer {
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        _ignore: LayerMask,
    ) -> Option<RayHit> {
        let mut nearest: Option<RayHit> = None;
        for axis in 0..3 {
            let d = direction[axis];
            if d == 0.0 {
                continue;
            }
            let (bound, facing) = if d > 0.0 {
                (self.max[axis], -1.0)
            } else {
                (self.min[axis], 1.0)
            };
            let t = (bound - origin[axis]) / d;
            if t >= 0.0 && nearest.is_none_or(|hit| t < hit.distance) {
                let mut normal = Vec3::ZERO;
                normal[axis] = facing;
                nearest = Some(RayHit::new(t, normal));
            }
        }
        nearest.filter(|hit| hit.distance <= max_distance)
    }
}

/// An infinite wall on the plane `x = x`.
#[derive(Debug, Clone, Copy)]
pub struct WallTracer {
    x: f32,
    layer: LayerMask,
}

impl WallTracer {
    pub fn at_x(x: f32) -> Self {
        Self {
            x,
            layer: LayerMask::layer(0),
        }
    }

    pub fn on_layer(mut self, layer: LayerMask) -> Self {
        self.layer = layer;
        self
    }
}

impl RayTracer for WallTracer {
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        ignore: LayerMask,
    ) -> Option<RayHit> {
        if ignore.intersects(self.layer) || direction.x == 0.0 {
            return None;
        }
        let t = (self.x - origin.x) / direction.x;
        (t >= 0.0 && t <= max_distance)
            .then(|| RayHit::new(t, Vec3::new(-direction.x.signum(), 0.0, 0.0)))
    }
}

/// A wall that can be raised and lowered while the engine holds the tracer.
#[derive(Debug, Clone)]
pub struct ToggleWall {
    wall: WallTracer,
    raised: Rc<Cell<bool>>,
}

impl ToggleWall {
    /// Returns the tracer and the switch controlling it.
    pub fn new(wall: WallTracer, raised: bool) -> (Self, Rc<Cell<bool>>) {
        let switch = Rc::new(Cell::new(raised));
        (
            Self {
                wall,
                raised: switch.clone(),
            },
            switch,
        )
    }
}

impl RayTracer for ToggleWall {
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        ignore: LayerMask,
    ) -> Option<RayHit> {
        if !self.raised.get() {
            return None;
        }
        self.wall.cast_ray(origin, direction, max_distance, ignore)
    }
}
