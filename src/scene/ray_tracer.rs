//! Ray tracing callback trait for environment sampling.
//!
//! The engine never intersects geometry itself. Reverb and occlusion probes are
//! forwarded to a user supplied [`RayTracer`], usually a thin wrapper around the
//! game's physics scene.

use crate::math::Vec3;

/// Bit set of collision layers.
///
/// Probe rays pass straight through every layer contained in the ignore mask
/// handed to [`RayTracer::cast_ray`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);

    /// Mask containing the single layer `index` (0..32)
    pub const fn layer(index: u32) -> Self {
        Self(1 << (index % 32))
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns true if any layer of `other` is part of this mask
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

/// Closest surface found by a ray cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from ray origin to hit point
    pub distance: f32,

    /// Surface normal at the hit point (normalized, pointing away from the surface)
    pub normal: Vec3,
}

impl RayHit {
    pub fn new(distance: f32, normal: Vec3) -> Self {
        Self { distance, normal }
    }
}

/// Trait for providing ray queries to the environment sampler.
///
/// # Performance
///
/// Every sampled sound costs up to seven casts (six for reverb, one for occlusion),
/// but sampling only happens on the configured intervals, not every frame.
///
/// # Example
///
/// ```
/// use petalsonic_channels::math::Vec3;
/// use petalsonic_channels::scene::{LayerMask, RayHit, RayTracer};
///
/// /// A single infinite floor at y = 0.
/// struct FloorTracer;
///
/// impl RayTracer for FloorTracer {
///     fn cast_ray(
///         &self,
///         origin: Vec3,
///         direction: Vec3,
///         max_distance: f32,
///         _ignore: LayerMask,
///     ) -> Option<RayHit> {
///         if direction.y >= 0.0 {
///             return None;
///         }
///         let t = origin.y / -direction.y;
///         (t <= max_distance).then(|| RayHit::new(t, Vec3::Y))
///     }
/// }
///
/// let hit = FloorTracer.cast_ray(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y, 50.0, LayerMask::NONE);
/// assert_eq!(hit.map(|h| h.distance), Some(2.0));
/// ```
pub trait RayTracer {
    /// Returns the closest hit along `direction` within `max_distance`, skipping
    /// any collider on a layer contained in `ignore`.
    ///
    /// `direction` is normalized. Returning `None` means the ray reached
    /// `max_distance` without touching anything.
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        ignore: LayerMask,
    ) -> Option<RayHit>;

    /// Called once per engine update before any ray casts (optional).
    ///
    /// Use this to sync acceleration structures with the game state.
    fn begin_frame(&mut self) {}

    /// Called once per engine update after all ray casts (optional).
    fn end_frame(&mut self) {}
}

/// Tracer for scenes without geometry: every ray escapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenSpace;

impl RayTracer for OpenSpace {
    fn cast_ray(&self, _: Vec3, _: Vec3, _: f32, _: LayerMask) -> Option<RayHit> {
        None
    }
}
