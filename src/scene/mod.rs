//! Scene collaborators for the environment simulation.
//!
//! The engine needs two things from the game world:
//!
//! 1. **RayTracer** - ray intersection queries against level geometry
//! 2. **EmitterRegistry** - positions of the entities sounds are attached to
//!
//! # Example
//!
//! ```rust,ignore
//! use petalsonic_channels::scene::{EmitterRegistry, LayerMask, RayHit, RayTracer};
//! use petalsonic_channels::math::Vec3;
//!
//! struct PhysicsTracer<'a> {
//!     physics: &'a PhysicsWorld,
//! }
//!
//! impl RayTracer for PhysicsTracer<'_> {
//!     fn cast_ray(&self, origin: Vec3, dir: Vec3, max: f32, ignore: LayerMask) -> Option<RayHit> {
//!         self.physics
//!             .raycast(origin, dir, max, !ignore.0)
//!             .map(|hit| RayHit::new(hit.toi, hit.normal))
//!     }
//! }
//! ```

pub mod emitter;
pub mod ray_tracer;

pub use emitter::{EmitterHandle, EmitterRegistry};
pub use ray_tracer::{LayerMask, OpenSpace, RayHit, RayTracer};
