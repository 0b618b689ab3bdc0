//! # PetalSonic Channels
//!
//! A sound channel manager for games: a fixed pool of playback channels shared by
//! an unbounded stream of play requests under a priority policy, with cheap
//! reverb and occlusion simulation for every positioned sound.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use petalsonic_channels::*;
//! use std::time::Duration;
//!
//! // One output voice per channel, provided by your audio backend
//! let mut engine = PetalSonicEngine::new(
//!     PetalSonicEngineDesc::default(),
//!     MyPhysicsTracer::new(&level),
//!     |_| backend.create_voice(),
//! )?;
//!
//! // Attach sounds to moving entities through emitters
//! let enemy = engine.emitters_mut().spawn(Vec3::new(10.0, 0.0, 4.0));
//!
//! let growl = SoundAsset::new(growl_clip)
//!     .priority(Priority::High)
//!     .features(SoundFeatures::DYNAMIC_ENVIRONMENT);
//! let sound_id = engine.play(&growl, Some(enemy));
//!
//! // Every frame
//! engine.set_listener_position(camera_position);
//! engine.emitters_mut().set_position(enemy, enemy_position);
//! engine.update(Duration::from_secs_f32(frame_time));
//!
//! for event in engine.poll_events() {
//!     if let PetalSonicEvent::SoundCompleted { sound_id } = event {
//!         println!("finished: {}", sound_id);
//!     }
//! }
//! # Ok::<(), PetalSonicError>(())
//! ```
//!
//! ## Key Components
//!
//! - **[`PetalSonicEngine`]**: Play/stop/volume API and the per-frame update
//! - **[`ChannelPool`](pool::ChannelPool)**: Fixed channel array with priority preemption
//! - **[`EnvironmentSampler`](spatial::EnvironmentSampler)**: Ray-cast proxies for room size and line of sight
//! - **[`OutputChannel`]**: Trait your audio backend implements for each voice
//! - **[`RayTracer`]**: Trait your physics scene implements for probe rays
//! - **[`EmitterRegistry`]**: Generational handles for the entities sounds follow
//!
//! ## Priorities
//!
//! When every channel is busy, a request takes over the channel of the lowest
//! priority playing sound as long as it is at least as important. Equal priority
//! is enough, so [`Priority::Essential`] requests always get a channel.
//!
//! ## Environment simulation
//!
//! Reverb is driven by the normalized volume of the space around a sound, estimated
//! from six axis-aligned probe rays. Occlusion is a single ray toward the listener.
//! Both are sampled on fixed intervals and smoothed so that every transition ends
//! exactly when the next sample is taken.

pub mod asset;
pub mod channel;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod math;
pub mod output;
pub mod pool;
pub mod scene;
pub mod spatial;

#[cfg(test)]
mod test_support;

pub use asset::{LoopMode, Priority, SoundAsset, SoundFeatures};
pub use channel::{ChannelRecord, SoundId};
pub use config::PetalSonicEngineDesc;
pub use engine::PetalSonicEngine;
pub use error::PetalSonicError;
pub use events::PetalSonicEvent;
pub use math::Vec3;
pub use output::{ChannelSettings, OutputChannel, SpatialBlend};
pub use pool::PoolStats;
pub use scene::{EmitterHandle, EmitterRegistry, LayerMask, RayHit, RayTracer};
pub use spatial::ReverbParams;
