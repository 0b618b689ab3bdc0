//! Sound engine: channel allocation, per-frame environment updates and the
//! public play/stop/volume API.

use crate::asset::{LoopMode, SoundAsset, SoundFeatures};
use crate::channel::{ChannelRecord, SoundId};
use crate::config::PetalSonicEngineDesc;
use crate::error::{PetalSonicError, Result};
use crate::events::PetalSonicEvent;
use crate::math::Vec3;
use crate::output::{ChannelSettings, OutputChannel, SpatialBlend};
use crate::pool::{Allocation, ChannelPool, PoolStats};
use crate::scene::{EmitterHandle, EmitterRegistry, RayTracer};
use crate::spatial::{EnvironmentSampler, SampledValue, low_pass_cutoff, reverb_params};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Priority-driven sound engine over a fixed pool of output channels.
///
/// The engine is owned by the frame driver and used from a single thread:
/// call [`play`](Self::play) whenever gameplay wants a sound and
/// [`update`](Self::update) once per frame. Nothing allocates on the update path.
///
/// # Failure model
///
/// Audio pressure never surfaces as an error to gameplay. A request that cannot be
/// served returns [`SoundId::INVALID`] and every other call on an unknown id is a
/// no-op. Use [`try_play`](Self::try_play) to find out why a request failed.
pub struct PetalSonicEngine<O: OutputChannel> {
    desc: PetalSonicEngineDesc,
    pool: ChannelPool<O>,
    sampler: EnvironmentSampler,
    ray_tracer: Box<dyn RayTracer>,
    emitters: EmitterRegistry,
    listener_position: Vec3,
    global_volume: f32,
    next_sound_id: i32,
    rng: StdRng,
    event_sender: Sender<PetalSonicEvent>,
    event_receiver: Receiver<PetalSonicEvent>,
}

impl<O: OutputChannel> PetalSonicEngine<O> {
    /// Creates an engine with `desc.pool_capacity` channels, building each output
    /// voice with `make_output(channel_index)`.
    pub fn new<F>(
        desc: PetalSonicEngineDesc,
        ray_tracer: impl RayTracer + 'static,
        make_output: F,
    ) -> Result<Self>
    where
        F: FnMut(usize) -> O,
    {
        desc.validate()?;

        let outputs: Vec<O> = (0..desc.pool_capacity).map(make_output).collect();
        let pool = ChannelPool::new(outputs)?;
        let rng = match desc.pitch_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (event_sender, event_receiver) = crossbeam_channel::bounded(desc.event_capacity);

        log::info!(
            "Sound engine created: {} channels, reverb every {:?}, occlusion every {:?}",
            desc.pool_capacity,
            desc.reverb_sample_interval,
            desc.occlusion_sample_interval
        );

        Ok(Self {
            sampler: EnvironmentSampler::new(&desc),
            desc,
            pool,
            ray_tracer: Box::new(ray_tracer),
            emitters: EmitterRegistry::new(),
            listener_position: Vec3::ZERO,
            global_volume: 1.0,
            next_sound_id: 0,
            rng,
            event_sender,
            event_receiver,
        })
    }

    pub fn desc(&self) -> &PetalSonicEngineDesc {
        &self.desc
    }

    /// Replaces the geometry used by reverb and occlusion probes.
    pub fn set_ray_tracer(&mut self, ray_tracer: impl RayTracer + 'static) {
        self.ray_tracer = Box::new(ray_tracer);
    }

    pub fn set_listener_position(&mut self, position: Vec3) {
        self.listener_position = position;
    }

    pub fn listener_position(&self) -> Vec3 {
        self.listener_position
    }

    /// Positions of the entities sounds can be attached to.
    pub fn emitters(&self) -> &EmitterRegistry {
        &self.emitters
    }

    pub fn emitters_mut(&mut self) -> &mut EmitterRegistry {
        &mut self.emitters
    }

    /// Starts a sound, returning its id or [`SoundId::INVALID`] if it did not play.
    ///
    /// Spatial features need a live `owner`; without one the sound still plays,
    /// but as a plain 2D sound.
    pub fn play(&mut self, asset: &SoundAsset<O::Clip>, owner: Option<EmitterHandle>) -> SoundId {
        match self.try_play(asset, owner) {
            Ok(sound_id) => sound_id,
            Err(e) => {
                log::warn!("Sound not played: {}", e);
                SoundId::INVALID
            }
        }
    }

    /// Same as [`play`](Self::play), but reports why a request failed.
    ///
    /// # Errors
    ///
    /// - [`PetalSonicError::InvalidAsset`] if the asset has no clip or no volume
    /// - [`PetalSonicError::ChannelsExhausted`] if every channel holds a more
    ///   important sound
    pub fn try_play(
        &mut self,
        asset: &SoundAsset<O::Clip>,
        owner: Option<EmitterHandle>,
    ) -> Result<SoundId> {
        let Some(clip) = asset.clip.as_ref() else {
            return Err(PetalSonicError::InvalidAsset("asset has no clip".into()));
        };
        if !(asset.volume > 0.0) {
            return Err(PetalSonicError::InvalidAsset(format!(
                "volume {} is not audible",
                asset.volume
            )));
        }

        let priority = asset.priority;
        let index = match self.pool.allocate(priority) {
            Allocation::Free(index) => index,
            Allocation::Preempted { index, evicted, .. } => {
                self.emit(PetalSonicEvent::SoundPreempted {
                    sound_id: evicted,
                    by: priority,
                });
                index
            }
            Allocation::Denied { .. } => {
                self.emit(PetalSonicEvent::PlayDenied { priority });
                return Err(PetalSonicError::ChannelsExhausted {
                    requested: priority,
                });
            }
        };

        let owner_position = owner.and_then(|handle| self.emitters.position(handle));
        let mut features = asset.features;
        if features.requests_spatial() && owner_position.is_none() {
            log::error!(
                "{:?} priority sound requested spatial features without a live owner, playing it as 2D",
                priority
            );
            features = SoundFeatures::NONE;
        }
        let owner = owner.filter(|_| owner_position.is_some());
        let position = owner_position.unwrap_or(Vec3::ZERO);
        let volume = sanitize_volume(asset.volume);
        let pitch = self.random_pitch(asset.pitch_bend);
        let sound_id = self.allocate_sound_id();

        let mut reverb = SampledValue::new(self.desc.reverb_sample_interval);
        let mut occlusion = SampledValue::new(self.desc.occlusion_sample_interval);
        let tracer = self.ray_tracer.as_ref();
        let listener = self.listener_position;

        let Some(channel) = self.pool.channel_mut(index) else {
            return Err(PetalSonicError::Engine(format!(
                "allocator returned channel {} outside the pool",
                index
            )));
        };
        let output = channel.output_mut();
        output.configure(ChannelSettings {
            clip,
            looping: asset.loop_mode == LoopMode::Infinite,
            pitch,
            volume: volume * self.global_volume,
            position,
            doppler_level: if features.doppler { 1.0 } else { 0.0 },
        });

        if features.requests_spatial() {
            output.set_spatial_blend(SpatialBlend::ThreeD);

            if features.wants_reverb() {
                reverb.seed(self.sampler.physical_volume(tracer, position));
                output.set_reverb(&reverb_params(reverb.value()));
            }
            if features.wants_occlusion() {
                occlusion.seed(self.sampler.occlusion(tracer, position, listener));
                output.set_low_pass_cutoff(low_pass_cutoff(
                    occlusion.value(),
                    self.desc.clear_cutoff_hz,
                    self.desc.occluded_cutoff_hz,
                ));
            }
        }

        if features.distance_delayed {
            let travel_time = position.distance(listener) / self.desc.speed_of_sound;
            output.play_delayed(Duration::try_from_secs_f32(travel_time).unwrap_or_default());
        } else {
            output.play();
        }

        self.pool.occupy(
            index,
            ChannelRecord {
                sound_id,
                priority,
                features,
                owner,
                last_position: position,
                volume,
                reverb,
                occlusion,
            },
        );

        log::debug!(
            "Started {} on channel {} (priority {:?}, pitch {:.3}, spatial {})",
            sound_id,
            index,
            priority,
            pitch,
            features.requests_spatial()
        );
        self.emit(PetalSonicEvent::SoundStarted { sound_id, priority });
        Ok(sound_id)
    }

    /// Advances the simulation by one frame of `dt`.
    ///
    /// Finished channels are reclaimed first; the remaining ones follow their
    /// owners and step their dynamic reverb and occlusion.
    pub fn update(&mut self, dt: Duration) {
        let dt = dt.as_secs_f32();
        self.ray_tracer.begin_frame();

        let tracer = self.ray_tracer.as_ref();
        let sampler = &self.sampler;
        let listener = self.listener_position;
        let (clear_hz, occluded_hz) = (self.desc.clear_cutoff_hz, self.desc.occluded_cutoff_hz);

        for index in 0..self.pool.capacity() {
            let Some(channel) = self.pool.channel_mut(index) else {
                continue;
            };
            if channel.is_free() {
                continue;
            }

            if !channel.output().is_playing() {
                if let Some(record) = self.pool.reclaim(index) {
                    send_event(
                        &self.event_sender,
                        PetalSonicEvent::SoundCompleted {
                            sound_id: record.sound_id,
                        },
                    );
                }
                continue;
            }

            let (output, Some(record)) = channel.parts_mut() else {
                continue;
            };

            if let Some(owner) = record.owner {
                match self.emitters.position(owner) {
                    Some(position) => {
                        record.last_position = position;
                        output.set_position(position);
                    }
                    None => {
                        log::debug!(
                            "{} of {} is gone, holding last position",
                            owner,
                            record.sound_id
                        );
                        record.owner = None;
                    }
                }
            }

            let features = record.features;
            if !features.requests_spatial() {
                continue;
            }
            let position = record.last_position;

            if features.dynamic_simulated_reverb {
                let volume = record
                    .reverb
                    .tick(dt, || sampler.physical_volume(tracer, position));
                output.set_reverb(&reverb_params(volume));
            }

            if features.dynamic_occlusion {
                let occlusion = record
                    .occlusion
                    .tick(dt, || sampler.occlusion(tracer, position, listener));
                output.set_low_pass_cutoff(low_pass_cutoff(occlusion, clear_hz, occluded_hz));
            }
        }

        self.ray_tracer.end_frame();

        debug_assert!(
            self.pool.is_consistent(),
            "channel pool lost track of a channel: {:?}",
            self.pool.stats()
        );
    }

    /// Stops a sound. Unknown, invalid or already finished ids are ignored.
    pub fn stop(&mut self, sound_id: SoundId) {
        let Some(index) = self.pool.find(sound_id) else {
            return;
        };
        if let Some(record) = self.pool.reclaim(index) {
            log::debug!("Stopped {}", record.sound_id);
            self.emit(PetalSonicEvent::SoundStopped {
                sound_id: record.sound_id,
            });
        }
    }

    /// Stops every playing sound.
    pub fn stop_all(&mut self) {
        let mut stopped = 0;
        for index in 0..self.pool.capacity() {
            if let Some(record) = self.pool.reclaim(index) {
                stopped += 1;
                send_event(
                    &self.event_sender,
                    PetalSonicEvent::SoundStopped {
                        sound_id: record.sound_id,
                    },
                );
            }
        }
        log::debug!("Stopped all sounds ({} channels reclaimed)", stopped);
    }

    /// False for unknown, invalid, stopped and finished sounds.
    pub fn is_playing(&self, sound_id: SoundId) -> bool {
        self.pool
            .find(sound_id)
            .and_then(|index| self.pool.channel(index))
            .is_some_and(|channel| channel.output().is_playing())
    }

    /// Sets the master volume (clamped to [0, 1]) and reapplies it to every playing sound.
    pub fn set_global_volume(&mut self, volume: f32) {
        let global = sanitize_volume(volume);
        self.global_volume = global;

        for channel in self.pool.channels_mut() {
            if let (output, Some(record)) = channel.parts_mut() {
                output.set_volume(record.volume * global);
            }
        }
    }

    pub fn global_volume(&self) -> f32 {
        self.global_volume
    }

    /// Sets one sound's own volume (clamped to [0, 1]); its output plays at
    /// `volume × global volume`.
    pub fn set_sound_volume(&mut self, sound_id: SoundId, volume: f32) {
        let global = self.global_volume;
        let Some(index) = self.pool.find(sound_id) else {
            return;
        };
        let Some(channel) = self.pool.channel_mut(index) else {
            return;
        };

        if let (output, Some(record)) = channel.parts_mut() {
            record.volume = sanitize_volume(volume);
            output.set_volume(record.volume * global);
        }
    }

    /// A sound's own volume, before the global volume is applied.
    pub fn sound_volume(&self, sound_id: SoundId) -> Option<f32> {
        self.record(sound_id).map(|record| record.volume)
    }

    /// Smoothed normalized physical volume of a sound with simulated reverb.
    pub fn reverb_level(&self, sound_id: SoundId) -> Option<f32> {
        self.record(sound_id)
            .filter(|record| record.features.wants_reverb())
            .map(|record| record.reverb.value())
    }

    /// Smoothed occlusion of a sound with simulated occlusion.
    pub fn occlusion_level(&self, sound_id: SoundId) -> Option<f32> {
        self.record(sound_id)
            .filter(|record| record.features.wants_occlusion())
            .map(|record| record.occlusion.value())
    }

    pub fn record(&self, sound_id: SoundId) -> Option<&ChannelRecord> {
        self.pool
            .find(sound_id)
            .and_then(|index| self.pool.channel(index))
            .and_then(|channel| channel.record())
    }

    /// The output voice currently playing `sound_id`.
    pub fn output(&self, sound_id: SoundId) -> Option<&O> {
        self.pool
            .find(sound_id)
            .and_then(|index| self.pool.channel(index))
            .map(|channel| channel.output())
    }

    pub fn output_mut(&mut self, sound_id: SoundId) -> Option<&mut O> {
        let index = self.pool.find(sound_id)?;
        self.pool.channel_mut(index).map(|channel| channel.output_mut())
    }

    pub fn stats(&self) -> PoolStats {
        self.pool.stats()
    }

    pub fn active_count(&self) -> usize {
        self.pool.occupied_count()
    }

    /// Drains all events emitted since the last poll.
    pub fn poll_events(&mut self) -> Vec<PetalSonicEvent> {
        self.event_receiver.try_iter().collect()
    }

    fn emit(&self, event: PetalSonicEvent) {
        send_event(&self.event_sender, event);
    }

    /// Next id not held by a live sound.
    fn allocate_sound_id(&mut self) -> SoundId {
        loop {
            let sound_id = SoundId(self.next_sound_id);
            self.next_sound_id = self.next_sound_id.checked_add(1).unwrap_or(0);
            if self.pool.find(sound_id).is_none() {
                return sound_id;
            }
        }
    }

    /// Uniform pitch in `1 ± bend / 2`.
    fn random_pitch(&mut self, bend: f32) -> f32 {
        if !(bend > 0.0) {
            return 1.0;
        }
        let half = bend.min(1.0) * 0.5;
        1.0 + self.rng.gen_range(-half..=half)
    }
}

fn send_event(sender: &Sender<PetalSonicEvent>, event: PetalSonicEvent) {
    if let Err(TrySendError::Full(event)) = sender.try_send(event) {
        log::warn!("Event queue full, dropping {:?}", event);
    }
}

fn sanitize_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}
