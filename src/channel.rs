//! Pool slots and the per-sound record they carry while occupied.

use crate::asset::{Priority, SoundFeatures};
use crate::math::Vec3;
use crate::output::OutputChannel;
use crate::scene::EmitterHandle;
use crate::spatial::SampledValue;

/// Identifier of one started sound.
///
/// Ids increase monotonically and are never shared by two live sounds.
/// Failed play requests return [`SoundId::INVALID`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SoundId(pub i32);

impl SoundId {
    pub const INVALID: Self = Self(-1);

    pub fn is_valid(&self) -> bool {
        self.0 >= 0
    }
}

impl Default for SoundId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl std::fmt::Display for SoundId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SoundId({})", self.0)
    }
}

/// Mutable state of the sound occupying a channel.
#[derive(Debug, Clone)]
pub struct ChannelRecord {
    pub sound_id: SoundId,
    pub priority: Priority,
    pub features: SoundFeatures,
    /// Entity the sound follows; may outlive the entity
    pub owner: Option<EmitterHandle>,
    /// Where the sound was last emitted from
    pub last_position: Vec3,
    /// Volume before the global volume is applied
    pub volume: f32,
    /// Normalized physical volume around the sound
    pub reverb: SampledValue,
    /// Line-of-sight blockage toward the listener
    pub occlusion: SampledValue,
}

/// One slot of the channel pool: an output voice and, while occupied, its record.
#[derive(Debug)]
pub struct Channel<O> {
    output: O,
    record: Option<ChannelRecord>,
}

impl<O: OutputChannel> Channel<O> {
    pub fn new(output: O) -> Self {
        Self {
            output,
            record: None,
        }
    }

    pub fn is_free(&self) -> bool {
        self.record.is_none()
    }

    pub fn record(&self) -> Option<&ChannelRecord> {
        self.record.as_ref()
    }

    pub fn record_mut(&mut self) -> Option<&mut ChannelRecord> {
        self.record.as_mut()
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Both halves at once, for updates that read the record and drive the output.
    pub fn parts_mut(&mut self) -> (&mut O, Option<&mut ChannelRecord>) {
        (&mut self.output, self.record.as_mut())
    }

    pub fn sound_id(&self) -> Option<SoundId> {
        self.record.as_ref().map(|record| record.sound_id)
    }

    pub(crate) fn occupy(&mut self, record: ChannelRecord) {
        debug_assert!(self.record.is_none(), "channel occupied twice");
        self.record = Some(record);
    }

    /// Stops the output and hands back the record, leaving the channel free.
    pub(crate) fn release(&mut self) -> Option<ChannelRecord> {
        let record = self.record.take()?;
        self.output.stop();
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockOutput, record};

    #[test]
    fn test_sound_id_validity() {
        assert!(!SoundId::INVALID.is_valid());
        assert!(SoundId(0).is_valid());
        assert_eq!(SoundId::default(), SoundId::INVALID);
    }

    #[test]
    fn test_occupy_and_release() {
        let mut channel = Channel::new(MockOutput::default());
        assert!(channel.is_free());

        channel.occupy(record(SoundId(3), Priority::High));
        assert!(!channel.is_free());
        assert_eq!(channel.sound_id(), Some(SoundId(3)));

        let released = channel.release().map(|record| record.sound_id);
        assert_eq!(released, Some(SoundId(3)));
        assert!(channel.is_free());
        assert_eq!(channel.output().stop_count, 1);
    }

    #[test]
    fn test_release_free_channel_is_noop() {
        let mut channel = Channel::new(MockOutput::default());
        assert!(channel.release().is_none());
        assert_eq!(channel.output().stop_count, 0);
    }
}
