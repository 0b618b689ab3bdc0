//! Event types for PetalSonic channels

use crate::asset::Priority;
use crate::channel::SoundId;

/// Notifications about sound lifetimes, drained with
/// [`PetalSonicEngine::poll_events`](crate::PetalSonicEngine::poll_events).
#[derive(Debug, Clone, PartialEq)]
pub enum PetalSonicEvent {
    /// A play request got a channel
    SoundStarted { sound_id: SoundId, priority: Priority },
    /// A one-shot sound played to its end and its channel was reclaimed
    SoundCompleted { sound_id: SoundId },
    /// A sound was stopped through `stop` or `stop_all`
    SoundStopped { sound_id: SoundId },
    /// A sound lost its channel to a request of priority `by`
    SoundPreempted { sound_id: SoundId, by: Priority },
    /// A play request found no channel it was allowed to take
    PlayDenied { priority: Priority },
}

impl PetalSonicEvent {
    pub fn sound_id(&self) -> Option<SoundId> {
        match self {
            Self::SoundStarted { sound_id, .. }
            | Self::SoundCompleted { sound_id }
            | Self::SoundStopped { sound_id }
            | Self::SoundPreempted { sound_id, .. } => Some(*sound_id),
            Self::PlayDenied { .. } => None,
        }
    }

    /// True for events that end a sound's lifetime
    pub fn is_end_of_sound(&self) -> bool {
        matches!(
            self,
            Self::SoundCompleted { .. } | Self::SoundStopped { .. } | Self::SoundPreempted { .. }
        )
    }
}
