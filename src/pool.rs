//! Fixed-capacity channel pool and its priority allocator.

use crate::asset::Priority;
use crate::channel::{Channel, ChannelRecord, SoundId};
use crate::error::{PetalSonicError, Result};
use crate::output::OutputChannel;
use std::collections::VecDeque;

/// Outcome of [`ChannelPool::allocate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allocation {
    /// A channel nobody was using
    Free(usize),
    /// The channel of the lowest priority sound, which has been stopped
    Preempted {
        index: usize,
        evicted: SoundId,
        evicted_priority: Priority,
    },
    /// Every playing sound outranks the request; nothing changed
    Denied { lowest: Option<Priority> },
}

impl Allocation {
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Free(index) | Self::Preempted { index, .. } => Some(*index),
            Self::Denied { .. } => None,
        }
    }
}

/// Snapshot of pool occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    pub capacity: usize,
    pub occupied: usize,
    pub free: usize,
}

/// Fixed array of channels plus a queue of the free ones.
///
/// Every channel index is either in the free queue or holds a record, never both.
#[derive(Debug)]
pub struct ChannelPool<O> {
    channels: Vec<Channel<O>>,
    free: VecDeque<usize>,
}

impl<O: OutputChannel> ChannelPool<O> {
    /// Builds a pool with one channel per output voice.
    pub fn new(outputs: Vec<O>) -> Result<Self> {
        if outputs.is_empty() {
            return Err(PetalSonicError::Configuration(
                "channel pool needs at least one output".into(),
            ));
        }

        let channels: Vec<_> = outputs.into_iter().map(Channel::new).collect();
        let free = (0..channels.len()).collect();
        Ok(Self { channels, free })
    }

    /// Hands out a channel for a sound of `priority`.
    ///
    /// Free channels are used first. With none left, the lowest priority sound
    /// (first one found on ties) is stopped and its channel reused, provided the
    /// request is at least as important. Equal priority is enough to steal.
    pub fn allocate(&mut self, priority: Priority) -> Allocation {
        if let Some(index) = self.free.pop_front() {
            log::debug!("Allocated free channel {} for {:?} sound", index, priority);
            return Allocation::Free(index);
        }

        let Some((index, lowest)) = self.lowest_priority() else {
            return Allocation::Denied { lowest: None };
        };

        if priority < lowest {
            log::debug!(
                "Denied {:?} sound: lowest playing priority is {:?}",
                priority,
                lowest
            );
            return Allocation::Denied {
                lowest: Some(lowest),
            };
        }

        match self.channels[index].release() {
            Some(evicted) => {
                log::debug!(
                    "Preempted {} ({:?}) on channel {} for {:?} sound",
                    evicted.sound_id,
                    evicted.priority,
                    index,
                    priority
                );
                Allocation::Preempted {
                    index,
                    evicted: evicted.sound_id,
                    evicted_priority: evicted.priority,
                }
            }
            None => Allocation::Free(index),
        }
    }

    /// Index and priority of the lowest priority occupied channel.
    fn lowest_priority(&self) -> Option<(usize, Priority)> {
        self.channels
            .iter()
            .enumerate()
            .filter_map(|(index, channel)| channel.record().map(|r| (index, r.priority)))
            .min_by_key(|&(_, priority)| priority)
    }

    /// Puts a record on a channel previously returned by [`allocate`](Self::allocate).
    pub(crate) fn occupy(&mut self, index: usize, record: ChannelRecord) {
        self.channels[index].occupy(record);
    }

    /// Stops a channel and returns it to the free queue.
    ///
    /// Returns the record that was on it; reclaiming a free channel does nothing.
    pub fn reclaim(&mut self, index: usize) -> Option<ChannelRecord> {
        let record = self.channels.get_mut(index)?.release()?;
        self.free.push_back(index);
        log::debug!("Reclaimed channel {} from {}", index, record.sound_id);
        Some(record)
    }

    /// Channel index of the live sound `sound_id`.
    pub fn find(&self, sound_id: SoundId) -> Option<usize> {
        if !sound_id.is_valid() {
            return None;
        }
        self.channels
            .iter()
            .position(|channel| channel.sound_id() == Some(sound_id))
    }

    pub fn channel(&self, index: usize) -> Option<&Channel<O>> {
        self.channels.get(index)
    }

    pub fn channel_mut(&mut self, index: usize) -> Option<&mut Channel<O>> {
        self.channels.get_mut(index)
    }

    pub fn channels(&self) -> impl Iterator<Item = &Channel<O>> {
        self.channels.iter()
    }

    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut Channel<O>> {
        self.channels.iter_mut()
    }

    pub fn capacity(&self) -> usize {
        self.channels.len()
    }

    pub fn occupied_count(&self) -> usize {
        self.channels.iter().filter(|channel| !channel.is_free()).count()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            capacity: self.capacity(),
            occupied: self.occupied_count(),
            free: self.free_count(),
        }
    }

    /// True if the free queue and the occupied channels partition the pool.
    pub fn is_consistent(&self) -> bool {
        self.occupied_count() + self.free.len() == self.channels.len()
            && self.free.iter().all(|&index| self.channels[index].is_free())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockOutput, record};

    fn pool(capacity: usize) -> ChannelPool<MockOutput> {
        ChannelPool::new(vec![MockOutput::default(); capacity]).expect("pool")
    }

    fn fill(pool: &mut ChannelPool<MockOutput>, priority: Priority, first_id: i32) -> Vec<usize> {
        (0..pool.capacity() as i32)
            .map(|offset| {
                let index = pool.allocate(priority).index().expect("free channel");
                pool.occupy(index, record(SoundId(first_id + offset), priority));
                index
            })
            .collect()
    }

    #[test]
    fn test_empty_pool_is_rejected() {
        assert!(ChannelPool::<MockOutput>::new(Vec::new()).is_err());
    }

    #[test]
    fn test_free_channels_are_used_first() {
        let mut pool = pool(3);
        let indices = fill(&mut pool, Priority::Low, 0);
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(pool.free_count(), 0);
        assert_eq!(pool.occupied_count(), 3);
        assert!(pool.is_consistent());
    }

    #[test]
    fn test_lower_priority_is_denied_and_pool_unchanged() {
        let mut pool = pool(2);
        fill(&mut pool, Priority::Medium, 0);

        assert_eq!(
            pool.allocate(Priority::Low),
            Allocation::Denied {
                lowest: Some(Priority::Medium)
            }
        );
        assert_eq!(pool.find(SoundId(0)), Some(0));
        assert_eq!(pool.find(SoundId(1)), Some(1));
        assert!(pool.is_consistent());
    }

    #[test]
    fn test_preempts_lowest_priority() {
        let mut pool = pool(3);
        for (id, priority) in [Priority::High, Priority::Low, Priority::Medium]
            .into_iter()
            .enumerate()
        {
            let index = pool.allocate(priority).index().expect("free channel");
            pool.occupy(index, record(SoundId(id as i32), priority));
        }

        let allocation = pool.allocate(Priority::Medium);
        assert_eq!(
            allocation,
            Allocation::Preempted {
                index: 1,
                evicted: SoundId(1),
                evicted_priority: Priority::Low,
            }
        );
        assert!(pool.channel(1).expect("channel").is_free());
        assert_eq!(pool.channel(1).expect("channel").output().stop_count, 1);
    }

    #[test]
    fn test_equal_priority_steals_first_found() {
        let mut pool = pool(3);
        fill(&mut pool, Priority::Essential, 10);

        let allocation = pool.allocate(Priority::Essential);
        assert_eq!(allocation.index(), Some(0));
        assert!(matches!(
            allocation,
            Allocation::Preempted {
                evicted: SoundId(10),
                ..
            }
        ));
    }

    #[test]
    fn test_reclaim_returns_channel_to_queue() {
        let mut pool = pool(2);
        fill(&mut pool, Priority::Low, 0);

        let reclaimed = pool.reclaim(1).map(|record| record.sound_id);
        assert_eq!(reclaimed, Some(SoundId(1)));
        assert_eq!(pool.stats(), PoolStats { capacity: 2, occupied: 1, free: 1 });

        assert!(pool.reclaim(1).is_none());
        assert!(pool.reclaim(99).is_none());
        assert_eq!(pool.free_count(), 1);

        assert_eq!(pool.allocate(Priority::None), Allocation::Free(1));
    }

    #[test]
    fn test_find_ignores_invalid_id() {
        let mut pool = pool(1);
        fill(&mut pool, Priority::Low, 0);
        assert_eq!(pool.find(SoundId::INVALID), None);
        assert_eq!(pool.find(SoundId(42)), None);
    }
}
