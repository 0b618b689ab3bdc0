//! Weak handles to the moving things sounds are attached to.
//!
//! Gameplay code spawns an emitter for each entity that makes noise, keeps its
//! position up to date, and despawns it when the entity goes away. Sounds hold an
//! [`EmitterHandle`], which stops resolving the moment its emitter is despawned,
//! even if the slot is later reused by another emitter.

use crate::math::Vec3;

/// Generational handle to an emitter in an [`EmitterRegistry`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EmitterHandle {
    index: u32,
    generation: u32,
}

impl EmitterHandle {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl std::fmt::Display for EmitterHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Emitter({}v{})", self.index, self.generation)
    }
}

#[derive(Debug, Clone)]
struct EmitterSlot {
    generation: u32,
    position: Vec3,
    alive: bool,
}

/// Slot map of emitter positions.
#[derive(Debug, Default)]
pub struct EmitterRegistry {
    slots: Vec<EmitterSlot>,
    free: Vec<u32>,
}

impl EmitterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an emitter at `position` and returns its handle.
    pub fn spawn(&mut self, position: Vec3) -> EmitterHandle {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.position = position;
            slot.alive = true;
            return EmitterHandle {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(EmitterSlot {
            generation: 0,
            position,
            alive: true,
        });
        EmitterHandle {
            index,
            generation: 0,
        }
    }

    /// Removes an emitter. Returns false if the handle was already stale.
    pub fn despawn(&mut self, handle: EmitterHandle) -> bool {
        let Some(slot) = self.live_slot_mut(handle) else {
            return false;
        };
        slot.alive = false;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        true
    }

    /// Moves an emitter. Returns false if the handle is stale.
    pub fn set_position(&mut self, handle: EmitterHandle, position: Vec3) -> bool {
        match self.live_slot_mut(handle) {
            Some(slot) => {
                slot.position = position;
                true
            }
            None => false,
        }
    }

    /// Current position of a live emitter, or `None` once it has been despawned.
    pub fn position(&self, handle: EmitterHandle) -> Option<Vec3> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.alive && slot.generation == handle.generation)
            .map(|slot| slot.position)
    }

    pub fn is_alive(&self, handle: EmitterHandle) -> bool {
        self.position(handle).is_some()
    }

    /// Number of live emitters
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn live_slot_mut(&mut self, handle: EmitterHandle) -> Option<&mut EmitterSlot> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.alive && slot.generation == handle.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_and_move() {
        let mut registry = EmitterRegistry::new();
        let handle = registry.spawn(Vec3::new(1.0, 2.0, 3.0));

        assert_eq!(registry.position(handle), Some(Vec3::new(1.0, 2.0, 3.0)));
        assert!(registry.set_position(handle, Vec3::ZERO));
        assert_eq!(registry.position(handle), Some(Vec3::ZERO));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_despawn_invalidates_handle() {
        let mut registry = EmitterRegistry::new();
        let handle = registry.spawn(Vec3::X);

        assert!(registry.despawn(handle));
        assert!(!registry.is_alive(handle));
        assert!(!registry.despawn(handle));
        assert!(!registry.set_position(handle, Vec3::Y));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_reused_slot_does_not_revive_stale_handle() {
        let mut registry = EmitterRegistry::new();
        let old = registry.spawn(Vec3::X);
        registry.despawn(old);

        let new = registry.spawn(Vec3::Y);
        assert_eq!(new.index(), old.index());
        assert_ne!(new.generation(), old.generation());
        assert_eq!(registry.position(old), None);
        assert_eq!(registry.position(new), Some(Vec3::Y));
    }
}
