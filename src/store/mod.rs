//! Particle Store - fixed-capacity pool that owns every particle record
//!
//! Free slots are kept on an explicit stack, so `spawn` never scans. Spawn and
//! despawn keep the grid in step with the pool: a live particle is always
//! registered at exactly one cell, a dead slot at none.

mod particle;

pub use particle::{Particle, ParticleHandle, PARTICLE_DATA_SLOTS};

use log::debug;
use rand::Rng;

use crate::config::SimRng;
use crate::core::vec2::IVec2;
use crate::domain::materials::MaterialId;
use crate::domain::registry::MaterialRegistry;
use crate::grid::Grid;

pub struct ParticleStore {
    slots: Vec<Particle>,
    generations: Vec<u32>,
    /// Stack of free slot indices; lowest index on top
    free: Vec<u32>,
    /// Handles of live particles, exactly one per alive slot
    live: Vec<ParticleHandle>,
    /// Per slot: position of its handle in `live`
    live_index: Vec<u32>,
    alive_count: usize,
}

impl ParticleStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![Particle::dead(); capacity],
            generations: vec![0; capacity],
            free: (0..capacity as u32).rev().collect(),
            live: Vec::with_capacity(capacity),
            live_index: vec![0; capacity],
            alive_count: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.alive_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.alive_count == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.free.is_empty()
    }

    #[inline]
    pub fn is_alive(&self, handle: ParticleHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: ParticleHandle) -> Option<&Particle> {
        let idx = handle.index() as usize;
        if self.generations.get(idx) != Some(&handle.generation()) {
            return None;
        }
        self.slots.get(idx).filter(|p| p.alive)
    }

    pub fn get_mut(&mut self, handle: ParticleHandle) -> Option<&mut Particle> {
        let idx = handle.index() as usize;
        if self.generations.get(idx) != Some(&handle.generation()) {
            return None;
        }
        self.slots.get_mut(idx).filter(|p| p.alive)
    }

    /// Create a particle at `pos` and register it in the grid.
    ///
    /// Returns `None` (with no mutation) when the pool is exhausted, `pos` is
    /// out of bounds or already occupied, or `material` is the empty sentinel.
    pub fn spawn(
        &mut self,
        grid: &mut Grid,
        registry: &MaterialRegistry,
        rng: &mut SimRng,
        pos: IVec2,
        material: MaterialId,
    ) -> Option<ParticleHandle> {
        if !material.is_placeable() || !grid.is_empty(pos) {
            return None;
        }
        let Some(&index) = self.free.last() else {
            debug!("particle pool exhausted ({} slots)", self.capacity());
            return None;
        };

        let mut particle = Particle::new(material, pos);
        let grain = registry.properties(material).grain;
        if grain > 0 {
            particle.deco.a = rng.random_range(0..=grain);
        }
        (registry.hooks(material).init)(&mut particle, rng);

        let handle = ParticleHandle::new(index, self.generations[index as usize]);
        if !grid.place(pos, handle) {
            return None;
        }
        self.free.pop();
        self.slots[index as usize] = particle;
        self.live_index[index as usize] = self.live.len() as u32;
        self.live.push(handle);
        self.alive_count += 1;
        Some(handle)
    }

    /// Detach from the grid and free the slot. A stale or already-dead
    /// handle is a no-op returning `false`.
    pub fn despawn(&mut self, grid: &mut Grid, handle: ParticleHandle) -> bool {
        let Some(particle) = self.get_mut(handle) else { return false };
        particle.alive = false;
        let pos = particle.pos;

        if grid.get(pos) == Some(handle) {
            grid.clear(pos);
        }

        let idx = handle.index() as usize;
        let at = self.live_index[idx] as usize;
        self.live.swap_remove(at);
        if let Some(moved) = self.live.get(at) {
            self.live_index[moved.index() as usize] = at as u32;
        }

        self.generations[idx] = self.generations[idx].wrapping_add(1);
        self.free.push(handle.index());
        self.alive_count -= 1;
        true
    }

    /// Point-in-time copy of the live list. Despawn swap-removes, so the
    /// order is spawn order only until the first removal.
    pub fn active_snapshot(&self) -> Vec<ParticleHandle> {
        self.live.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticleHandle, &Particle)> + '_ {
        self.live.iter().filter_map(move |h| self.get(*h).map(|p| (*h, p)))
    }

    /// Despawn everything
    pub fn clear(&mut self, grid: &mut Grid) {
        for handle in self.live.clone() {
            self.despawn(grid, handle);
        }
        self.free = (0..self.capacity() as u32).rev().collect();
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn setup(capacity: usize) -> (ParticleStore, Grid, MaterialRegistry, SimRng) {
        (
            ParticleStore::with_capacity(capacity),
            Grid::new(4, 4),
            MaterialRegistry::builtin(),
            SimRng::seed_from_u64(1),
        )
    }

    #[test]
    fn spawn_registers_in_grid() {
        let (mut store, mut grid, reg, mut rng) = setup(4);
        let pos = IVec2::new(1, 2);
        let h = store.spawn(&mut grid, &reg, &mut rng, pos, MaterialId::Sand).expect("spawned");
        assert_eq!(grid.get(pos), Some(h));
        assert_eq!(store.get(h).map(|p| p.pos), Some(pos));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn spawn_rejects_exhaustion_without_mutation() {
        let (mut store, mut grid, reg, mut rng) = setup(2);
        assert!(store.spawn(&mut grid, &reg, &mut rng, IVec2::new(0, 0), MaterialId::Sand).is_some());
        assert!(store.spawn(&mut grid, &reg, &mut rng, IVec2::new(1, 0), MaterialId::Sand).is_some());
        assert!(store.is_full());
        assert!(store.spawn(&mut grid, &reg, &mut rng, IVec2::new(2, 0), MaterialId::Sand).is_none());
        assert_eq!(grid.get(IVec2::new(2, 0)), None);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn spawn_rejects_bad_targets() {
        let (mut store, mut grid, reg, mut rng) = setup(4);
        assert!(store.spawn(&mut grid, &reg, &mut rng, IVec2::new(4, 0), MaterialId::Sand).is_none());
        assert!(store.spawn(&mut grid, &reg, &mut rng, IVec2::new(0, 0), MaterialId::Empty).is_none());
        store.spawn(&mut grid, &reg, &mut rng, IVec2::new(0, 0), MaterialId::Sand);
        assert!(store.spawn(&mut grid, &reg, &mut rng, IVec2::new(0, 0), MaterialId::Water).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn despawn_twice_is_noop() {
        let (mut store, mut grid, reg, mut rng) = setup(4);
        let pos = IVec2::new(3, 3);
        let h = store.spawn(&mut grid, &reg, &mut rng, pos, MaterialId::Water).expect("spawned");
        assert!(store.despawn(&mut grid, h));
        assert!(!store.despawn(&mut grid, h));
        assert!(grid.is_empty(pos));
        assert!(store.is_empty());
    }

    #[test]
    fn reused_slot_invalidates_old_handle() {
        let (mut store, mut grid, reg, mut rng) = setup(1);
        let old = store.spawn(&mut grid, &reg, &mut rng, IVec2::new(0, 0), MaterialId::Sand).expect("spawned");
        store.despawn(&mut grid, old);
        let new = store.spawn(&mut grid, &reg, &mut rng, IVec2::new(1, 1), MaterialId::Water).expect("spawned");
        assert_eq!(old.index(), new.index());
        assert_ne!(old, new);
        assert!(store.get(old).is_none());
        assert!(!store.despawn(&mut grid, old));
        assert_eq!(grid.get(IVec2::new(1, 1)), Some(new));
    }

    #[test]
    fn snapshot_ignores_later_spawns_and_despawn_drops_dead() {
        let (mut store, mut grid, reg, mut rng) = setup(4);
        let a = store.spawn(&mut grid, &reg, &mut rng, IVec2::new(0, 0), MaterialId::Sand).expect("a");
        let b = store.spawn(&mut grid, &reg, &mut rng, IVec2::new(1, 0), MaterialId::Sand).expect("b");
        let snapshot = store.active_snapshot();
        store.spawn(&mut grid, &reg, &mut rng, IVec2::new(2, 0), MaterialId::Sand);
        assert_eq!(snapshot, vec![a, b]);

        store.despawn(&mut grid, a);
        assert_eq!(store.iter().count(), 2);
        assert!(store.active_snapshot().iter().all(|h| *h != a));
    }

    #[test]
    fn paint_and_erase_without_ticks_keeps_live_list_bounded() {
        let (mut store, mut grid, reg, mut rng) = setup(1);
        for _ in 0..1000 {
            let h = store.spawn(&mut grid, &reg, &mut rng, IVec2::new(0, 0), MaterialId::Sand).expect("spawned");
            assert!(store.despawn(&mut grid, h));
            assert!(store.live.len() <= store.capacity());
        }
        assert!(store.live.is_empty());
    }

    #[test]
    fn despawn_from_the_middle_keeps_remaining_handles_reachable() {
        let (mut store, mut grid, reg, mut rng) = setup(4);
        let handles: Vec<_> = (0..4)
            .map(|x| store.spawn(&mut grid, &reg, &mut rng, IVec2::new(x, 0), MaterialId::Sand).expect("spawned"))
            .collect();

        assert!(store.despawn(&mut grid, handles[1]));
        assert!(store.despawn(&mut grid, handles[3]));
        assert_eq!(store.live.len(), 2);
        let mut left = store.active_snapshot();
        left.sort_by_key(|h| h.index());
        assert_eq!(left, vec![handles[0], handles[2]]);

        // the handle moved by the first removal can still be removed
        assert!(store.despawn(&mut grid, handles[0]));
        assert!(store.despawn(&mut grid, handles[2]));
        assert!(store.live.is_empty());
        assert!(store.is_empty());
    }
}
