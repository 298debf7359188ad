//! Simulation - WorldCore owns the store, grid and registry and drives ticks
//!
//! - step/      - tick scheduler (snapshot, dispatch, update hooks)
//! - commands/  - spawn/despawn entry points, brushes, clear
//! - render/    - color resolution and pixel extraction
//! - driver/    - fixed-interval tick driver with pause/single-step
//! - validate/  - grid/store consistency checks
//! - facade     - wasm-bindgen surface
//!
//! Configuration and randomness are not stored here: callers pass a
//! `SimContext` into every operation that needs them.

use std::sync::Arc;

use crate::config::SimContext;
use crate::core::vec2::IVec2;
use crate::domain::materials::MaterialId;
use crate::domain::registry::{MaterialRegistry, PaletteEntry};
use crate::error::{InvariantError, RegistryError};
use crate::grid::Grid;
use crate::store::{Particle, ParticleHandle, ParticleStore};

#[path = "perf/tick_stats.rs"]
mod tick_stats;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/render_extract.rs"]
mod render_extract;
#[path = "driver/driver.rs"]
mod driver;
#[path = "validate/validate.rs"]
mod validate;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use driver::{FixedStepDriver, MAX_CATCH_UP_TICKS};
pub use facade::World;
pub use render_extract::RenderCell;
pub use tick_stats::TickStats;

/// The simulation world
pub struct WorldCore {
    registry: Arc<MaterialRegistry>,
    grid: Grid,
    store: ParticleStore,

    frame: u64,
    last_stats: TickStats,

    // Pixel transfer buffer (ABGR), sized on first extraction
    pixels: Vec<u32>,
}

impl WorldCore {
    /// World with one pool slot per cell and the built-in materials
    pub fn new(width: u32, height: u32) -> Self {
        init::create_world_core(width, height, None, Arc::new(MaterialRegistry::builtin()))
    }

    pub fn with_capacity(width: u32, height: u32, capacity: usize) -> Self {
        init::create_world_core(width, height, Some(capacity), Arc::new(MaterialRegistry::builtin()))
    }

    pub fn with_registry(width: u32, height: u32, capacity: Option<usize>, registry: Arc<MaterialRegistry>) -> Self {
        init::create_world_core(width, height, capacity, registry)
    }

    /// Replace the material set; the world is cleared
    pub fn load_materials_json(&mut self, json: &str) -> Result<(), RegistryError> {
        let registry = MaterialRegistry::from_bundle_json(json)?;
        self.registry = Arc::new(registry);
        self.clear();
        Ok(())
    }

    pub fn registry(&self) -> &MaterialRegistry {
        &self.registry
    }

    pub fn palette(&self) -> Vec<PaletteEntry> {
        self.registry.palette()
    }

    pub fn width(&self) -> u32 { self.grid.width() }

    pub fn height(&self) -> u32 { self.grid.height() }

    pub fn particle_count(&self) -> usize { self.store.len() }

    pub fn capacity(&self) -> usize { self.store.capacity() }

    pub fn frame(&self) -> u64 { self.frame }

    pub fn last_tick_stats(&self) -> TickStats { self.last_stats }

    // === Particle access ===

    pub fn particle(&self, handle: ParticleHandle) -> Option<&Particle> {
        self.store.get(handle)
    }

    /// Direct record access, for hosts and tests that seed state
    pub fn particle_mut(&mut self, handle: ParticleHandle) -> Option<&mut Particle> {
        self.store.get_mut(handle)
    }

    pub fn handle_at(&self, pos: IVec2) -> Option<ParticleHandle> {
        self.grid.get(pos)
    }

    pub fn material_at(&self, pos: IVec2) -> Option<MaterialId> {
        self.grid.get(pos).and_then(|h| self.store.get(h)).map(|p| p.material)
    }

    pub fn particles(&self) -> impl Iterator<Item = (ParticleHandle, &Particle)> + '_ {
        self.store.iter()
    }

    // === Commands ===

    /// Spawn a particle. `None` when the pool is full, `pos` is out of
    /// bounds or occupied, or `material` is `Empty`.
    pub fn add(&mut self, ctx: &mut SimContext, pos: IVec2, material: MaterialId) -> Option<ParticleHandle> {
        commands::add(self, ctx, pos, material)
    }

    /// Despawn; a dead or stale handle is a no-op
    pub fn remove(&mut self, handle: ParticleHandle) -> bool {
        commands::remove(self, handle)
    }

    pub fn remove_at(&mut self, pos: IVec2) -> bool {
        commands::remove_at(self, pos)
    }

    /// Brush: fill a disc, returns how many particles were spawned
    pub fn add_in_radius(&mut self, ctx: &mut SimContext, center: IVec2, radius: i32, material: MaterialId) -> usize {
        commands::add_in_radius(self, ctx, center, radius, material)
    }

    pub fn remove_in_radius(&mut self, center: IVec2, radius: i32) -> usize {
        commands::remove_in_radius(self, center, radius)
    }

    pub fn clear(&mut self) {
        commands::clear(self)
    }

    // === Stepping ===

    /// Advance exactly one tick
    pub fn tick(&mut self, ctx: &mut SimContext) -> TickStats {
        step::tick(self, ctx)
    }

    // === Rendering ===

    pub fn render_cells(&self) -> Vec<RenderCell> {
        render_extract::render_cells(self)
    }

    /// Fill and return the `width * height` ABGR pixel buffer
    pub fn extract_pixels(&mut self) -> &[u32] {
        render_extract::extract_pixels(self)
    }

    // === Debug ===

    /// Check grid/store consistency
    pub fn validate(&self) -> Result<(), InvariantError> {
        validate::validate(self)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
