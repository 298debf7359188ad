use std::sync::Arc;

use wasm_bindgen::prelude::*;

use crate::config::{GravityMode, SimConfig, SimContext};
use crate::core::vec2::IVec2;
use crate::domain::materials::MaterialId;
use crate::domain::registry::MaterialRegistry;

use super::settings;
use super::{FixedStepDriver, WorldCore};

/// JS-facing world: the core plus its config/RNG context and tick driver
#[wasm_bindgen]
pub struct World {
    core: WorldCore,
    ctx: SimContext,
    driver: FixedStepDriver,
}

impl World {
    pub fn from_config(width: u32, height: u32, config: SimConfig) -> Self {
        let core = WorldCore::with_registry(width, height, config.pool_capacity, Arc::new(MaterialRegistry::builtin()));
        Self {
            core,
            ctx: SimContext::new(config),
            driver: FixedStepDriver::new(),
        }
    }
}

#[wasm_bindgen]
impl World {
    /// Create a new world with given dimensions and default settings
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_config(width, height, SimConfig::default())
    }

    /// Create a world from a camelCase JSON config
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(width: u32, height: u32, config_json: String) -> Result<World, JsValue> {
        let config = SimConfig::from_json(&config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::from_config(width, height, config))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.core.particle_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn capacity(&self) -> u32 { self.core.capacity() as u32 }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    // === Materials ===

    /// Replace the material set from a bundle; clears the world
    pub fn load_materials_json(&mut self, json: String) -> Result<(), JsValue> {
        self.core
            .load_materials_json(&json)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn materials_manifest_json(&self) -> String {
        self.core.registry().manifest_json()
    }

    /// Placeable materials as `[{id, key, displayName, color}]`
    pub fn palette_json(&self) -> String {
        serde_json::to_string(&self.core.palette()).unwrap_or_else(|_| "[]".to_string())
    }

    // === Particles ===

    /// Add a particle at position
    pub fn add_particle(&mut self, x: i32, y: i32, material: u8) -> bool {
        let Some(material) = MaterialId::from_index(material) else { return false };
        self.core.add(&mut self.ctx, IVec2::new(x, y), material).is_some()
    }

    /// Add particles in radius (brush)
    pub fn add_particles_in_radius(&mut self, cx: i32, cy: i32, radius: i32, material: u8) -> u32 {
        let Some(material) = MaterialId::from_index(material) else { return 0 };
        self.core.add_in_radius(&mut self.ctx, IVec2::new(cx, cy), radius, material) as u32
    }

    /// Remove particle at position
    pub fn remove_particle(&mut self, x: i32, y: i32) -> bool {
        self.core.remove_at(IVec2::new(x, y))
    }

    /// Remove particles in radius
    pub fn remove_particles_in_radius(&mut self, cx: i32, cy: i32, radius: i32) -> u32 {
        self.core.remove_in_radius(IVec2::new(cx, cy), radius) as u32
    }

    /// Clear all particles
    pub fn clear(&mut self) {
        self.core.clear();
    }

    // === Stepping ===

    /// Run exactly one tick, regardless of the running flag
    pub fn tick(&mut self) {
        self.core.tick(&mut self.ctx);
    }

    /// Feed elapsed wall time in seconds; returns ticks run
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.driver.advance(&mut self.core, &mut self.ctx, elapsed)
    }

    /// Pause and run a single tick
    pub fn step_once(&mut self) {
        self.driver.step_once(&mut self.core, &mut self.ctx);
    }

    pub fn set_running(&mut self, running: bool) {
        if self.ctx.config.running != running {
            self.driver.toggle_running(&mut self.ctx);
        }
    }

    pub fn is_running(&self) -> bool {
        self.ctx.config.running
    }

    pub fn toggle_running(&mut self) -> bool {
        self.driver.toggle_running(&mut self.ctx)
    }

    /// Restart the RNG so the following edits and ticks replay exactly
    pub fn reseed(&mut self, seed: u64) {
        self.ctx.reseed(seed);
    }

    // === Gravity ===

    pub fn set_gravity(&mut self, x: f32, y: f32) -> bool {
        settings::set_gravity(&mut self.ctx.config, x, y)
    }

    /// 0 = vector, 1 = radial, 2 = off
    pub fn set_gravity_mode(&mut self, mode: u8) -> bool {
        let Some(mode) = GravityMode::from_index(mode) else { return false };
        settings::set_gravity_mode(&mut self.ctx.config, mode);
        true
    }

    /// Vector -> radial -> off -> vector; returns the new mode index
    pub fn cycle_gravity_mode(&mut self) -> u8 {
        settings::cycle_gravity_mode(&mut self.ctx.config) as u8
    }

    // === Rendering ===

    /// Fill the ABGR pixel buffer and return its pointer into wasm memory
    pub fn extract_pixels(&mut self) -> *const u32 {
        self.core.extract_pixels().as_ptr()
    }

    /// Pointer to the last extracted buffer (null before the first extraction)
    pub fn pixels_ptr(&self) -> *const u32 {
        if self.core.pixels.is_empty() {
            std::ptr::null()
        } else {
            self.core.pixels.as_ptr()
        }
    }

    /// Pixel buffer length in u32 elements
    pub fn pixels_len(&self) -> usize {
        self.core.grid.size()
    }

    // === Debug ===

    pub fn last_tick_stats_json(&self) -> String {
        self.core.last_tick_stats().to_json()
    }

    /// Grid/store consistency check; failures are logged
    pub fn validate(&self) -> bool {
        match self.core.validate() {
            Ok(()) => true,
            Err(e) => {
                log::error!("world invariant violated: {}", e);
                false
            }
        }
    }
}
