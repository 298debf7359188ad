//! Sandfall Engine - falling-sand particle simulation in WASM
//!
//! Architecture:
//! - core/          - Vector math
//! - domain/        - Materials, colors, registry
//! - spatial/       - Occupancy grid
//! - store/         - Particle pool and handles
//! - systems/       - Motion Solver and material behaviors
//! - simulation/    - WorldCore, tick scheduler, driver, wasm facade

pub mod core;
pub mod spatial;
pub mod domain;
pub mod store;
pub mod systems;
pub mod simulation;
pub mod config;
pub mod error;
pub mod logging;

// Short paths used throughout the crate
pub use spatial::grid;
pub use systems::behaviors;
pub use systems::physics;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    logging::init(if cfg!(debug_assertions) { log::LevelFilter::Debug } else { log::LevelFilter::Info });
    log::info!("Sandfall WASM engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use config::{GravityMode, SimConfig, SimContext};
pub use domain::materials::MaterialId;
pub use simulation::{FixedStepDriver, RenderCell, TickStats, World, WorldCore};

// Export material ids for JS
#[wasm_bindgen]
pub fn mat_brick() -> u8 { MaterialId::Brick as u8 }
#[wasm_bindgen]
pub fn mat_wood() -> u8 { MaterialId::Wood as u8 }
#[wasm_bindgen]
pub fn mat_sand() -> u8 { MaterialId::Sand as u8 }
#[wasm_bindgen]
pub fn mat_water() -> u8 { MaterialId::Water as u8 }
#[wasm_bindgen]
pub fn mat_oil() -> u8 { MaterialId::Oil as u8 }
#[wasm_bindgen]
pub fn mat_steam() -> u8 { MaterialId::Steam as u8 }
#[wasm_bindgen]
pub fn mat_fire() -> u8 { MaterialId::Fire as u8 }
