use log::info;

use crate::config::{GravityMode, SimConfig};
use crate::core::vec2::Vec2;

pub(super) fn set_gravity(config: &mut SimConfig, x: f32, y: f32) -> bool {
    let gravity = Vec2::new(x, y);
    if !gravity.is_finite() {
        return false;
    }
    config.gravity = gravity;
    true
}

pub(super) fn set_gravity_mode(config: &mut SimConfig, mode: GravityMode) {
    if config.gravity_mode != mode {
        info!("gravity mode: {:?} -> {:?}", config.gravity_mode, mode);
    }
    config.gravity_mode = mode;
}

pub(super) fn cycle_gravity_mode(config: &mut SimConfig) -> GravityMode {
    let next = config.gravity_mode.next();
    set_gravity_mode(config, next);
    next
}
