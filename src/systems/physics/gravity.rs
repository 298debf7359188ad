use crate::config::{GravityMode, SimConfig};
use crate::core::vec2::{IVec2, Vec2};

/// Gravity acceleration sampled at a cell.
///
/// Radial mode pulls toward `center` with `falloff / distance`, capped at
/// `radial_cap`; exactly at the centre the direction is undefined and the
/// result is zero.
pub fn local_gravity(config: &SimConfig, center: IVec2, pos: IVec2) -> Vec2 {
    match config.gravity_mode {
        GravityMode::Vector => config.gravity,
        GravityMode::Radial => {
            let to_center = (center - pos).as_vec2();
            let dist = to_center.length();
            if dist == 0.0 {
                return Vec2::ZERO;
            }
            to_center.normalize() * (config.radial_falloff / dist).min(config.radial_cap)
        }
        GravityMode::Off => Vec2::ZERO,
    }
}
