//! Water - turbulence shimmer
//!
//! Fast-moving water builds up a turbulence level and re-rolls its tint; calm
//! water decays back to the base color.

use rand::Rng;

use super::UpdateContext;
use crate::config::SimRng;
use crate::domain::color::Rgba;
use crate::domain::materials::MaterialDef;
use crate::store::{Particle, ParticleHandle};

pub const TURBULENCE_SLOT: usize = 0;
pub const TINT_SLOT: usize = 1;
pub const TURBULENCE_MAX: i32 = 16;

const TURBULENCE_SPEED: f32 = 0.5;
const TURBULENCE_RISE: i32 = 2;
const TURBULENCE_DECAY: i32 = 1;

pub(super) fn init(particle: &mut Particle, rng: &mut SimRng) {
    particle.data[TINT_SLOT] = rng.random_range(0..=255);
}

pub(super) fn update(ctx: &mut UpdateContext<'_>, handle: ParticleHandle) {
    let tint: i32 = ctx.rng.random_range(0..=255);
    let Some(particle) = ctx.store.get_mut(handle) else { return };

    let level = &mut particle.data[TURBULENCE_SLOT];
    if particle.velocity.length() > TURBULENCE_SPEED {
        *level = (*level + TURBULENCE_RISE).min(TURBULENCE_MAX);
        particle.data[TINT_SLOT] = tint;
    } else {
        *level = (*level - TURBULENCE_DECAY).max(0);
    }
}

pub(super) fn render(particle: &Particle, def: &MaterialDef) -> Rgba {
    let level = particle.data[TURBULENCE_SLOT];
    if level <= 0 {
        return def.color;
    }
    let tint = particle.data[TINT_SLOT].clamp(0, 255) as f32 / 255.0;
    let bright = def.color.lighten(0.35 + 0.4 * tint);
    def.color.lerp(bright, level as f32 / TURBULENCE_MAX as f32)
}
