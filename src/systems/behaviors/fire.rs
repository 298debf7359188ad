//! Fire - burns a random lifetime and converts flammable neighbours
//!
//! Movement comes from the gas path (negative mass, dispersion); this hook
//! only handles spreading and burning out.

use rand::Rng;

use super::UpdateContext;
use crate::config::SimRng;
use crate::core::vec2::NEIGHBORS_8;
use crate::domain::color::Rgba;
use crate::domain::materials::{MaterialDef, MaterialId};
use crate::store::{Particle, ParticleHandle};

pub const FIRE_LIFETIME_SLOT: usize = 0;
pub const FIRE_MIN_LIFETIME: i32 = 30;
pub const FIRE_MAX_LIFETIME: i32 = 90;

const EMBER: Rgba = Rgba::rgb(0x60, 0x10, 0x00);
const FLAME: Rgba = Rgba::rgb(0xFF, 0xD0, 0x40);

pub(super) fn init(particle: &mut Particle, rng: &mut SimRng) {
    particle.data[FIRE_LIFETIME_SLOT] = rng.random_range(FIRE_MIN_LIFETIME..=FIRE_MAX_LIFETIME);
}

pub(super) fn update(ctx: &mut UpdateContext<'_>, handle: ParticleHandle) {
    let Some(pos) = ctx.store.get(handle).map(|p| p.pos) else { return };

    for offset in NEIGHBORS_8 {
        let npos = pos + offset;
        let Some(neighbor) = ctx.grid.get(npos) else { continue };
        let Some(material) = ctx.store.get(neighbor).map(|p| p.material) else { continue };
        if !ctx.registry.properties(material).flammable {
            continue;
        }
        ctx.despawn(neighbor);
        ctx.spawn(npos, MaterialId::Fire);
    }

    let Some(particle) = ctx.store.get_mut(handle) else { return };
    particle.data[FIRE_LIFETIME_SLOT] -= 1;
    if particle.data[FIRE_LIFETIME_SLOT] <= 0 {
        ctx.despawn(handle);
    }
}

/// Dim ember when nearly spent, bright flame when fresh
pub(super) fn render(particle: &Particle, _def: &MaterialDef) -> Rgba {
    let t = particle.data[FIRE_LIFETIME_SLOT] as f32 / FIRE_MAX_LIFETIME as f32;
    EMBER.lerp(FLAME, t)
}
