use rand::Rng;

use super::try_place;
use crate::behaviors::UpdateContext;
use crate::core::vec2::{IVec2, NEIGHBORS_8};
use crate::store::ParticleHandle;

/// Gas extra step: with probability `dispersion`, hop to a uniformly chosen
/// empty 8-neighbour. Returns the particle's cell afterwards.
pub fn diffuse(ctx: &mut UpdateContext<'_>, handle: ParticleHandle, dispersion: f32) -> Option<IVec2> {
    let pos = ctx.store.get(handle)?.pos;
    if dispersion <= 0.0 || ctx.rng.random::<f32>() >= dispersion {
        return Some(pos);
    }

    let mut free = [IVec2::ZERO; 8];
    let mut count = 0;
    for offset in NEIGHBORS_8 {
        let npos = pos + offset;
        if ctx.grid.is_empty(npos) {
            free[count] = npos;
            count += 1;
        }
    }
    if count == 0 {
        return Some(pos);
    }

    let target = free[ctx.rng.random_range(0..count)];
    if try_place(ctx, handle, pos, target) {
        Some(target)
    } else {
        Some(pos)
    }
}
