//! Spill search - lateral probing when the direct path is blocked
//!
//! The travel vector is rotated by growing angles (from `SPILL_MIN_ANGLE` up
//! to `90 - repose`), probing both sides at each angle. Side order is a coin
//! flip and single probes are randomly skipped so piles don't grow in
//! visibly regular patterns.

use rand::Rng;

use super::{try_place, SPILL_ANGLE_STEP, SPILL_MIN_ANGLE, SPILL_SKIP_CHANCE};
use crate::behaviors::UpdateContext;
use crate::core::vec2::{IVec2, Vec2};
use crate::store::ParticleHandle;

pub(super) fn spill(
    ctx: &mut UpdateContext<'_>,
    handle: ParticleHandle,
    origin: IVec2,
    travel: Vec2,
    repose_angle: f32,
) -> Option<IVec2> {
    let max_offset = 90.0 - repose_angle;
    let mut offset = SPILL_MIN_ANGLE;

    while offset <= max_offset {
        let sides = if ctx.rng.random::<bool>() { [-1.0f32, 1.0] } else { [1.0f32, -1.0] };
        for side in sides {
            if ctx.rng.random::<f32>() < SPILL_SKIP_CHANCE {
                continue;
            }
            let rotated = travel.rotated((side * offset).to_radians());
            let target = origin + rotated.round_to_cell();
            if try_place(ctx, handle, origin, target) {
                if let Some(p) = ctx.store.get_mut(handle) {
                    p.velocity = Vec2::from_polar(p.velocity.length(), rotated.angle());
                }
                return Some(target);
            }
        }
        offset += SPILL_ANGLE_STEP;
    }
    None
}
