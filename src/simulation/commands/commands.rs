use log::debug;

use crate::config::SimContext;
use crate::core::vec2::IVec2;
use crate::domain::materials::MaterialId;
use crate::store::ParticleHandle;

use super::WorldCore;

pub(super) fn add(
    world: &mut WorldCore,
    ctx: &mut SimContext,
    pos: IVec2,
    material: MaterialId,
) -> Option<ParticleHandle> {
    world
        .store
        .spawn(&mut world.grid, &world.registry, &mut ctx.rng, pos, material)
}

pub(super) fn remove(world: &mut WorldCore, handle: ParticleHandle) -> bool {
    world.store.despawn(&mut world.grid, handle)
}

pub(super) fn remove_at(world: &mut WorldCore, pos: IVec2) -> bool {
    match world.grid.get(pos) {
        Some(handle) => remove(world, handle),
        None => false,
    }
}

/// Cells of a brush disc, clipped to the grid. Distances are in i64 so any
/// host-supplied radius is safe, and only in-bounds cells are visited.
fn disc(center: IVec2, radius: i32, width: u32, height: u32) -> impl Iterator<Item = IVec2> {
    let r = i64::from(radius.max(0));
    let r2 = r * r;
    let (cx, cy) = (i64::from(center.x), i64::from(center.y));
    let xs = (cx - r).max(0)..=(cx + r).min(i64::from(width) - 1);
    let ys = (cy - r).max(0)..=(cy + r).min(i64::from(height) - 1);
    ys.flat_map(move |y| {
        xs.clone()
            .filter(move |x| (x - cx).pow(2) + (y - cy).pow(2) <= r2)
            .map(move |x| IVec2::new(x as i32, y as i32))
    })
}

pub(super) fn add_in_radius(
    world: &mut WorldCore,
    ctx: &mut SimContext,
    center: IVec2,
    radius: i32,
    material: MaterialId,
) -> usize {
    let mut added = 0;
    for pos in disc(center, radius, world.grid.width(), world.grid.height()) {
        if add(world, ctx, pos, material).is_some() {
            added += 1;
        }
    }
    added
}

pub(super) fn remove_in_radius(world: &mut WorldCore, center: IVec2, radius: i32) -> usize {
    disc(center, radius, world.grid.width(), world.grid.height())
        .filter(|pos| remove_at(world, *pos))
        .count()
}

pub(super) fn clear(world: &mut WorldCore) {
    let removed = world.store.len();
    world.store.clear(&mut world.grid);
    world.grid.clear_all();
    world.grid.reset_updated();
    world.frame = 0;
    world.last_stats = Default::default();
    debug!("world cleared ({} particles removed)", removed);
}
