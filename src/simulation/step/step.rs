use log::trace;

use crate::behaviors::{self, UpdateContext};
use crate::config::{GravityMode, SimConfig, SimContext};
use crate::core::vec2::IVec2;
use crate::domain::materials::StateTier;
use crate::domain::registry::MaterialRegistry;
use crate::physics;
use crate::store::{ParticleHandle, ParticleStore};

use super::{TickStats, WorldCore};

pub(super) fn tick(world: &mut WorldCore, ctx: &mut SimContext) -> TickStats {
    let mut stats = TickStats::default();

    // Marks are per tick: a cell touched by a move or swap is not dispatched again.
    world.grid.reset_updated();

    // Particles spawned during this tick are not in the snapshot and wait
    // for the next one.
    let mut snapshot = world.store.active_snapshot();
    order_snapshot(&mut snapshot, &world.store, &world.registry, &ctx.config, world.grid.center());

    let SimContext { config, rng } = ctx;
    let registry = &*world.registry;
    let mut uctx = UpdateContext {
        store: &mut world.store,
        grid: &mut world.grid,
        registry,
        config: &*config,
        rng,
    };

    for handle in snapshot {
        let Some(particle) = uctx.store.get(handle) else {
            stats.skipped += 1;
            continue;
        };
        let origin = particle.pos;
        if uctx.grid.is_updated(origin) {
            stats.skipped += 1;
            continue;
        }

        let def = *registry.properties(particle.material);
        if !def.tier.is_movable() {
            continue;
        }

        let mut dest = physics::resolve(&mut uctx, handle).unwrap_or(origin);
        if def.tier == StateTier::Gas {
            dest = physics::diffuse(&mut uctx, handle, def.dispersion).unwrap_or(dest);
        }
        uctx.grid.set_updated(origin);
        uctx.grid.set_updated(dest);

        stats.processed += 1;
        if dest != origin {
            stats.moved += 1;
        }

        behaviors::update(&mut uctx, handle);
    }

    world.frame += 1;
    stats.live = world.store.len() as u32;
    world.last_stats = stats;

    trace!(
        "tick {}: {} processed, {} moved, {} skipped, {} live",
        world.frame,
        stats.processed,
        stats.moved,
        stats.skipped,
        stats.live
    );
    stats
}

/// Sort so particles furthest along the pull go first. Negative mass
/// inverts the order. Ties keep live-list order.
fn order_snapshot(
    snapshot: &mut [ParticleHandle],
    store: &ParticleStore,
    registry: &MaterialRegistry,
    config: &SimConfig,
    center: IVec2,
) {
    let key = |handle: &ParticleHandle| -> f32 {
        let Some(p) = store.get(*handle) else { return 0.0 };
        let sign = registry.properties(p.material).mass.signum();
        match config.gravity_mode {
            GravityMode::Vector => -p.pos.as_vec2().dot(config.gravity) * sign,
            GravityMode::Radial => (p.pos - center).as_vec2().length_squared() * sign,
            GravityMode::Off => 0.0,
        }
    };

    if config.gravity_mode == GravityMode::Off {
        return;
    }
    snapshot.sort_by(|a, b| key(a).total_cmp(&key(b)));
}
