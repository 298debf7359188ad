//! Behaviors - per-material hooks {init, update, render}
//!
//! Dispatch is a fixed table of function pointers indexed by `MaterialId`.
//! Materials without an override share the default row.

mod fire;
mod water;

pub use fire::{FIRE_LIFETIME_SLOT, FIRE_MAX_LIFETIME, FIRE_MIN_LIFETIME};
pub use water::{TURBULENCE_MAX, TURBULENCE_SLOT, TINT_SLOT};

use crate::config::{SimConfig, SimRng};
use crate::core::vec2::IVec2;
use crate::domain::color::Rgba;
use crate::domain::materials::{MaterialDef, MaterialId};
use crate::domain::registry::MaterialRegistry;
use crate::grid::Grid;
use crate::store::{Particle, ParticleHandle, ParticleStore};

/// Everything a hook or the motion solver may touch during a tick
pub struct UpdateContext<'a> {
    pub store: &'a mut ParticleStore,
    pub grid: &'a mut Grid,
    pub registry: &'a MaterialRegistry,
    pub config: &'a SimConfig,
    pub rng: &'a mut SimRng,
}

impl UpdateContext<'_> {
    #[inline]
    pub fn spawn(&mut self, pos: IVec2, material: MaterialId) -> Option<ParticleHandle> {
        self.store.spawn(self.grid, self.registry, self.rng, pos, material)
    }

    #[inline]
    pub fn despawn(&mut self, handle: ParticleHandle) -> bool {
        self.store.despawn(self.grid, handle)
    }
}

pub type InitHook = fn(&mut Particle, &mut SimRng);
pub type UpdateHook = fn(&mut UpdateContext<'_>, ParticleHandle);
pub type RenderHook = fn(&Particle, &MaterialDef) -> Rgba;

#[derive(Clone, Copy)]
pub struct MaterialHooks {
    pub init: InitHook,
    pub update: UpdateHook,
    pub render: RenderHook,
}

fn default_init(_particle: &mut Particle, _rng: &mut SimRng) {}

fn default_update(_ctx: &mut UpdateContext<'_>, _handle: ParticleHandle) {}

fn default_render(_particle: &Particle, def: &MaterialDef) -> Rgba {
    def.color
}

const DEFAULT_HOOKS: MaterialHooks = MaterialHooks {
    init: default_init,
    update: default_update,
    render: default_render,
};

const FIRE_HOOKS: MaterialHooks = MaterialHooks {
    init: fire::init,
    update: fire::update,
    render: fire::render,
};

const WATER_HOOKS: MaterialHooks = MaterialHooks {
    init: water::init,
    update: water::update,
    render: water::render,
};

static HOOK_TABLE: [MaterialHooks; MaterialId::COUNT] = [
    DEFAULT_HOOKS, // empty
    DEFAULT_HOOKS, // brick
    DEFAULT_HOOKS, // wood
    DEFAULT_HOOKS, // sand
    WATER_HOOKS,
    DEFAULT_HOOKS, // oil
    DEFAULT_HOOKS, // steam
    FIRE_HOOKS,
];

#[inline]
pub fn hooks_for(id: MaterialId) -> &'static MaterialHooks {
    &HOOK_TABLE[id.index()]
}

/// Run the material's update hook on a live particle
#[inline]
pub fn update(ctx: &mut UpdateContext<'_>, handle: ParticleHandle) {
    let Some(particle) = ctx.store.get(handle) else { return };
    let hook = hooks_for(particle.material).update;
    hook(ctx, handle);
}

/// Material color for a particle, before the decoration overlay
#[inline]
pub fn render(registry: &MaterialRegistry, particle: &Particle) -> Rgba {
    let def = registry.properties(particle.material);
    (hooks_for(particle.material).render)(particle, def)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::core::vec2::Vec2;

    struct Fixture {
        store: ParticleStore,
        grid: Grid,
        registry: MaterialRegistry,
        config: SimConfig,
        rng: SimRng,
    }

    impl Fixture {
        fn new(w: u32, h: u32) -> Self {
            Self {
                store: ParticleStore::with_capacity((w * h) as usize),
                grid: Grid::new(w, h),
                registry: MaterialRegistry::builtin(),
                config: SimConfig::default(),
                rng: SimRng::seed_from_u64(3),
            }
        }

        fn ctx(&mut self) -> UpdateContext<'_> {
            UpdateContext {
                store: &mut self.store,
                grid: &mut self.grid,
                registry: &self.registry,
                config: &self.config,
                rng: &mut self.rng,
            }
        }
    }

    #[test]
    fn default_render_is_static_color() {
        let registry = MaterialRegistry::builtin();
        let p = Particle::new(MaterialId::Brick, IVec2::ZERO);
        assert_eq!(render(&registry, &p), registry.properties(MaterialId::Brick).color);
    }

    #[test]
    fn fire_init_rolls_lifetime_in_range() {
        let mut fx = Fixture::new(3, 3);
        for _ in 0..32 {
            let mut p = Particle::new(MaterialId::Fire, IVec2::ZERO);
            (hooks_for(MaterialId::Fire).init)(&mut p, &mut fx.rng);
            let life = p.data[FIRE_LIFETIME_SLOT];
            assert!((FIRE_MIN_LIFETIME..=FIRE_MAX_LIFETIME).contains(&life));
        }
    }

    #[test]
    fn fire_converts_flammable_neighbors_only() {
        let mut fx = Fixture::new(3, 3);
        let mut ctx = fx.ctx();
        let fire = ctx.spawn(IVec2::new(1, 1), MaterialId::Fire).expect("fire");
        let wood = ctx.spawn(IVec2::new(2, 1), MaterialId::Wood).expect("wood");
        let oil = ctx.spawn(IVec2::new(0, 0), MaterialId::Oil).expect("oil");
        let brick = ctx.spawn(IVec2::new(1, 2), MaterialId::Brick).expect("brick");

        update(&mut ctx, fire);

        assert!(!ctx.store.is_alive(wood));
        assert!(!ctx.store.is_alive(oil));
        assert!(ctx.store.is_alive(brick));
        for pos in [IVec2::new(2, 1), IVec2::new(0, 0)] {
            let h = ctx.grid.get(pos).expect("occupied");
            assert_eq!(ctx.store.get(h).map(|p| p.material), Some(MaterialId::Fire));
        }
    }

    #[test]
    fn fire_burns_out_at_zero() {
        let mut fx = Fixture::new(1, 1);
        let mut ctx = fx.ctx();
        let fire = ctx.spawn(IVec2::ZERO, MaterialId::Fire).expect("fire");
        if let Some(p) = ctx.store.get_mut(fire) {
            p.data[FIRE_LIFETIME_SLOT] = 2;
        }
        update(&mut ctx, fire);
        assert!(ctx.store.is_alive(fire));
        update(&mut ctx, fire);
        assert!(!ctx.store.is_alive(fire));
        assert!(ctx.grid.is_empty(IVec2::ZERO));
    }

    #[test]
    fn water_turbulence_rises_then_decays() {
        let mut fx = Fixture::new(2, 2);
        let mut ctx = fx.ctx();
        let water = ctx.spawn(IVec2::ZERO, MaterialId::Water).expect("water");
        if let Some(p) = ctx.store.get_mut(water) {
            p.velocity = Vec2::new(0.0, 2.0);
        }
        update(&mut ctx, water);
        update(&mut ctx, water);
        let level = ctx.store.get(water).map(|p| p.data[TURBULENCE_SLOT]).unwrap_or_default();
        assert!(level > 0);

        if let Some(p) = ctx.store.get_mut(water) {
            p.velocity = Vec2::ZERO;
        }
        for _ in 0..(TURBULENCE_MAX * 2) {
            update(&mut ctx, water);
        }
        assert_eq!(ctx.store.get(water).map(|p| p.data[TURBULENCE_SLOT]), Some(0));
    }

    #[test]
    fn calm_water_renders_base_color() {
        let registry = MaterialRegistry::builtin();
        let p = Particle::new(MaterialId::Water, IVec2::ZERO);
        assert_eq!(render(&registry, &p), registry.properties(MaterialId::Water).color);
    }
}
