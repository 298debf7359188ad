use serde::Serialize;

use crate::behaviors;
use crate::core::vec2::IVec2;
use crate::domain::color::{Rgba, BG_COLOR};
use crate::domain::registry::MaterialRegistry;
use crate::store::Particle;

use super::WorldCore;

/// One occupied cell and its final color
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RenderCell {
    pub pos: IVec2,
    pub color: Rgba,
}

/// Material color with the decoration overlay on top
#[inline]
fn particle_color(registry: &MaterialRegistry, particle: &Particle) -> Rgba {
    behaviors::render(registry, particle).composite(particle.deco)
}

pub(super) fn render_cells(world: &WorldCore) -> Vec<RenderCell> {
    world
        .grid
        .occupied()
        .filter_map(|(pos, handle)| {
            let particle = world.store.get(handle)?;
            Some(RenderCell { pos, color: particle_color(&world.registry, particle) })
        })
        .collect()
}

pub(super) fn extract_pixels(world: &mut WorldCore) -> &[u32] {
    let size = world.grid.size();
    if world.pixels.len() != size {
        world.pixels = vec![0; size];
    }

    let bg = BG_COLOR.to_abgr();
    for (idx, pixel) in world.pixels.iter_mut().enumerate() {
        let pos = world.grid.coords(idx);
        *pixel = match world.grid.get(pos).and_then(|h| world.store.get(h)) {
            Some(particle) => particle_color(&world.registry, particle).to_abgr(),
            None => bg,
        };
    }
    &world.pixels
}
