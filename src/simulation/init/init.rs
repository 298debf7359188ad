use std::sync::Arc;

use log::info;

use crate::domain::registry::MaterialRegistry;
use crate::grid::Grid;
use crate::store::ParticleStore;

use super::{TickStats, WorldCore};

pub(super) fn create_world_core(
    width: u32,
    height: u32,
    capacity: Option<usize>,
    registry: Arc<MaterialRegistry>,
) -> WorldCore {
    let grid = Grid::new(width, height);
    let capacity = capacity.unwrap_or_else(|| grid.size());
    info!("world {}x{} created, pool capacity {}", width, height, capacity);

    WorldCore {
        registry,
        store: ParticleStore::with_capacity(capacity),
        grid,
        frame: 0,
        last_stats: TickStats::default(),
        // Sized on first `extract_pixels`
        pixels: Vec::new(),
    }
}
