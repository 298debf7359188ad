use crate::error::InvariantError;

use super::WorldCore;

/// Every occupied cell points at a live particle whose position is that
/// cell, every live particle is registered, and the counts agree.
pub(super) fn validate(world: &WorldCore) -> Result<(), InvariantError> {
    let mut occupied = 0usize;
    for (cell, handle) in world.grid.occupied() {
        let Some(particle) = world.store.get(handle) else {
            return Err(InvariantError::StaleHandle { cell });
        };
        if particle.pos != cell {
            return Err(InvariantError::PositionMismatch { cell, stored: particle.pos });
        }
        occupied += 1;
    }

    let mut alive = 0usize;
    for (handle, particle) in world.store.iter() {
        if world.grid.get(particle.pos) != Some(handle) {
            return Err(InvariantError::Unregistered { slot: handle.index(), pos: particle.pos });
        }
        alive += 1;
    }

    if occupied != alive || alive != world.store.len() {
        return Err(InvariantError::CountMismatch { occupied, alive: world.store.len() });
    }
    Ok(())
}
