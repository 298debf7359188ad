//! Grid - cell -> particle handle occupancy map
//!
//! The grid owns no particle data: each cell is a weak back-reference into the
//! particle store. All position arguments are bounds-checked; out-of-bounds is
//! a rejection, never a clamp.

use crate::core::vec2::IVec2;
use crate::store::ParticleHandle;

pub struct Grid {
    width: u32,
    height: u32,
    size: usize,

    cells: Vec<Option<ParticleHandle>>,
    /// 1 = cell already processed this tick
    updated: Vec<u8>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            size,
            cells: vec![None; size],
            updated: vec![0; size],
        }
    }

    // === Dimensions ===
    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn size(&self) -> usize { self.size }

    /// Integer centre cell, used by radial gravity
    #[inline]
    pub fn center(&self) -> IVec2 {
        IVec2::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    // === Index conversion ===
    #[inline]
    pub fn in_bounds(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    #[inline]
    fn index(&self, pos: IVec2) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn coords(&self, idx: usize) -> IVec2 {
        let w = self.width as usize;
        IVec2::new((idx % w) as i32, (idx / w) as i32)
    }

    // === Occupancy ===
    #[inline]
    pub fn get(&self, pos: IVec2) -> Option<ParticleHandle> {
        self.index(pos).and_then(|idx| self.cells[idx])
    }

    /// In bounds and unoccupied
    #[inline]
    pub fn is_empty(&self, pos: IVec2) -> bool {
        matches!(self.index(pos), Some(idx) if self.cells[idx].is_none())
    }

    /// Register `handle` at `pos`. Fails on out-of-bounds or an occupied cell.
    pub fn place(&mut self, pos: IVec2, handle: ParticleHandle) -> bool {
        let Some(idx) = self.index(pos) else { return false };
        if self.cells[idx].is_some() {
            debug_assert!(false, "place on occupied cell ({}, {})", pos.x, pos.y);
            return false;
        }
        self.cells[idx] = Some(handle);
        true
    }

    /// Empty the cell, returning what was there
    pub fn clear(&mut self, pos: IVec2) -> Option<ParticleHandle> {
        let idx = self.index(pos)?;
        self.cells[idx].take()
    }

    /// Exchange two cells' contents. Both must be in bounds.
    pub fn swap(&mut self, a: IVec2, b: IVec2) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    pub fn clear_all(&mut self) {
        self.cells.fill(None);
        self.updated.fill(0);
    }

    /// Occupied cells in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (IVec2, ParticleHandle)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(idx, cell)| cell.map(|h| (self.coords(idx), h)))
    }

    // === Updated flag ===
    #[inline]
    pub fn is_updated(&self, pos: IVec2) -> bool {
        matches!(self.index(pos), Some(idx) if self.updated[idx] == 1)
    }

    #[inline]
    pub fn set_updated(&mut self, pos: IVec2) {
        if let Some(idx) = self.index(pos) {
            self.updated[idx] = 1;
        }
    }

    #[inline]
    pub fn reset_updated(&mut self) {
        self.updated.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(index: u32) -> ParticleHandle {
        ParticleHandle::new(index, 0)
    }

    #[test]
    fn out_of_bounds_is_rejected_without_mutation() {
        let mut grid = Grid::new(4, 3);
        assert!(!grid.place(IVec2::new(4, 0), handle(0)));
        assert!(!grid.place(IVec2::new(-1, 2), handle(0)));
        assert_eq!(grid.get(IVec2::new(0, 3)), None);
        assert_eq!(grid.clear(IVec2::new(9, 9)), None);
        assert!(!grid.is_empty(IVec2::new(-1, 0)));
        assert_eq!(grid.occupied().count(), 0);
    }

    #[test]
    fn place_get_clear() {
        let mut grid = Grid::new(4, 3);
        let pos = IVec2::new(2, 1);
        assert!(grid.place(pos, handle(7)));
        assert_eq!(grid.get(pos), Some(handle(7)));
        assert!(!grid.is_empty(pos));
        assert_eq!(grid.clear(pos), Some(handle(7)));
        assert!(grid.is_empty(pos));
    }

    #[test]
    fn swap_exchanges_contents() {
        let mut grid = Grid::new(2, 2);
        let a = IVec2::new(0, 0);
        let b = IVec2::new(1, 1);
        grid.place(a, handle(1));
        assert!(grid.swap(a, b));
        assert_eq!(grid.get(a), None);
        assert_eq!(grid.get(b), Some(handle(1)));
        assert!(!grid.swap(a, IVec2::new(2, 0)));
    }

    #[test]
    fn updated_marks_reset() {
        let mut grid = Grid::new(3, 3);
        let pos = IVec2::new(1, 1);
        grid.set_updated(pos);
        assert!(grid.is_updated(pos));
        grid.reset_updated();
        assert!(!grid.is_updated(pos));
    }
}
