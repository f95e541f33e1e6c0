//! Per-shape progress values with granular change tracking.
//!
//! Each shape owns one [`ProgressCell`]. Writes bump the cell's revision and
//! raise its dirty flag so a renderer can refresh exactly the shapes that
//! moved instead of repainting the whole workspace.

#[cfg(feature = "serde")]
use serde::Serialize;

/// 0 = full chaos placement, 1 = full order placement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ProgressCell {
    value: f32,
    revision: u64,
}

impl ProgressCell {
    pub fn get(&self) -> f32 {
        self.value
    }

    /// Incremented on every write; lets readers cheaply detect staleness.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProgressSet {
    cells: Vec<ProgressCell>,
    dirty: Vec<bool>,
    dirty_count: usize,
}

impl ProgressSet {
    pub fn new(len: usize) -> Self {
        Self {
            cells: vec![ProgressCell::default(); len],
            dirty: vec![false; len],
            dirty_count: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Current value, or 0 for an index outside the set.
    pub fn get(&self, i: usize) -> f32 {
        self.cells.get(i).map(ProgressCell::get).unwrap_or(0.0)
    }

    pub fn cell(&self, i: usize) -> Option<&ProgressCell> {
        self.cells.get(i)
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.cells.iter().map(ProgressCell::get)
    }

    /// Store `value` (clamped to [0, 1]) and mark the cell dirty. NaN is
    /// rejected so a bad input can never poison the set.
    pub fn set(&mut self, i: usize, value: f32) {
        let Some(cell) = self.cells.get_mut(i) else {
            return;
        };
        if value.is_nan() {
            return;
        }
        cell.value = value.clamp(0.0, 1.0);
        cell.revision = cell.revision.wrapping_add(1);
        if !self.dirty[i] {
            self.dirty[i] = true;
            self.dirty_count += 1;
        }
    }

    pub fn fill(&mut self, value: f32) {
        for i in 0..self.cells.len() {
            self.set(i, value);
        }
    }

    pub fn is_dirty(&self, i: usize) -> bool {
        self.dirty.get(i).copied().unwrap_or(false)
    }

    pub fn any_dirty(&self) -> bool {
        self.dirty_count > 0
    }

    /// Mark every cell dirty without changing values (e.g. after a resize).
    pub fn touch_all(&mut self) {
        self.dirty.fill(true);
        self.dirty_count = self.dirty.len();
    }

    /// Indices written since the last drain, in ascending order.
    pub fn drain_dirty(&mut self) -> Vec<usize> {
        if self.dirty_count == 0 {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(self.dirty_count);
        for (i, d) in self.dirty.iter_mut().enumerate() {
            if *d {
                *d = false;
                out.push(i);
            }
        }
        self.dirty_count = 0;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_mark_only_touched_cells() {
        let mut p = ProgressSet::new(4);
        p.set(2, 0.4);
        p.set(2, 0.5);
        p.set(0, 0.1);

        assert!(p.is_dirty(0));
        assert!(!p.is_dirty(1));
        assert_eq!(p.cell(2).unwrap().revision(), 2);
        assert_eq!(p.drain_dirty(), vec![0, 2]);
        assert!(!p.any_dirty());
        assert!(p.drain_dirty().is_empty());
    }

    #[test]
    fn values_are_clamped_and_nan_ignored() {
        let mut p = ProgressSet::new(1);
        p.set(0, 3.0);
        assert_eq!(p.get(0), 1.0);
        p.set(0, -1.0);
        assert_eq!(p.get(0), 0.0);
        p.set(0, f32::NAN);
        assert_eq!(p.get(0), 0.0);
        p.set(7, 0.5);
        assert_eq!(p.get(7), 0.0);
    }

    #[test]
    fn touch_all_marks_everything() {
        let mut p = ProgressSet::new(3);
        p.touch_all();
        assert_eq!(p.drain_dirty(), vec![0, 1, 2]);
    }
}
