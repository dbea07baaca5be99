//! Priority queue over trial cells.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Heap entry. `stamp` ties the entry to one particular value of the cell;
/// entries whose stamp is behind the cell's current stamp are stale.
#[derive(Debug, Clone, Copy)]
struct Entry {
    magnitude: f64,
    cell: usize,
    stamp: u32,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap: smallest magnitude first, then lowest cell id.
        other
            .magnitude
            .total_cmp(&self.magnitude)
            .then_with(|| other.cell.cmp(&self.cell))
            .then_with(|| self.stamp.cmp(&other.stamp))
    }
}

/// Min-queue of cells keyed by the magnitude of their trial value.
///
/// Updating a queued cell pushes a fresh entry and invalidates the old one,
/// so `push` doubles as decrease/increase-key. Extraction order is by
/// magnitude, ties going to the lowest cell index.
#[derive(Debug, Clone, Default)]
pub struct TrialQueue {
    heap: BinaryHeap<Entry>,
    stamps: Vec<u32>,
    queued: Vec<bool>,
    len: usize,
}

impl TrialQueue {
    pub fn new(num_cells: usize) -> Self {
        Self {
            heap: BinaryHeap::new(),
            stamps: vec![0; num_cells],
            queued: vec![false; num_cells],
            len: 0,
        }
    }

    /// Number of distinct cells in the queue.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, cell: usize) -> bool {
        self.queued[cell]
    }

    /// Insert `cell` with trial value `value`, or replace its current key.
    pub fn push(&mut self, cell: usize, value: f64) {
        if !self.queued[cell] {
            self.queued[cell] = true;
            self.len += 1;
        }
        self.stamps[cell] = self.stamps[cell].wrapping_add(1);
        self.heap.push(Entry {
            magnitude: value.abs(),
            cell,
            stamp: self.stamps[cell],
        });
    }

    /// The next cell and its key, without removing it.
    pub fn peek(&mut self) -> Option<(usize, f64)> {
        self.discard_stale();
        self.heap.peek().map(|e| (e.cell, e.magnitude))
    }

    /// Remove and return the cell with the smallest key.
    pub fn pop(&mut self) -> Option<(usize, f64)> {
        self.discard_stale();
        let entry = self.heap.pop()?;
        self.queued[entry.cell] = false;
        self.len -= 1;
        Some((entry.cell, entry.magnitude))
    }

    fn is_live(&self, entry: &Entry) -> bool {
        self.queued[entry.cell] && self.stamps[entry.cell] == entry.stamp
    }

    fn discard_stale(&mut self) {
        while let Some(top) = self.heap.peek() {
            if self.is_live(top) {
                break;
            }
            self.heap.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_by_magnitude() {
        let mut queue = TrialQueue::new(4);
        queue.push(0, 3.0);
        queue.push(1, -0.5);
        queue.push(2, 1.5);

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop(), Some((1, 0.5)));
        assert_eq!(queue.pop(), Some((2, 1.5)));
        assert_eq!(queue.pop(), Some((0, 3.0)));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn ties_go_to_lowest_index() {
        let mut queue = TrialQueue::new(6);
        queue.push(5, 1.0);
        queue.push(2, -1.0);
        queue.push(4, 1.0);

        assert_eq!(queue.pop().map(|(c, _)| c), Some(2));
        assert_eq!(queue.pop().map(|(c, _)| c), Some(4));
        assert_eq!(queue.pop().map(|(c, _)| c), Some(5));
    }

    #[test]
    fn update_replaces_key() {
        let mut queue = TrialQueue::new(3);
        queue.push(0, 1.0);
        queue.push(1, 2.0);
        queue.push(1, 0.5);
        queue.push(0, 4.0);

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.peek(), Some((1, 0.5)));
        assert_eq!(queue.pop(), Some((1, 0.5)));
        assert!(!queue.contains(1));
        assert_eq!(queue.pop(), Some((0, 4.0)));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn reinserted_cell_is_live_again() {
        let mut queue = TrialQueue::new(2);
        queue.push(0, 1.0);
        assert_eq!(queue.pop(), Some((0, 1.0)));
        queue.push(0, 2.0);
        assert!(queue.contains(0));
        assert_eq!(queue.pop(), Some((0, 2.0)));
    }
}
