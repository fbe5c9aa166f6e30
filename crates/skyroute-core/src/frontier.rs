//! Open set for the voxel search.
//!
//! A `BinaryHeap` ordered by ascending f, with ties going to the entry pushed
//! first. Re-pushing a voxel that is already queued supersedes its old entry:
//! the old heap entry stays behind but is recognised as stale by its sequence
//! number and skipped on `pop`, so each residency yields the voxel once.

use crate::grid::VoxelId;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenEntry {
    f_score: FloatOrd,
    seq: u64,
    id: VoxelId,
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_score
            .cmp(&other.f_score)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Min-f priority queue over voxel ids with O(1) membership.
#[derive(Debug, Clone)]
pub struct Frontier {
    heap: BinaryHeap<Reverse<OpenEntry>>,
    // Sequence number of the live entry per voxel, if queued.
    live: Vec<Option<u64>>,
    next_seq: u64,
    len: usize,
}

impl Frontier {
    /// Frontier able to hold any voxel of a grid with `voxel_count` voxels.
    pub fn with_capacity(voxel_count: usize) -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: vec![None; voxel_count],
            next_seq: 0,
            len: 0,
        }
    }

    /// Queue `id` with priority `f_score`, replacing any entry it already has.
    pub fn push(&mut self, id: VoxelId, f_score: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        if self.live[id.0].replace(seq).is_none() {
            self.len += 1;
        }
        self.heap.push(Reverse(OpenEntry {
            f_score: FloatOrd(f_score),
            seq,
            id,
        }));
    }

    /// Remove and return the queued voxel with the lowest f.
    pub fn pop(&mut self) -> Option<VoxelId> {
        while let Some(Reverse(entry)) = self.heap.pop() {
            if self.live[entry.id.0] != Some(entry.seq) {
                continue;
            }
            self.live[entry.id.0] = None;
            self.len -= 1;
            return Some(entry.id);
        }
        None
    }

    pub fn contains(&self, id: VoxelId) -> bool {
        self.live.get(id.0).is_some_and(|seq| seq.is_some())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_ascending_f() {
        let mut frontier = Frontier::with_capacity(4);
        frontier.push(VoxelId(0), 3.0);
        frontier.push(VoxelId(1), 1.0);
        frontier.push(VoxelId(2), 2.0);
        assert_eq!(frontier.pop(), Some(VoxelId(1)));
        assert_eq!(frontier.pop(), Some(VoxelId(2)));
        assert_eq!(frontier.pop(), Some(VoxelId(0)));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn equal_f_pops_first_inserted_first() {
        let mut frontier = Frontier::with_capacity(8);
        for id in [5, 2, 7, 0] {
            frontier.push(VoxelId(id), 4.0);
        }
        let order: Vec<_> = std::iter::from_fn(|| frontier.pop()).collect();
        assert_eq!(order, vec![VoxelId(5), VoxelId(2), VoxelId(7), VoxelId(0)]);
    }

    #[test]
    fn decrease_key_does_not_duplicate() {
        let mut frontier = Frontier::with_capacity(3);
        frontier.push(VoxelId(0), 5.0);
        frontier.push(VoxelId(1), 4.0);
        frontier.push(VoxelId(0), 1.0);
        assert_eq!(frontier.len(), 2);

        assert_eq!(frontier.pop(), Some(VoxelId(0)));
        assert!(!frontier.contains(VoxelId(0)));
        assert_eq!(frontier.pop(), Some(VoxelId(1)));
        assert_eq!(frontier.pop(), None, "stale entry for voxel 0 must be skipped");
        assert!(frontier.is_empty());
    }

    #[test]
    fn membership_tracks_push_and_pop() {
        let mut frontier = Frontier::with_capacity(2);
        assert!(!frontier.contains(VoxelId(1)));
        frontier.push(VoxelId(1), 0.5);
        assert!(frontier.contains(VoxelId(1)));
        frontier.pop();
        assert!(!frontier.contains(VoxelId(1)));
    }
}
