//! The open set: cells discovered but not yet expanded.
//!
//! Backed by a binary heap with lazy deletion. Removing a cell only forgets
//! its live snapshot; the heap copy is dropped when it reaches the top.
//! Every public query sees live entries only.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use gridstar_core::Cell;

use crate::config::TieBreak;
use crate::node::NodeState;

/// Snapshot of a node taken when it was (re)inserted into the frontier.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrontierEntry {
    pub cell: Cell,
    pub f: f64,
    pub h: f64,
    pub g_infinite: bool,
    /// Insertion sequence number, unique within one frontier.
    pub seq: u64,
}

impl FrontierEntry {
    /// Ascending priority: the entry that should be popped first is `Less`.
    fn priority_cmp(&self, other: &Self, tie: TieBreak) -> Ordering {
        match (self.g_infinite, other.g_infinite) {
            (false, true) => return Ordering::Less,
            (true, false) => return Ordering::Greater,
            (true, true) => return self.seq.cmp(&other.seq),
            (false, false) => {}
        }
        let by_f = self.f.total_cmp(&other.f);
        let by_h = match tie {
            TieBreak::Fifo => Ordering::Equal,
            TieBreak::LowerHeuristic => self.h.total_cmp(&other.h),
        };
        by_f.then(by_h).then(self.seq.cmp(&other.seq))
    }
}

/// Heap slot, ordered so that `BinaryHeap` (a max-heap) pops the best entry.
#[derive(Clone, Copy, Debug)]
struct Slot {
    entry: FrontierEntry,
    tie: TieBreak,
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Slot {}

impl Ord for Slot {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so the max-heap yields the lowest priority key first.
        other.entry.priority_cmp(&self.entry, self.tie)
    }
}

impl PartialOrd for Slot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue of cells keyed by f-value.
///
/// Entries whose `g` is infinite always come after every finite entry.
/// Equal f-values are resolved by the frontier's [`TieBreak`].
#[derive(Clone, Debug)]
pub struct Frontier {
    heap: BinaryHeap<Slot>,
    live: HashMap<Cell, FrontierEntry>,
    tie: TieBreak,
    next_seq: u64,
    peak: usize,
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new(TieBreak::default())
    }
}

impl Frontier {
    pub fn new(tie: TieBreak) -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: HashMap::new(),
            tie,
            next_seq: 0,
            peak: 0,
        }
    }

    /// Insert a snapshot of `state` for `cell`, replacing any live snapshot
    /// of the same cell.
    pub fn insert(&mut self, cell: Cell, state: &NodeState) -> FrontierEntry {
        let entry = FrontierEntry {
            cell,
            f: state.f(),
            h: state.h(),
            g_infinite: state.is_g_infinite(),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.live.insert(cell, entry);
        self.heap.push(Slot {
            entry,
            tie: self.tie,
        });
        self.peak = self.peak.max(self.live.len());
        entry
    }

    /// Remove the live snapshot of `cell`, if any.
    pub fn remove(&mut self, cell: Cell) -> Option<FrontierEntry> {
        self.live.remove(&cell)
    }

    /// Remove and return the entry with the lowest priority key.
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        while let Some(Slot { entry, .. }) = self.heap.pop() {
            if self.live.get(&entry.cell).is_some_and(|e| e.seq == entry.seq) {
                self.live.remove(&entry.cell);
                return Some(entry);
            }
            // Superseded or removed snapshot.
        }
        None
    }

    /// Live minimum without removing it. Superseded snapshots found on top
    /// of the heap are discarded on the way.
    pub fn peek(&mut self) -> Option<&FrontierEntry> {
        loop {
            let stale = match self.heap.peek() {
                Some(Slot { entry, .. }) => !self
                    .live
                    .get(&entry.cell)
                    .is_some_and(|e| e.seq == entry.seq),
                None => return None,
            };
            if !stale {
                break;
            }
            self.heap.pop();
        }
        self.heap.peek().map(|slot| &slot.entry)
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.live.contains_key(&cell)
    }

    /// Live snapshot of `cell`.
    pub fn get(&self, cell: Cell) -> Option<&FrontierEntry> {
        self.live.get(&cell)
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Largest number of live entries held at once.
    pub fn peak_len(&self) -> usize {
        self.peak
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie
    }
}
