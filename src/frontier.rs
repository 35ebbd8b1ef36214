use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::{Coord, Cost};

/// Decides which of several frontier entries with equal estimated cost is expanded first.
///
/// Every policy ends in the insertion sequence number, so the order is total and a search
/// is fully deterministic for a given maze and policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TieBreak {
    /// First pushed, first popped.
    #[default]
    Insertion,
    /// Last pushed, first popped.
    Lifo,
    /// Lower cost-so-far first, then lexicographically smaller coordinate.
    LowestCost,
    /// Higher cost-so-far first (cells closer to the goal), then smaller coordinate.
    HighestCost,
}

type TieKey = (Cost, Coord, u64);

impl TieBreak {
    fn key(self, cost: Cost, coord: Coord, seq: u64) -> TieKey {
        match self {
            TieBreak::Insertion => (0, Coord::default(), seq),
            TieBreak::Lifo => (0, Coord::default(), u64::MAX - seq),
            TieBreak::LowestCost => (cost, coord, seq),
            TieBreak::HighestCost => (Cost::MAX - cost, coord, seq),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct FrontierEntry {
    pub estimated_cost: Cost,
    /// Cost-so-far at the time of the push; stale once the cell improves further.
    pub cost: Cost,
    pub index: usize,
    tie_key: TieKey,
}

impl Eq for FrontierEntry {}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap, so smaller keys must compare greater.
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| other.tie_key.cmp(&self.tie_key))
    }
}

/// Open list of the search. A cell may be pushed again whenever its cost improves; the
/// older entries stay in the heap and are recognised as stale when popped.
#[derive(Debug)]
pub(crate) struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    tie_break: TieBreak,
    next_seq: u64,
}

impl Frontier {
    pub fn new(tie_break: TieBreak) -> Frontier {
        Frontier {
            heap: BinaryHeap::new(),
            tie_break,
            next_seq: 0,
        }
    }

    pub fn push(&mut self, index: usize, coord: Coord, cost: Cost, estimated_cost: Cost) {
        let tie_key = self.tie_break.key(cost, coord, self.next_seq);
        self.next_seq += 1;
        self.heap.push(FrontierEntry {
            estimated_cost,
            cost,
            index,
            tie_key,
        });
    }

    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
