//! The open set of the search: a binary heap ordered by estimated total cost, paired with a
//! membership set so that "is this cell already queued" is answered without scanning the heap.
use fxhash::FxHashSet;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct FrontierEntry {
    f_score: f64,
    sequence: u64,
    index: usize,
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
        // Reversed for the max-heap: smallest f-score first, then the earliest insertion
        other
            .f_score
            .total_cmp(&self.f_score)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Priority queue of cell indices keyed by `(f_score, sequence)`. Sequence numbers are handed
/// out by the frontier itself and never reused, so equal f-scores pop in insertion order.
#[derive(Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    members: FxHashSet<usize>,
    next_sequence: u64,
}

impl Frontier {
    pub fn new() -> Frontier {
        Frontier::default()
    }
    /// Queues a cell and returns the sequence number it was given.
    pub fn push(&mut self, index: usize, f_score: f64) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        debug_assert!(
            !self.members.contains(&index),
            "cell {index} pushed while already queued"
        );
        self.heap.push(FrontierEntry {
            f_score,
            sequence,
            index,
        });
        self.members.insert(index);
        sequence
    }
    /// Removes the entry with the smallest key.
    pub fn pop(&mut self) -> Option<usize> {
        let FrontierEntry { index, .. } = self.heap.pop()?;
        self.members.remove(&index);
        Some(index)
    }
    pub fn contains(&self, index: usize) -> bool {
        self.members.contains(&index)
    }
    pub fn len(&self) -> usize {
        self.heap.len()
    }
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
