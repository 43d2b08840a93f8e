/*!
 * Ready Queue Entries
 * Keyed min-queue shared by the sorted policies
 */

use crate::core::types::Pid;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Ready-set entry ordered by key, then by admission sequence
#[derive(Debug, Clone, Copy)]
pub(super) struct Entry<K> {
    pub pid: Pid,
    pub key: K,
    seq: u64,
}

impl<K: Ord> PartialEq for Entry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: Ord> Eq for Entry<K> {}

impl<K: Ord> Ord for Entry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: smallest key, then earliest admission, on top
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<K: Ord> PartialOrd for Entry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-queue of pids; equal keys leave in admission order
#[derive(Debug, Clone)]
pub(super) struct KeyedQueue<K> {
    heap: BinaryHeap<Entry<K>>,
    next_seq: u64,
}

impl<K: Ord + Copy> KeyedQueue<K> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn push(&mut self, pid: Pid, key: K) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { pid, key, seq });
    }

    pub fn pop(&mut self) -> Option<Entry<K>> {
        self.heap.pop()
    }

    pub fn peek(&self) -> Option<&Entry<K>> {
        self.heap.peek()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
