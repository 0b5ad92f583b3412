// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Ready queue ordering nodes by declaration index.
//!
//! The traversal pushes a node once every incoming edge has delivered its value.
//! Popping always yields the ready node declared earliest in the graph document,
//! so ties between independently ready nodes break the same way on every run.
//!
//! # Example
//! ```rust
//! use boardwalk::engine::ready_queue::{ReadyNode, ReadyQueue};
//!
//! let mut queue = ReadyQueue::new();
//! queue.push(ReadyNode::new(2, "late".to_string()));
//! queue.push(ReadyNode::new(0, "early".to_string()));
//! queue.push(ReadyNode::new(1, "middle".to_string()));
//!
//! assert_eq!(queue.pop().map(|n| n.node_id), Some("early".to_string()));
//! assert_eq!(queue.pop().map(|n| n.node_id), Some("middle".to_string()));
//! assert_eq!(queue.pop().map(|n| n.node_id), Some("late".to_string()));
//! assert!(queue.pop().is_none());
//! ```

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A node whose inputs are complete.
#[derive(Debug, Clone)]
pub struct ReadyNode {
    /// Position of the node in `GraphDescriptor::nodes`
    pub declaration_index: usize,
    pub node_id: String,
}

impl ReadyNode {
    pub fn new(declaration_index: usize, node_id: String) -> Self {
        Self {
            declaration_index,
            node_id,
        }
    }
}

impl PartialEq for ReadyNode {
    fn eq(&self, other: &Self) -> bool {
        self.declaration_index == other.declaration_index
    }
}

impl Eq for ReadyNode {}

impl PartialOrd for ReadyNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ReadyNode {
    /// Reversed so the max-heap surfaces the lowest declaration index first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.declaration_index.cmp(&self.declaration_index)
    }
}

/// Min-queue of ready nodes keyed by declaration index.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    heap: BinaryHeap<ReadyNode>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    pub fn push(&mut self, node: ReadyNode) {
        self.heap.push(node);
    }

    /// Remove and return the earliest-declared ready node.
    pub fn pop(&mut self) -> Option<ReadyNode> {
        self.heap.pop()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_declaration_order_regardless_of_push_order() {
        let mut queue = ReadyQueue::new();
        for index in [5, 3, 9, 0, 4] {
            queue.push(ReadyNode::new(index, format!("n{}", index)));
        }

        let order: Vec<usize> = std::iter::from_fn(|| queue.pop())
            .map(|n| n.declaration_index)
            .collect();
        assert_eq!(order, vec![0, 3, 4, 5, 9]);
    }

    #[test]
    fn interleaved_pushes_keep_ordering() {
        let mut queue = ReadyQueue::new();
        queue.push(ReadyNode::new(4, "d".into()));
        queue.push(ReadyNode::new(2, "b".into()));
        assert_eq!(queue.pop().unwrap().node_id, "b");

        queue.push(ReadyNode::new(1, "a".into()));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop().unwrap().node_id, "a");
        assert_eq!(queue.pop().unwrap().node_id, "d");
        assert!(queue.is_empty());
    }
}
