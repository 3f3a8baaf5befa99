//! An array-backed binary min-heap used as the search frontier.
//!
//! Storage is 0-indexed: the children of `i` live at `2i + 1` and `2i + 2`,
//! and every parent compares less than or equal to its children.

use crate::error::{Result, SolverError};

/// A min-priority queue ordered by `T: Ord`.
///
/// Elements that compare equal may come out in any order; callers that need a
/// deterministic order among "equal" items should fold a tie-breaker into
/// their `Ord` implementation.
///
/// # Examples
/// ```
/// use npuzzle_solver::heap::MinHeap;
/// let mut heap = MinHeap::new();
/// heap.push(3);
/// heap.push(1);
/// heap.push(2);
/// assert_eq!(*heap.peek_min().unwrap(), 1);
/// assert_eq!(heap.pop_min().unwrap(), 1);
/// assert_eq!(heap.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct MinHeap<T> {
    items: Vec<T>,
}

impl<T: Ord> MinHeap<T> {
    /// Creates an empty heap.
    pub fn new() -> Self {
        MinHeap { items: Vec::new() }
    }

    /// Creates an empty heap with room for `capacity` items before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        MinHeap {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Number of items currently queued.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds an item, restoring the heap order by sifting it up.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    /// Returns the minimum item without removing it.
    ///
    /// # Errors
    /// `SolverError::EmptyQueue` if the heap holds no items.
    pub fn peek_min(&self) -> Result<&T> {
        self.items.first().ok_or(SolverError::EmptyQueue)
    }

    /// Removes and returns the minimum item.
    ///
    /// The root is swapped with the last slot, the last slot is removed, and
    /// the new root is sifted down.
    ///
    /// # Errors
    /// `SolverError::EmptyQueue` if the heap holds no items.
    pub fn pop_min(&mut self) -> Result<T> {
        if self.items.is_empty() {
            return Err(SolverError::EmptyQueue);
        }
        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let min = self.items.pop().ok_or(SolverError::EmptyQueue)?;
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        Ok(min)
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.items[index] < self.items[parent] {
                self.items.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            if left < len && self.items[left] < self.items[smallest] {
                smallest = left;
            }
            if right < len && self.items[right] < self.items[smallest] {
                smallest = right;
            }
            if smallest == index {
                break;
            }

            self.items.swap(index, smallest);
            index = smallest;
        }
    }
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}
