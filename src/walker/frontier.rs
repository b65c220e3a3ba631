//! FIFO frontier of sitemap references
//!
//! References are appended at the tail and taken from the head. Nothing is
//! deduplicated: a sitemap listed by two indexes is fetched twice.

use std::collections::VecDeque;

/// Queue of sitemap references that have not been fetched yet
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    queue: VecDeque<String>,
}

impl Frontier {
    /// Creates a frontier seeded with the given references, in order
    pub fn new<I>(seeds: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            queue: seeds.into_iter().collect(),
        }
    }

    /// Takes the earliest enqueued reference
    pub fn pop(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    /// Appends a single reference at the tail
    pub fn push(&mut self, reference: String) {
        self.queue.push_back(reference);
    }

    /// Appends references at the tail, preserving their order
    pub fn extend<I>(&mut self, references: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.queue.extend(references);
    }

    /// Number of references waiting
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if nothing is left to fetch
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
