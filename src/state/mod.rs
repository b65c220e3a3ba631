//! State management for a sitemap walk
//!
//! This module contains the traversal state record that replaces ambient
//! accumulators: frontier, URL buffer, and counters in one owned value.

mod traversal;

pub use traversal::TraversalState;
