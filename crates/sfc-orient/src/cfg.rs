//! Crate-wide limits and defaults (internal).
//!
//! Policy
//! - Fixed constants; the per-call knobs live in `TraverseCfg` and `ClosureCfg`.

/// Largest dimension accepted anywhere. The base path has 2^D − 1 entries and
/// corners are stored as `u32` bit vectors.
pub const MAX_DIMENSION: u32 = 16;

/// Node budget for the exact phase of the closure search. The greedy incumbent
/// is returned unproven once this many nodes have been expanded.
pub const DEFAULT_NODE_BUDGET: u64 = 2_000_000;
