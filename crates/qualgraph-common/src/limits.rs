//! Centralized limits and thresholds for graph traversals.
//!
//! Type graphs may be cyclic, so termination comes from identity-keyed
//! visited sets, not from depth limits. The constants here cover the
//! remaining concerns: stack growth for deep acyclic graphs, the unroll
//! depth of the structural hash, and the bound-chain walk used to compute
//! effective qualifiers.
//!
//! # Solver recursion limits
//!
//! Per-operation recursion limits live in
//! `qualgraph_solver::recursion::RecursionProfile` rather than here. The
//! profiles are the single source of truth for solver recursion.

// =============================================================================
// Stack growth
// =============================================================================

/// Remaining stack (in bytes) below which a recursive walker grows the stack.
///
/// Every recursive graph walk wraps its per-node step in
/// `stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, ..)`. Recursion depth
/// equals the acyclic depth of the graph, which is unbounded for generated
/// types such as `List<List<List<...>>>`.
pub const STACK_RED_ZONE: usize = 64 * 1024;

/// Size (in bytes) of each new stack segment allocated by `stacker`.
pub const STACK_GROW_SIZE: usize = 1024 * 1024;

// =============================================================================
// Structural hash
// =============================================================================

/// Depth at which the structural hash stops unrolling a graph.
///
/// The hash folds every node on every path from the root, so a cyclic graph
/// is an infinite tree. Truncating at a fixed depth makes the hash finite
/// and gives co-inductively equal graphs the same hash.
///
/// # Example
///
/// ```text
/// // T extends Comparable<T>   (one node, cycle of length 2)
/// // T' extends Comparable<T''>, T'' extends Comparable<T''>
/// // Both unroll to the same infinite tree: equal, and equal hashes.
/// ```
pub const HASH_UNROLL_DEPTH: u32 = 8;

// =============================================================================
// Effective qualifiers
// =============================================================================

/// Maximum number of bound links followed when looking up the effective
/// qualifiers of an unqualified type variable or wildcard.
///
/// The walk also stops on any node it has already seen, so this only caps
/// pathological acyclic chains such as `T1 extends T2 extends ... extends Tn`.
pub const MAX_EFFECTIVE_QUALIFIER_CHAIN: u32 = 256;

// =============================================================================
// Visited sets
// =============================================================================

/// Default cap on the number of keys simultaneously held in a recursion
/// guard's visiting set.
pub const DEFAULT_MAX_VISITING: u32 = 1_000_000;
