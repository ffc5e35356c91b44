//! Visited-key guard shared by the graph walkers.
//!
//! A walker over a possibly cyclic graph enters a key (a `NodeId`, or a
//! tuple of them) before descending and leaves it afterwards. Re-entering a
//! key that is still on the stack reports a [`RecursionResult::Cycle`]; the
//! walker decides what a cycle means (equal, related, print the name).
//!
//! Keys are identities, never structural values.
//!
//! Depth and work budgets come from a [`RecursionProfile`]. Walkers that
//! cannot fail (equality) use an unbounded profile and rely on the visited
//! set alone.

use qualgraph_common::limits::DEFAULT_MAX_VISITING;
use rustc_hash::FxHashSet;
use std::hash::Hash;

/// Named depth / iteration budgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionProfile {
    /// (sub, super, position) triples of the subtype engine. Depth is
    /// unbounded (the walker grows its stack); iterations 10,000,000.
    SubtypeCheck,
    /// Node pairs of the structural comparator. Unbounded.
    StructuralEquality,
    /// Rendering for messages. Depth 64, iterations 100,000.
    Formatting,
    Unbounded,
    Custom { max_depth: u32, max_iterations: u32 },
}

impl RecursionProfile {
    pub const fn max_depth(self) -> u32 {
        match self {
            Self::Formatting => 64,
            Self::SubtypeCheck | Self::StructuralEquality | Self::Unbounded => u32::MAX,
            Self::Custom { max_depth, .. } => max_depth,
        }
    }

    pub const fn max_iterations(self) -> u32 {
        match self {
            Self::SubtypeCheck => 10_000_000,
            Self::Formatting => 100_000,
            Self::StructuralEquality | Self::Unbounded => u32::MAX,
            Self::Custom { max_iterations, .. } => max_iterations,
        }
    }
}

/// Outcome of [`RecursionGuard::enter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionResult {
    Entered,
    /// The key is already on the stack.
    Cycle,
    DepthExceeded,
    IterationExceeded,
}

impl RecursionResult {
    #[inline]
    pub fn is_entered(self) -> bool {
        self == Self::Entered
    }

    #[inline]
    pub fn is_cycle(self) -> bool {
        self == Self::Cycle
    }

    #[inline]
    pub fn is_exceeded(self) -> bool {
        matches!(self, Self::DepthExceeded | Self::IterationExceeded)
    }
}

/// Set of keys currently on the walk stack, plus budgets.
///
/// Every [`RecursionResult::Entered`] must be paired with one
/// [`leave`](Self::leave) of the same key. Debug builds panic when a guard is
/// dropped with keys still entered, or when an unknown key is left.
#[derive(Debug)]
pub struct RecursionGuard<K: Hash + Eq + Copy> {
    stack: FxHashSet<K>,
    depth: u32,
    iterations: u32,
    max_depth: u32,
    max_iterations: u32,
    max_visiting: u32,
    exceeded: bool,
}

impl<K: Hash + Eq + Copy> RecursionGuard<K> {
    pub fn new(max_depth: u32, max_iterations: u32) -> Self {
        Self {
            stack: FxHashSet::default(),
            depth: 0,
            iterations: 0,
            max_depth,
            max_iterations,
            max_visiting: DEFAULT_MAX_VISITING,
            exceeded: false,
        }
    }

    pub fn with_profile(profile: RecursionProfile) -> Self {
        Self::new(profile.max_depth(), profile.max_iterations())
    }

    /// Cap on simultaneously entered keys (default `DEFAULT_MAX_VISITING`).
    pub fn with_max_visiting(mut self, max_visiting: u32) -> Self {
        self.max_visiting = max_visiting;
        self
    }

    pub fn enter(&mut self, key: K) -> RecursionResult {
        self.iterations = self.iterations.saturating_add(1);
        let result = if self.iterations > self.max_iterations {
            RecursionResult::IterationExceeded
        } else if self.depth >= self.max_depth
            || self.stack.len() >= self.max_visiting as usize
        {
            RecursionResult::DepthExceeded
        } else if !self.stack.insert(key) {
            return RecursionResult::Cycle;
        } else {
            self.depth += 1;
            return RecursionResult::Entered;
        };
        self.exceeded = true;
        result
    }

    pub fn leave(&mut self, key: K) {
        let removed = self.stack.remove(&key);
        debug_assert!(removed, "RecursionGuard::leave without a matching enter");
        self.depth = self.depth.saturating_sub(1);
    }

    #[inline]
    pub fn is_visiting(&self, key: &K) -> bool {
        self.stack.contains(key)
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Enter attempts since construction or the last [`reset`](Self::reset).
    #[inline]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    #[inline]
    pub fn visiting_count(&self) -> usize {
        self.stack.len()
    }

    /// Whether any budget ran out; sticky until [`reset`](Self::reset).
    #[inline]
    pub fn is_exceeded(&self) -> bool {
        self.exceeded
    }

    /// Forget all keys and counters; budgets are kept.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.depth = 0;
        self.iterations = 0;
        self.exceeded = false;
    }
}

#[cfg(debug_assertions)]
impl<K: Hash + Eq + Copy> Drop for RecursionGuard<K> {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.stack.is_empty() {
            panic!(
                "RecursionGuard dropped with {} keys still entered",
                self.stack.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_budgets() {
        assert_eq!(RecursionProfile::SubtypeCheck.max_depth(), u32::MAX);
        assert_eq!(RecursionProfile::SubtypeCheck.max_iterations(), 10_000_000);
        assert_eq!(RecursionProfile::StructuralEquality.max_depth(), u32::MAX);
        assert_eq!(RecursionProfile::Formatting.max_depth(), 64);
        let custom = RecursionProfile::Custom {
            max_depth: 7,
            max_iterations: 42,
        };
        assert_eq!((custom.max_depth(), custom.max_iterations()), (7, 42));
    }

    #[test]
    fn enter_and_leave_track_depth() {
        let mut guard = RecursionGuard::<u32>::with_profile(RecursionProfile::SubtypeCheck);
        assert!(guard.enter(1).is_entered());
        assert!(guard.enter(2).is_entered());
        assert_eq!(guard.depth(), 2);
        assert!(guard.is_visiting(&1));
        guard.leave(2);
        guard.leave(1);
        assert_eq!(guard.depth(), 0);
        assert_eq!(guard.visiting_count(), 0);
    }

    #[test]
    fn reentering_a_pair_is_a_cycle() {
        let mut guard = RecursionGuard::<(u32, u32)>::with_profile(RecursionProfile::Unbounded);
        assert!(guard.enter((1, 2)).is_entered());
        assert!(guard.enter((1, 2)).is_cycle());
        // Pairs are ordered.
        assert!(guard.enter((2, 1)).is_entered());
        guard.leave((2, 1));
        guard.leave((1, 2));
        assert!(!guard.is_exceeded());
    }

    #[test]
    fn exceeding_depth_is_sticky_until_reset() {
        let mut guard = RecursionGuard::<u32>::new(1, 100);
        assert!(guard.enter(1).is_entered());
        assert_eq!(guard.enter(2), RecursionResult::DepthExceeded);
        guard.leave(1);
        assert!(guard.is_exceeded());
        guard.reset();
        assert!(!guard.is_exceeded());
        assert_eq!(guard.iterations(), 0);
    }

    #[test]
    fn iteration_budget() {
        let mut guard = RecursionGuard::<u32>::new(10, 2);
        for _ in 0..2 {
            assert!(guard.enter(1).is_entered());
            guard.leave(1);
        }
        assert_eq!(guard.enter(1), RecursionResult::IterationExceeded);
        assert_eq!(guard.iterations(), 3);
    }

    #[test]
    fn visiting_cap() {
        let mut guard = RecursionGuard::<u32>::new(100, 100).with_max_visiting(1);
        assert!(guard.enter(1).is_entered());
        assert!(guard.enter(2).is_exceeded());
        guard.leave(1);
    }
}
