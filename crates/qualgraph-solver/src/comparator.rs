//! Structural equality and hashing of type graphs.
//!
//! Equality is co-inductive: a pair of nodes already under comparison
//! higher up the stack is assumed equal, which makes two cyclic graphs
//! equal when they unroll to the same infinite tree. Finished pairs keep
//! their answer for the comparator's lifetime; the graph is read-only while
//! it is borrowed.
//!
//! The hash is an additive fold over the tree obtained by unrolling the
//! graph up to [`HASH_UNROLL_DEPTH`] levels. It is not identity-memoised:
//! a node reachable along two paths contributes twice, exactly as it would
//! in an unshared copy. Consequently `equals(a, b)` implies
//! `hash(a) == hash(b)` for shared and unshared DAGs as well as for cyclic
//! graphs that are unrolled differently.

use crate::graph::TypeGraph;
use crate::recursion::{RecursionGuard, RecursionProfile, RecursionResult};
use crate::types::{NodeId, TypeData};
use qualgraph_common::limits::{HASH_UNROLL_DEPTH, STACK_GROW_SIZE, STACK_RED_ZONE};
use rustc_hash::{FxHashMap, FxHasher};
use std::hash::{Hash, Hasher};
use tracing::trace;

pub struct StructuralComparator<'g> {
    graph: &'g TypeGraph,
    guard: RecursionGuard<(NodeId, NodeId)>,
    visited: FxHashMap<(NodeId, NodeId), bool>,
}

impl<'g> StructuralComparator<'g> {
    pub fn new(graph: &'g TypeGraph) -> Self {
        Self {
            graph,
            guard: RecursionGuard::with_profile(RecursionProfile::StructuralEquality)
                .with_max_visiting(u32::MAX),
            visited: FxHashMap::default(),
        }
    }

    /// Structural equality of two optional graphs.
    ///
    /// Two absent graphs are equal; an absent and a present graph are not.
    pub fn equals(&mut self, a: Option<NodeId>, b: Option<NodeId>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => self.equal_nodes(a, b),
            _ => false,
        }
    }

    fn equal_nodes(&mut self, a: NodeId, b: NodeId) -> bool {
        if a == b {
            return true;
        }
        if let Some(&done) = self.visited.get(&(a, b)) {
            return done;
        }
        match self.guard.enter((a, b)) {
            RecursionResult::Entered => {
                let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
                    self.equal_uncached(a, b)
                });
                self.guard.leave((a, b));
                self.visited.insert((a, b), result);
                result
            }
            RecursionResult::Cycle => {
                trace!(a = %a, b = %b, "equality cycle, assuming equal");
                true
            }
            // The guard is unbounded; treat exhaustion as "no evidence of difference".
            RecursionResult::DepthExceeded | RecursionResult::IterationExceeded => true,
        }
    }

    fn equal_lists(&mut self, a: &[NodeId], b: &[NodeId]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| self.equal_nodes(x, y))
    }

    fn equal_uncached(&mut self, a: NodeId, b: NodeId) -> bool {
        let graph = self.graph;
        let (na, nb) = (graph.node(a), graph.node(b));
        if na.kind() != nb.kind() || na.base != nb.base || na.qualifiers != nb.qualifiers {
            return false;
        }
        match (&na.data, &nb.data) {
            (TypeData::Declared { type_args: x }, TypeData::Declared { type_args: y }) => {
                self.equal_lists(x, y)
            }
            (TypeData::Array { component: x }, TypeData::Array { component: y }) => {
                self.equal_nodes(*x, *y)
            }
            (
                TypeData::TypeVariable {
                    upper: ux,
                    lower: lx,
                    ..
                },
                TypeData::TypeVariable {
                    upper: uy,
                    lower: ly,
                    ..
                },
            ) => self.equals(*ux, *uy) && self.equals(*lx, *ly),
            (
                TypeData::Wildcard {
                    extends: ex,
                    super_bound: sx,
                },
                TypeData::Wildcard {
                    extends: ey,
                    super_bound: sy,
                },
            ) => self.equals(*ex, *ey) && self.equals(*sx, *sy),
            (TypeData::Union { alternatives: x }, TypeData::Union { alternatives: y })
            | (TypeData::Intersection { bounds: x }, TypeData::Intersection { bounds: y }) => {
                self.equal_lists(x, y)
            }
            (TypeData::Executable(x), TypeData::Executable(y)) => {
                self.equals(x.receiver, y.receiver)
                    && self.equal_lists(&x.params, &y.params)
                    && self.equal_lists(&x.thrown, &y.thrown)
                    && self.equal_nodes(x.return_type, y.return_type)
                    && self.equal_lists(&x.type_params, &y.type_params)
            }
            (TypeData::Primitive, TypeData::Primitive)
            | (TypeData::Null, TypeData::Null)
            | (TypeData::NoType, TypeData::NoType) => true,
            _ => false,
        }
    }
}

/// Structural equality of two optional graphs.
pub fn equals(graph: &TypeGraph, a: Option<NodeId>, b: Option<NodeId>) -> bool {
    StructuralComparator::new(graph).equals(a, b)
}

/// Structural hash of an optional graph; an absent graph hashes to 0.
pub fn hash(graph: &TypeGraph, root: Option<NodeId>) -> u64 {
    match root {
        Some(root) => StructuralHasher::new(graph).hash(root, 0),
        None => 0,
    }
}

struct StructuralHasher<'g> {
    graph: &'g TypeGraph,
    /// Sum of the unrolled subtree below (node, depth). Values are the same
    /// with or without this cache; it only avoids re-walking shared nodes.
    memo: FxHashMap<(NodeId, u32), u64>,
}

impl<'g> StructuralHasher<'g> {
    fn new(graph: &'g TypeGraph) -> Self {
        Self {
            graph,
            memo: FxHashMap::default(),
        }
    }

    fn node_hash(&self, id: NodeId) -> u64 {
        let graph = self.graph;
        let mut hasher = FxHasher::default();
        graph.qualifier_text(graph.qualifiers_of(id)).hash(&mut hasher);
        graph.base_name(graph.base(id)).hash(&mut hasher);
        hasher.finish()
    }

    fn hash(&mut self, id: NodeId, depth: u32) -> u64 {
        if depth >= HASH_UNROLL_DEPTH {
            return 0;
        }
        if let Some(&done) = self.memo.get(&(id, depth)) {
            return done;
        }
        let mut sum = self.node_hash(id);
        for child in self.graph.data(id).children() {
            let child_sum = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
                self.hash(child, depth + 1)
            });
            sum = sum.wrapping_add(child_sum);
        }
        self.memo.insert((id, depth), sum);
        sum
    }
}

#[cfg(test)]
#[path = "../tests/comparator_tests.rs"]
mod tests;
