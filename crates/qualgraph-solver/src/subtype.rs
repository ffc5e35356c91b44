//! Qualifier-aware subtype checking.
//!
//! `SubtypeChecker` decides whether one type graph is a subtype of another
//! under every active qualifier hierarchy. It dispatches on the pair of
//! node kinds in one explicit `match`; the per-kind rules live in
//! `subtype_rules/`. A pair the host type system never produces is a
//! contract violation and yields [`ContractError::UnexpectedCombination`].
//!
//! ## Positions
//!
//! How a pair is compared depends on where it sits:
//!
//! | Position | Qualifiers | Base types |
//! |----------|------------|------------|
//! | top level | configured mode (hierarchy subtype by default) | host relation |
//! | type argument | exact | identical |
//! | array component | exact | host relation |
//!
//! ## Cycles
//!
//! A (sub, super, position) triple already under comparison is assumed to
//! hold. Finished triples keep their result, so a node shared along many
//! paths is compared once. Both sets are scoped to one top-level call.

use crate::error::{ContractError, Result};
use crate::graph::TypeGraph;
use crate::hierarchy::QualifierHierarchy;
use crate::recursion::{RecursionGuard, RecursionProfile, RecursionResult};
use crate::types::{BaseType, NodeId, Qualifier, QualifierSet, TypeKind};
use qualgraph_common::limits::{STACK_GROW_SIZE, STACK_RED_ZONE};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{Level, debug, span, trace};

// =============================================================================
// Host capabilities and configuration
// =============================================================================

/// Host subtyping between base-type identities (class inheritance,
/// primitive widening, ...).
pub trait BaseTypeRelation: Send + Sync {
    fn is_base_subtype(&self, graph: &TypeGraph, sub: BaseType, sup: BaseType) -> bool;
}

/// Only identical base types are related.
#[derive(Clone, Copy, Debug, Default)]
pub struct NominalRelation;

impl BaseTypeRelation for NominalRelation {
    fn is_base_subtype(&self, _graph: &TypeGraph, sub: BaseType, sup: BaseType) -> bool {
        sub == sup
    }
}

/// How top-level qualifiers of declared types are compared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QualifierMatch {
    /// Hierarchy subtyping. A hierarchy missing on either side is compatible.
    #[default]
    Subtype,
    /// The qualifiers must be identical in every active hierarchy.
    Exact,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubtypeConfig {
    pub declared_qualifiers: QualifierMatch,
    pub profile: RecursionProfile,
}

impl Default for SubtypeConfig {
    fn default() -> Self {
        Self {
            declared_qualifiers: QualifierMatch::Subtype,
            profile: RecursionProfile::SubtypeCheck,
        }
    }
}

impl SubtypeConfig {
    /// Exact qualifier matching everywhere.
    pub fn strict() -> Self {
        Self {
            declared_qualifiers: QualifierMatch::Exact,
            ..Self::default()
        }
    }

    pub fn with_profile(mut self, profile: RecursionProfile) -> Self {
        self.profile = profile;
        self
    }
}

// =============================================================================
// Traversal state
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Position {
    Covariant,
    TypeArgument,
    ArrayComponent,
}

/// A node under comparison plus the node whose qualifiers stand for it.
///
/// Following a bound keeps the use site's qualifiers when it has any:
/// `@A T` compared through `T extends @B Object` is still `@A`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Operand {
    pub(crate) node: NodeId,
    pub(crate) quals_from: NodeId,
}

impl Operand {
    #[inline]
    pub(crate) fn of(node: NodeId) -> Self {
        Self {
            node,
            quals_from: node,
        }
    }
}

pub struct SubtypeChecker<'a, R: BaseTypeRelation = NominalRelation> {
    pub(crate) graph: &'a TypeGraph,
    pub(crate) hierarchy: &'a dyn QualifierHierarchy,
    pub(crate) relation: &'a R,
    pub(crate) config: SubtypeConfig,
    /// Hierarchies compared by the current call.
    pub(crate) tops: SmallVec<[Qualifier; 4]>,
    guard: RecursionGuard<(Operand, Operand, Position)>,
    visited: FxHashMap<(Operand, Operand, Position), bool>,
}

impl<'a> SubtypeChecker<'a, NominalRelation> {
    pub fn new(graph: &'a TypeGraph, hierarchy: &'a dyn QualifierHierarchy) -> Self {
        Self::with_relation(graph, hierarchy, &NominalRelation)
    }
}

impl<'a, R: BaseTypeRelation> SubtypeChecker<'a, R> {
    pub fn with_relation(
        graph: &'a TypeGraph,
        hierarchy: &'a dyn QualifierHierarchy,
        relation: &'a R,
    ) -> Self {
        let config = SubtypeConfig::default();
        Self {
            graph,
            hierarchy,
            relation,
            config,
            tops: SmallVec::new(),
            guard: RecursionGuard::with_profile(config.profile),
            visited: FxHashMap::default(),
        }
    }

    pub fn with_config(mut self, config: SubtypeConfig) -> Self {
        self.config = config;
        self.guard = RecursionGuard::with_profile(config.profile);
        self
    }

    #[inline]
    pub fn config(&self) -> SubtypeConfig {
        self.config
    }

    /// `sub <: sup` in every hierarchy of the checker's qualifier hierarchy.
    pub fn is_subtype(&mut self, sub: NodeId, sup: NodeId) -> Result<bool> {
        self.tops = self.hierarchy.tops().iter().copied().collect();
        self.run(sub, sup)
    }

    /// `sub <: sup`, comparing only qualifiers of the hierarchy rooted at `top`.
    pub fn is_subtype_in(&mut self, sub: NodeId, sup: NodeId, top: Qualifier) -> Result<bool> {
        if self.hierarchy.top_of(top) != Some(top) {
            return Err(ContractError::UnknownHierarchy {
                top: self.graph.qualifier_name(top).to_string(),
            });
        }
        self.tops = SmallVec::from_elem(top, 1);
        self.run(sub, sup)
    }

    fn run(&mut self, sub: NodeId, sup: NodeId) -> Result<bool> {
        let _span = span!(Level::DEBUG, "is_subtype", sub = sub.0, sup = sup.0).entered();
        self.guard.reset();
        self.visited.clear();
        let result = self.check(Operand::of(sub), Operand::of(sup), Position::Covariant);
        debug!(?result, "subtype check finished");
        result
    }

    // =========================================================================
    // Shared helpers for the rule modules
    // =========================================================================

    /// Recursive entry point used by every rule.
    pub(crate) fn check(&mut self, sub: Operand, sup: Operand, pos: Position) -> Result<bool> {
        if sub == sup {
            return Ok(true);
        }
        let key = (sub, sup, pos);
        if let Some(&done) = self.visited.get(&key) {
            return Ok(done);
        }
        match self.guard.enter(key) {
            RecursionResult::Entered => {
                let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
                    self.dispatch(sub, sup, pos)
                });
                self.guard.leave(key);
                if let Ok(related) = result {
                    self.visited.insert(key, related);
                }
                if let Ok(false) = result {
                    trace!(
                        sub = %self.graph.render(sub.node),
                        sup = %self.graph.render(sup.node),
                        ?pos,
                        "not a subtype"
                    );
                }
                result
            }
            RecursionResult::Cycle => {
                trace!(sub = sub.node.0, sup = sup.node.0, "subtype cycle, assuming related");
                Ok(true)
            }
            RecursionResult::DepthExceeded | RecursionResult::IterationExceeded => {
                Err(ContractError::RecursionLimit {
                    operation: "subtype check",
                    depth: self.guard.depth(),
                })
            }
        }
    }

    /// Operand for `bound`, reached from `owner`.
    pub(crate) fn step(&self, owner: Operand, bound: NodeId) -> Operand {
        let quals_from = if self.graph.qualifiers_of(owner.quals_from).is_empty() {
            bound
        } else {
            owner.quals_from
        };
        Operand {
            node: bound,
            quals_from,
        }
    }

    #[inline]
    pub(crate) fn quals(&self, op: Operand) -> &'a QualifierSet {
        self.graph.effective_qualifiers(op.quals_from)
    }

    pub(crate) fn mode(&self, pos: Position) -> QualifierMatch {
        match pos {
            Position::Covariant => self.config.declared_qualifiers,
            Position::TypeArgument | Position::ArrayComponent => QualifierMatch::Exact,
        }
    }

    /// Compare two qualifier sets in every active hierarchy.
    pub(crate) fn qualifiers_compatible(
        &self,
        sub: &QualifierSet,
        sup: &QualifierSet,
        mode: QualifierMatch,
    ) -> bool {
        self.tops.iter().all(|&top| {
            let a = self.hierarchy.find_in_hierarchy(sub, top);
            let b = self.hierarchy.find_in_hierarchy(sup, top);
            match mode {
                QualifierMatch::Exact => a == b,
                QualifierMatch::Subtype => match (a, b) {
                    (Some(a), Some(b)) => self.hierarchy.is_subtype(a, b),
                    _ => true,
                },
            }
        })
    }

    /// Qualifier comparison of two operands at `pos`.
    pub(crate) fn operand_qualifiers(&self, sub: Operand, sup: Operand, pos: Position) -> bool {
        self.qualifiers_compatible(self.quals(sub), self.quals(sup), self.mode(pos))
    }

    pub(crate) fn bases_related(&self, sub: BaseType, sup: BaseType, pos: Position) -> bool {
        match pos {
            Position::TypeArgument => sub == sup,
            Position::Covariant | Position::ArrayComponent => {
                sub == sup || self.relation.is_base_subtype(self.graph, sub, sup)
            }
        }
    }

    fn unexpected(&self, sub: NodeId, sup: NodeId) -> ContractError {
        ContractError::UnexpectedCombination {
            sub_kind: self.graph.kind(sub),
            sub: self.graph.render(sub),
            sup_kind: self.graph.kind(sup),
            sup: self.graph.render(sup),
        }
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    fn dispatch(&mut self, sub: Operand, sup: Operand, pos: Position) -> Result<bool> {
        use TypeKind::*;

        match (self.graph.kind(sub.node), self.graph.kind(sup.node)) {
            // Composite types first: they distribute over the other side.
            (Union, _) => self.check_union_subtype(sub, sup, pos),
            (_, Intersection) => self.check_intersection_supertype(sub, sup, pos),
            (_, Union) => self.check_union_supertype(sub, sup, pos),
            (Intersection, _) => self.check_intersection_subtype(sub, sup, pos),

            (Declared, Declared) => self.check_declared(sub, sup, pos),
            (Array, Array) => self.check_arrays(sub, sup),
            (Array, Declared) => Ok(self.operand_qualifiers(sub, sup, pos)),
            (Primitive, Primitive) => self.check_primitives(sub, sup, pos),
            // Boxing and unboxing only concern qualifiers.
            (Primitive, Declared) | (Declared, Primitive) => {
                Ok(self.operand_qualifiers(sub, sup, pos))
            }

            (Declared | Array | TypeVariable | Null, Wildcard) => {
                self.check_against_wildcard(sub, sup)
            }
            (Wildcard, Wildcard) => self.check_wildcards(sub, sup),
            (Wildcard, Declared) => self.check_wildcard_against_declared(sub, sup, pos),
            (Wildcard, TypeVariable | Array) => self.check_wildcard_bound(sub, sup, pos),

            (Declared | Array, TypeVariable) => self.check_against_type_variable(sub, sup, pos),
            (TypeVariable, TypeVariable) => self.check_type_variables(sub, sup, pos),
            (TypeVariable, Declared | Array | Primitive | Null) => {
                self.check_type_variable_bound(sub, sup, pos)
            }

            (Null, Null | Declared | Array) => Ok(self.operand_qualifiers(sub, sup, pos)),
            (Null, TypeVariable) => self.check_null_against_type_variable(sub, sup, pos),

            (Executable, Executable) => self.check_executables(sub, sup),
            (NoType, NoType) => Ok(self.operand_qualifiers(sub, sup, pos)),

            _ => Err(self.unexpected(sub.node, sup.node)),
        }
    }
}

/// `sub <: sup` under every hierarchy of `hierarchy`, with nominal base types.
pub fn is_subtype(
    graph: &TypeGraph,
    hierarchy: &dyn QualifierHierarchy,
    sub: NodeId,
    sup: NodeId,
) -> Result<bool> {
    SubtypeChecker::new(graph, hierarchy).is_subtype(sub, sup)
}

/// `sub <: sup` in the hierarchy rooted at `top`, with nominal base types.
pub fn is_subtype_in(
    graph: &TypeGraph,
    hierarchy: &dyn QualifierHierarchy,
    sub: NodeId,
    sup: NodeId,
    top: Qualifier,
) -> Result<bool> {
    SubtypeChecker::new(graph, hierarchy).is_subtype_in(sub, sup, top)
}

#[cfg(test)]
#[path = "../tests/subtype_tests.rs"]
mod tests;
