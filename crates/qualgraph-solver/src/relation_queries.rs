//! Unified relation query entrypoints.
//!
//! One API over the relation engines so callers holding optional graphs
//! (extraction may fail to produce one) don't wire checkers directly.

use crate::comparator::StructuralComparator;
use crate::error::Result;
use crate::graph::TypeGraph;
use crate::hierarchy::QualifierHierarchy;
use crate::subtype::{BaseTypeRelation, NominalRelation, SubtypeChecker, SubtypeConfig};
use crate::types::{NodeId, Qualifier};

/// Relation categories supported by the unified query API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// Subtyping in every hierarchy.
    Subtype,
    /// Subtyping in the hierarchy rooted at the given top.
    SubtypeIn(Qualifier),
    /// Mutual subtyping.
    Equivalent,
    /// Structural equality; needs no hierarchy and accepts absent graphs.
    StructurallyEqual,
}

/// Result of a relation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationResult {
    pub kind: RelationKind,
    pub related: bool,
}

impl RelationResult {
    #[inline]
    pub fn is_related(self) -> bool {
        self.related
    }
}

/// Query a relation with nominal base types and the default configuration.
pub fn query_relation(
    graph: &TypeGraph,
    hierarchy: &dyn QualifierHierarchy,
    sub: Option<NodeId>,
    sup: Option<NodeId>,
    kind: RelationKind,
) -> Result<RelationResult> {
    query_relation_with_relation(
        graph,
        hierarchy,
        &NominalRelation,
        SubtypeConfig::default(),
        sub,
        sup,
        kind,
    )
}

/// Query a relation using a custom base-type relation and configuration.
pub fn query_relation_with_relation<R: BaseTypeRelation>(
    graph: &TypeGraph,
    hierarchy: &dyn QualifierHierarchy,
    relation: &R,
    config: SubtypeConfig,
    sub: Option<NodeId>,
    sup: Option<NodeId>,
    kind: RelationKind,
) -> Result<RelationResult> {
    let related = match kind {
        RelationKind::StructurallyEqual => StructuralComparator::new(graph).equals(sub, sup),
        RelationKind::Subtype | RelationKind::SubtypeIn(_) | RelationKind::Equivalent => {
            let sub = graph.require(sub, "subtype operand")?;
            let sup = graph.require(sup, "supertype operand")?;
            let mut checker =
                SubtypeChecker::with_relation(graph, hierarchy, relation).with_config(config);
            match kind {
                RelationKind::SubtypeIn(top) => checker.is_subtype_in(sub, sup, top)?,
                RelationKind::Equivalent => {
                    checker.is_subtype(sub, sup)? && checker.is_subtype(sup, sub)?
                }
                _ => checker.is_subtype(sub, sup)?,
            }
        }
    };
    Ok(RelationResult { kind, related })
}

#[cfg(test)]
#[path = "../tests/relation_queries_tests.rs"]
mod tests;
