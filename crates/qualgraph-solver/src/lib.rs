//! Structural algorithms over qualifier-annotated type graphs.
//!
//! A type is a possibly cyclic graph of nodes stored in a [`TypeGraph`]
//! arena, each node carrying a base-type identity and a set of pluggable
//! qualifiers. The crate provides:
//!
//! - **Copy**: cycle- and alias-preserving deep copy ([`copier`])
//! - **Equality and hashing**: co-inductive structural comparison ([`comparator`])
//! - **Subtyping**: multi-hierarchy, position-aware subtype checks ([`subtype`])
//! - **Substitution**: type-parameter replacement built on the copier ([`substitute`])
//!
//! Qualifier meaning is supplied by a [`QualifierHierarchy`]; base-type
//! subtyping by a [`BaseTypeRelation`]. Neither is built in.
pub mod comparator;
pub mod copier;
pub mod error;
pub mod format;
pub mod graph;
pub mod hierarchy;
pub mod recursion;
pub mod relation_queries;
pub mod substitute;
pub mod subtype;
mod subtype_rules;
pub mod types;

pub use comparator::{StructuralComparator, equals, hash};
pub use copier::{CopyHooks, GraphCopier, StructuralCopy, copy, copy_without_qualifiers};
pub use error::{ContractError, Result};
pub use format::TypeFormatter;
pub use graph::{ExecutableParts, TypeGraph};
pub use hierarchy::{
    AcceptAllHierarchy, GraphQualifierHierarchy, GraphQualifierHierarchyBuilder,
    QualifierHierarchy,
};
pub use relation_queries::{
    RelationKind, RelationResult, query_relation, query_relation_with_relation,
};
pub use substitute::{Substitutor, TypeSubstitution, substitute};
pub use subtype::{
    BaseTypeRelation, NominalRelation, QualifierMatch, SubtypeChecker, SubtypeConfig, is_subtype,
    is_subtype_in,
};
pub use types::{
    BaseType, ElementRef, ExecutableShape, NodeFlags, NodeId, Qualifier, QualifierSet, TypeData,
    TypeKind, TypeNode,
};

#[cfg(test)]
#[path = "../tests/test_fixtures.rs"]
pub(crate) mod test_fixtures;
