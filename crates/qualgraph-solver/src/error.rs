//! Internal-contract errors.
//!
//! A `ContractError` means a caller broke a precondition of the engine: it
//! handed over a missing graph, asked about a kind combination the host type
//! system never produces, or passed a node of the wrong kind. The current
//! operation is aborted; nothing is retried and no diagnostic is emitted.
//! Callers translate these into their own reporting.

use crate::types::TypeKind;
use thiserror::Error;

/// Result alias used throughout the solver.
pub type Result<T, E = ContractError> = std::result::Result<T, E>;

/// Violated precondition of a graph operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// The subtype engine has no rule for this pair of kinds.
    #[error("unexpected subtype combination: {sub_kind} `{sub}` <: {sup_kind} `{sup}`")]
    UnexpectedCombination {
        sub_kind: TypeKind,
        sub: String,
        sup_kind: TypeKind,
        sup: String,
    },

    /// A required graph was absent.
    #[error("missing type graph: {context}")]
    MissingGraph { context: &'static str },

    /// An executable node was required.
    #[error("expected an executable type but found {kind} `{rendered}`")]
    ExpectedExecutable { kind: TypeKind, rendered: String },

    /// A non-executable node was required.
    #[error("expected a non-executable type but found executable `{rendered}`")]
    UnexpectedExecutable { rendered: String },

    /// A builder or setter was applied to a node of another kind.
    #[error("expected a {expected} node but found {found} `{rendered}`")]
    KindMismatch {
        expected: TypeKind,
        found: TypeKind,
        rendered: String,
    },

    /// Type parameters and type arguments of a substitution do not line up.
    #[error("expected {expected} type arguments but found {found}")]
    ArityMismatch { expected: usize, found: usize },

    /// `is_subtype_in` was given a qualifier that is not a top of the hierarchy.
    #[error("`{top}` is not a top qualifier of the active hierarchy")]
    UnknownHierarchy { top: String },

    /// A qualifier hierarchy definition is malformed.
    #[error("invalid qualifier hierarchy: {reason}")]
    InvalidHierarchy { reason: String },

    /// A recursion profile's depth or iteration budget ran out.
    #[error("{operation} exceeded its recursion budget at depth {depth}")]
    RecursionLimit { operation: &'static str, depth: u32 },
}
