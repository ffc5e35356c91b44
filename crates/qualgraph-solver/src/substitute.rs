//! Type-parameter substitution.
//!
//! Substitution is a copy in which uses of mapped type variables are
//! replaced by their arguments. It runs the [`GraphCopier`] walk with
//! [`Substitutor`] hooks, so cycles and sharing in the original are
//! preserved exactly as in a plain copy.
//!
//! - A mapped use becomes a shallow copy of its argument: a fresh node whose
//!   children are the argument's own children. Qualifiers written at the use
//!   site replace the argument's; otherwise the argument's are kept.
//! - An executable's own type-parameter declarations are copied, never
//!   replaced, even when the mapping names them.
//!
//! Neither the original graph nor the arguments are modified.

use crate::copier::{CopyHooks, GraphCopier};
use crate::error::{ContractError, Result};
use crate::graph::TypeGraph;
use crate::types::{BaseType, NodeId, TypeKind};
use rustc_hash::FxHashMap;
use tracing::trace;

/// Mapping from type-parameter identity to argument graph.
#[derive(Clone, Debug, Default)]
pub struct TypeSubstitution {
    map: FxHashMap<BaseType, NodeId>,
}

impl TypeSubstitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair type-variable declarations with arguments, positionally.
    pub fn from_args(graph: &TypeGraph, params: &[NodeId], args: &[NodeId]) -> Result<Self> {
        if params.len() != args.len() {
            return Err(ContractError::ArityMismatch {
                expected: params.len(),
                found: args.len(),
            });
        }
        let mut substitution = Self::new();
        for (&param, &arg) in params.iter().zip(args) {
            if graph.kind(param) != TypeKind::TypeVariable {
                return Err(ContractError::KindMismatch {
                    expected: TypeKind::TypeVariable,
                    found: graph.kind(param),
                    rendered: graph.render(param),
                });
            }
            substitution.insert(graph.base(param), arg);
        }
        Ok(substitution)
    }

    pub fn insert(&mut self, param: BaseType, arg: NodeId) {
        self.map.insert(param, arg);
    }

    pub fn get(&self, param: BaseType) -> Option<NodeId> {
        self.map.get(&param).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Copier hooks that replace mapped type-variable uses.
pub struct Substitutor<'m> {
    mapping: &'m TypeSubstitution,
    /// Set while an executable's own type parameter is about to be visited.
    /// The next type-variable visit consumes it, so it never reaches bounds.
    own_parameter_pending: bool,
}

impl<'m> Substitutor<'m> {
    pub fn new(mapping: &'m TypeSubstitution) -> Self {
        Self {
            mapping,
            own_parameter_pending: false,
        }
    }
}

impl CopyHooks for Substitutor<'_> {
    fn visit_type_variable(copier: &mut GraphCopier<'_, Self>, original: NodeId) -> NodeId {
        let own_parameter = std::mem::take(&mut copier.hooks_mut().own_parameter_pending);
        let argument = if own_parameter {
            None
        } else {
            copier.hooks().mapping.get(copier.graph().base(original))
        };
        let Some(argument) = argument else {
            return copier.copy_type_variable_structurally(original);
        };

        let use_site = copier.graph().qualifiers_of(original).clone();
        let graph = copier.graph_mut();
        let replacement = graph.shallow_copy(argument);
        if !use_site.is_empty() {
            *graph.qualifiers_mut(replacement) = use_site;
        }
        copier.record(original, replacement);
        trace!(
            variable = original.0,
            argument = argument.0,
            replacement = replacement.0,
            "substituted type variable"
        );
        replacement
    }

    fn before_own_type_parameter(&mut self) {
        self.own_parameter_pending = true;
    }

    fn after_own_type_parameter(&mut self) {
        self.own_parameter_pending = false;
    }
}

/// Copy of `root` with every mapped type-variable use replaced.
pub fn substitute(graph: &mut TypeGraph, mapping: &TypeSubstitution, root: NodeId) -> NodeId {
    GraphCopier::with_hooks(graph, Substitutor::new(mapping)).copy(root)
}

#[cfg(test)]
#[path = "../tests/substitute_tests.rs"]
mod tests;
