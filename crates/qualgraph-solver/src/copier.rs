//! Cycle- and alias-preserving deep copy of type graphs.
//!
//! [`GraphCopier`] walks a graph once, allocating one new node per distinct
//! original node. An identity memo (original `NodeId` to copy) is filled
//! before a node's children are visited, so:
//! - a cycle in the original closes onto the copy under construction;
//! - a node reachable along two paths is copied once and shared in the copy.
//!
//! The memo lives for one `GraphCopier`, so two copies of the same graph are
//! structurally equal but share no nodes.
//!
//! The walk is parameterised by [`CopyHooks`]. The default
//! [`StructuralCopy`] copies everything; the substitutor overrides the
//! type-variable step.

use crate::graph::TypeGraph;
use crate::types::{ExecutableShape, NodeId, NodeList, TypeData, TypeKind};
use qualgraph_common::limits::{STACK_GROW_SIZE, STACK_RED_ZONE};
use rustc_hash::FxHashMap;

/// Customisation points of a [`GraphCopier`] walk.
pub trait CopyHooks: Sized {
    /// Produce the copy of a type-variable node.
    ///
    /// Implementations either return a node of their own (and record it with
    /// [`GraphCopier::record`]) or fall back to
    /// [`GraphCopier::copy_type_variable_structurally`].
    fn visit_type_variable(copier: &mut GraphCopier<'_, Self>, original: NodeId) -> NodeId {
        copier.copy_type_variable_structurally(original)
    }

    /// Called right before an executable's own type parameter is visited.
    fn before_own_type_parameter(&mut self) {}

    /// Called right after an executable's own type parameter was visited,
    /// including when the visit was answered from the memo.
    fn after_own_type_parameter(&mut self) {}
}

/// Plain structural copy.
#[derive(Clone, Copy, Debug, Default)]
pub struct StructuralCopy;

impl CopyHooks for StructuralCopy {}

pub struct GraphCopier<'g, H: CopyHooks = StructuralCopy> {
    graph: &'g mut TypeGraph,
    memo: FxHashMap<NodeId, NodeId>,
    copy_qualifiers: bool,
    hooks: H,
}

impl<'g> GraphCopier<'g, StructuralCopy> {
    pub fn new(graph: &'g mut TypeGraph) -> Self {
        Self::with_hooks(graph, StructuralCopy)
    }

    /// A copier whose output carries no primary qualifiers.
    pub fn without_qualifiers(graph: &'g mut TypeGraph) -> Self {
        let mut copier = Self::new(graph);
        copier.copy_qualifiers = false;
        copier
    }
}

impl<'g, H: CopyHooks> GraphCopier<'g, H> {
    pub fn with_hooks(graph: &'g mut TypeGraph, hooks: H) -> Self {
        Self {
            graph,
            memo: FxHashMap::default(),
            copy_qualifiers: true,
            hooks,
        }
    }

    #[inline]
    pub fn graph(&self) -> &TypeGraph {
        &*self.graph
    }

    #[inline]
    pub(crate) fn graph_mut(&mut self) -> &mut TypeGraph {
        &mut *self.graph
    }

    #[inline]
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    #[inline]
    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Number of distinct originals copied so far.
    #[inline]
    pub fn copied_count(&self) -> usize {
        self.memo.len()
    }

    /// Register `copy` as the image of `original` for the rest of the walk.
    pub fn record(&mut self, original: NodeId, copy: NodeId) {
        self.memo.insert(original, copy);
    }

    /// Copy `original`, reusing the copy already made in this walk if any.
    pub fn copy(&mut self, original: NodeId) -> NodeId {
        if let Some(&done) = self.memo.get(&original) {
            return done;
        }
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            match self.graph.kind(original) {
                TypeKind::TypeVariable => H::visit_type_variable(self, original),
                _ => self.copy_structurally(original),
            }
        })
    }

    /// Default type-variable step: fresh node, bounds copied.
    pub fn copy_type_variable_structurally(&mut self, original: NodeId) -> NodeId {
        self.copy_structurally(original)
    }

    fn copy_opt(&mut self, original: Option<NodeId>) -> Option<NodeId> {
        original.map(|id| self.copy(id))
    }

    fn copy_list(&mut self, originals: &[NodeId]) -> NodeList {
        originals.iter().map(|&id| self.copy(id)).collect()
    }

    /// Allocate the copy with its original's children and record it, so that
    /// cycles back to `original` resolve to it.
    fn shell(&mut self, original: NodeId) -> NodeId {
        let copy = self.graph.shallow_copy(original);
        if !self.copy_qualifiers {
            self.graph.qualifiers_mut(copy).clear();
        }
        self.record(original, copy);
        copy
    }

    fn copy_structurally(&mut self, original: NodeId) -> NodeId {
        let copy = self.shell(original);
        let data = match self.graph.data(original).clone() {
            TypeData::Declared { type_args } => TypeData::Declared {
                type_args: self.copy_list(&type_args),
            },
            TypeData::Array { component } => TypeData::Array {
                component: self.copy(component),
            },
            TypeData::TypeVariable {
                upper,
                lower,
                captured_from,
            } => TypeData::TypeVariable {
                upper: self.copy_opt(upper),
                lower: self.copy_opt(lower),
                captured_from,
            },
            TypeData::Wildcard {
                extends,
                super_bound,
            } => TypeData::Wildcard {
                extends: self.copy_opt(extends),
                super_bound: self.copy_opt(super_bound),
            },
            TypeData::Union { alternatives } => TypeData::Union {
                alternatives: self.copy_list(&alternatives),
            },
            TypeData::Intersection { bounds } => TypeData::Intersection {
                bounds: self.copy_list(&bounds),
            },
            TypeData::Executable(shape) => TypeData::Executable(Box::new(self.copy_shape(&shape))),
            TypeData::Primitive | TypeData::Null | TypeData::NoType => return copy,
        };
        *self.graph.data_mut(copy) = data;
        copy
    }

    /// Own type parameters go first so that their uses in the signature
    /// resolve to the same copies.
    fn copy_shape(&mut self, shape: &ExecutableShape) -> ExecutableShape {
        let mut type_params = NodeList::new();
        for &param in &shape.type_params {
            self.hooks.before_own_type_parameter();
            type_params.push(self.copy(param));
            self.hooks.after_own_type_parameter();
        }
        ExecutableShape {
            element: shape.element,
            receiver: self.copy_opt(shape.receiver),
            params: self.copy_list(&shape.params),
            thrown: self.copy_list(&shape.thrown),
            return_type: self.copy(shape.return_type),
            type_params,
        }
    }
}

/// Deep copy of `root` into the same arena.
pub fn copy(graph: &mut TypeGraph, root: NodeId) -> NodeId {
    GraphCopier::new(graph).copy(root)
}

/// Deep copy of `root` with every primary qualifier dropped.
pub fn copy_without_qualifiers(graph: &mut TypeGraph, root: NodeId) -> NodeId {
    GraphCopier::without_qualifiers(graph).copy(root)
}

#[cfg(test)]
#[path = "../tests/copier_tests.rs"]
mod tests;
