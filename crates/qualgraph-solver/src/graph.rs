//! Type graph arena.
//!
//! `TypeGraph` owns every node and the name interner. Producers build graphs
//! with the builder methods; cycles are closed afterwards with the setters
//! (`set_upper_bound`, `set_type_arguments`, ...) on nodes they allocated.
//!
//! Readers (subtype checks, equality, hashing) borrow the graph immutably.
//! Producing operations (copy, substitution) borrow it mutably and only
//! ever append nodes, so an existing `NodeId` keeps describing the same type
//! for the lifetime of the graph.

use crate::error::{ContractError, Result};
use crate::format::TypeFormatter;
use crate::types::{
    BaseType, ElementRef, ExecutableShape, NodeFlags, NodeId, Qualifier, QualifierSet, TypeData,
    TypeKind, TypeNode,
};
use qualgraph_common::interner::{Atom, Interner};
use qualgraph_common::limits::MAX_EFFECTIVE_QUALIFIER_CHAIN;
use rustc_hash::FxHashSet;

/// Children of an executable, used to build one.
#[derive(Clone, Debug)]
pub struct ExecutableParts {
    pub element: ElementRef,
    pub receiver: Option<NodeId>,
    pub params: Vec<NodeId>,
    pub thrown: Vec<NodeId>,
    pub return_type: NodeId,
    pub type_params: Vec<NodeId>,
}

/// Arena of type nodes plus the interner for their names.
#[derive(Clone, Debug, Default)]
pub struct TypeGraph {
    nodes: Vec<TypeNode>,
    interner: Interner,
}

impl TypeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes ever allocated in this graph.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // -----------------------------------------------------------------------
    // Names
    // -----------------------------------------------------------------------

    pub fn intern(&mut self, name: &str) -> Atom {
        self.interner.intern(name)
    }

    pub fn resolve(&self, atom: Atom) -> &str {
        self.interner.resolve(atom)
    }

    pub fn base_type(&mut self, name: &str) -> BaseType {
        BaseType(self.intern(name))
    }

    pub fn qualifier(&mut self, name: &str) -> Qualifier {
        Qualifier(self.intern(name))
    }

    /// Intern a list of qualifier names into a set.
    pub fn qualifiers(&mut self, names: &[&str]) -> QualifierSet {
        names.iter().map(|name| self.qualifier(name)).collect()
    }

    pub fn base_name(&self, base: BaseType) -> &str {
        self.resolve(base.0)
    }

    pub fn qualifier_name(&self, qualifier: Qualifier) -> &str {
        self.resolve(qualifier.0)
    }

    // -----------------------------------------------------------------------
    // Builders
    // -----------------------------------------------------------------------

    fn alloc(&mut self, base: BaseType, qualifiers: QualifierSet, data: TypeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(TypeNode {
            base,
            qualifiers,
            flags: NodeFlags::empty(),
            data,
        });
        id
    }

    /// A parameterized (or non-generic) declared type.
    pub fn declared(
        &mut self,
        base: BaseType,
        qualifiers: QualifierSet,
        type_args: impl IntoIterator<Item = NodeId>,
    ) -> NodeId {
        let type_args = type_args.into_iter().collect();
        self.alloc(base, qualifiers, TypeData::Declared { type_args })
    }

    /// A raw use of a generic declaration: no type arguments, `WAS_RAW` set.
    pub fn raw_declared(&mut self, base: BaseType, qualifiers: QualifierSet) -> NodeId {
        let id = self.declared(base, qualifiers, []);
        self.nodes[id.index()].flags.insert(NodeFlags::WAS_RAW);
        id
    }

    pub fn array(&mut self, qualifiers: QualifierSet, component: NodeId) -> NodeId {
        let base = self.base_type("[]");
        self.alloc(base, qualifiers, TypeData::Array { component })
    }

    pub fn primitive(&mut self, base: BaseType, qualifiers: QualifierSet) -> NodeId {
        self.alloc(base, qualifiers, TypeData::Primitive)
    }

    pub fn null(&mut self, qualifiers: QualifierSet) -> NodeId {
        let base = self.base_type("null");
        self.alloc(base, qualifiers, TypeData::Null)
    }

    pub fn no_type(&mut self, base: BaseType, qualifiers: QualifierSet) -> NodeId {
        self.alloc(base, qualifiers, TypeData::NoType)
    }

    /// A type variable with no bounds yet. `base` is the declaration identity.
    pub fn type_variable(&mut self, base: BaseType, qualifiers: QualifierSet) -> NodeId {
        self.alloc(
            base,
            qualifiers,
            TypeData::TypeVariable {
                upper: None,
                lower: None,
                captured_from: None,
            },
        )
    }

    /// An unbounded wildcard `?`.
    pub fn wildcard(&mut self, qualifiers: QualifierSet) -> NodeId {
        let base = self.base_type("?");
        self.alloc(
            base,
            qualifiers,
            TypeData::Wildcard {
                extends: None,
                super_bound: None,
            },
        )
    }

    pub fn union(
        &mut self,
        base: BaseType,
        qualifiers: QualifierSet,
        alternatives: impl IntoIterator<Item = NodeId>,
    ) -> NodeId {
        let alternatives = alternatives.into_iter().collect();
        self.alloc(base, qualifiers, TypeData::Union { alternatives })
    }

    pub fn intersection(
        &mut self,
        base: BaseType,
        qualifiers: QualifierSet,
        bounds: impl IntoIterator<Item = NodeId>,
    ) -> NodeId {
        let bounds = bounds.into_iter().collect();
        self.alloc(base, qualifiers, TypeData::Intersection { bounds })
    }

    pub fn executable(
        &mut self,
        base: BaseType,
        qualifiers: QualifierSet,
        parts: ExecutableParts,
    ) -> NodeId {
        let shape = ExecutableShape {
            element: parts.element,
            receiver: parts.receiver,
            params: parts.params.into_iter().collect(),
            thrown: parts.thrown.into_iter().collect(),
            return_type: parts.return_type,
            type_params: parts.type_params.into_iter().collect(),
        };
        self.alloc(base, qualifiers, TypeData::Executable(Box::new(shape)))
    }

    // -----------------------------------------------------------------------
    // Setters for partial construction
    // -----------------------------------------------------------------------

    fn mismatch(&self, id: NodeId, expected: TypeKind) -> ContractError {
        ContractError::KindMismatch {
            expected,
            found: self.kind(id),
            rendered: self.render(id),
        }
    }

    pub fn set_upper_bound(&mut self, id: NodeId, bound: Option<NodeId>) -> Result<()> {
        match &mut self.nodes[id.index()].data {
            TypeData::TypeVariable { upper, .. } => {
                *upper = bound;
                Ok(())
            }
            _ => Err(self.mismatch(id, TypeKind::TypeVariable)),
        }
    }

    pub fn set_lower_bound(&mut self, id: NodeId, bound: Option<NodeId>) -> Result<()> {
        match &mut self.nodes[id.index()].data {
            TypeData::TypeVariable { lower, .. } => {
                *lower = bound;
                Ok(())
            }
            _ => Err(self.mismatch(id, TypeKind::TypeVariable)),
        }
    }

    /// Mark a type variable as the capture conversion of `source`.
    pub fn set_captured_from(&mut self, id: NodeId, source: Option<BaseType>) -> Result<()> {
        match &mut self.nodes[id.index()].data {
            TypeData::TypeVariable { captured_from, .. } => {
                *captured_from = source;
                Ok(())
            }
            _ => Err(self.mismatch(id, TypeKind::TypeVariable)),
        }
    }

    pub fn set_extends_bound(&mut self, id: NodeId, bound: Option<NodeId>) -> Result<()> {
        match &mut self.nodes[id.index()].data {
            TypeData::Wildcard { extends, .. } => {
                *extends = bound;
                Ok(())
            }
            _ => Err(self.mismatch(id, TypeKind::Wildcard)),
        }
    }

    pub fn set_super_bound(&mut self, id: NodeId, bound: Option<NodeId>) -> Result<()> {
        match &mut self.nodes[id.index()].data {
            TypeData::Wildcard { super_bound, .. } => {
                *super_bound = bound;
                Ok(())
            }
            _ => Err(self.mismatch(id, TypeKind::Wildcard)),
        }
    }

    /// Flag a wildcard as synthesized for an inferred type argument.
    pub fn mark_type_argument(&mut self, id: NodeId) -> Result<()> {
        if self.kind(id) != TypeKind::Wildcard {
            return Err(self.mismatch(id, TypeKind::Wildcard));
        }
        self.nodes[id.index()].flags.insert(NodeFlags::TYPE_ARGUMENT);
        Ok(())
    }

    pub fn set_type_arguments(
        &mut self,
        id: NodeId,
        args: impl IntoIterator<Item = NodeId>,
    ) -> Result<()> {
        match &mut self.nodes[id.index()].data {
            TypeData::Declared { type_args } => {
                *type_args = args.into_iter().collect();
                Ok(())
            }
            _ => Err(self.mismatch(id, TypeKind::Declared)),
        }
    }

    // -----------------------------------------------------------------------
    // Crate-internal mutation used by producers
    // -----------------------------------------------------------------------

    /// Append a copy of `id` that shares all of its children.
    pub(crate) fn shallow_copy(&mut self, id: NodeId) -> NodeId {
        let node = self.nodes[id.index()].clone();
        let copy = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        copy
    }

    pub(crate) fn data_mut(&mut self, id: NodeId) -> &mut TypeData {
        &mut self.nodes[id.index()].data
    }

    pub(crate) fn qualifiers_mut(&mut self, id: NodeId) -> &mut QualifierSet {
        &mut self.nodes[id.index()].qualifiers
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    pub fn node(&self, id: NodeId) -> &TypeNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&TypeNode> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> TypeKind {
        self.node(id).kind()
    }

    #[inline]
    pub fn base(&self, id: NodeId) -> BaseType {
        self.node(id).base
    }

    #[inline]
    pub fn data(&self, id: NodeId) -> &TypeData {
        &self.node(id).data
    }

    #[inline]
    pub fn flags(&self, id: NodeId) -> NodeFlags {
        self.node(id).flags
    }

    /// Primary (explicitly written) qualifiers of a node.
    #[inline]
    pub fn qualifiers_of(&self, id: NodeId) -> &QualifierSet {
        &self.node(id).qualifiers
    }

    #[inline]
    pub fn is_raw(&self, id: NodeId) -> bool {
        self.flags(id).contains(NodeFlags::WAS_RAW)
    }

    pub fn type_arguments(&self, id: NodeId) -> &[NodeId] {
        match self.data(id) {
            TypeData::Declared { type_args } => type_args,
            _ => &[],
        }
    }

    pub fn component(&self, id: NodeId) -> Option<NodeId> {
        match self.data(id) {
            TypeData::Array { component } => Some(*component),
            _ => None,
        }
    }

    pub fn upper_bound(&self, id: NodeId) -> Option<NodeId> {
        match self.data(id) {
            TypeData::TypeVariable { upper, .. } => *upper,
            _ => None,
        }
    }

    pub fn lower_bound(&self, id: NodeId) -> Option<NodeId> {
        match self.data(id) {
            TypeData::TypeVariable { lower, .. } => *lower,
            _ => None,
        }
    }

    pub fn captured_from(&self, id: NodeId) -> Option<BaseType> {
        match self.data(id) {
            TypeData::TypeVariable { captured_from, .. } => *captured_from,
            _ => None,
        }
    }

    pub fn extends_bound(&self, id: NodeId) -> Option<NodeId> {
        match self.data(id) {
            TypeData::Wildcard { extends, .. } => *extends,
            _ => None,
        }
    }

    pub fn super_bound(&self, id: NodeId) -> Option<NodeId> {
        match self.data(id) {
            TypeData::Wildcard { super_bound, .. } => *super_bound,
            _ => None,
        }
    }

    /// Union alternatives or intersection supertypes.
    pub fn members(&self, id: NodeId) -> &[NodeId] {
        match self.data(id) {
            TypeData::Union { alternatives } => alternatives,
            TypeData::Intersection { bounds } => bounds,
            _ => &[],
        }
    }

    pub fn executable_shape(&self, id: NodeId) -> Option<&ExecutableShape> {
        match self.data(id) {
            TypeData::Executable(shape) => Some(shape),
            _ => None,
        }
    }

    /// Qualifiers that apply to a node for comparison purposes.
    ///
    /// A type variable or wildcard without primary qualifiers takes those of
    /// its upper / extends bound, transitively. The walk stops at the first
    /// qualified node, at a node without a bound, or on a repeated node.
    pub fn effective_qualifiers(&self, id: NodeId) -> &QualifierSet {
        let node = self.node(id);
        if !node.qualifiers.is_empty() {
            return &node.qualifiers;
        }
        let mut current = id;
        let mut seen = FxHashSet::default();
        for _ in 0..MAX_EFFECTIVE_QUALIFIER_CHAIN {
            let node = self.node(current);
            if !node.qualifiers.is_empty() || !seen.insert(current) {
                return &node.qualifiers;
            }
            let next = match &node.data {
                TypeData::TypeVariable { upper, .. } => *upper,
                TypeData::Wildcard { extends, .. } => *extends,
                _ => None,
            };
            match next {
                Some(bound) => current = bound,
                None => return &node.qualifiers,
            }
        }
        &self.node(current).qualifiers
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// Turn an optional graph into a required one.
    pub fn require(&self, id: Option<NodeId>, context: &'static str) -> Result<NodeId> {
        id.ok_or(ContractError::MissingGraph { context })
    }

    /// Check that an extraction produced an executable.
    pub fn expect_executable(&self, id: NodeId) -> Result<&ExecutableShape> {
        self.executable_shape(id)
            .ok_or_else(|| ContractError::ExpectedExecutable {
                kind: self.kind(id),
                rendered: self.render(id),
            })
    }

    /// Check that an extraction produced anything but an executable.
    pub fn expect_non_executable(&self, id: NodeId) -> Result<NodeId> {
        if self.kind(id) == TypeKind::Executable {
            return Err(ContractError::UnexpectedExecutable {
                rendered: self.render(id),
            });
        }
        Ok(id)
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    /// Terse textual form, as used in error messages.
    pub fn render(&self, id: NodeId) -> String {
        TypeFormatter::new(self).format(id)
    }

    /// Qualifier names of a node sorted by name and joined by spaces.
    pub fn qualifier_text(&self, qualifiers: &QualifierSet) -> String {
        let mut names: Vec<&str> = qualifiers.iter().map(|q| self.qualifier_name(q)).collect();
        names.sort_unstable();
        names.join(" ")
    }
}

#[cfg(test)]
#[path = "../tests/graph_tests.rs"]
mod tests;
