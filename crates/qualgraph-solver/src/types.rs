//! Type graph vocabulary.
//!
//! A type is a graph of [`TypeNode`]s stored in a [`TypeGraph`](crate::graph::TypeGraph)
//! arena and addressed by [`NodeId`]. Node identity is `NodeId` identity:
//! two `NodeId`s that compare equal are the same node, and a node referenced
//! from two places is shared, not duplicated.
//!
//! ## Kinds
//!
//! | Kind | Children |
//! |------|----------|
//! | Declared | ordered type arguments (`WAS_RAW` flag) |
//! | Array | component |
//! | TypeVariable | upper bound?, lower bound?, `captured_from`? |
//! | Wildcard | extends bound?, super bound? (`TYPE_ARGUMENT` flag) |
//! | Union | ordered alternatives |
//! | Intersection | ordered supertypes |
//! | Executable | receiver?, parameters, thrown, return, own type parameters |
//! | Primitive / Null / NoType | none |

use bitflags::bitflags;
use qualgraph_common::interner::Atom;
use smallvec::SmallVec;
use std::fmt;

/// Identity of a node inside one [`TypeGraph`](crate::graph::TypeGraph).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque base-type identity supplied by the host type system.
///
/// Used only for equality, dispatch and textual rendering. For a type
/// variable the base type is the identity of its declaration, which is also
/// the key a [`TypeSubstitution`](crate::substitute::TypeSubstitution) maps.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BaseType(pub Atom);

/// A qualifier attached to a node. Its meaning belongs to a
/// [`QualifierHierarchy`](crate::hierarchy::QualifierHierarchy).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Qualifier(pub Atom);

/// Reference to the host element that declares an executable.
/// Carried by value through copies, never inspected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ElementRef(pub u32);

/// Structural kind of a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Declared,
    Array,
    Primitive,
    TypeVariable,
    Wildcard,
    Union,
    Intersection,
    Executable,
    Null,
    NoType,
}

impl TypeKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            TypeKind::Declared => "declared",
            TypeKind::Array => "array",
            TypeKind::Primitive => "primitive",
            TypeKind::TypeVariable => "type variable",
            TypeKind::Wildcard => "wildcard",
            TypeKind::Union => "union",
            TypeKind::Intersection => "intersection",
            TypeKind::Executable => "executable",
            TypeKind::Null => "null",
            TypeKind::NoType => "no type",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Per-node markers that are not children.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Declared: legacy unparameterized use of a generic declaration.
        /// Type-argument comparison is skipped for raw types.
        const WAS_RAW = 1 << 0;
        /// Wildcard: synthesized for an inferred type argument rather than
        /// written in source.
        const TYPE_ARGUMENT = 1 << 1;
    }
}

/// Sorted, duplicate-free set of qualifiers on one node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct QualifierSet(SmallVec<[Qualifier; 2]>);

impl QualifierSet {
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// Insert a qualifier; returns `false` if it was already present.
    pub fn insert(&mut self, qualifier: Qualifier) -> bool {
        match self.0.binary_search(&qualifier) {
            Ok(_) => false,
            Err(pos) => {
                self.0.insert(pos, qualifier);
                true
            }
        }
    }

    /// Remove a qualifier; returns `true` if it was present.
    pub fn remove(&mut self, qualifier: Qualifier) -> bool {
        match self.0.binary_search(&qualifier) {
            Ok(pos) => {
                self.0.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    #[inline]
    pub fn contains(&self, qualifier: Qualifier) -> bool {
        self.0.binary_search(&qualifier).is_ok()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = Qualifier> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[Qualifier] {
        &self.0
    }
}

impl FromIterator<Qualifier> for QualifierSet {
    fn from_iter<I: IntoIterator<Item = Qualifier>>(iter: I) -> Self {
        let mut set = QualifierSet::new();
        for qualifier in iter {
            set.insert(qualifier);
        }
        set
    }
}

/// Child lists are short in practice; most fit inline.
pub type NodeList = SmallVec<[NodeId; 4]>;

/// Children of an executable (method or constructor) type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutableShape {
    pub element: ElementRef,
    pub receiver: Option<NodeId>,
    pub params: NodeList,
    pub thrown: NodeList,
    pub return_type: NodeId,
    pub type_params: NodeList,
}

/// Kind-specific payload of a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeData {
    Declared {
        type_args: NodeList,
    },
    Array {
        component: NodeId,
    },
    Primitive,
    TypeVariable {
        upper: Option<NodeId>,
        lower: Option<NodeId>,
        /// Set on a capture-converted variable: the declaration it was captured from.
        captured_from: Option<BaseType>,
    },
    Wildcard {
        extends: Option<NodeId>,
        super_bound: Option<NodeId>,
    },
    Union {
        alternatives: NodeList,
    },
    Intersection {
        bounds: NodeList,
    },
    Executable(Box<ExecutableShape>),
    Null,
    NoType,
}

impl TypeData {
    pub fn kind(&self) -> TypeKind {
        match self {
            TypeData::Declared { .. } => TypeKind::Declared,
            TypeData::Array { .. } => TypeKind::Array,
            TypeData::Primitive => TypeKind::Primitive,
            TypeData::TypeVariable { .. } => TypeKind::TypeVariable,
            TypeData::Wildcard { .. } => TypeKind::Wildcard,
            TypeData::Union { .. } => TypeKind::Union,
            TypeData::Intersection { .. } => TypeKind::Intersection,
            TypeData::Executable(_) => TypeKind::Executable,
            TypeData::Null => TypeKind::Null,
            TypeData::NoType => TypeKind::NoType,
        }
    }

    /// All present children in canonical order.
    ///
    /// Executables list receiver, parameters, thrown types, return type and
    /// own type parameters, in that order.
    pub fn children(&self) -> SmallVec<[NodeId; 8]> {
        let mut out = SmallVec::new();
        match self {
            TypeData::Declared { type_args } => out.extend(type_args.iter().copied()),
            TypeData::Array { component } => out.push(*component),
            TypeData::TypeVariable { upper, lower, .. } => {
                out.extend(upper.iter().copied());
                out.extend(lower.iter().copied());
            }
            TypeData::Wildcard {
                extends,
                super_bound,
            } => {
                out.extend(extends.iter().copied());
                out.extend(super_bound.iter().copied());
            }
            TypeData::Union { alternatives } => out.extend(alternatives.iter().copied()),
            TypeData::Intersection { bounds } => out.extend(bounds.iter().copied()),
            TypeData::Executable(shape) => {
                out.extend(shape.receiver.iter().copied());
                out.extend(shape.params.iter().copied());
                out.extend(shape.thrown.iter().copied());
                out.push(shape.return_type);
                out.extend(shape.type_params.iter().copied());
            }
            TypeData::Primitive | TypeData::Null | TypeData::NoType => {}
        }
        out
    }
}

/// One node of a type graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeNode {
    pub base: BaseType,
    pub qualifiers: QualifierSet,
    pub flags: NodeFlags,
    pub data: TypeData,
}

impl TypeNode {
    #[inline]
    pub fn kind(&self) -> TypeKind {
        self.data.kind()
    }
}
