//! Graph builders shared by the solver tests.

use crate::graph::{ExecutableParts, TypeGraph};
use crate::hierarchy::GraphQualifierHierarchy;
use crate::types::{ElementRef, NodeId, QualifierSet};

/// A `TypeGraph` with terse builders keyed by name.
pub(crate) struct Fixture {
    pub(crate) graph: TypeGraph,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        qualgraph_common::init_tracing();
        Self {
            graph: TypeGraph::new(),
        }
    }

    pub(crate) fn quals(&mut self, names: &[&str]) -> QualifierSet {
        self.graph.qualifiers(names)
    }

    /// `@quals Name<args>`
    pub(crate) fn class(&mut self, name: &str, quals: &[&str], args: &[NodeId]) -> NodeId {
        let base = self.graph.base_type(name);
        let quals = self.quals(quals);
        self.graph.declared(base, quals, args.iter().copied())
    }

    pub(crate) fn raw(&mut self, name: &str, quals: &[&str]) -> NodeId {
        let base = self.graph.base_type(name);
        let quals = self.quals(quals);
        self.graph.raw_declared(base, quals)
    }

    pub(crate) fn prim(&mut self, name: &str, quals: &[&str]) -> NodeId {
        let base = self.graph.base_type(name);
        let quals = self.quals(quals);
        self.graph.primitive(base, quals)
    }

    pub(crate) fn null(&mut self, quals: &[&str]) -> NodeId {
        let quals = self.quals(quals);
        self.graph.null(quals)
    }

    pub(crate) fn array(&mut self, quals: &[&str], component: NodeId) -> NodeId {
        let quals = self.quals(quals);
        self.graph.array(quals, component)
    }

    /// `@quals T extends upper`
    pub(crate) fn tvar(&mut self, name: &str, quals: &[&str], upper: Option<NodeId>) -> NodeId {
        let base = self.graph.base_type(name);
        let quals = self.quals(quals);
        let id = self.graph.type_variable(base, quals);
        self.graph
            .set_upper_bound(id, upper)
            .expect("fresh node is a type variable");
        id
    }

    /// `@quals ? extends bound`
    pub(crate) fn wildcard(&mut self, quals: &[&str], extends: Option<NodeId>) -> NodeId {
        let quals = self.quals(quals);
        let id = self.graph.wildcard(quals);
        self.graph
            .set_extends_bound(id, extends)
            .expect("fresh node is a wildcard");
        id
    }

    /// `? super bound`
    pub(crate) fn wildcard_super(&mut self, bound: NodeId) -> NodeId {
        let id = self.graph.wildcard(QualifierSet::new());
        self.graph
            .set_super_bound(id, Some(bound))
            .expect("fresh node is a wildcard");
        id
    }

    pub(crate) fn union(&mut self, alternatives: &[NodeId]) -> NodeId {
        let base = self.graph.base_type("|");
        self.graph
            .union(base, QualifierSet::new(), alternatives.iter().copied())
    }

    pub(crate) fn intersection(&mut self, bounds: &[NodeId]) -> NodeId {
        let base = self.graph.base_type("&");
        self.graph
            .intersection(base, QualifierSet::new(), bounds.iter().copied())
    }

    pub(crate) fn method(
        &mut self,
        name: &str,
        type_params: &[NodeId],
        params: &[NodeId],
        return_type: NodeId,
        thrown: &[NodeId],
    ) -> NodeId {
        let base = self.graph.base_type(name);
        self.graph.executable(
            base,
            QualifierSet::new(),
            ExecutableParts {
                element: ElementRef(7),
                receiver: None,
                params: params.to_vec(),
                thrown: thrown.to_vec(),
                return_type,
                type_params: type_params.to_vec(),
            },
        )
    }

    /// `T extends Comparable<T>`: the variable and its bound form a cycle.
    pub(crate) fn f_bounded(&mut self, name: &str) -> NodeId {
        let t = self.tvar(name, &[], None);
        let comparable = self.class("Comparable", &[], &[t]);
        self.graph
            .set_upper_bound(t, Some(comparable))
            .expect("type variable");
        t
    }

    /// `@NonNull <: @Nullable`.
    pub(crate) fn nullness(&mut self) -> GraphQualifierHierarchy {
        let non_null = self.graph.qualifier("NonNull");
        let nullable = self.graph.qualifier("Nullable");
        GraphQualifierHierarchy::builder()
            .add_subtype(non_null, nullable)
            .build()
            .expect("valid hierarchy")
    }

    /// Nullness plus `@Untainted <: @Tainted`.
    pub(crate) fn nullness_and_taint(&mut self) -> GraphQualifierHierarchy {
        let non_null = self.graph.qualifier("NonNull");
        let nullable = self.graph.qualifier("Nullable");
        let untainted = self.graph.qualifier("Untainted");
        let tainted = self.graph.qualifier("Tainted");
        GraphQualifierHierarchy::builder()
            .add_subtype(non_null, nullable)
            .add_subtype(untainted, tainted)
            .build()
            .expect("valid hierarchy")
    }
}
