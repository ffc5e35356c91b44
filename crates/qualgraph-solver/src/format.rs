//! Textual rendering of type graphs.
//!
//! Terse mode prints what a reader would write in source: qualifiers,
//! base name and type arguments. Verbose mode also prints type-variable
//! bounds the first time a variable is met. Both modes terminate on
//! cyclic graphs.

use crate::graph::TypeGraph;
use crate::recursion::{RecursionGuard, RecursionProfile, RecursionResult};
use crate::types::{NodeId, TypeData};
use rustc_hash::FxHashSet;
use std::fmt::Write;

pub struct TypeFormatter<'g> {
    graph: &'g TypeGraph,
    verbose: bool,
    guard: RecursionGuard<NodeId>,
    expanded: FxHashSet<NodeId>,
}

impl<'g> TypeFormatter<'g> {
    pub fn new(graph: &'g TypeGraph) -> Self {
        Self {
            graph,
            verbose: false,
            guard: RecursionGuard::with_profile(RecursionProfile::Formatting),
            expanded: FxHashSet::default(),
        }
    }

    pub fn verbose(graph: &'g TypeGraph) -> Self {
        Self {
            verbose: true,
            ..Self::new(graph)
        }
    }

    pub fn format(&mut self, id: NodeId) -> String {
        let mut out = String::new();
        self.write(&mut out, id);
        out
    }

    fn write_qualifiers(&self, out: &mut String, id: NodeId) {
        let qualifiers = self.graph.qualifiers_of(id);
        if qualifiers.is_empty() {
            return;
        }
        let mut names: Vec<&str> = qualifiers
            .iter()
            .map(|q| self.graph.qualifier_name(q))
            .collect();
        names.sort_unstable();
        for name in names {
            let _ = write!(out, "@{name} ");
        }
    }

    fn write_list(&mut self, out: &mut String, ids: &[NodeId], sep: &str) {
        for (i, &id) in ids.iter().enumerate() {
            if i > 0 {
                out.push_str(sep);
            }
            self.write(out, id);
        }
    }

    fn write(&mut self, out: &mut String, id: NodeId) {
        match self.guard.enter(id) {
            RecursionResult::Entered => {
                self.write_node(out, id);
                self.guard.leave(id);
            }
            RecursionResult::Cycle => out.push_str(self.graph.base_name(self.graph.base(id))),
            RecursionResult::DepthExceeded | RecursionResult::IterationExceeded => {
                out.push_str("...")
            }
        }
    }

    fn write_node(&mut self, out: &mut String, id: NodeId) {
        let graph = self.graph;
        let base = graph.base_name(graph.base(id));
        self.write_qualifiers(out, id);
        match graph.data(id) {
            TypeData::Declared { type_args } => {
                out.push_str(base);
                if !type_args.is_empty() {
                    out.push('<');
                    self.write_list(out, type_args, ", ");
                    out.push('>');
                }
            }
            TypeData::Array { component } => {
                self.write(out, *component);
                out.push_str("[]");
            }
            TypeData::Primitive | TypeData::Null | TypeData::NoType => out.push_str(base),
            TypeData::TypeVariable { upper, lower, .. } => {
                out.push_str(base);
                if self.verbose && self.expanded.insert(id) {
                    if let Some(upper) = upper {
                        out.push_str(" extends ");
                        self.write(out, *upper);
                    }
                    if let Some(lower) = lower
                        && !matches!(graph.data(*lower), TypeData::Null)
                    {
                        out.push_str(" super ");
                        self.write(out, *lower);
                    }
                }
            }
            TypeData::Wildcard {
                extends,
                super_bound,
            } => {
                out.push('?');
                if let Some(extends) = extends {
                    out.push_str(" extends ");
                    self.write(out, *extends);
                }
                if let Some(super_bound) = super_bound {
                    out.push_str(" super ");
                    self.write(out, *super_bound);
                }
            }
            TypeData::Union { alternatives } => self.write_list(out, alternatives, " | "),
            TypeData::Intersection { bounds } => self.write_list(out, bounds, " & "),
            TypeData::Executable(shape) => {
                if !shape.type_params.is_empty() {
                    out.push('<');
                    self.write_list(out, &shape.type_params, ", ");
                    out.push_str("> ");
                }
                self.write(out, shape.return_type);
                let _ = write!(out, " {base}(");
                if let Some(receiver) = shape.receiver {
                    self.write(out, receiver);
                    out.push_str(" this");
                    if !shape.params.is_empty() {
                        out.push_str(", ");
                    }
                }
                self.write_list(out, &shape.params, ", ");
                out.push(')');
                if !shape.thrown.is_empty() {
                    out.push_str(" throws ");
                    self.write_list(out, &shape.thrown, ", ");
                }
            }
        }
    }
}
