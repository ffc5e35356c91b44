//! Wildcard subtyping.
//!
//! A wildcard supertype `? extends U` contains `S` when `S <: U`; an
//! unbounded wildcard contains everything. Super bounds take no part in
//! containment. Qualifiers written on the wildcard itself must match the
//! contained type exactly.

use crate::error::Result;
use crate::subtype::{BaseTypeRelation, Operand, Position, QualifierMatch, SubtypeChecker};
use crate::types::TypeKind;
use tracing::trace;

impl<'a, R: BaseTypeRelation> SubtypeChecker<'a, R> {
    /// `S <: ? extends U` for a non-wildcard `S`.
    pub(crate) fn check_against_wildcard(&mut self, sub: Operand, sup: Operand) -> Result<bool> {
        let graph = self.graph;
        let explicit = graph.qualifiers_of(sup.node);
        if !explicit.is_empty()
            && !self.qualifiers_compatible(self.quals(sub), explicit, QualifierMatch::Exact)
        {
            return Ok(false);
        }

        match graph.extends_bound(sup.node) {
            None => Ok(true),
            Some(upper) => self.check(sub, self.step(sup, upper), Position::Covariant),
        }
    }

    /// `? extends A <: ? extends B`.
    pub(crate) fn check_wildcards(&mut self, sub: Operand, sup: Operand) -> Result<bool> {
        let graph = self.graph;
        let Some(sup_upper) = graph.extends_bound(sup.node) else {
            return Ok(true);
        };
        let sup_upper_quals = graph.effective_qualifiers(sup_upper);
        if sup_upper_quals.is_empty() {
            return Ok(true);
        }

        let Some(sub_upper) = graph.extends_bound(sub.node) else {
            return Ok(self.qualifiers_compatible(
                self.quals(sub),
                sup_upper_quals,
                self.config.declared_qualifiers,
            ));
        };

        // A capture of the supertype's bound variable is compared against
        // that variable's own upper bound, qualifiers included.
        let mut target = self.step(sup, sup_upper);
        if graph.kind(sub_upper) == TypeKind::TypeVariable
            && graph.captured_from(sub_upper) == Some(graph.base(sup_upper))
            && let Some(unwrapped) = graph.upper_bound(sup_upper)
        {
            trace!(
                captured = sub_upper.0,
                bound = sup_upper.0,
                "unwrapping captured wildcard bound"
            );
            target = Operand::of(unwrapped);
        }

        self.check(self.step(sub, sub_upper), target, Position::Covariant)
    }

    /// `? extends A <: D`: only the effective qualifiers of the bound matter.
    pub(crate) fn check_wildcard_against_declared(
        &mut self,
        sub: Operand,
        sup: Operand,
        pos: Position,
    ) -> Result<bool> {
        Ok(self.operand_qualifiers(sub, sup, pos))
    }

    /// `? extends A <: T` or `? extends A <: E[]`, through the bound.
    pub(crate) fn check_wildcard_bound(
        &mut self,
        sub: Operand,
        sup: Operand,
        pos: Position,
    ) -> Result<bool> {
        match self.graph.extends_bound(sub.node) {
            Some(upper) => self.check(self.step(sub, upper), sup, pos),
            None => Ok(self.operand_qualifiers(sub, sup, pos)),
        }
    }
}
