//! Declared, array and primitive subtyping.

use crate::error::Result;
use crate::subtype::{BaseTypeRelation, Operand, Position, QualifierMatch, SubtypeChecker};
use crate::types::NodeId;

impl<'a, R: BaseTypeRelation> SubtypeChecker<'a, R> {
    /// `C<A1..An> <: D<B1..Bn>`.
    ///
    /// Qualifiers and base types are compared per position. Type arguments
    /// are aligned only when both sides are parameterized uses of the same
    /// declaration: a raw use on either side, or two different (related)
    /// declarations, skip argument comparison.
    pub(crate) fn check_declared(
        &mut self,
        sub: Operand,
        sup: Operand,
        pos: Position,
    ) -> Result<bool> {
        if !self.operand_qualifiers(sub, sup, pos) {
            return Ok(false);
        }
        let graph = self.graph;
        let (sub_base, sup_base) = (graph.base(sub.node), graph.base(sup.node));
        if !self.bases_related(sub_base, sup_base, pos) {
            return Ok(false);
        }
        if graph.is_raw(sub.node) || graph.is_raw(sup.node) || sub_base != sup_base {
            return Ok(true);
        }

        let sub_args: &'a [NodeId] = graph.type_arguments(sub.node);
        let sup_args: &'a [NodeId] = graph.type_arguments(sup.node);
        if sub_args.len() != sup_args.len() {
            return Ok(false);
        }
        for (&a, &b) in sub_args.iter().zip(sup_args) {
            if !self.check(Operand::of(a), Operand::of(b), Position::TypeArgument)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Arrays are invariant in their qualifiers; components are compared
    /// with exact qualifiers but may differ by the host relation.
    pub(crate) fn check_arrays(&mut self, sub: Operand, sup: Operand) -> Result<bool> {
        if !self.qualifiers_compatible(self.quals(sub), self.quals(sup), QualifierMatch::Exact) {
            return Ok(false);
        }
        let (Some(sub_component), Some(sup_component)) = (
            self.graph.component(sub.node),
            self.graph.component(sup.node),
        ) else {
            return Ok(false);
        };
        self.check(
            Operand::of(sub_component),
            Operand::of(sup_component),
            Position::ArrayComponent,
        )
    }

    pub(crate) fn check_primitives(
        &mut self,
        sub: Operand,
        sup: Operand,
        pos: Position,
    ) -> Result<bool> {
        let graph = self.graph;
        Ok(self.operand_qualifiers(sub, sup, pos)
            && self.bases_related(graph.base(sub.node), graph.base(sup.node), pos))
    }
}
