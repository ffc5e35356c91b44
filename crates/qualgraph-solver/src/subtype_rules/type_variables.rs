//! Type-variable subtyping.

use crate::error::Result;
use crate::subtype::{BaseTypeRelation, Operand, Position, SubtypeChecker};

impl<'a, R: BaseTypeRelation> SubtypeChecker<'a, R> {
    /// `S <: T` for a declared or array `S`: compared against `T`'s upper bound.
    pub(crate) fn check_against_type_variable(
        &mut self,
        sub: Operand,
        sup: Operand,
        pos: Position,
    ) -> Result<bool> {
        match self.graph.upper_bound(sup.node) {
            Some(upper) => self.check(sub, self.step(sup, upper), pos),
            None => Ok(self.operand_qualifiers(sub, sup, pos)),
        }
    }

    /// `T <: U`.
    ///
    /// Uses of the same variable differ only in qualifiers. Distinct
    /// variables are never related as type arguments; elsewhere `T` is
    /// widened to its upper bound.
    pub(crate) fn check_type_variables(
        &mut self,
        sub: Operand,
        sup: Operand,
        pos: Position,
    ) -> Result<bool> {
        let graph = self.graph;
        if graph.base(sub.node) == graph.base(sup.node) {
            return Ok(self.operand_qualifiers(sub, sup, pos));
        }
        if pos == Position::TypeArgument {
            return Ok(false);
        }
        self.check_type_variable_bound(sub, sup, pos)
    }

    /// `T <: S` for a non-variable `S`: `T`'s upper bound must be below `S`.
    pub(crate) fn check_type_variable_bound(
        &mut self,
        sub: Operand,
        sup: Operand,
        pos: Position,
    ) -> Result<bool> {
        match self.graph.upper_bound(sub.node) {
            Some(upper) => self.check(self.step(sub, upper), sup, pos),
            None => Ok(self.operand_qualifiers(sub, sup, pos)),
        }
    }

    /// `null <: T`: decided by `T`'s own qualifiers, else its lower bound.
    pub(crate) fn check_null_against_type_variable(
        &mut self,
        sub: Operand,
        sup: Operand,
        pos: Position,
    ) -> Result<bool> {
        let graph = self.graph;
        let primary = graph.qualifiers_of(sup.quals_from);
        if !primary.is_empty() {
            return Ok(self.qualifiers_compatible(self.quals(sub), primary, self.mode(pos)));
        }
        match graph.lower_bound(sup.node) {
            Some(lower) => self.check(sub, Operand::of(lower), pos),
            None => Ok(true),
        }
    }
}
