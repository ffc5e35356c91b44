//! Union and intersection subtyping.
//!
//! - `A | B <: T` iff every alternative is below `T`
//! - `S <: A & B` iff `S` is below every member
//! - `S <: A | B` iff `S` is below some alternative
//! - `A & B <: T` iff some member is below `T`

use crate::error::Result;
use crate::subtype::{BaseTypeRelation, Operand, Position, SubtypeChecker};
use crate::types::NodeId;

impl<'a, R: BaseTypeRelation> SubtypeChecker<'a, R> {
    pub(crate) fn check_union_subtype(
        &mut self,
        sub: Operand,
        sup: Operand,
        pos: Position,
    ) -> Result<bool> {
        let alternatives: &'a [NodeId] = self.graph.members(sub.node);
        for &alternative in alternatives {
            if !self.check(Operand::of(alternative), sup, pos)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub(crate) fn check_intersection_supertype(
        &mut self,
        sub: Operand,
        sup: Operand,
        pos: Position,
    ) -> Result<bool> {
        let bounds: &'a [NodeId] = self.graph.members(sup.node);
        for &bound in bounds {
            if !self.check(sub, Operand::of(bound), pos)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub(crate) fn check_union_supertype(
        &mut self,
        sub: Operand,
        sup: Operand,
        pos: Position,
    ) -> Result<bool> {
        let alternatives: &'a [NodeId] = self.graph.members(sup.node);
        for &alternative in alternatives {
            if self.check(sub, Operand::of(alternative), pos)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub(crate) fn check_intersection_subtype(
        &mut self,
        sub: Operand,
        sup: Operand,
        pos: Position,
    ) -> Result<bool> {
        let bounds: &'a [NodeId] = self.graph.members(sub.node);
        for &bound in bounds {
            if self.check(Operand::of(bound), sup, pos)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
