//! Executable (method signature) subtyping.
//!
//! `m1 <: m2` when `m1` can override `m2`: same arity and type-parameter
//! count, parameters and receiver contravariant, return type covariant,
//! and every exception `m1` throws is covered by one `m2` throws.

use crate::error::Result;
use crate::subtype::{BaseTypeRelation, Operand, Position, SubtypeChecker};
use crate::types::ExecutableShape;

impl<'a, R: BaseTypeRelation> SubtypeChecker<'a, R> {
    pub(crate) fn check_executables(&mut self, sub: Operand, sup: Operand) -> Result<bool> {
        let graph = self.graph;
        let (Some(sub_shape), Some(sup_shape)) = (
            graph.executable_shape(sub.node),
            graph.executable_shape(sup.node),
        ) else {
            return Ok(false);
        };
        let sub_shape: &'a ExecutableShape = sub_shape;
        let sup_shape: &'a ExecutableShape = sup_shape;

        if sub_shape.params.len() != sup_shape.params.len()
            || sub_shape.type_params.len() != sup_shape.type_params.len()
        {
            return Ok(false);
        }
        if !self.operand_qualifiers(sub, sup, Position::Covariant) {
            return Ok(false);
        }

        if let (Some(sub_receiver), Some(sup_receiver)) = (sub_shape.receiver, sup_shape.receiver)
            && !self.check(
                Operand::of(sup_receiver),
                Operand::of(sub_receiver),
                Position::Covariant,
            )?
        {
            return Ok(false);
        }

        for (&sub_param, &sup_param) in sub_shape.params.iter().zip(&sup_shape.params) {
            if !self.check(
                Operand::of(sup_param),
                Operand::of(sub_param),
                Position::Covariant,
            )? {
                return Ok(false);
            }
        }

        if !self.check(
            Operand::of(sub_shape.return_type),
            Operand::of(sup_shape.return_type),
            Position::Covariant,
        )? {
            return Ok(false);
        }

        for &thrown in &sub_shape.thrown {
            let mut covered = false;
            for &allowed in &sup_shape.thrown {
                if self.check(Operand::of(thrown), Operand::of(allowed), Position::Covariant)? {
                    covered = true;
                    break;
                }
            }
            if !covered {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
