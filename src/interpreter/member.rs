// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::ast::MemberExpr;
use crate::context::Context;
use crate::interpreter::error::{RuntimeError, RuntimeErrorKind};
use crate::value::Value;

use anyhow::Result;
use log::trace;

impl MemberExpr {
    /// Evaluate the expression left of the dot.
    ///
    /// `Ok(None)` means the access short-circuits to null: only reads in relaxed mode
    /// against a null or primitive target do that. Writes are never relaxed.
    pub fn resolve_target(&self, ctx: &mut Context, is_set: bool) -> Result<Option<Value>> {
        if is_set {
            return self.resolve_set_target(ctx).map(Some);
        }

        let target = ctx.get_value(&self.target)?;
        if !target.is_null() && !target.is_primitive() {
            return Ok(Some(target));
        }

        if ctx.relaxed_member_access() {
            trace!("{self}: relaxed access on {} target", target.kind_name());
            return Ok(None);
        }
        Err(self.target_error(&target))
    }

    /// Evaluate the expression left of the dot for a write. Null and primitive targets
    /// are errors in every mode.
    pub fn resolve_set_target(&self, ctx: &mut Context) -> Result<Value> {
        let target = ctx.get_value(&self.target)?;
        if target.is_null() || target.is_primitive() {
            return Err(self.target_error(&target));
        }
        Ok(target)
    }

    fn target_error(&self, target: &Value) -> anyhow::Error {
        let kind = if target.is_null() {
            RuntimeErrorKind::NullTarget {
                target: self.target.to_string(),
                path: self.to_string(),
            }
        } else {
            RuntimeErrorKind::PrimitiveTarget {
                value: target.to_display_string(),
                type_name: target.kind_name().to_string(),
                path: self.to_string(),
            }
        };
        RuntimeError::new(&self.span, kind).into()
    }

    /// Read the member. Missing members are null.
    pub fn get_value(&self, ctx: &mut Context) -> Result<Value> {
        let target = match self.resolve_target(ctx, false)? {
            Some(target) => target,
            None => return Ok(Value::Null),
        };

        let member = self.member.name.as_ref();
        let accessor = ctx.get_member_accessor(&target);
        if let Some(value) = accessor.try_get_value(ctx, &self.span, &target, member)? {
            trace!("{self} found by accessor");
            return Ok(value);
        }

        if let Some(try_get_member) = ctx.try_get_member() {
            if let Some(value) = try_get_member(ctx, &self.span, &target, member)? {
                trace!("{self} found by fallback");
                return Ok(value);
            }
        }

        trace!("{self} not found");
        Ok(Value::Null)
    }

    /// Write the member. Fails when the target's accessor refuses the write.
    pub fn set_value(&self, ctx: &mut Context, value: Value) -> Result<()> {
        let target = self.resolve_set_target(ctx)?;
        let member = self.member.name.as_ref();
        let accessor = ctx.get_member_accessor(&target);
        if !accessor.try_set_value(ctx, &self.span, &target, member, value)? {
            return Err(RuntimeError::new(
                &self.member.span,
                RuntimeErrorKind::ReadonlyMember {
                    path: self.to_string(),
                },
            )
            .into());
        }
        trace!("{self} assigned");
        Ok(())
    }
}
