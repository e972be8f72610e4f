// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Strategies for reading and writing named members of runtime values.

use crate::context::Context;
use crate::source::Span;
use crate::value::Value;

use core::fmt;
use std::rc::Rc;

use anyhow::Result;

mod empty;
mod list;
mod map;
mod object;
mod script;

pub use empty::EmptyAccessor;
pub use list::ListAccessor;
pub use map::MapAccessor;
pub use object::ObjectAccessor;
pub use script::ScriptAccessor;

/// Member access strategy for one runtime value shape.
///
/// Accessors are shared between evaluations of every value of the shape they were
/// resolved for, so they must not keep per-value state.
pub trait MemberAccessor: fmt::Debug {
    /// Read `member` from `target`. `Ok(None)` means the member does not exist; errors
    /// are failures of the accessor itself and abort the evaluation.
    fn try_get_value(
        &self,
        ctx: &mut Context,
        span: &Span,
        target: &Value,
        member: &str,
    ) -> Result<Option<Value>>;

    /// Write `member` on `target`. `Ok(false)` means the member cannot be written.
    fn try_set_value(
        &self,
        ctx: &mut Context,
        span: &Span,
        target: &Value,
        member: &str,
        value: Value,
    ) -> Result<bool>;

    /// Names of the members `target` exposes. Fails when `target` has the wrong shape.
    fn members(&self, ctx: &mut Context, target: &Value) -> Result<Vec<Rc<str>>>;

    fn has_member(
        &self,
        ctx: &mut Context,
        _span: &Span,
        target: &Value,
        member: &str,
    ) -> Result<bool> {
        Ok(self
            .members(ctx, target)?
            .iter()
            .any(|m| m.as_ref() == member))
    }
}
