// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::accessors::MemberAccessor;
use crate::context::Context;
use crate::source::Span;
use crate::value::Value;

use std::rc::Rc;

use anyhow::Result;

/// Forwards member access to the script value itself.
#[derive(Debug, Default)]
pub struct ScriptAccessor;

impl MemberAccessor for ScriptAccessor {
    fn try_get_value(
        &self,
        ctx: &mut Context,
        span: &Span,
        target: &Value,
        member: &str,
    ) -> Result<Option<Value>> {
        target.as_script()?.try_get_value(ctx, span, member)
    }

    fn try_set_value(
        &self,
        ctx: &mut Context,
        span: &Span,
        target: &Value,
        member: &str,
        value: Value,
    ) -> Result<bool> {
        target.as_script()?.try_set_value(ctx, span, member, value)
    }

    fn members(&self, _ctx: &mut Context, target: &Value) -> Result<Vec<Rc<str>>> {
        Ok(target.as_script()?.members())
    }

    fn has_member(
        &self,
        _ctx: &mut Context,
        _span: &Span,
        target: &Value,
        member: &str,
    ) -> Result<bool> {
        Ok(target.as_script()?.has_member(member))
    }
}
