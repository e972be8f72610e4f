// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::accessors::MemberAccessor;
use crate::context::Context;
use crate::source::Span;
use crate::value::Value;

use std::rc::Rc;

use anyhow::Result;

/// Accessor for null and primitive values. Nothing is found and nothing is writable.
#[derive(Debug, Default)]
pub struct EmptyAccessor;

impl MemberAccessor for EmptyAccessor {
    fn try_get_value(
        &self,
        _ctx: &mut Context,
        _span: &Span,
        _target: &Value,
        _member: &str,
    ) -> Result<Option<Value>> {
        Ok(None)
    }

    fn try_set_value(
        &self,
        _ctx: &mut Context,
        _span: &Span,
        _target: &Value,
        _member: &str,
        _value: Value,
    ) -> Result<bool> {
        Ok(false)
    }

    fn members(&self, _ctx: &mut Context, _target: &Value) -> Result<Vec<Rc<str>>> {
        Ok(vec![])
    }

    fn has_member(
        &self,
        _ctx: &mut Context,
        _span: &Span,
        _target: &Value,
        _member: &str,
    ) -> Result<bool> {
        Ok(false)
    }
}
