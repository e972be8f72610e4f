// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::accessors::MemberAccessor;
use crate::context::Context;
use crate::source::Span;
use crate::value::Value;

use std::rc::Rc;

use anyhow::Result;

/// Accessor for string-keyed objects. Keys are member names; every member is writable.
#[derive(Debug, Default)]
pub struct MapAccessor;

impl MemberAccessor for MapAccessor {
    fn try_get_value(
        &self,
        _ctx: &mut Context,
        _span: &Span,
        target: &Value,
        member: &str,
    ) -> Result<Option<Value>> {
        Ok(target.as_object()?.get(member).cloned())
    }

    fn try_set_value(
        &self,
        _ctx: &mut Context,
        _span: &Span,
        target: &Value,
        member: &str,
        value: Value,
    ) -> Result<bool> {
        target.as_object_mut()?.insert(member.into(), value);
        Ok(true)
    }

    fn members(&self, _ctx: &mut Context, target: &Value) -> Result<Vec<Rc<str>>> {
        Ok(target.as_object()?.keys().cloned().collect())
    }

    fn has_member(
        &self,
        _ctx: &mut Context,
        _span: &Span,
        target: &Value,
        member: &str,
    ) -> Result<bool> {
        Ok(target.as_object()?.contains_key(member))
    }
}
