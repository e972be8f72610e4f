// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::accessors::MemberAccessor;
use crate::context::Context;
use crate::source::Span;
use crate::value::Value;

use std::rc::Rc;

use anyhow::Result;

const SIZE: &str = "size";

/// Accessor for arrays. The only member is the computed, read-only `size`.
#[derive(Debug, Default)]
pub struct ListAccessor;

impl MemberAccessor for ListAccessor {
    fn try_get_value(
        &self,
        _ctx: &mut Context,
        _span: &Span,
        target: &Value,
        member: &str,
    ) -> Result<Option<Value>> {
        if member != SIZE {
            return Ok(None);
        }
        Ok(Some(Value::from(target.as_array()?.len())))
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
        Ok(vec![SIZE.into()])
    }
}
