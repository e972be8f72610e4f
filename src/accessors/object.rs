// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::accessors::MemberAccessor;
use crate::context::{Context, MemberRenamer};
use crate::host::{HostMember, HostObject};
use crate::source::Span;
use crate::value::Value;

use std::collections::BTreeMap;
use std::rc::Rc;

use anyhow::{bail, Result};
use log::trace;

/// Accessor for host objects, built once per host type from its member descriptors.
///
/// Script-visible names are the host names passed through the context's renamer, if any.
#[derive(Debug)]
pub struct ObjectAccessor {
    type_name: Rc<str>,
    members: BTreeMap<Rc<str>, HostMember>,
}

impl ObjectAccessor {
    pub fn new(host: &dyn HostObject, renamer: Option<&MemberRenamer>) -> ObjectAccessor {
        let members = host
            .members()
            .into_iter()
            .map(|m| {
                let script_name = match renamer {
                    Some(rename) => rename(m.name.as_ref()),
                    None => m.name.clone(),
                };
                (script_name, m)
            })
            .collect();
        ObjectAccessor {
            type_name: host.type_name().into(),
            members,
        }
    }

    fn host<'a>(&self, span: &Span, target: &'a Value) -> Result<&'a Rc<dyn HostObject>> {
        match target {
            Value::Host(host) => Ok(host),
            _ => bail!(span.error(&format!(
                "accessor for `{}` cannot access members of type {}",
                self.type_name,
                target.kind_name()
            ))),
        }
    }
}

impl MemberAccessor for ObjectAccessor {
    fn try_get_value(
        &self,
        _ctx: &mut Context,
        span: &Span,
        target: &Value,
        member: &str,
    ) -> Result<Option<Value>> {
        let host = self.host(span, target)?;
        match self.members.get(member) {
            Some(m) => {
                trace!("reading {}.{} as {}", self.type_name, member, m.name);
                Ok(Some(host.get_member(&m.name)?))
            }
            None => Ok(None),
        }
    }

    fn try_set_value(
        &self,
        _ctx: &mut Context,
        span: &Span,
        target: &Value,
        member: &str,
        value: Value,
    ) -> Result<bool> {
        let host = self.host(span, target)?;
        match self.members.get(member) {
            Some(m) if m.writable => {
                host.set_member(&m.name, value)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn members(&self, _ctx: &mut Context, _target: &Value) -> Result<Vec<Rc<str>>> {
        Ok(self.members.keys().cloned().collect())
    }

    fn has_member(
        &self,
        _ctx: &mut Context,
        _span: &Span,
        _target: &Value,
        member: &str,
    ) -> Result<bool> {
        Ok(self.members.contains_key(member))
    }
}
