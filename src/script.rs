// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::context::Context;
use crate::source::Span;
use crate::value::{Map, Value};

use core::any::Any;
use core::cell::{Cell, RefCell};
use core::fmt;
use std::collections::BTreeMap;
use std::rc::Rc;

use anyhow::Result;

/// A value that resolves its own members.
///
/// Implementing this trait is an explicit opt-in: member access on a `Value::Script` is
/// always delegated to the value, never to a registered accessor.
pub trait ScriptValue: fmt::Debug {
    fn as_any(&self) -> &dyn Any;

    fn type_name(&self) -> &str {
        "object"
    }

    /// `Ok(None)` when the member does not exist.
    fn try_get_value(
        &self,
        ctx: &mut Context,
        span: &Span,
        member: &str,
    ) -> Result<Option<Value>>;

    /// `Ok(false)` when the member cannot be written.
    fn try_set_value(
        &self,
        ctx: &mut Context,
        span: &Span,
        member: &str,
        value: Value,
    ) -> Result<bool>;

    fn members(&self) -> Vec<Rc<str>>;

    fn has_member(&self, member: &str) -> bool {
        self.members().iter().any(|m| m.as_ref() == member)
    }

    /// Plain data view used when the value is serialized.
    fn snapshot(&self) -> Option<Map> {
        None
    }
}

#[derive(Debug, Clone)]
struct Slot {
    value: Value,
    readonly: bool,
}

/// String-keyed script object with per-member and whole-object read-only flags.
///
/// The read-only flags only restrict writes coming from expressions. The `set*` methods
/// are the host-side API and always succeed.
#[derive(Debug, Default)]
pub struct ScriptObject {
    slots: RefCell<BTreeMap<Rc<str>, Slot>>,
    readonly: Cell<bool>,
}

impl ScriptObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: Map) -> Self {
        let obj = Self::new();
        for (name, value) in map {
            obj.set(&name, value);
        }
        obj
    }

    pub fn set(&self, name: &str, value: Value) {
        self.set_with_readonly(name, value, false);
    }

    pub fn set_with_readonly(&self, name: &str, value: Value, readonly: bool) {
        self.slots
            .borrow_mut()
            .insert(name.into(), Slot { value, readonly });
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.slots.borrow().get(name).map(|s| s.value.clone())
    }

    pub fn remove(&self, name: &str) -> Option<Value> {
        self.slots.borrow_mut().remove(name).map(|s| s.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.borrow().contains_key(name)
    }

    /// Mark an existing member read-only or writable. Returns false if it does not exist.
    pub fn set_member_readonly(&self, name: &str, readonly: bool) -> bool {
        match self.slots.borrow_mut().get_mut(name) {
            Some(slot) => {
                slot.readonly = readonly;
                true
            }
            None => false,
        }
    }

    pub fn is_member_readonly(&self, name: &str) -> bool {
        self.slots
            .borrow()
            .get(name)
            .map(|s| s.readonly)
            .unwrap_or(false)
    }

    pub fn set_readonly(&self, readonly: bool) {
        self.readonly.set(readonly);
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly.get()
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }

    fn can_write(&self, name: &str) -> bool {
        !self.readonly.get() && !self.is_member_readonly(name)
    }
}

impl ScriptValue for ScriptObject {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn try_get_value(
        &self,
        _ctx: &mut Context,
        _span: &Span,
        member: &str,
    ) -> Result<Option<Value>> {
        Ok(self.get(member))
    }

    fn try_set_value(
        &self,
        _ctx: &mut Context,
        _span: &Span,
        member: &str,
        value: Value,
    ) -> Result<bool> {
        if !self.can_write(member) {
            return Ok(false);
        }
        self.set(member, value);
        Ok(true)
    }

    fn members(&self) -> Vec<Rc<str>> {
        self.slots.borrow().keys().cloned().collect()
    }

    fn has_member(&self, member: &str) -> bool {
        self.contains(member)
    }

    fn snapshot(&self) -> Option<Map> {
        Some(
            self.slots
                .borrow()
                .iter()
                .map(|(k, s)| (k.clone(), s.value.clone()))
                .collect(),
        )
    }
}
