// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::accessors::{
    EmptyAccessor, ListAccessor, MapAccessor, MemberAccessor, ObjectAccessor, ScriptAccessor,
};
use crate::host::HostObject;
use crate::source::Span;
use crate::value::{TypeKey, Value};

use core::any::TypeId;
use core::fmt;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};

/// Maps a host member name to the name expressions use for it.
pub type MemberRenamer = Rc<dyn Fn(&str) -> Rc<str>>;

/// Consulted when an accessor does not find a member on read.
pub type TryGetMember = Rc<dyn Fn(&mut Context, &Span, &Value, &str) -> Result<Option<Value>>>;

/// Evaluation switches. Deserializable so hosts can keep them in a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContextOptions {
    /// Reads against null or primitive targets return null instead of failing.
    pub relaxed_member_access: bool,

    /// Reading an unknown variable is an error instead of null.
    pub strict_variables: bool,
}

impl ContextOptions {
    pub fn from_json_str(json: &str) -> Result<ContextOptions> {
        Ok(serde_json::from_str(json)?)
    }

    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(yaml: &str) -> Result<ContextOptions> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// State of one evaluation: options, variables and member access configuration.
#[derive(Clone, Default)]
pub struct Context {
    options: ContextOptions,
    globals: BTreeMap<Rc<str>, Value>,

    registry: HashMap<TypeKey, Rc<dyn MemberAccessor>>,
    cache: HashMap<TypeKey, Rc<dyn MemberAccessor>>,

    try_get_member: Option<TryGetMember>,
    member_renamer: Option<MemberRenamer>,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("options", &self.options)
            .field("globals", &self.globals)
            .field("registry", &self.registry)
            .field("cache", &self.cache)
            .field("try_get_member", &self.try_get_member.is_some())
            .field("member_renamer", &self.member_renamer.is_some())
            .finish()
    }
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ContextOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &ContextOptions {
        &self.options
    }

    pub fn relaxed_member_access(&self) -> bool {
        self.options.relaxed_member_access
    }

    pub fn set_relaxed_member_access(&mut self, relaxed: bool) {
        self.options.relaxed_member_access = relaxed;
    }

    pub fn strict_variables(&self) -> bool {
        self.options.strict_variables
    }

    pub fn set_strict_variables(&mut self, strict: bool) {
        self.options.strict_variables = strict;
    }

    pub fn set_global(&mut self, name: &str, value: Value) {
        self.globals.insert(name.into(), value);
    }

    pub fn get_global(&self, name: &str) -> Option<Value> {
        self.globals.get(name).cloned()
    }

    pub fn remove_global(&mut self, name: &str) -> Option<Value> {
        self.globals.remove(name)
    }

    pub fn globals(&self) -> &BTreeMap<Rc<str>, Value> {
        &self.globals
    }

    /// Install the hook consulted when a member read finds nothing.
    ///
    /// The hook receives the same context, span, target and member name as the accessor
    /// did. Returning `Ok(None)` keeps the miss.
    pub fn set_try_get_member<F>(&mut self, try_get_member: F)
    where
        F: Fn(&mut Context, &Span, &Value, &str) -> Result<Option<Value>> + 'static,
    {
        self.try_get_member = Some(Rc::new(try_get_member));
    }

    pub fn clear_try_get_member(&mut self) {
        self.try_get_member = None;
    }

    pub fn try_get_member(&self) -> Option<TryGetMember> {
        self.try_get_member.clone()
    }

    /// Rename host members as seen by expressions. Accessors resolved so far are dropped.
    pub fn set_member_renamer<F>(&mut self, renamer: F)
    where
        F: Fn(&str) -> Rc<str> + 'static,
    {
        self.member_renamer = Some(Rc::new(renamer));
        self.cache.clear();
    }

    pub fn clear_member_renamer(&mut self) {
        self.member_renamer = None;
        self.cache.clear();
    }

    /// Use `accessor` for every host value of concrete type `T`.
    pub fn register_accessor<T: HostObject + 'static>(
        &mut self,
        accessor: Rc<dyn MemberAccessor>,
    ) {
        self.registry
            .insert(TypeKey::Host(TypeId::of::<T>()), accessor);
        self.cache.clear();
    }

    /// Accessor for the runtime shape of `value`. Total: null and primitives get the empty
    /// accessor. Resolutions are cached per shape for the lifetime of the context.
    pub fn get_member_accessor(&mut self, value: &Value) -> Rc<dyn MemberAccessor> {
        let key = value.type_key();
        if let Some(accessor) = self.cache.get(&key) {
            return accessor.clone();
        }

        let accessor: Rc<dyn MemberAccessor> = match value {
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                Rc::new(EmptyAccessor)
            }
            Value::Array(_) => Rc::new(ListAccessor),
            Value::Object(_) => Rc::new(MapAccessor),
            Value::Script(_) => Rc::new(ScriptAccessor),
            Value::Host(host) => match self.registry.get(&key) {
                Some(accessor) => {
                    debug!("using registered accessor for {}", host.type_name());
                    accessor.clone()
                }
                None => Rc::new(ObjectAccessor::new(
                    host.as_ref(),
                    self.member_renamer.as_ref(),
                )),
            },
        };

        debug!("resolved member accessor for {key:?}: {accessor:?}");
        self.cache.insert(key, accessor.clone());
        accessor
    }

    #[cfg(test)]
    pub(crate) fn cached_accessor_count(&self) -> usize {
        self.cache.len()
    }
}
