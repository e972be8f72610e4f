// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::value::Value;

use core::any::Any;
use core::fmt;
use std::rc::Rc;

use anyhow::Result;

/// A member published by a host object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostMember {
    pub name: Rc<str>,
    pub writable: bool,
}

impl HostMember {
    pub fn readonly(name: &str) -> Self {
        Self {
            name: name.into(),
            writable: false,
        }
    }

    pub fn writable(name: &str) -> Self {
        Self {
            name: name.into(),
            writable: true,
        }
    }
}

/// A native value whose members are discovered from a descriptor list instead of being
/// stored as script data.
///
/// `members` must describe the same list for every instance of the implementing type,
/// since the accessor built from it is cached per type. Writable members need interior
/// mutability in the implementation.
pub trait HostObject: fmt::Debug {
    fn as_any(&self) -> &dyn Any;

    fn type_name(&self) -> &str;

    fn members(&self) -> Vec<HostMember>;

    fn get_member(&self, name: &str) -> Result<Value>;

    fn set_member(&self, name: &str, value: Value) -> Result<()>;
}
