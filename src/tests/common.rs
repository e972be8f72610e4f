// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Fixtures shared by the unit tests.

use crate::unstable::*;
use crate::*;

use core::any::Any;
use core::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::{bail, Result};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn expr(text: &str) -> Expr {
    parse_path("test.txt", text).unwrap()
}

pub fn member(text: &str) -> MemberExpr {
    match expr(text) {
        Expr::Member(m) => m,
        e => panic!("`{e}` is not a member expression"),
    }
}

pub fn read(ctx: &mut Context, text: &str) -> Result<Value> {
    ctx.get_value(&expr(text))
}

pub fn write(ctx: &mut Context, text: &str, value: Value) -> Result<()> {
    ctx.set_value(&expr(text), value)
}

pub fn runtime_error(err: &anyhow::Error) -> &RuntimeError {
    match err.downcast_ref::<RuntimeError>() {
        Some(e) => e,
        None => panic!("expected a runtime error, got {err}"),
    }
}

pub fn object(json: &str) -> Value {
    Value::from_json_str(json).unwrap()
}

/// Host type with a writable `Name` and a read-only `Id`.
#[derive(Debug)]
pub struct Person {
    pub name: RefCell<Value>,
    pub id: u64,
    pub reads: Cell<u32>,
}

impl Person {
    pub fn new(name: &str, id: u64) -> Self {
        Self {
            name: RefCell::new(Value::from(name)),
            id,
            reads: Cell::new(0),
        }
    }
}

impl HostObject for Person {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &str {
        "Person"
    }

    fn members(&self) -> Vec<HostMember> {
        vec![HostMember::writable("Name"), HostMember::readonly("Id")]
    }

    fn get_member(&self, name: &str) -> Result<Value> {
        self.reads.set(self.reads.get() + 1);
        match name {
            "Name" => Ok(self.name.borrow().clone()),
            "Id" => Ok(Value::from(self.id)),
            _ => bail!("Person has no member {name}"),
        }
    }

    fn set_member(&self, name: &str, value: Value) -> Result<()> {
        match name {
            "Name" => {
                *self.name.borrow_mut() = value;
                Ok(())
            }
            _ => bail!("Person member {name} is readonly"),
        }
    }
}

/// Host type with a single read-only member that cannot be read.
#[derive(Debug)]
pub struct Faulty;

impl HostObject for Faulty {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &str {
        "Faulty"
    }

    fn members(&self) -> Vec<HostMember> {
        vec![HostMember::readonly("X")]
    }

    fn get_member(&self, name: &str) -> Result<Value> {
        bail!("cannot read {name}")
    }

    fn set_member(&self, name: &str, _value: Value) -> Result<()> {
        bail!("cannot write {name}")
    }
}

/// Script value whose every access fails.
#[derive(Debug)]
pub struct Broken;

impl ScriptValue for Broken {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &str {
        "broken"
    }

    fn try_get_value(
        &self,
        _ctx: &mut Context,
        _span: &Span,
        member: &str,
    ) -> Result<Option<Value>> {
        bail!("cannot read {member} from a broken value")
    }

    fn try_set_value(
        &self,
        _ctx: &mut Context,
        _span: &Span,
        member: &str,
        _value: Value,
    ) -> Result<bool> {
        bail!("cannot write {member} on a broken value")
    }

    fn members(&self) -> Vec<Rc<str>> {
        vec![]
    }
}

pub fn same_accessor(
    a: &Rc<dyn accessors::MemberAccessor>,
    b: &Rc<dyn accessors::MemberAccessor>,
) -> bool {
    Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
}
