// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Tree walker for expressions: literals, variables and member access.

use crate::ast::*;
use crate::context::Context;
use crate::value::*;

use anyhow::Result;
use log::trace;

pub mod error;
mod member;

pub use error::{RuntimeError, RuntimeErrorKind};

impl Context {
    /// Evaluate `expr`.
    pub fn get_value(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(value.clone()),
            Expr::Var(ident) => self.lookup_var(ident),
            Expr::Member(m) => m.get_value(self),
        }
    }

    /// Assign `value` to the location denoted by `expr`.
    pub fn set_value(&mut self, expr: &Expr, value: Value) -> Result<()> {
        match expr {
            Expr::Var(ident) => {
                trace!("assigning variable {}", ident.name);
                self.set_global(&ident.name, value);
                Ok(())
            }
            Expr::Member(m) => m.set_value(self, value),
            Expr::Literal { span, .. } => Err(RuntimeError::new(
                span,
                RuntimeErrorKind::InvalidAssignmentTarget {
                    expr: expr.to_string(),
                },
            )
            .into()),
        }
    }

    fn lookup_var(&self, ident: &Ident) -> Result<Value> {
        match self.get_global(&ident.name) {
            Some(v) => Ok(v),
            None if self.strict_variables() => Err(RuntimeError::new(
                &ident.span,
                RuntimeErrorKind::UndefinedVariable {
                    name: ident.name.to_string(),
                },
            )
            .into()),
            None => Ok(Value::Null),
        }
    }
}
