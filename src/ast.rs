// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::source::Span;
use crate::value::Value;

use core::fmt;
use std::rc::Rc;

use anyhow::{bail, Result};

/// Identifier token: a variable name or the member name right of a dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub span: Span,
    pub name: Rc<str>,
}

impl Ident {
    /// Identifiers start with a letter or `_` and continue with letters, digits or `_`.
    pub fn new(span: Span, name: &str) -> Result<Ident> {
        let mut chars = name.chars();
        let valid = match chars.next() {
            None => bail!(span.error("identifier cannot be empty")),
            Some(c) => {
                (c.is_alphabetic() || c == '_') && chars.all(|c| c.is_alphanumeric() || c == '_')
            }
        };
        if !valid {
            bail!(span.error(&format!("invalid identifier `{name}`")));
        }
        Ok(Ident {
            span,
            name: name.into(),
        })
    }

    /// Identifier whose text is exactly its span.
    pub fn from_span(span: Span) -> Result<Ident> {
        let name = span.text().to_string();
        Self::new(span, &name)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone)]
pub enum Expr {
    Literal { span: Span, value: Value },

    Var(Ident),

    Member(MemberExpr),
}

impl Expr {
    pub fn span(&self) -> &Span {
        match self {
            Expr::Literal { span, .. } => span,
            Expr::Var(ident) => &ident.span,
            Expr::Member(m) => &m.span,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Literals print as written, never through their value.
            Expr::Literal { span, .. } => f.write_str(span.text()),
            Expr::Var(ident) => write!(f, "{ident}"),
            Expr::Member(m) => write!(f, "{m}"),
        }
    }
}

/// `target.member`
#[derive(Debug, Clone)]
pub struct MemberExpr {
    pub span: Span,
    pub target: Box<Expr>,
    pub member: Ident,
}

impl MemberExpr {
    pub fn new(span: Span, target: Expr, member: Ident) -> MemberExpr {
        MemberExpr {
            span,
            target: Box::new(target),
            member,
        }
    }

    /// Name of the variable the member chain is rooted at, `a` for `a.b.c`.
    pub fn first_path(&self) -> Option<&str> {
        let mut target = self.target.as_ref();
        loop {
            match target {
                Expr::Var(ident) => return Some(&ident.name),
                Expr::Member(m) => target = m.target.as_ref(),
                Expr::Literal { .. } => return None,
            }
        }
    }
}

impl fmt::Display for MemberExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.target, self.member)
    }
}
