// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::ast::*;
use crate::source::{Source, Span};
use crate::value::Value;

use anyhow::{bail, Result};

/// Parser for dotted member paths: `root(.member)*`.
///
/// The root is `null`, `true`, `false`, a number, a double-quoted string or a variable
/// name. This is the subset of the expression language whose evaluation this crate owns.
pub struct Parser<'source> {
    source: &'source Source,
    text: &'source str,
    pos: usize,
}

impl<'source> Parser<'source> {
    pub fn new(source: &'source Source) -> Self {
        Self {
            source,
            text: source.contents(),
            pos: 0,
        }
    }

    pub fn parse(&mut self) -> Result<Expr> {
        self.skip_ws();
        let start = self.pos;
        let mut expr = self.parse_root()?;
        loop {
            self.skip_ws();
            if self.peek() != Some('.') {
                break;
            }
            self.pos += 1;
            self.skip_ws();
            let member = self.parse_ident()?;
            let span = self.source.span(start as u32, member.span.end)?;
            expr = Expr::Member(MemberExpr::new(span, expr, member));
        }

        if self.pos < self.text.len() {
            bail!(self.error_at(self.pos, "unexpected character"));
        }
        Ok(expr)
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.text[self.pos..].chars().nth(1)
    }

    fn skip_ws(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn skip_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn span(&self, start: usize) -> Result<Span> {
        self.source.span(start as u32, self.pos as u32)
    }

    fn error_at(&self, pos: usize, msg: &str) -> anyhow::Error {
        match self.source.span(pos as u32, pos as u32) {
            Ok(span) => span.error(msg),
            Err(e) => e,
        }
    }

    fn parse_ident(&mut self) -> Result<Ident> {
        let start = self.pos;
        self.skip_while(|c| c.is_alphanumeric() || c == '_');
        if start == self.pos {
            bail!(self.error_at(start, "expecting identifier"));
        }
        Ident::from_span(self.span(start)?)
    }

    fn parse_root(&mut self) -> Result<Expr> {
        let start = self.pos;
        match self.peek() {
            Some('"') => {
                let Some(len) = self.text[start + 1..].find('"') else {
                    bail!(self.error_at(start, "unmatched `\"`"));
                };
                let value = Value::from(&self.text[start + 1..start + 1 + len]);
                self.pos = start + len + 2;
                Ok(Expr::Literal {
                    span: self.span(start)?,
                    value,
                })
            }
            Some(c) if c.is_ascii_digit() || c == '-' => {
                self.pos += 1;
                self.skip_while(|c| c.is_ascii_digit());
                // A dot only continues the number when a digit follows it.
                if self.peek() == Some('.') && matches!(self.peek_second(), Some(c) if c.is_ascii_digit())
                {
                    self.pos += 1;
                    self.skip_while(|c| c.is_ascii_digit());
                }
                let span = self.span(start)?;
                let value = match Value::from_json_str(span.text()) {
                    Ok(v) => v,
                    Err(_) => bail!(span.error("invalid number")),
                };
                Ok(Expr::Literal { span, value })
            }
            Some(c) if c.is_alphabetic() || c == '_' => {
                let ident = self.parse_ident()?;
                let value = match ident.name.as_ref() {
                    "null" => Value::Null,
                    "true" => Value::Bool(true),
                    "false" => Value::Bool(false),
                    _ => return Ok(Expr::Var(ident)),
                };
                Ok(Expr::Literal {
                    span: ident.span,
                    value,
                })
            }
            _ => bail!(self.error_at(start, "expecting a value")),
        }
    }
}

/// Parse `text` as a member path in a source named `file`.
pub fn parse_path(file: &str, text: &str) -> Result<Expr> {
    let source = Source::from_contents(file.to_string(), text.to_string())?;
    Parser::new(&source).parse()
}
