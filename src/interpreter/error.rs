// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::source::Span;

use core::fmt;

use thiserror::Error;

/// Failures raised by the evaluator itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeErrorKind {
    /// Member access on a null target.
    #[error("Object `{target}` is null. Cannot access member: {path}")]
    NullTarget { target: String, path: String },

    /// Member access on a string, number or bool.
    #[error("Cannot get or set a member on the primitive `{value}/{type_name}` when accessing member: {path}")]
    PrimitiveTarget {
        value: String,
        type_name: String,
        path: String,
    },

    #[error("Cannot set a value for the readonly member: {path}")]
    ReadonlyMember { path: String },

    #[error("The variable `{name}` was not found")]
    UndefinedVariable { name: String },

    #[error("Cannot assign to `{expr}`")]
    InvalidAssignmentTarget { expr: String },
}

/// A [`RuntimeErrorKind`] located in the source.
///
/// The location is copied out of the span and the diagnostic rendered up front, so the
/// error can travel inside an `anyhow::Error`. Recover it with
/// `downcast_ref::<RuntimeError>()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub file: String,
    pub line: u32,
    pub col: u32,
    pub start: u32,
    pub end: u32,
    rendered: String,
}

impl RuntimeError {
    pub fn new(span: &Span, kind: RuntimeErrorKind) -> RuntimeError {
        let rendered = span.message("error", &kind.to_string());
        RuntimeError {
            kind,
            file: span.source.file().clone(),
            line: span.line,
            col: span.col,
            start: span.start,
            end: span.end,
            rendered,
        }
    }

    pub fn kind(&self) -> &RuntimeErrorKind {
        &self.kind
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl std::error::Error for RuntimeError {}
