// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

// Use README.md as crate documentation.
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

pub mod accessors;
mod ast;
mod context;
mod host;
mod interpreter;
mod number;
mod parser;
mod script;
mod source;
mod value;

pub use context::{Context, ContextOptions, MemberRenamer, TryGetMember};
pub use host::{HostMember, HostObject};
pub use interpreter::{RuntimeError, RuntimeErrorKind};
pub use number::Number;
pub use script::{ScriptObject, ScriptValue};
pub use source::{Source, Span};
pub use value::{Map, TypeKey, Value};

/// Items in `unstable` are likely to change.
pub mod unstable {
    pub use crate::ast::*;
    pub use crate::parser::*;
}

#[cfg(test)]
mod tests;
