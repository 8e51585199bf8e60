//! AST types for flow specifications
//!
//! Split into:
//! - this module: literals, arguments and calls shared by every rule
//! - `sink`: the sink composition forms
//!
//! Nodes are built once by the parser and never mutated. Literals keep the
//! text they were written with, so generating a parsed tree reproduces the
//! input exactly.

pub mod sink;

use serde::{Deserialize, Serialize};

pub use sink::SinkExpr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    /// Decimal or hex integer: `42`, `0x1234`
    Int { text: String, value: i64 },

    /// Floating point, as written: `1.5`, `.90`
    Double { text: String },

    /// String literal including its quotes: `"/tmp/file"`
    String { text: String },
}

impl Literal {
    /// Decimal integer literal
    pub fn int(value: i64) -> Self {
        Literal::Int {
            text: value.to_string(),
            value,
        }
    }

    pub fn double(text: impl Into<String>) -> Self {
        Literal::Double { text: text.into() }
    }

    /// String literal holding `contents`, quoted and escaped
    pub fn string(contents: &str) -> Self {
        Literal::String {
            text: crate::value::quote(contents),
        }
    }

    /// The literal exactly as it appears in spec text
    pub fn text(&self) -> &str {
        match self {
            Literal::Int { text, .. } | Literal::Double { text } | Literal::String { text } => {
                text
            }
        }
    }
}

/// Value of an argument: `42`, `"foo"`, `baz(42)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueExpr {
    Literal(Literal),
    Call(FunctionCall),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Argument {
    Positional(ValueExpr),
    Keyword(String, ValueExpr),
}

impl Argument {
    pub fn positional(value: impl Into<ValueExpr>) -> Self {
        Argument::Positional(value.into())
    }

    pub fn keyword(name: impl Into<String>, value: impl Into<ValueExpr>) -> Self {
        Argument::Keyword(name.into(), value.into())
    }

    pub fn value(&self) -> &ValueExpr {
        match self {
            Argument::Positional(value) | Argument::Keyword(_, value) => value,
        }
    }

    pub fn is_keyword(&self) -> bool {
        matches!(self, Argument::Keyword(..))
    }
}

impl From<Literal> for ValueExpr {
    fn from(lit: Literal) -> Self {
        ValueExpr::Literal(lit)
    }
}

impl From<FunctionCall> for ValueExpr {
    fn from(call: FunctionCall) -> Self {
        ValueExpr::Call(call)
    }
}

/// Named call with ordered arguments: `text( "/tmp/file", append=1 )`
///
/// Positional arguments always precede keyword arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<Argument>,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, args: Vec<Argument>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Positional arguments in order
    pub fn positional(&self) -> impl Iterator<Item = &ValueExpr> {
        self.args.iter().filter_map(|arg| match arg {
            Argument::Positional(value) => Some(value),
            Argument::Keyword(..) => None,
        })
    }

    /// Value bound to keyword `name`, if any
    pub fn keyword(&self, name: &str) -> Option<&ValueExpr> {
        self.args.iter().find_map(|arg| match arg {
            Argument::Keyword(k, value) if k == name => Some(value),
            _ => None,
        })
    }
}

/// A bare name or a call. Used for sources and for decorators, which may be
/// written either way: `twitter`, `text( "/tmp/file" )`, `{ stubbornAppend => ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Invocation {
    Ident(String),
    Call(FunctionCall),
}

pub type SourceExpr = Invocation;

impl Invocation {
    pub fn name(&self) -> &str {
        match self {
            Invocation::Ident(name) => name,
            Invocation::Call(call) => &call.name,
        }
    }

    pub fn args(&self) -> &[Argument] {
        match self {
            Invocation::Ident(_) => &[],
            Invocation::Call(call) => &call.args,
        }
    }
}

impl From<FunctionCall> for Invocation {
    fn from(call: FunctionCall) -> Self {
        Invocation::Call(call)
    }
}
