//! Decoding literal text into values
//!
//! Pipeline builders need the value behind a literal (the integer, the
//! unquoted string). The generator never uses this: it writes literal
//! text back as written.

use thiserror::Error;

use crate::ast::Literal;

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Int(i64),
    Double(f64),
    Str(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("invalid double literal: {0}")]
    InvalidDouble(String),
    #[error("string literal is not quoted: {0}")]
    Unquoted(String),
}

impl Literal {
    /// Decode the literal. Only fails for hand-built literals whose text
    /// the parser would not have accepted.
    pub fn value(&self) -> Result<LiteralValue, ValueError> {
        match self {
            Literal::Int { value, .. } => Ok(LiteralValue::Int(*value)),
            Literal::Double { text } => text
                .parse::<f64>()
                .map(LiteralValue::Double)
                .map_err(|_| ValueError::InvalidDouble(text.clone())),
            Literal::String { text } => {
                let inner = text
                    .strip_prefix('"')
                    .and_then(|rest| rest.strip_suffix('"'))
                    .ok_or_else(|| ValueError::Unquoted(text.clone()))?;
                Ok(LiteralValue::Str(unescape(inner)))
            }
        }
    }
}

/// Unknown escapes pass through as the escaped character
fn unescape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('0') => result.push('\0'),
            Some(escaped) => result.push(escaped),
            None => result.push('\\'),
        }
    }
    result
}

/// Quote and escape `s` as a string literal
pub(crate) fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
