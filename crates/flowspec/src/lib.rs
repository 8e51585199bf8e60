//! flowspec - grammar, AST and generator for event pipeline specifications
//!
//! A flow specification names the sources and sinks of an event-collection
//! pipeline and how sinks are composed:
//!
//! - `null`, `thriftSink( 1234 )` → plain sinks
//! - `{ flakey( .90 ) => null }` → decorator wrapping a sink
//! - `[ counter( "foo" ), counter( "bar" ) ]` → fan-out
//! - `< primary ? backup >` → failover
//! - `roll( 12345 ) { counter( "foo" ) }` → block wrapping a sink
//!
//! ## Quick Start
//!
//! ```ignore
//! use flowspec::{parse_sink, generate_sink};
//!
//! let tree = parse_sink(r#"{ intervalSampler( 20 ) => thriftSink( 1234 ) }"#)?;
//! assert_eq!(generate_sink(&tree), r#"{ intervalSampler( 20 ) => thriftSink( 1234 ) }"#);
//! ```
//!
//! Parsing then generating reproduces canonical text exactly; names are
//! opaque and nothing is resolved against a registry.

pub mod ast;
mod generate;
mod parse;
mod value;

use thiserror::Error;

// ============ Primary Public API ============

pub use ast::{Argument, FunctionCall, Invocation, Literal, SinkExpr, SourceExpr, ValueExpr};
pub use generate::{
    EmptyCall, GenerateOptions, Generator, generate_argument, generate_literal, generate_sink,
    generate_source,
};
pub use parse::{EntryPoint, SyntaxError, parse_argument, parse_literal, parse_sink, parse_source};
pub use value::{LiteralValue, ValueError};

/// Parse `text` with the given start rule and write it back in canonical form
pub fn canonicalize(
    entry: EntryPoint,
    text: &str,
    options: GenerateOptions,
) -> Result<String, SyntaxError> {
    let generator = Generator::new(options);
    let out = match entry {
        EntryPoint::Literal => generator.literal(&parse_literal(text)?),
        EntryPoint::Argument => generator.argument(&parse_argument(text)?),
        EntryPoint::Source => generator.source(&parse_source(text)?),
        EntryPoint::Sink => generator.sink(&parse_sink(text)?),
    };
    Ok(out)
}

// ============ Errors ============

#[derive(Error, Debug)]
pub enum FlowSpecError {
    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("Value error: {0}")]
    Value(#[from] ValueError),
}

/// Parse a literal and decode its value, as a pipeline builder binding
/// arguments would
pub fn literal_value(text: &str) -> Result<LiteralValue, FlowSpecError> {
    Ok(parse_literal(text)?.value()?)
}
