//! Parser for flow specifications
//!
//! Four entry points, one per start rule: literal, argument, source and sink.
//! Each accepts exactly one complete production (surrounding whitespace
//! aside) and fails on anything else. There is no recovery: the first error
//! aborts the parse.

use std::fmt;

use thiserror::Error;
use winnow::ascii::{digit0, digit1, hex_digit1, multispace0};
use winnow::combinator::{alt, cut_err, fail, opt, peek, preceded, repeat, separated, terminated};
use winnow::error::{ContextError, ErrMode, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, one_of, take_till, take_while};

use crate::ast::{Argument, FunctionCall, Invocation, Literal, SinkExpr, SourceExpr, ValueExpr};

type PResult<T> = winnow::ModalResult<T>;

/// Grammar start rule a parse was attempted with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryPoint {
    Literal,
    Argument,
    Source,
    Sink,
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntryPoint::Literal => "literal",
            EntryPoint::Argument => "argument",
            EntryPoint::Source => "source",
            EntryPoint::Sink => "sink",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{entry} syntax error: {message} (line {line}, column {column}, offset {offset})")]
pub struct SyntaxError {
    pub entry: EntryPoint,
    pub message: String,
    /// Byte offset into the text handed to the parser
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

/// Parse a single literal: `0x1234`, `12234`, `.90`, `"a string"`
pub fn parse_literal(input: &str) -> Result<Literal, SyntaxError> {
    parse_entry(EntryPoint::Literal, input, literal)
}

/// Parse a single argument: `42`, `foo("bar", 42)`, `append=1`
pub fn parse_argument(input: &str) -> Result<Argument, SyntaxError> {
    parse_entry(EntryPoint::Argument, input, argument)
}

/// Parse a source: `twitter`, `text( "/tmp/file" )`
pub fn parse_source(input: &str) -> Result<SourceExpr, SyntaxError> {
    parse_entry(EntryPoint::Source, input, invocation)
}

/// Parse a sink expression, including decorators, fan-out, failover and blocks
pub fn parse_sink(input: &str) -> Result<SinkExpr, SyntaxError> {
    parse_entry(EntryPoint::Sink, input, sink)
}

fn parse_entry<O>(
    entry: EntryPoint,
    input: &str,
    rule: fn(&mut &str) -> PResult<O>,
) -> Result<O, SyntaxError> {
    log::trace!("parsing {} ({} bytes)", entry, input.len());

    let mut stream = input;
    let error = match preceded(ws, rule).parse_next(&mut stream) {
        Ok(parsed) => {
            let rest = stream.trim_start_matches(WHITESPACE);
            if rest.is_empty() {
                return Ok(parsed);
            }
            build_syntax_error(
                entry,
                "unexpected trailing input".to_string(),
                input,
                input.len() - rest.len(),
            )
        }
        Err(e) => build_syntax_error(entry, describe(&e), input, input.len() - stream.len()),
    };

    log::debug!("{}", error);
    Err(error)
}

fn describe(err: &ErrMode<ContextError>) -> String {
    match err {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => {
            let rendered = e.to_string();
            if rendered.is_empty() {
                "unexpected input".to_string()
            } else {
                rendered.replace('\n', ": ")
            }
        }
        ErrMode::Incomplete(_) => "unexpected end of input".to_string(),
    }
}

fn build_syntax_error(
    entry: EntryPoint,
    message: String,
    input: &str,
    offset: usize,
) -> SyntaxError {
    let (line, column) = offset_to_line_column(input, offset);
    SyntaxError {
        entry,
        message,
        offset,
        line,
        column,
    }
}

fn offset_to_line_column(input: &str, offset: usize) -> (usize, usize) {
    let bounded = offset.min(input.len());
    let mut line = 1usize;
    let mut column = 1usize;

    for ch in input[..bounded].chars() {
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }

    (line, column)
}

fn expected(what: &'static str) -> StrContext {
    StrContext::Expected(StrContextValue::Description(what))
}

fn punct(c: char) -> StrContext {
    StrContext::Expected(StrContextValue::CharLiteral(c))
}

// ============ Sinks ============

fn sink(input: &mut &str) -> PResult<SinkExpr> {
    alt((decorated_sink, multi_sink, failover_sink, named_sink))
        .context(StrContext::Label("sink"))
        .parse_next(input)
}

/// `{ decorator => child }`
fn decorated_sink(input: &mut &str) -> PResult<SinkExpr> {
    ('{', ws).parse_next(input)?;
    cut_err((
        invocation,
        ws,
        "=>".context(StrContext::Expected(StrContextValue::StringLiteral("=>"))),
        ws,
        sink,
        ws,
        '}'.context(punct('}')),
    ))
    .map(|(decorator, _, _, _, child, _, _)| SinkExpr::decorated(decorator, child))
    .parse_next(input)
}

/// `[ a, b, c ]`
fn multi_sink(input: &mut &str) -> PResult<SinkExpr> {
    ('[', ws).parse_next(input)?;
    cut_err(terminated(
        separated(1.., sink, (ws, ',', ws)),
        (ws, ']'.context(punct(']'))),
    ))
    .map(SinkExpr::Multi)
    .parse_next(input)
}

/// `< primary ? backup >`
fn failover_sink(input: &mut &str) -> PResult<SinkExpr> {
    ('<', ws).parse_next(input)?;
    cut_err((
        sink,
        ws,
        '?'.context(punct('?')),
        ws,
        sink,
        ws,
        '>'.context(punct('>')),
    ))
    .map(|(primary, _, _, _, backup, _, _)| SinkExpr::failover(primary, backup))
    .parse_next(input)
}

/// `null`, `thriftSink( 1234 )` or `roll( 12345 ) { child }`
///
/// A call directly followed by `{` opens a block; one token of lookahead
/// after the closing paren decides.
fn named_sink(input: &mut &str) -> PResult<SinkExpr> {
    let name = identifier.parse_next(input)?;
    let Some(args) = opt(preceded(ws, arguments)).parse_next(input)? else {
        return Ok(SinkExpr::Simple(name));
    };
    let header = FunctionCall { name, args };

    let body = opt(preceded(
        (ws, '{', ws),
        cut_err(terminated(sink, (ws, '}'.context(punct('}'))))),
    ))
    .parse_next(input)?;

    Ok(match body {
        Some(child) => SinkExpr::block(header, child),
        None => SinkExpr::Call(header),
    })
}

// ============ Sources and calls ============

/// Bare identifier or call; the source rule and the decorator position
fn invocation(input: &mut &str) -> PResult<Invocation> {
    (identifier, opt(preceded(ws, arguments)))
        .map(|(name, args)| match args {
            Some(args) => Invocation::Call(FunctionCall { name, args }),
            None => Invocation::Ident(name),
        })
        .parse_next(input)
}

fn call(input: &mut &str) -> PResult<FunctionCall> {
    (identifier, ws, arguments)
        .map(|(name, _, args)| FunctionCall { name, args })
        .parse_next(input)
}

/// Parenthesized argument list. Committed once `(` is seen.
fn arguments(input: &mut &str) -> PResult<Vec<Argument>> {
    preceded(
        ('(', ws),
        cut_err(terminated(argument_list, (ws, ')'.context(punct(')'))))),
    )
    .parse_next(input)
}

fn argument_list(input: &mut &str) -> PResult<Vec<Argument>> {
    let args: Vec<Argument> = separated(0.., argument, (ws, ',', ws)).parse_next(input)?;
    if positional_first(&args) {
        Ok(args)
    } else {
        cut_err(fail.context(expected(
            "positional arguments before keyword arguments",
        )))
        .parse_next(input)
    }
}

fn positional_first(args: &[Argument]) -> bool {
    let first_keyword = args.iter().position(Argument::is_keyword);
    match first_keyword {
        Some(idx) => args[idx..].iter().all(Argument::is_keyword),
        None => true,
    }
}

fn argument(input: &mut &str) -> PResult<Argument> {
    alt((
        // keyword arg: name=value
        (identifier, ws, '=', ws, cut_err(value))
            .map(|(name, _, _, _, v)| Argument::Keyword(name, v)),
        // positional arg
        value.map(Argument::Positional),
    ))
    .parse_next(input)
}

fn value(input: &mut &str) -> PResult<ValueExpr> {
    alt((literal.map(ValueExpr::Literal), call.map(ValueExpr::Call)))
        .context(expected("literal or function call"))
        .parse_next(input)
}

// ============ Identifiers ============

fn identifier(input: &mut &str) -> PResult<String> {
    (
        one_of(|c: char| c.is_ascii_alphabetic()),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .map(String::from)
        .context(expected("identifier"))
        .parse_next(input)
}

// ============ Literals ============

fn literal(input: &mut &str) -> PResult<Literal> {
    alt((hex_int, double, dec_int, string))
        .context(StrContext::Label("literal"))
        .parse_next(input)
}

/// `0x1234`; the radix marker is kept in the literal text
fn hex_int(input: &mut &str) -> PResult<Literal> {
    preceded(
        alt(("0x", "0X")),
        cut_err(
            hex_digit1
                .try_map(|digits: &str| i64::from_str_radix(digits, 16))
                .context(expected("hexadecimal integer in 64-bit range")),
        ),
    )
    .with_taken()
    .map(|(value, text): (i64, &str)| Literal::Int {
        text: text.to_string(),
        value,
    })
    .parse_next(input)
}

fn dec_int(input: &mut &str) -> PResult<Literal> {
    preceded(
        peek(digit1),
        cut_err(
            digit1
                .try_map(|s: &str| s.parse::<i64>())
                .context(expected("integer in 64-bit range")),
        ),
    )
    .with_taken()
    .map(|(value, text): (i64, &str)| Literal::Int {
        text: text.to_string(),
        value,
    })
    .parse_next(input)
}

/// `1.5`, `.90`; leading digits are optional, trailing ones are not
fn double(input: &mut &str) -> PResult<Literal> {
    (digit0, '.', digit1)
        .take()
        .map(|text: &str| Literal::Double {
            text: text.to_string(),
        })
        .parse_next(input)
}

/// Quoted string, kept verbatim with its quotes and escapes
fn string(input: &mut &str) -> PResult<Literal> {
    ('"', cut_err((string_body, '"'.context(expected("closing quote")))))
        .take()
        .map(|text: &str| Literal::String {
            text: text.to_string(),
        })
        .parse_next(input)
}

fn string_body(input: &mut &str) -> PResult<()> {
    repeat(
        0..,
        alt((
            preceded('\\', any).void(),
            take_till(1.., ['"', '\\']).void(),
        )),
    )
    .parse_next(input)
}

// ============ Whitespace ============

const WHITESPACE: [char; 4] = [' ', '\t', '\r', '\n'];

fn ws(input: &mut &str) -> PResult<()> {
    multispace0.void().parse_next(input)
}

// ============ Sanity Tests ============
// Round trips through the generator live in tests/integration.rs
