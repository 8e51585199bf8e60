//! Canonical text generation for flow specification ASTs
//!
//! Spacing depends on where a call appears. Calls written directly as a
//! source, a sink, a decorator or a block header are padded inside their
//! parens: `text( "/tmp/file" )`. Calls nested as argument values are not:
//! `baz(42)`. For a tree fresh from the parser, the output is the parsed
//! text byte for byte.

use std::fmt::{self, Display};

use crate::ast::{Argument, FunctionCall, Invocation, Literal, SinkExpr, SourceExpr, ValueExpr};

/// How a call with no arguments is written in padded position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyCall {
    /// `name()`
    #[default]
    Tight,
    /// `name( )`
    Spaced,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    pub empty_call: EmptyCall,
}

/// Where a call sits, which decides its paren spacing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    TopLevel,
    Nested,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Generator {
    options: GenerateOptions,
}

impl Generator {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn literal(&self, lit: &Literal) -> String {
        lit.text().to_string()
    }

    pub fn argument(&self, arg: &Argument) -> String {
        let mut out = String::new();
        self.push_argument(&mut out, arg);
        out
    }

    pub fn source(&self, source: &SourceExpr) -> String {
        let mut out = String::new();
        self.push_invocation(&mut out, source);
        out
    }

    pub fn sink(&self, sink: &SinkExpr) -> String {
        let mut out = String::new();
        self.push_sink(&mut out, sink);
        out
    }

    fn push_sink(&self, out: &mut String, sink: &SinkExpr) {
        match sink {
            SinkExpr::Simple(name) => out.push_str(name),
            SinkExpr::Call(call) => self.push_call(out, call, Position::TopLevel),
            SinkExpr::Decorated { decorator, child } => {
                out.push_str("{ ");
                self.push_invocation(out, decorator);
                out.push_str(" => ");
                self.push_sink(out, child);
                out.push_str(" }");
            }
            SinkExpr::Multi(children) => {
                if children.is_empty() {
                    out.push_str("[ ]");
                    return;
                }
                out.push_str("[ ");
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.push_sink(out, child);
                }
                out.push_str(" ]");
            }
            SinkExpr::Failover { primary, backup } => {
                out.push_str("< ");
                self.push_sink(out, primary);
                out.push_str(" ? ");
                self.push_sink(out, backup);
                out.push_str(" >");
            }
            SinkExpr::Block { header, child } => {
                self.push_call(out, header, Position::TopLevel);
                out.push_str(" { ");
                self.push_sink(out, child);
                out.push_str(" }");
            }
        }
    }

    fn push_invocation(&self, out: &mut String, invocation: &Invocation) {
        match invocation {
            Invocation::Ident(name) => out.push_str(name),
            Invocation::Call(call) => self.push_call(out, call, Position::TopLevel),
        }
    }

    fn push_call(&self, out: &mut String, call: &FunctionCall, position: Position) {
        out.push_str(&call.name);
        out.push('(');
        let padded = position == Position::TopLevel;
        if call.args.is_empty() {
            if padded && self.options.empty_call == EmptyCall::Spaced {
                out.push(' ');
            }
        } else {
            if padded {
                out.push(' ');
            }
            for (i, arg) in call.args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                self.push_argument(out, arg);
            }
            if padded {
                out.push(' ');
            }
        }
        out.push(')');
    }

    fn push_argument(&self, out: &mut String, arg: &Argument) {
        match arg {
            Argument::Positional(value) => self.push_value(out, value),
            Argument::Keyword(name, value) => {
                out.push_str(name);
                out.push('=');
                self.push_value(out, value);
            }
        }
    }

    fn push_value(&self, out: &mut String, value: &ValueExpr) {
        match value {
            ValueExpr::Literal(lit) => out.push_str(lit.text()),
            ValueExpr::Call(call) => self.push_call(out, call, Position::Nested),
        }
    }
}

/// Literal text, exactly as parsed
pub fn generate_literal(lit: &Literal) -> String {
    Generator::default().literal(lit)
}

/// Argument text; calls inside it are unpadded: `foo("bar", 42)`
pub fn generate_argument(arg: &Argument) -> String {
    Generator::default().argument(arg)
}

pub fn generate_source(source: &SourceExpr) -> String {
    Generator::default().source(source)
}

pub fn generate_sink(sink: &SinkExpr) -> String {
    Generator::default().sink(sink)
}

// ============ Display ============

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl Display for ValueExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        Generator::default().push_value(&mut out, self);
        f.write_str(&out)
    }
}

impl Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&generate_argument(self))
    }
}

/// Nested style; use `Invocation` or `SinkExpr` for padded calls
impl Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        Generator::default().push_call(&mut out, self, Position::Nested);
        f.write_str(&out)
    }
}

impl Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&generate_source(self))
    }
}

impl Display for SinkExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&generate_sink(self))
    }
}
