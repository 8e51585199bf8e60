//! Sink expressions
//!
//! One variant per surface form. `Decorated` and `Block` mean much the same
//! thing to a pipeline builder but are written differently, so both are kept.

use serde::{Deserialize, Serialize};

use super::{FunctionCall, Invocation};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkExpr {
    /// Bare name: `null`
    Simple(String),

    /// Named sink with arguments: `thriftSink( 1234 )`
    Call(FunctionCall),

    /// Decorator wrapping a sink: `{ flakey( .90 ) => null }`
    Decorated {
        decorator: Invocation,
        child: Box<SinkExpr>,
    },

    /// Fan-out: `[ a, b, c ]`
    Multi(Vec<SinkExpr>),

    /// Primary with backup: `< a ? b >`
    Failover {
        primary: Box<SinkExpr>,
        backup: Box<SinkExpr>,
    },

    /// Parametrized wrapper: `roll( 12345 ) { counter( "foo" ) }`
    Block {
        header: FunctionCall,
        child: Box<SinkExpr>,
    },
}

impl SinkExpr {
    pub fn decorated(decorator: impl Into<Invocation>, child: SinkExpr) -> Self {
        SinkExpr::Decorated {
            decorator: decorator.into(),
            child: Box::new(child),
        }
    }

    pub fn multi(children: Vec<SinkExpr>) -> Self {
        SinkExpr::Multi(children)
    }

    pub fn failover(primary: SinkExpr, backup: SinkExpr) -> Self {
        SinkExpr::Failover {
            primary: Box::new(primary),
            backup: Box::new(backup),
        }
    }

    pub fn block(header: FunctionCall, child: SinkExpr) -> Self {
        SinkExpr::Block {
            header,
            child: Box::new(child),
        }
    }

    /// Variant name, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            SinkExpr::Simple(_) => "simple",
            SinkExpr::Call(_) => "call",
            SinkExpr::Decorated { .. } => "decorated",
            SinkExpr::Multi(_) => "multi",
            SinkExpr::Failover { .. } => "failover",
            SinkExpr::Block { .. } => "block",
        }
    }

    /// Direct child sinks in written order
    pub fn children(&self) -> Vec<&SinkExpr> {
        match self {
            SinkExpr::Simple(_) | SinkExpr::Call(_) => Vec::new(),
            SinkExpr::Decorated { child, .. } | SinkExpr::Block { child, .. } => {
                vec![child.as_ref()]
            }
            SinkExpr::Multi(children) => children.iter().collect(),
            SinkExpr::Failover { primary, backup } => vec![primary.as_ref(), backup.as_ref()],
        }
    }
}
