//! Module: inline
//! Responsibility: the inline expression language used by sharding
//! configuration to spell out data-source and table name lists.
//! Does not own: what the names mean; rules and routing consume the output.
//!
//! `ds_${0..1}.t_order_${[0, 1]}` expands to
//! `ds_0.t_order_0, ds_0.t_order_1, ds_1.t_order_0, ds_1.t_order_1`.
//! `$->{...}` is accepted wherever `${...}` is.

mod ast;
mod error;
mod eval;
mod parse;
mod scanner;

#[cfg(test)]
mod tests;

use crate::{
    inline::{ast::Template, parse::Parser},
    obs::sink::{MetricsEvent, record},
};

// re-exports
pub use error::InlineExpressionError;
pub use parse::MAX_RANGE_LEN;

///
/// InlineExpression
///
/// Parsed inline expression: an immutable list of top-level segments.
/// Parsing rejects every malformed input, so expansion cannot fail and
/// always yields the same ordered names for the same source text.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InlineExpression {
    segments: Vec<Template>,
}

impl InlineExpression {
    /// Parse `source` without expanding it.
    pub fn parse(source: &str) -> Result<Self, InlineExpressionError> {
        let segments = Parser::parse_source(source).inspect_err(|_| {
            record(MetricsEvent::ExpressionRejected);
        })?;

        Ok(Self { segments })
    }

    /// Number of non-empty top-level (comma separated) segments.
    #[must_use]
    pub const fn segments(&self) -> usize {
        self.segments.len()
    }

    /// Expand every segment, left to right, into one ordered name list.
    #[must_use]
    pub fn evaluate(&self) -> Vec<String> {
        let names: Vec<String> = self.segments.iter().flat_map(eval::expand_template).collect();

        record(MetricsEvent::ExpressionEvaluated {
            segments: self.segments.len() as u64,
            outputs: names.len() as u64,
        });

        names
    }
}

/// Parse and expand an inline expression in one step.
///
/// `None` and empty input expand to an empty list.
pub fn evaluate(source: Option<&str>) -> Result<Vec<String>, InlineExpressionError> {
    match source {
        None => Ok(Vec::new()),
        Some(source) => Ok(InlineExpression::parse(source)?.evaluate()),
    }
}
