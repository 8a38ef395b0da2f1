//! Module: inline::ast
//! Responsibility: immutable parsed form of inline expressions.
//! Does not own: parsing or evaluation.

///
/// Template
///
/// Literal text interleaved with placeholders. Top-level segments and
/// string literals inside placeholders share this shape.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Template {
    pub(crate) parts: Vec<TemplatePart>,
}

impl Template {
    pub(crate) fn push_text(&mut self, ch: char) {
        if let Some(TemplatePart::Text(text)) = self.parts.last_mut() {
            text.push(ch);
        } else {
            self.parts.push(TemplatePart::Text(ch.to_string()));
        }
    }

    pub(crate) fn push_placeholder(&mut self, expr: Expr) {
        self.parts.push(TemplatePart::Placeholder(expr));
    }

    /// Trim whitespace at the outer edges of the literal text.
    pub(crate) fn trim(&mut self) {
        if let Some(TemplatePart::Text(text)) = self.parts.first_mut() {
            *text = text.trim_start().to_string();
        }
        if let Some(TemplatePart::Text(text)) = self.parts.last_mut() {
            *text = text.trim_end().to_string();
        }
        self.parts
            .retain(|part| !matches!(part, TemplatePart::Text(text) if text.is_empty()));
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

///
/// TemplatePart
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum TemplatePart {
    Text(String),
    Placeholder(Expr),
}

///
/// Expr
///
/// Placeholder body. Arithmetic is folded while parsing, so only values
/// that can expand to strings remain.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Expr {
    Null,
    Int(i64),
    Str(Template),
    List(Vec<Self>),

    // inclusive on both ends, `lo <= hi`
    Range { lo: i64, hi: i64 },
}
