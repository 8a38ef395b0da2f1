//! Module: inline::parse
//! Responsibility: recursive-descent parsing of inline expressions into
//! immutable templates, folding integer arithmetic on the way.
//! Does not own: expansion of templates into names.

use crate::inline::{
    InlineExpressionError,
    ast::{Expr, Template},
    scanner::Scanner,
};

/// Most values a single range may expand to.
pub const MAX_RANGE_LEN: u64 = 1 << 16;

///
/// TemplateEnd
///
/// What terminates the template currently being scanned.
///

#[derive(Clone, Copy)]
enum TemplateEnd {
    // top-level segment: `,` outside any placeholder, or end of input
    Separator,

    // string literal body: the matching quote
    Quote { quote: char, open: usize },
}

///
/// Operand
///
/// Parsed expression plus the offset where it started, kept for error
/// reporting during constant folding.
///

struct Operand {
    expr: Expr,
    offset: usize,
}

impl Operand {
    const fn new(expr: Expr, offset: usize) -> Self {
        Self { expr, offset }
    }

    fn as_int(&self) -> Result<i64, InlineExpressionError> {
        match self.expr {
            Expr::Int(value) => Ok(value),
            _ => Err(InlineExpressionError::NonIntegerOperand {
                offset: self.offset,
            }),
        }
    }
}

///
/// BinaryOp
///

#[derive(Clone, Copy)]
enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    fn apply(self, lhs: i64, rhs: i64, offset: usize) -> Result<i64, InlineExpressionError> {
        if matches!(self, Self::Div | Self::Rem) && rhs == 0 {
            return Err(InlineExpressionError::DivisionByZero { offset });
        }

        let folded = match self {
            Self::Add => lhs.checked_add(rhs),
            Self::Sub => lhs.checked_sub(rhs),
            Self::Mul => lhs.checked_mul(rhs),
            Self::Div => lhs.checked_div(rhs),
            Self::Rem => lhs.checked_rem(rhs),
        };

        folded.ok_or(InlineExpressionError::ArithmeticOverflow { offset })
    }
}

///
/// Parser
///

pub(crate) struct Parser<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Parser<'a> {
    const fn new(src: &'a str) -> Self {
        Self {
            scanner: Scanner::new(src),
        }
    }

    /// Parse a full source text into its non-empty top-level segments.
    pub(crate) fn parse_source(src: &'a str) -> Result<Vec<Template>, InlineExpressionError> {
        let mut parser = Self::new(src);
        let mut segments = Vec::new();

        loop {
            let mut template = parser.parse_template(TemplateEnd::Separator)?;
            template.trim();
            if !template.is_empty() {
                segments.push(template);
            }

            if !parser.scanner.eat(",") {
                break;
            }
        }

        Ok(segments)
    }

    //
    // Templates
    //

    fn parse_template(&mut self, end: TemplateEnd) -> Result<Template, InlineExpressionError> {
        let mut template = Template::default();

        loop {
            let Some(ch) = self.scanner.peek() else {
                return match end {
                    TemplateEnd::Separator => Ok(template),
                    TemplateEnd::Quote { open, .. } => {
                        Err(InlineExpressionError::UnterminatedString { offset: open })
                    }
                };
            };

            match end {
                TemplateEnd::Separator if ch == ',' => return Ok(template),
                TemplateEnd::Quote { quote, .. } if ch == quote => {
                    self.scanner.bump();
                    return Ok(template);
                }
                TemplateEnd::Quote { .. } if ch == '\\' => {
                    self.scanner.bump();
                    self.push_escape(&mut template);
                    continue;
                }
                _ => {}
            }

            let open = self.scanner.offset();
            if self.scanner.eat_placeholder_open() {
                let expr = self.parse_placeholder(open)?;
                template.push_placeholder(expr);
            } else {
                self.scanner.bump();
                template.push_text(ch);
            }
        }
    }

    // Escapes are only recognised inside string literals.
    fn push_escape(&mut self, template: &mut Template) {
        match self.scanner.bump() {
            Some('n') => template.push_text('\n'),
            Some('t') => template.push_text('\t'),
            Some(ch @ ('\\' | '\'' | '"' | '$')) => template.push_text(ch),
            Some(other) => {
                template.push_text('\\');
                template.push_text(other);
            }
            // the enclosing template reports the unterminated literal
            None => {}
        }
    }

    fn parse_placeholder(&mut self, open: usize) -> Result<Expr, InlineExpressionError> {
        self.scanner.skip_whitespace();
        if self.scanner.eat("}") {
            return Ok(Expr::Null);
        }

        // running out of input anywhere in the body means the brace never closed
        let body = self.parse_expr().map_err(|err| match err {
            InlineExpressionError::UnexpectedEnd { .. } => {
                InlineExpressionError::UnterminatedPlaceholder { offset: open }
            }
            other => other,
        })?;

        self.scanner.skip_whitespace();
        if self.scanner.eat("}") {
            return Ok(body.expr);
        }

        match self.scanner.peek() {
            None => Err(InlineExpressionError::UnterminatedPlaceholder { offset: open }),
            Some(found) => Err(InlineExpressionError::UnexpectedChar {
                found,
                offset: self.scanner.offset(),
                expected: "'}'",
            }),
        }
    }

    //
    // Expressions
    //

    fn parse_expr(&mut self) -> Result<Operand, InlineExpressionError> {
        self.parse_range()
    }

    fn parse_range(&mut self) -> Result<Operand, InlineExpressionError> {
        let lhs = self.parse_additive()?;

        self.scanner.skip_whitespace();
        let exclusive = if self.scanner.eat("..<") {
            true
        } else if self.scanner.eat("..") {
            false
        } else {
            return Ok(lhs);
        };

        let rhs = self.parse_additive()?;
        let (lo, hi) = (lhs.as_int()?, rhs.as_int()?);
        if hi < lo {
            return Err(InlineExpressionError::InvalidRange {
                lo,
                hi,
                offset: lhs.offset,
            });
        }

        let len = i128::from(hi) - i128::from(lo) + i128::from(!exclusive);
        if len > i128::from(MAX_RANGE_LEN) {
            return Err(InlineExpressionError::RangeTooLarge {
                lo,
                hi,
                limit: MAX_RANGE_LEN,
                offset: lhs.offset,
            });
        }

        let expr = match (exclusive, lo == hi) {
            (true, true) => Expr::List(Vec::new()),
            (true, false) => Expr::Range { lo, hi: hi - 1 },
            (false, _) => Expr::Range { lo, hi },
        };

        Ok(Operand::new(expr, lhs.offset))
    }

    fn parse_additive(&mut self) -> Result<Operand, InlineExpressionError> {
        let mut lhs = self.parse_term()?;

        loop {
            self.scanner.skip_whitespace();
            let op = match self.scanner.peek() {
                Some('+') => BinaryOp::Add,
                Some('-') => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            let op_offset = self.scanner.offset();
            self.scanner.bump();

            let rhs = self.parse_term()?;
            lhs = Self::fold(op, &lhs, &rhs, op_offset)?;
        }
    }

    fn parse_term(&mut self) -> Result<Operand, InlineExpressionError> {
        let mut lhs = self.parse_unary()?;

        loop {
            self.scanner.skip_whitespace();
            let op = match self.scanner.peek() {
                Some('*') => BinaryOp::Mul,
                Some('/') => BinaryOp::Div,
                Some('%') => BinaryOp::Rem,
                _ => return Ok(lhs),
            };
            let op_offset = self.scanner.offset();
            self.scanner.bump();

            let rhs = self.parse_unary()?;
            lhs = Self::fold(op, &lhs, &rhs, op_offset)?;
        }
    }

    fn fold(
        op: BinaryOp,
        lhs: &Operand,
        rhs: &Operand,
        op_offset: usize,
    ) -> Result<Operand, InlineExpressionError> {
        let value = op.apply(lhs.as_int()?, rhs.as_int()?, op_offset)?;

        Ok(Operand::new(Expr::Int(value), lhs.offset))
    }

    fn parse_unary(&mut self) -> Result<Operand, InlineExpressionError> {
        self.scanner.skip_whitespace();
        let offset = self.scanner.offset();
        if !self.scanner.eat("-") {
            return self.parse_primary();
        }

        let operand = self.parse_unary()?;
        let negated = operand
            .as_int()?
            .checked_neg()
            .ok_or(InlineExpressionError::ArithmeticOverflow { offset })?;

        Ok(Operand::new(Expr::Int(negated), offset))
    }

    fn parse_primary(&mut self) -> Result<Operand, InlineExpressionError> {
        self.scanner.skip_whitespace();
        let offset = self.scanner.offset();

        let Some(ch) = self.scanner.peek() else {
            return Err(InlineExpressionError::UnexpectedEnd {
                offset,
                expected: "expression",
            });
        };

        let expr = match ch {
            '0'..='9' => {
                let literal = self.scanner.take_while(|c| c.is_ascii_digit());
                let value = literal
                    .parse::<i64>()
                    .map_err(|_| InlineExpressionError::IntegerOutOfRange {
                        literal: literal.to_string(),
                        offset,
                    })?;

                Expr::Int(value)
            }
            '\'' | '"' => {
                self.scanner.bump();
                let template = self.parse_template(TemplateEnd::Quote {
                    quote: ch,
                    open: offset,
                })?;

                Expr::Str(template)
            }
            '[' => {
                self.scanner.bump();
                Expr::List(self.parse_list_items()?)
            }
            '(' => {
                self.scanner.bump();
                let inner = self.parse_expr()?;
                self.expect(')', "')'")?;

                inner.expr
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let name = self
                    .scanner
                    .take_while(|c| c.is_ascii_alphanumeric() || c == '_');
                if name != "null" {
                    return Err(InlineExpressionError::UnknownIdentifier {
                        name: name.to_string(),
                        offset,
                    });
                }

                Expr::Null
            }
            found => {
                return Err(InlineExpressionError::UnexpectedChar {
                    found,
                    offset,
                    expected: "expression",
                });
            }
        };

        Ok(Operand::new(expr, offset))
    }

    // Items after the opening `[`; a trailing comma is accepted.
    fn parse_list_items(&mut self) -> Result<Vec<Expr>, InlineExpressionError> {
        let mut items = Vec::new();

        self.scanner.skip_whitespace();
        if self.scanner.eat("]") {
            return Ok(items);
        }

        loop {
            items.push(self.parse_expr()?.expr);

            self.scanner.skip_whitespace();
            if self.scanner.eat(",") {
                self.scanner.skip_whitespace();
                if self.scanner.eat("]") {
                    return Ok(items);
                }
                continue;
            }

            self.expect(']', "',' or ']'")?;
            return Ok(items);
        }
    }

    fn expect(&mut self, ch: char, expected: &'static str) -> Result<(), InlineExpressionError> {
        self.scanner.skip_whitespace();
        let offset = self.scanner.offset();

        match self.scanner.peek() {
            Some(found) if found == ch => {
                self.scanner.bump();
                Ok(())
            }
            Some(found) => Err(InlineExpressionError::UnexpectedChar {
                found,
                offset,
                expected,
            }),
            None => Err(InlineExpressionError::UnexpectedEnd { offset, expected }),
        }
    }
}
