use thiserror::Error as ThisError;

///
/// InlineExpressionError
///
/// Parse-time failures of an inline expression. Offsets are byte positions
/// into the source text.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum InlineExpressionError {
    #[error("unterminated placeholder opened at offset {offset}")]
    UnterminatedPlaceholder { offset: usize },

    #[error("unterminated string literal opened at offset {offset}")]
    UnterminatedString { offset: usize },

    #[error("unexpected character '{found}' at offset {offset}: expected {expected}")]
    UnexpectedChar {
        found: char,
        offset: usize,
        expected: &'static str,
    },

    #[error("unexpected end of expression at offset {offset}: expected {expected}")]
    UnexpectedEnd {
        offset: usize,
        expected: &'static str,
    },

    #[error("unknown identifier '{name}' at offset {offset}")]
    UnknownIdentifier { name: String, offset: usize },

    #[error("invalid range {lo}..{hi} at offset {offset}: upper bound is below lower bound")]
    InvalidRange { lo: i64, hi: i64, offset: usize },

    #[error("range {lo}..{hi} at offset {offset} expands to more than {limit} values")]
    RangeTooLarge {
        lo: i64,
        hi: i64,
        limit: u64,
        offset: usize,
    },

    #[error("arithmetic operand at offset {offset} is not an integer")]
    NonIntegerOperand { offset: usize },

    #[error("integer literal '{literal}' at offset {offset} is out of range")]
    IntegerOutOfRange { literal: String, offset: usize },

    #[error("integer overflow in arithmetic at offset {offset}")]
    ArithmeticOverflow { offset: usize },

    #[error("division by zero at offset {offset}")]
    DivisionByZero { offset: usize },
}

impl InlineExpressionError {
    /// Byte offset where the failure was detected.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::UnterminatedPlaceholder { offset }
            | Self::UnterminatedString { offset }
            | Self::UnexpectedChar { offset, .. }
            | Self::UnexpectedEnd { offset, .. }
            | Self::UnknownIdentifier { offset, .. }
            | Self::InvalidRange { offset, .. }
            | Self::RangeTooLarge { offset, .. }
            | Self::NonIntegerOperand { offset }
            | Self::IntegerOutOfRange { offset, .. }
            | Self::ArithmeticOverflow { offset }
            | Self::DivisionByZero { offset } => *offset,
        }
    }
}
