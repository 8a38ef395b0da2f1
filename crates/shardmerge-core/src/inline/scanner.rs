///
/// Scanner
///
/// Byte-offset cursor over expression source. Offsets always sit on char
/// boundaries.
///

pub(crate) struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) const fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    pub(crate) const fn offset(&self) -> usize {
        self.pos
    }

    pub(crate) fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();

        Some(ch)
    }

    /// Consume `token` if the remaining input starts with it.
    pub(crate) fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Consume a run of chars matching `pred` and return it.
    pub(crate) fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.bump();
        }

        &self.src[start..self.pos]
    }

    /// Consume a placeholder opener (`${` or `$->{`) if one starts here.
    pub(crate) fn eat_placeholder_open(&mut self) -> bool {
        self.eat("${") || self.eat("$->{")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eat_placeholder_open_accepts_both_styles() {
        let mut scanner = Scanner::new("${x}");
        assert!(scanner.eat_placeholder_open());
        assert_eq!(scanner.offset(), 2);

        let mut scanner = Scanner::new("$->{x}");
        assert!(scanner.eat_placeholder_open());
        assert_eq!(scanner.rest(), "x}");

        let mut scanner = Scanner::new("$x");
        assert!(!scanner.eat_placeholder_open());
        assert_eq!(scanner.offset(), 0);
    }

    #[test]
    fn bump_advances_over_multibyte_chars() {
        let mut scanner = Scanner::new("é1");
        assert_eq!(scanner.bump(), Some('é'));
        assert_eq!(scanner.offset(), 2);
        assert_eq!(scanner.take_while(|c| c.is_ascii_digit()), "1");
        assert_eq!(scanner.peek(), None);
    }
}
