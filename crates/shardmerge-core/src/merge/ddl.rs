//! Identifier-level table-name rewrite for `SHOW CREATE TABLE` text.

///
/// rewrite_table_name
///
/// Replace every identifier token equal to `actual` (ASCII-case-insensitive)
/// with `logical`. Bare, backtick-quoted, and double-quoted identifiers are
/// matched; single-quoted string literals are copied untouched.
///

pub(crate) fn rewrite_table_name(ddl: &str, actual: &str, logical: &str) -> String {
    let mut out = String::with_capacity(ddl.len());
    let mut rest = ddl;

    while let Some(ch) = rest.chars().next() {
        let consumed = match ch {
            '\'' => {
                let len = quoted_len(rest, '\'');
                out.push_str(&rest[..len]);
                len
            }
            '`' | '"' => {
                let len = quoted_len(rest, ch);
                let body = &rest[1..len];
                let closed = body.ends_with(ch) && len > 1;
                let inner = if closed { &body[..body.len() - 1] } else { body };

                if closed && inner.eq_ignore_ascii_case(actual) {
                    out.push(ch);
                    out.push_str(logical);
                    out.push(ch);
                } else {
                    out.push_str(&rest[..len]);
                }
                len
            }
            c if is_identifier_char(c) => {
                let len = rest
                    .find(|c: char| !is_identifier_char(c))
                    .unwrap_or(rest.len());
                let word = &rest[..len];

                if word.eq_ignore_ascii_case(actual) {
                    out.push_str(logical);
                } else {
                    out.push_str(word);
                }
                len
            }
            c => {
                out.push(c);
                c.len_utf8()
            }
        };

        rest = &rest[consumed..];
    }

    out
}

const fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

// Byte length of the quoted run at the start of `text`, including both
// quotes. A doubled quote or a backslash escapes the quote character.
// Unterminated runs extend to the end of the text.
fn quoted_len(text: &str, quote: char) -> usize {
    let mut chars = text.char_indices().skip(1).peekable();

    while let Some((offset, c)) = chars.next() {
        if c == '\\' && quote == '\'' {
            chars.next();
            continue;
        }
        if c == quote {
            if chars.peek().is_some_and(|&(_, next)| next == quote) {
                chars.next();
                continue;
            }
            return offset + c.len_utf8();
        }
    }

    text.len()
}
