//! Whitespace tokenizer for sensor CSV text.
//!
//! Commas, line feeds and carriage returns are treated exactly like spaces, so
//! `a,b\r\nc` yields `a`, `b`, `c`. Empty fields collapse.
//!
//! Whitespace is the space and line/paragraph separator categories minus the
//! no-break spaces, plus ASCII tab..carriage return and the information
//! separators U+001C..U+001F. NEL (U+0085) is not a delimiter.

/// Whether `c` separates tokens
#[inline]
fn is_delimiter(c: char) -> bool {
    c == ',' || is_separator_space(c)
}

#[inline]
fn is_separator_space(c: char) -> bool {
    match c {
        '\u{00A0}' | '\u{2007}' | '\u{202F}' | '\u{0085}' => false,
        '\u{001C}'..='\u{001F}' => true,
        _ => c.is_whitespace(),
    }
}

/// Borrowing iterator over the tokens of a recording
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { rest: text }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.rest.find(|c: char| !is_delimiter(c))?;
        let tail = &self.rest[start..];
        let end = tail.find(is_delimiter).unwrap_or(tail.len());
        let (token, rest) = tail.split_at(end);
        self.rest = rest;
        Some(token)
    }
}

/// Tokenize a recording
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens::new(text)
}
