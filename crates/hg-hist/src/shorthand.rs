//! Compact text form of composite axes.
//!
//! Items are separated by whitespace and/or commas:
//!
//! - `x`: a single edge,
//! - `(n, low, high)`: `n` equal bins over `[low, high]`,
//! - `(n, high)`: `n` equal bins from the previous edge up to `high`,
//! - `[e0, e1, ...]`: explicit edges.
//!
//! ```
//! use hg_hist::Axis;
//!
//! let a: Axis = "0 (5, 10) (2, 20)".parse().unwrap();
//! assert_eq!(a.edges(), &[0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 15.0, 20.0]);
//! ```

use hg_core::{Error, Result};

use crate::spec::{MAX_SEGMENT_BINS, Segment};

// ── Tokens ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Num(f64),
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let tok = match c {
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            '[' => Some(Token::LBracket),
            ']' => Some(Token::RBracket),
            ',' => Some(Token::Comma),
            _ => None,
        };
        if let Some(t) = tok {
            tokens.push(t);
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || c == '.' || c == '-' || c == '+' {
            let start = i;
            i += 1;
            while i < chars.len()
                && (chars[i].is_ascii_alphanumeric()
                    || chars[i] == '.'
                    || ((chars[i] == '+' || chars[i] == '-')
                        && (chars[i - 1] == 'e' || chars[i - 1] == 'E')))
            {
                i += 1;
            }
            let s: String = chars[start..i].iter().collect();
            let n: f64 = s
                .parse()
                .map_err(|_| Error::InvalidSpec(format!("invalid number: '{s}'")))?;
            tokens.push(Token::Num(n));
            continue;
        }

        return Err(Error::InvalidSpec(format!("unexpected character '{c}' at position {i}")));
    }

    Ok(tokens)
}

// ── Parser ─────────────────────────────────────────────────────

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let t = self.tokens.get(self.pos);
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn skip_commas(&mut self) {
        while self.peek() == Some(&Token::Comma) {
            self.pos += 1;
        }
    }

    /// Numbers up to the closing token, separated by commas and/or whitespace.
    fn numbers_until(&mut self, close: &Token) -> Result<Vec<f64>> {
        let mut out = Vec::new();
        loop {
            self.skip_commas();
            match self.advance() {
                Some(Token::Num(n)) => out.push(*n),
                Some(t) if t == close => return Ok(out),
                other => {
                    return Err(Error::InvalidSpec(format!(
                        "expected a number or {close:?}, got {other:?}"
                    )));
                }
            }
        }
    }

    fn segments(&mut self) -> Result<Vec<Segment>> {
        let mut out = Vec::new();
        loop {
            self.skip_commas();
            let segment = match self.advance() {
                None => return Ok(out),
                Some(Token::Num(x)) => Segment::Edge(*x),
                Some(Token::LBracket) => Segment::Edges(self.numbers_until(&Token::RBracket)?),
                Some(Token::LParen) => match self.numbers_until(&Token::RParen)?.as_slice() {
                    &[n, high] => Segment::Step { nbins: bin_count(n)?, high },
                    &[n, low, high] => Segment::Uniform { nbins: bin_count(n)?, low, high },
                    other => {
                        return Err(Error::InvalidSpec(format!(
                            "a range takes (count, high) or (count, low, high), got {} values",
                            other.len()
                        )));
                    }
                },
                Some(t) => return Err(Error::InvalidSpec(format!("unexpected token {t:?}"))),
            };
            out.push(segment);
        }
    }
}

fn bin_count(n: f64) -> Result<usize> {
    if n < 1.0 || n.fract() != 0.0 || n > MAX_SEGMENT_BINS as f64 {
        return Err(Error::InvalidSpec(format!("bin count must be a positive integer, got {n}")));
    }
    Ok(n as usize)
}

/// Parse shorthand text into segments.
pub fn parse_segments(input: &str) -> Result<Vec<Segment>> {
    let tokens = tokenize(input)?;
    let segments = Parser::new(&tokens).segments()?;
    if segments.is_empty() {
        return Err(Error::InvalidSpec("empty axis spec".into()));
    }
    Ok(segments)
}
