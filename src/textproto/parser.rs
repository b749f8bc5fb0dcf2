//! Tokenizer and parser for protobuf text format.
//!
//! The parser is schema-less: it produces a tree of [`Field`]s that the
//! [`TextMessage`](super::TextMessage) implementations then interpret. List
//! values (`name: [a, b]`) are flattened into repeated fields so decoders
//! never have to care which spelling the document used.

use super::{Field, Scalar, Value};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Ident(String),
    Str(String),
    Number(String),
    Punct(char),
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    line: usize,
}

fn parse_error(line: usize, message: impl Into<String>) -> Error {
    Error::OverlayParse {
        line,
        message: message.into(),
    }
}

/// Splits the input into tokens, dropping whitespace and `#` comments.
fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();
    let mut line = 1;

    while let Some(&ch) = chars.peek() {
        match ch {
            '\n' => {
                line += 1;
                chars.next();
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            '#' => {
                while let Some(&c) = chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            '{' | '}' | '<' | '>' | '[' | ']' | ':' | ',' | ';' => {
                tokens.push(Token {
                    kind: TokenKind::Punct(ch),
                    line,
                });
                chars.next();
            }
            '"' | '\'' => {
                chars.next();
                let start_line = line;
                let mut bytes = Vec::new();
                loop {
                    let c = chars
                        .next()
                        .ok_or_else(|| parse_error(start_line, "unterminated string"))?;
                    if c == ch {
                        break;
                    }
                    match c {
                        '\n' => return Err(parse_error(line, "newline in string literal")),
                        '\\' => read_escape(&mut chars, &mut bytes, line)?,
                        other => {
                            let mut buf = [0u8; 4];
                            bytes.extend_from_slice(other.encode_utf8(&mut buf).as_bytes());
                        }
                    }
                }
                let value = String::from_utf8(bytes)
                    .map_err(|_| parse_error(start_line, "string is not valid UTF-8"))?;
                tokens.push(Token {
                    kind: TokenKind::Str(value),
                    line: start_line,
                });
            }
            c if c.is_ascii_digit() || c == '-' || c == '.' => {
                let mut raw = String::new();
                raw.push(c);
                chars.next();
                let mut prev = c;
                while let Some(&n) = chars.peek() {
                    let exponent_sign = (n == '+' || n == '-') && (prev == 'e' || prev == 'E');
                    if n.is_ascii_alphanumeric() || n == '.' || n == '_' || exponent_sign {
                        raw.push(n);
                        prev = n;
                        chars.next();
                    } else {
                        break;
                    }
                }
                if raw == "-" {
                    return Err(parse_error(line, "expected a number after '-'"));
                }
                tokens.push(Token {
                    kind: TokenKind::Number(raw),
                    line,
                });
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut ident = String::new();
                while let Some(&n) = chars.peek() {
                    if n.is_ascii_alphanumeric() || n == '_' || n == '.' {
                        ident.push(n);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token {
                    kind: TokenKind::Ident(ident),
                    line,
                });
            }
            other => {
                return Err(parse_error(line, format!("unexpected character '{}'", other)));
            }
        }
    }

    Ok(tokens)
}

/// Decodes one backslash escape into raw bytes.
fn read_escape(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    bytes: &mut Vec<u8>,
    line: usize,
) -> Result<()> {
    let c = chars
        .next()
        .ok_or_else(|| parse_error(line, "unterminated escape sequence"))?;
    match c {
        'n' => bytes.push(b'\n'),
        't' => bytes.push(b'\t'),
        'r' => bytes.push(b'\r'),
        'a' => bytes.push(0x07),
        'b' => bytes.push(0x08),
        'f' => bytes.push(0x0c),
        'v' => bytes.push(0x0b),
        '\\' | '\'' | '"' | '?' => bytes.push(c as u8),
        'x' => {
            let mut value = 0u32;
            let mut digits = 0;
            while digits < 2 {
                match chars.peek().and_then(|d| d.to_digit(16)) {
                    Some(d) => {
                        value = value * 16 + d;
                        digits += 1;
                        chars.next();
                    }
                    None => break,
                }
            }
            if digits == 0 {
                return Err(parse_error(line, "\\x escape without hex digits"));
            }
            bytes.push(value as u8);
        }
        '0'..='7' => {
            let mut value = c.to_digit(8).unwrap_or_default();
            for _ in 0..2 {
                match chars.peek().and_then(|d| d.to_digit(8)) {
                    Some(d) => {
                        value = value * 8 + d;
                        chars.next();
                    }
                    None => break,
                }
            }
            if value > 0xff {
                return Err(parse_error(line, "octal escape out of range"));
            }
            bytes.push(value as u8);
        }
        other => {
            return Err(parse_error(
                line,
                format!("unknown escape sequence '\\{}'", other),
            ))
        }
    }
    Ok(())
}

/// Deepest message nesting accepted; the Solution schema needs four levels.
const MAX_DEPTH: usize = 100;

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    last_line: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if let Some(t) = &token {
            self.last_line = t.line;
            self.pos += 1;
        }
        token
    }

    fn peek_punct(&self) -> Option<char> {
        match self.peek() {
            Some(Token {
                kind: TokenKind::Punct(c),
                ..
            }) => Some(*c),
            _ => None,
        }
    }

    fn line(&self) -> usize {
        self.peek().map(|t| t.line).unwrap_or(self.last_line)
    }

    /// Parses fields until `close` (or end of input when `close` is `None`).
    fn parse_fields(&mut self, close: Option<char>) -> Result<Vec<Field>> {
        let mut fields = Vec::new();
        loop {
            while matches!(self.peek_punct(), Some(',') | Some(';')) {
                self.next();
            }

            let Some(token) = self.next() else {
                return match close {
                    Some(c) => Err(parse_error(self.last_line, format!("expected '{}'", c))),
                    None => Ok(fields),
                };
            };

            let name = match token.kind {
                TokenKind::Punct(c) if Some(c) == close => return Ok(fields),
                TokenKind::Ident(name) => name,
                other => {
                    return Err(parse_error(
                        token.line,
                        format!("expected field name, found {}", describe(&other)),
                    ))
                }
            };

            let has_colon = self.peek_punct() == Some(':');
            if has_colon {
                self.next();
            }

            match self.peek_punct() {
                Some('{') | Some('<') => {
                    let value = self.parse_message()?;
                    fields.push(Field {
                        name,
                        value,
                        line: token.line,
                    });
                }
                Some('[') => {
                    self.next();
                    for value in self.parse_list(has_colon)? {
                        fields.push(Field {
                            name: name.clone(),
                            value,
                            line: token.line,
                        });
                    }
                }
                _ if has_colon => {
                    let value = Value::Scalar(self.parse_scalar()?);
                    fields.push(Field {
                        name,
                        value,
                        line: token.line,
                    });
                }
                _ => {
                    return Err(parse_error(
                        self.line(),
                        format!("expected ':' or '{{' after field '{}'", name),
                    ))
                }
            }
        }
    }

    fn parse_message(&mut self) -> Result<Value> {
        let close = match self.next().map(|t| t.kind) {
            Some(TokenKind::Punct('{')) => '}',
            Some(TokenKind::Punct('<')) => '>',
            _ => return Err(parse_error(self.last_line, "expected '{' or '<'")),
        };
        if self.depth >= MAX_DEPTH {
            return Err(parse_error(self.last_line, "message nesting too deep"));
        }
        self.depth += 1;
        let fields = self.parse_fields(Some(close));
        self.depth -= 1;
        Ok(Value::Message(fields?))
    }

    /// Parses list elements after the opening `[`. Scalars are only allowed
    /// when the field name was followed by a colon.
    fn parse_list(&mut self, scalars_allowed: bool) -> Result<Vec<Value>> {
        let mut values = Vec::new();
        if self.peek_punct() == Some(']') {
            self.next();
            return Ok(values);
        }
        loop {
            match self.peek_punct() {
                Some('{') | Some('<') => values.push(self.parse_message()?),
                _ if scalars_allowed => values.push(Value::Scalar(self.parse_scalar()?)),
                _ => return Err(parse_error(self.line(), "expected a message in list")),
            }
            match self.next().map(|t| t.kind) {
                Some(TokenKind::Punct(',')) => continue,
                Some(TokenKind::Punct(']')) => return Ok(values),
                _ => return Err(parse_error(self.last_line, "expected ',' or ']' in list")),
            }
        }
    }

    fn parse_scalar(&mut self) -> Result<Scalar> {
        let token = self
            .next()
            .ok_or_else(|| parse_error(self.last_line, "expected a value"))?;
        match token.kind {
            TokenKind::Str(mut s) => {
                // adjacent string literals concatenate
                while let Some(Token {
                    kind: TokenKind::Str(_),
                    ..
                }) = self.peek()
                {
                    if let Some(Token {
                        kind: TokenKind::Str(more),
                        ..
                    }) = self.next()
                    {
                        s.push_str(&more);
                    }
                }
                Ok(Scalar::String(s))
            }
            TokenKind::Number(n) => Ok(Scalar::Number(n)),
            TokenKind::Ident(i) => Ok(Scalar::Ident(i)),
            TokenKind::Punct(c) => Err(parse_error(
                token.line,
                format!("expected a value, found '{}'", c),
            )),
        }
    }
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Ident(i) => format!("identifier '{}'", i),
        TokenKind::Str(s) => format!("string \"{}\"", s),
        TokenKind::Number(n) => format!("number '{}'", n),
        TokenKind::Punct(c) => format!("'{}'", c),
    }
}

/// Parses a text-format document into its top-level fields.
pub fn parse(input: &str) -> Result<Vec<Field>> {
    let mut parser = Parser {
        tokens: tokenize(input)?,
        pos: 0,
        last_line: 1,
        depth: 0,
    };
    parser.parse_fields(None)
}
