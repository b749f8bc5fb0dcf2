//! Protobuf text format support for Solution records
//!
//! The catalog exchanges Solution records as protobuf text format: the
//! overlay document is written by hand in it, and the generated record is
//! emitted in it. This module provides both directions for the fixed
//! Solution schema.
//!
//! ## Layout
//!
//! - `parser.rs` - schema-less tokenizer and parser producing [`Field`] trees
//! - `writer.rs` - [`TextWriter`] and the [`ToText`] trait
//! - `solution.rs` - [`TextMessage`] and [`ToText`] impls for the record types
//!
//! Decoding follows proto3 merge rules: repeated fields append, singular
//! scalars are overwritten by later occurrences, and singular messages merge
//! into the existing value. Unknown field names are rejected.

mod parser;
mod solution;
mod writer;

pub use parser::parse;
pub use writer::{to_string, TextWriter, ToText};

use crate::error::{Error, Result};
use std::str::FromStr;

/// A parsed scalar, kept as its source spelling until a decoder asks for a
/// concrete type.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    String(String),
    Number(String),
    Ident(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Message(Vec<Field>),
}

/// One `name: value` or `name { ... }` entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: Value,
    /// Line of the field name in the source document.
    pub line: usize,
}

/// A message type that can be decoded from text format.
pub trait TextMessage: Default {
    /// Message name used in error messages.
    const NAME: &'static str;

    /// Merges one field into `self`.
    fn merge_field(&mut self, field: &Field) -> Result<()>;
}

/// Parses and decodes a text-format document.
pub fn decode<T: TextMessage>(input: &str) -> Result<T> {
    decode_fields(&parse(input)?)
}

/// Decodes already-parsed fields into a fresh message.
pub fn decode_fields<T: TextMessage>(fields: &[Field]) -> Result<T> {
    let mut message = T::default();
    for field in fields {
        message.merge_field(field)?;
    }
    Ok(message)
}

impl Field {
    fn error(&self, message: impl Into<String>) -> Error {
        Error::OverlayParse {
            line: self.line,
            message: format!("field '{}': {}", self.name, message.into()),
        }
    }

    fn scalar(&self) -> Result<&Scalar> {
        match &self.value {
            Value::Scalar(s) => Ok(s),
            Value::Message(_) => Err(self.error("expected a scalar value, found a message")),
        }
    }

    /// Rejects a field the message type does not declare.
    pub fn unknown<T: TextMessage>(&self) -> Error {
        Error::OverlayParse {
            line: self.line,
            message: format!("unknown field '{}' in {}", self.name, T::NAME),
        }
    }

    pub fn as_string(&self) -> Result<String> {
        match self.scalar()? {
            Scalar::String(s) => Ok(s.clone()),
            _ => Err(self.error("expected a quoted string")),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self.scalar()? {
            Scalar::Ident(i) => match i.as_str() {
                "true" | "True" | "t" => Ok(true),
                "false" | "False" | "f" => Ok(false),
                other => Err(self.error(format!("invalid boolean '{}'", other))),
            },
            Scalar::Number(n) if n == "1" => Ok(true),
            Scalar::Number(n) if n == "0" => Ok(false),
            _ => Err(self.error("expected a boolean")),
        }
    }

    pub fn as_i32(&self) -> Result<i32> {
        let raw = match self.scalar()? {
            Scalar::Number(n) => n,
            _ => return Err(self.error("expected an integer")),
        };
        let (negative, digits) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw.as_str()),
        };
        let parsed = match digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
        {
            Some(hex) => i64::from_str_radix(hex, 16),
            None => digits.parse::<i64>(),
        };
        let magnitude = parsed.map_err(|_| self.error(format!("invalid integer '{}'", raw)))?;
        let value = if negative { -magnitude } else { magnitude };
        i32::try_from(value).map_err(|_| self.error(format!("integer '{}' out of range", raw)))
    }

    pub fn as_f64(&self) -> Result<f64> {
        let raw = match self.scalar()? {
            Scalar::Number(n) => n.as_str(),
            Scalar::Ident(i) => i.as_str(),
            Scalar::String(_) => return Err(self.error("expected a number")),
        };
        // "2.5f" is a float literal, "inf" is not a suffixed "in"
        let trimmed = raw
            .strip_suffix('f')
            .or_else(|| raw.strip_suffix('F'))
            .filter(|t| t.ends_with(|c: char| c.is_ascii_digit() || c == '.'))
            .unwrap_or(raw);
        match trimmed.to_ascii_lowercase().as_str() {
            "inf" | "infinity" => Ok(f64::INFINITY),
            "-inf" | "-infinity" => Ok(f64::NEG_INFINITY),
            "nan" | "-nan" => Ok(f64::NAN),
            other => other
                .parse::<f64>()
                .map_err(|_| self.error(format!("invalid number '{}'", raw))),
        }
    }

    pub fn as_f32(&self) -> Result<f32> {
        self.as_f64().map(|v| v as f32)
    }

    pub fn as_enum<E>(&self) -> Result<E>
    where
        E: FromStr<Err = String>,
    {
        match self.scalar()? {
            Scalar::Ident(i) => i.parse::<E>().map_err(|e| self.error(e)),
            _ => Err(self.error("expected an enum value name")),
        }
    }

    /// Decodes a nested message as a new value.
    pub fn as_message<T: TextMessage>(&self) -> Result<T> {
        match &self.value {
            Value::Message(fields) => decode_fields(fields),
            Value::Scalar(_) => Err(self.error(format!("expected a {} message", T::NAME))),
        }
    }

    /// Merges a nested message into an optional singular field.
    pub fn merge_into<T: TextMessage>(&self, slot: &mut Option<T>) -> Result<()> {
        let fields = match &self.value {
            Value::Message(fields) => fields,
            Value::Scalar(_) => return Err(self.error(format!("expected a {} message", T::NAME))),
        };
        let target = slot.get_or_insert_with(T::default);
        for field in fields {
            target.merge_field(field)?;
        }
        Ok(())
    }
}
