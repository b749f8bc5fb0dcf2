//! Text-format serialization.
//!
//! Fields are written in the order the [`ToText`] impl emits them, with
//! proto3 zero values omitted and two-space indentation, so the same record
//! always produces the same bytes.

use std::fmt::{Display, Write};

/// A message type that can be written as text format.
pub trait ToText {
    fn write_text(&self, w: &mut TextWriter);
}

/// Serializes a message to a text-format document.
pub fn to_string<T: ToText>(message: &T) -> String {
    let mut writer = TextWriter::default();
    message.write_text(&mut writer);
    writer.finish()
}

#[derive(Debug, Default)]
pub struct TextWriter {
    out: String,
    indent: usize,
}

impl TextWriter {
    fn line(&mut self, content: std::fmt::Arguments<'_>) {
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
        // writing into a String cannot fail
        let _ = self.out.write_fmt(content);
        self.out.push('\n');
    }

    pub fn string(&mut self, name: &str, value: &str) {
        if !value.is_empty() {
            self.line(format_args!("{}: {}", name, quote(value)));
        }
    }

    /// Writes every element of a repeated string field.
    pub fn strings(&mut self, name: &str, values: &[String]) {
        for value in values {
            self.line(format_args!("{}: {}", name, quote(value)));
        }
    }

    pub fn int(&mut self, name: &str, value: i32) {
        if value != 0 {
            self.line(format_args!("{}: {}", name, value));
        }
    }

    pub fn double(&mut self, name: &str, value: f64) {
        if value != 0.0 {
            self.line(format_args!("{}: {}", name, value));
        }
    }

    pub fn float(&mut self, name: &str, value: f32) {
        if value != 0.0 {
            self.line(format_args!("{}: {}", name, value));
        }
    }

    pub fn boolean(&mut self, name: &str, value: bool) {
        if value {
            self.line(format_args!("{}: true", name));
        }
    }

    pub fn enumeration<E: Display>(&mut self, name: &str, value: &E) {
        self.line(format_args!("{}: {}", name, value));
    }

    /// Writes a nested message; present messages are written even when empty.
    pub fn message<T: ToText>(&mut self, name: &str, value: &T) {
        self.line(format_args!("{} {{", name));
        self.indent += 1;
        value.write_text(self);
        self.indent -= 1;
        self.line(format_args!("}}"));
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Quotes a string for text format, escaping quotes, backslashes and
/// control characters.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_ascii_control() => {
                let _ = write!(quoted, "\\{:03o}", c as u32);
            }
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
