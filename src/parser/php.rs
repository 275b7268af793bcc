//! Strict parser for the PHP native serialization format
//!
//! Decodes `serialize()` output into ordered `serde_json::Value` structures.
//! PHP arrays with contiguous integer keys `0..n-1` become JSON arrays; all
//! other arrays become objects with keys in their original order. Serialized
//! objects and references are rejected: the legacy store never contained them
//! legitimately, and decoding them blindly is how corrupted rows get past a
//! migration unnoticed.

use crate::error::{UnserializeError, UnserializeResult};
use crate::parser::Unserializer;
use serde_json::{Map, Number, Value};

/// Default nesting depth limit
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Decoder for PHP-serialized strings
#[derive(Debug, Clone)]
pub struct PhpUnserializer {
    max_depth: usize,
}

impl PhpUnserializer {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the nesting depth limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for PhpUnserializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Unserializer for PhpUnserializer {
    fn unserialize(&self, input: &str) -> UnserializeResult<Value> {
        let mut cursor = Cursor {
            bytes: input.as_bytes(),
            pos: 0,
            max_depth: self.max_depth,
        };
        let result = cursor.value(0).and_then(|value| {
            cursor.finish()?;
            Ok(value)
        });
        result.map_err(|err| {
            let offset = err.offset.unwrap_or(cursor.pos);
            err.with_preview(preview_near(input, offset))
        })
    }
}

/// Byte cursor over a serialized payload
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    max_depth: usize,
}

/// PHP array key: only integers and strings are legal
enum Key {
    Int(i64),
    Str(String),
}

impl<'a> Cursor<'a> {
    fn value(&mut self, depth: usize) -> UnserializeResult<Value> {
        if depth >= self.max_depth {
            return Err(self.err(format!("nesting depth limit exceeded: {}", self.max_depth)));
        }

        match self.peek()? {
            b'N' => {
                self.expect(b"N;")?;
                Ok(Value::Null)
            }
            b'b' => self.boolean(),
            b'i' => self.integer().map(|n| Value::Number(Number::from(n))),
            b'd' => self.double(),
            b's' => self.string().map(Value::String),
            b'a' => self.array(depth),
            b'O' | b'C' => Err(self.err("objects cannot be unserialized")),
            b'r' | b'R' => Err(self.err("references cannot be unserialized")),
            other => Err(self.err(format!("unexpected token '{}'", other as char))),
        }
    }

    fn boolean(&mut self) -> UnserializeResult<Value> {
        self.expect(b"b:")?;
        let flag = match self.bump()? {
            b'0' => false,
            b'1' => true,
            other => return Err(self.err(format!("invalid boolean '{}'", other as char))),
        };
        self.expect(b";")?;
        Ok(Value::Bool(flag))
    }

    fn integer(&mut self) -> UnserializeResult<i64> {
        self.expect(b"i:")?;
        let digits = self.take_until(b';')?;
        let parsed = std::str::from_utf8(digits)
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .ok_or_else(|| self.err("invalid integer"))?;
        self.expect(b";")?;
        Ok(parsed)
    }

    fn double(&mut self) -> UnserializeResult<Value> {
        self.expect(b"d:")?;
        let digits = self.take_until(b';')?;
        let parsed = std::str::from_utf8(digits)
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .ok_or_else(|| self.err("invalid double"))?;
        self.expect(b";")?;
        // PHP serializes NAN/INF, but they have no JSON representation
        let number =
            Number::from_f64(parsed).ok_or_else(|| self.err("non-finite double"))?;
        Ok(Value::Number(number))
    }

    /// Parse `s:<len>:"<bytes>";` where `<len>` counts bytes, not characters
    fn string(&mut self) -> UnserializeResult<String> {
        self.expect(b"s:")?;
        let len = self.length()?;
        self.expect(b":\"")?;
        let start = self.pos;
        let end = start
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| self.err("string length exceeds input"))?;
        let content = std::str::from_utf8(&self.bytes[start..end])
            .map_err(|_| self.err("string content is not valid UTF-8"))?
            .to_string();
        self.pos = end;
        self.expect(b"\";")?;
        Ok(content)
    }

    fn array(&mut self, depth: usize) -> UnserializeResult<Value> {
        self.expect(b"a:")?;
        let count = self.length()?;
        self.expect(b":{")?;

        let mut entries: Vec<(Key, Value)> = Vec::with_capacity(count.min(64));
        for _ in 0..count {
            let key = self.key()?;
            let value = self.value(depth + 1)?;
            entries.push((key, value));
        }
        self.expect(b"}")?;

        // Contiguous integer keys 0..n-1 in order mean a PHP list
        let is_list = entries
            .iter()
            .enumerate()
            .all(|(i, (key, _))| matches!(key, Key::Int(n) if *n == i as i64));
        if is_list {
            return Ok(Value::Array(
                entries.into_iter().map(|(_, value)| value).collect(),
            ));
        }

        let mut map = Map::with_capacity(entries.len());
        for (key, value) in entries {
            let key = match key {
                Key::Int(n) => n.to_string(),
                Key::Str(s) => s,
            };
            // Duplicate keys keep the last value, like repeated PHP assignment
            map.insert(key, value);
        }
        Ok(Value::Object(map))
    }

    fn key(&mut self) -> UnserializeResult<Key> {
        match self.peek()? {
            b'i' => self.integer().map(Key::Int),
            b's' => self.string().map(Key::Str),
            _ => Err(self.err("array key must be an integer or string")),
        }
    }

    /// Parse an unsigned decimal length/count field
    fn length(&mut self) -> UnserializeResult<usize> {
        let start = self.pos;
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.err("expected a length"));
        }
        std::str::from_utf8(&self.bytes[start..self.pos])
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| self.err("invalid length"))
    }

    fn finish(&mut self) -> UnserializeResult<()> {
        if self.pos == self.bytes.len() {
            Ok(())
        } else {
            Err(self.err("trailing data after value"))
        }
    }

    fn peek(&self) -> UnserializeResult<u8> {
        self.bytes
            .get(self.pos)
            .copied()
            .ok_or_else(|| self.err("unexpected end of input"))
    }

    fn bump(&mut self) -> UnserializeResult<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Ok(byte)
    }

    fn expect(&mut self, literal: &[u8]) -> UnserializeResult<()> {
        let end = self.pos + literal.len();
        if self.bytes.len() >= end && &self.bytes[self.pos..end] == literal {
            self.pos = end;
            Ok(())
        } else {
            Err(self.err(format!(
                "expected '{}'",
                String::from_utf8_lossy(literal)
            )))
        }
    }

    fn take_until(&mut self, delimiter: u8) -> UnserializeResult<&'a [u8]> {
        let bytes = self.bytes;
        let start = self.pos;
        while self.pos < bytes.len() && bytes[self.pos] != delimiter {
            self.pos += 1;
        }
        if self.pos == bytes.len() {
            return Err(self.err("unexpected end of input"));
        }
        Ok(&bytes[start..self.pos])
    }

    fn err(&self, message: impl Into<String>) -> UnserializeError {
        UnserializeError::new(message).at(self.pos)
    }
}

/// Short window of the input around a failure offset
fn preview_near(input: &str, offset: usize) -> String {
    let mut start = offset.saturating_sub(8).min(input.len());
    while !input.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = (offset + 16).min(input.len());
    while !input.is_char_boundary(end) {
        end += 1;
    }
    input[start..end].to_string()
}
