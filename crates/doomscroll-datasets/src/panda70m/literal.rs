//! Reader for Python literal lists stored as strings in Panda-70M metadata.
//!
//! Handles what the metadata contains: lists and tuples (both read as JSON
//! arrays), single- or double-quoted strings, numbers, `True`, `False` and
//! `None`.

use serde_json::{Number, Value};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid literal at byte {offset}: {reason}")]
pub struct LiteralError {
    pub offset: usize,
    pub reason: &'static str,
}

/// Parse a complete literal; trailing input is an error.
pub fn parse_literal(input: &str) -> Result<Value, LiteralError> {
    let mut parser = Parser {
        src: input.as_bytes(),
        text: input,
        pos: 0,
    };
    let value = parser.value()?;
    parser.skip_ws();
    if parser.pos != parser.src.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(value)
}

struct Parser<'a> {
    src: &'a [u8],
    text: &'a str,
    pos: usize,
}

impl Parser<'_> {
    const fn error(&self, reason: &'static str) -> LiteralError {
        LiteralError {
            offset: self.pos,
            reason,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn value(&mut self) -> Result<Value, LiteralError> {
        self.skip_ws();
        match self.peek() {
            Some(b'[') => self.sequence(b']'),
            Some(b'(') => self.sequence(b')'),
            Some(quote @ (b'\'' | b'"')) => self.string(quote).map(Value::String),
            Some(b'-' | b'+' | b'.' | b'0'..=b'9') => self.number(),
            Some(b) if b.is_ascii_alphabetic() => self.keyword(),
            Some(_) => Err(self.error("unexpected character")),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn sequence(&mut self, close: u8) -> Result<Value, LiteralError> {
        self.pos += 1;
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(close) {
                self.pos += 1;
                return Ok(Value::Array(items));
            }
            items.push(self.value()?);
            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b) if b == close => {}
                Some(_) => return Err(self.error("expected ',' or closing bracket")),
                None => return Err(self.error("unterminated sequence")),
            }
        }
    }

    fn string(&mut self, quote: u8) -> Result<String, LiteralError> {
        self.pos += 1;
        let text = self.text;
        let mut out = String::new();
        let mut chars = text[self.pos..].char_indices();

        while let Some((idx, c)) = chars.next() {
            match c {
                c if c as u32 == u32::from(quote) => {
                    self.pos += idx + 1;
                    return Ok(out);
                }
                '\\' => {
                    let Some((_, escaped)) = chars.next() else {
                        break;
                    };
                    match escaped {
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        '0' => out.push('\0'),
                        '\\' | '\'' | '"' => out.push(escaped),
                        'x' => {
                            let hex: String = chars.by_ref().take(2).map(|(_, c)| c).collect();
                            let code = u32::from_str_radix(&hex, 16)
                                .map_err(|_| self.error("invalid \\x escape"))?;
                            out.push(
                                char::from_u32(code)
                                    .ok_or_else(|| self.error("invalid \\x escape"))?,
                            );
                        }
                        'u' => {
                            let hex: String = chars.by_ref().take(4).map(|(_, c)| c).collect();
                            let code = u32::from_str_radix(&hex, 16)
                                .map_err(|_| self.error("invalid \\u escape"))?;
                            out.push(
                                char::from_u32(code)
                                    .ok_or_else(|| self.error("invalid \\u escape"))?,
                            );
                        }
                        other => {
                            out.push('\\');
                            out.push(other);
                        }
                    }
                }
                other => out.push(other),
            }
        }

        self.pos = self.src.len();
        Err(self.error("unterminated string"))
    }

    fn number(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        while self.peek().is_some_and(|b| {
            b.is_ascii_digit() || matches!(b, b'-' | b'+' | b'.' | b'e' | b'E' | b'_')
        }) {
            self.pos += 1;
        }
        let raw: String = self.text[start..self.pos].chars().filter(|c| *c != '_').collect();

        if let Ok(int) = raw.parse::<i64>() {
            return Ok(Value::Number(int.into()));
        }
        raw.parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or(LiteralError {
                offset: start,
                reason: "invalid number",
            })
    }

    fn keyword(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_') {
            self.pos += 1;
        }
        match &self.text[start..self.pos] {
            "True" => Ok(Value::Bool(true)),
            "False" => Ok(Value::Bool(false)),
            "None" => Ok(Value::Null),
            _ => Err(LiteralError {
                offset: start,
                reason: "unknown name",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_timestamp_list() {
        let value =
            parse_literal("[['0:00:00.000', '0:00:05.005'], ['0:00:05.005', '0:00:09.843']]")
                .unwrap();
        assert_eq!(
            value,
            json!([["0:00:00.000", "0:00:05.005"], ["0:00:05.005", "0:00:09.843"]])
        );
    }

    #[test]
    fn test_caption_list_with_quotes_and_escapes() {
        let value = parse_literal(r#"["a man's hat", 'she said \'hi\'', 'tab\there']"#).unwrap();
        assert_eq!(value, json!(["a man's hat", "she said 'hi'", "tab\there"]));
    }

    #[test]
    fn test_scalars_and_tuples() {
        assert_eq!(
            parse_literal("(1, -2.5, True, False, None,)").unwrap(),
            json!([1, -2.5, true, false, null])
        );
        assert_eq!(parse_literal("'plain'").unwrap(), json!("plain"));
        assert_eq!(parse_literal("[]").unwrap(), json!([]));
    }

    #[test]
    fn test_unicode_passes_through() {
        assert_eq!(parse_literal("['café ☕']").unwrap(), json!(["café ☕"]));
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert!(parse_literal("a dog running on the beach").is_err());
        assert!(parse_literal("['unterminated").is_err());
        assert!(parse_literal("[1 2]").is_err());
        assert!(parse_literal("[1] extra").is_err());
        assert!(parse_literal("").is_err());
    }
}
