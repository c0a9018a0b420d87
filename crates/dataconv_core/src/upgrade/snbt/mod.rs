//! Textual tag notation used by fixtures and the `dump`/`encode` commands.
//!
//! Leaves carry a type suffix (`1b`, `2s`, `3`, `4L`, `5.0f`, `6.0d`), typed
//! arrays use a header (`[B;..]`, `[I;..]`, `[L;..]`), and keys or strings
//! that are not plain identifiers are double-quoted. Output lists map keys in
//! ascending order so rendering is deterministic.

use std::fmt::Write as _;

use crate::upgrade::{ConvertError, ListValue, MapValue, Result, Value};

const MAX_NESTING: u32 = 512;

/// Render a value as SNBT text.
pub fn to_snbt(value: &Value) -> Result<String> {
	let mut out = String::new();
	write_value(&mut out, value)?;
	Ok(out)
}

/// Render a map as SNBT text.
pub fn map_to_snbt(map: &MapValue) -> Result<String> {
	let mut out = String::new();
	write_map(&mut out, map)?;
	Ok(out)
}

/// Parse one SNBT value; trailing non-whitespace input is an error.
pub fn parse_snbt(text: &str) -> Result<Value> {
	let mut parser = Parser { src: text, pos: 0, depth: 0 };
	let value = parser.value()?;
	parser.skip_ws();
	if parser.pos < text.len() {
		return Err(parser.error("trailing input"));
	}
	Ok(value)
}

fn write_value(out: &mut String, value: &Value) -> Result<()> {
	match value {
		Value::End => return Err(ConvertError::UnencodableEnd { container: "snbt" }),
		Value::Byte(v) => push_fmt(out, format_args!("{v}b")),
		Value::Short(v) => push_fmt(out, format_args!("{v}s")),
		Value::Int(v) => push_fmt(out, format_args!("{v}")),
		Value::Long(v) => push_fmt(out, format_args!("{v}L")),
		Value::Float(v) => push_fmt(out, format_args!("{v}f")),
		Value::Double(v) => push_fmt(out, format_args!("{v}d")),
		Value::String(v) => write_quoted(out, v),
		Value::ByteArray(items) => write_array(out, 'B', items.iter().map(|v| format!("{v}b"))),
		Value::IntArray(items) => write_array(out, 'I', items.iter().map(|v| v.to_string())),
		Value::LongArray(items) => write_array(out, 'L', items.iter().map(|v| format!("{v}L"))),
		Value::List(list) => write_list(out, list)?,
		Value::Map(map) => write_map(out, map)?,
	}
	Ok(())
}

fn push_fmt(out: &mut String, args: std::fmt::Arguments<'_>) {
	// Writing into a String cannot fail.
	let _ = out.write_fmt(args);
}

fn write_array(out: &mut String, header: char, items: impl Iterator<Item = String>) {
	out.push('[');
	out.push(header);
	out.push(';');
	for (idx, item) in items.enumerate() {
		if idx > 0 {
			out.push(',');
		}
		out.push_str(&item);
	}
	out.push(']');
}

fn write_list(out: &mut String, list: &ListValue) -> Result<()> {
	out.push('[');
	for (idx, item) in list.iter().enumerate() {
		if idx > 0 {
			out.push(',');
		}
		write_value(out, item)?;
	}
	out.push(']');
	Ok(())
}

fn write_map(out: &mut String, map: &MapValue) -> Result<()> {
	out.push('{');
	for (idx, key) in map.sorted_keys().into_iter().enumerate() {
		let Some(value) = map.get(key) else {
			continue;
		};
		if idx > 0 {
			out.push(',');
		}
		if is_bare(key) {
			out.push_str(key);
		} else {
			write_quoted(out, key);
		}
		out.push(':');
		write_value(out, value)?;
	}
	out.push('}');
	Ok(())
}

fn write_quoted(out: &mut String, text: &str) {
	out.push('"');
	for ch in text.chars() {
		if ch == '"' || ch == '\\' {
			out.push('\\');
		}
		out.push(ch);
	}
	out.push('"');
}

fn is_bare_char(ch: char) -> bool {
	ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.' | '+')
}

fn is_bare(text: &str) -> bool {
	!text.is_empty() && text.chars().all(is_bare_char)
}

struct Parser<'a> {
	src: &'a str,
	pos: usize,
	depth: u32,
}

impl<'a> Parser<'a> {
	fn error(&self, reason: impl Into<String>) -> ConvertError {
		ConvertError::SnbtSyntax {
			at: self.pos,
			reason: reason.into(),
		}
	}

	fn peek(&self) -> Option<char> {
		self.src[self.pos..].chars().next()
	}

	fn bump(&mut self) -> Option<char> {
		let ch = self.peek()?;
		self.pos += ch.len_utf8();
		Some(ch)
	}

	fn skip_ws(&mut self) {
		while let Some(ch) = self.peek().filter(|ch| ch.is_whitespace()) {
			self.pos += ch.len_utf8();
		}
	}

	fn expect(&mut self, want: char) -> Result<()> {
		self.skip_ws();
		match self.bump() {
			Some(ch) if ch == want => Ok(()),
			Some(ch) => Err(self.error(format!("expected `{want}`, found `{ch}`"))),
			None => Err(self.error(format!("expected `{want}`, found end of input"))),
		}
	}

	/// Consume `want` if it is the next non-whitespace character.
	fn eat(&mut self, want: char) -> bool {
		self.skip_ws();
		if self.peek() == Some(want) {
			self.pos += want.len_utf8();
			return true;
		}
		false
	}

	fn enter(&mut self) -> Result<()> {
		self.depth += 1;
		if self.depth > MAX_NESTING {
			return Err(self.error(format!("nesting deeper than {MAX_NESTING}")));
		}
		Ok(())
	}

	fn value(&mut self) -> Result<Value> {
		self.skip_ws();
		match self.peek() {
			Some('{') => {
				self.enter()?;
				let map = self.compound()?;
				self.depth -= 1;
				Ok(Value::Map(map))
			}
			Some('[') => {
				self.enter()?;
				let value = self.list_or_array()?;
				self.depth -= 1;
				Ok(value)
			}
			Some('"' | '\'') => Ok(Value::String(self.quoted()?)),
			Some(_) => self.scalar(),
			None => Err(self.error("expected value, found end of input")),
		}
	}

	fn compound(&mut self) -> Result<MapValue> {
		self.expect('{')?;
		let mut map = MapValue::new();
		if self.eat('}') {
			return Ok(map);
		}

		loop {
			let key = self.key()?;
			self.expect(':')?;
			let value = self.value()?;
			if map.insert(key.clone(), value).is_some() {
				return Err(self.error(format!("duplicate key `{key}`")));
			}
			if self.eat('}') {
				return Ok(map);
			}
			self.expect(',')?;
		}
	}

	fn key(&mut self) -> Result<String> {
		self.skip_ws();
		match self.peek() {
			Some('"' | '\'') => self.quoted(),
			_ => {
				let token = self.bare();
				if token.is_empty() {
					return Err(self.error("expected key"));
				}
				Ok(token.to_owned())
			}
		}
	}

	fn list_or_array(&mut self) -> Result<Value> {
		self.expect('[')?;
		let rest = &self.src[self.pos..];
		for header in ['B', 'I', 'L'] {
			let mut chars = rest.chars();
			if chars.next() == Some(header) && chars.next() == Some(';') {
				self.pos += 2;
				return self.array(header);
			}
		}

		let mut list = ListValue::new();
		if self.eat(']') {
			return Ok(Value::List(list));
		}
		loop {
			let item = self.value()?;
			let (expected, got) = (list.element_type(), item.kind());
			if list.push(item).is_err() {
				return Err(self.error(format!("list of {expected} cannot hold {got}")));
			}
			if self.eat(']') {
				return Ok(Value::List(list));
			}
			self.expect(',')?;
		}
	}

	fn array(&mut self, header: char) -> Result<Value> {
		let mut items = Vec::new();
		if !self.eat(']') {
			loop {
				items.push(self.value()?);
				if self.eat(']') {
					break;
				}
				self.expect(',')?;
			}
		}

		match header {
			'B' => items
				.into_iter()
				.map(|item| match item {
					Value::Byte(v) => Ok(v),
					other => Err(self.error(format!("byte array cannot hold {}", other.kind()))),
				})
				.collect::<Result<Vec<_>>>()
				.map(Value::ByteArray),
			'I' => items
				.into_iter()
				.map(|item| match item {
					Value::Int(v) => Ok(v),
					other => Err(self.error(format!("int array cannot hold {}", other.kind()))),
				})
				.collect::<Result<Vec<_>>>()
				.map(Value::IntArray),
			_ => items
				.into_iter()
				.map(|item| match item {
					Value::Long(v) => Ok(v),
					other => Err(self.error(format!("long array cannot hold {}", other.kind()))),
				})
				.collect::<Result<Vec<_>>>()
				.map(Value::LongArray),
		}
	}

	fn quoted(&mut self) -> Result<String> {
		let Some(quote) = self.bump() else {
			return Err(self.error("expected quote"));
		};
		let mut out = String::new();
		loop {
			match self.bump() {
				Some('\\') => match self.bump() {
					Some(ch @ ('\\' | '"' | '\'')) => out.push(ch),
					Some('n') => out.push('\n'),
					Some('t') => out.push('\t'),
					Some(ch) => return Err(self.error(format!("unknown escape `\\{ch}`"))),
					None => return Err(self.error("unterminated escape")),
				},
				Some(ch) if ch == quote => return Ok(out),
				Some(ch) => out.push(ch),
				None => return Err(self.error("unterminated string")),
			}
		}
	}

	fn bare(&mut self) -> &'a str {
		let start = self.pos;
		while self.peek().is_some_and(is_bare_char) {
			self.pos += 1;
		}
		&self.src[start..self.pos]
	}

	fn scalar(&mut self) -> Result<Value> {
		let start = self.pos;
		let token = self.bare();
		if token.is_empty() {
			return Err(self.error("expected value"));
		}
		match classify(token) {
			Some(value) => Ok(value),
			None => {
				self.pos = start;
				Err(self.error(format!("malformed number `{token}`")))
			}
		}
	}
}

/// Interpret a bare token: booleans, suffixed numbers, plain ints and
/// decimals, otherwise an unquoted string. `None` means the token looks
/// numeric but does not fit its declared kind.
fn classify(token: &str) -> Option<Value> {
	match token {
		"true" => return Some(Value::Byte(1)),
		"false" => return Some(Value::Byte(0)),
		_ => {}
	}

	if !looks_numeric(token) {
		return Some(Value::String(token.to_owned()));
	}

	let (body, suffix) = token.split_at(token.len() - 1);
	match suffix {
		"b" | "B" => body.parse().ok().map(Value::Byte),
		"s" | "S" => body.parse().ok().map(Value::Short),
		"l" | "L" => body.parse().ok().map(Value::Long),
		"f" | "F" => body.parse().ok().map(Value::Float),
		"d" | "D" => body.parse().ok().map(Value::Double),
		_ if token.contains(['.', 'e', 'E']) => token.parse().ok().map(Value::Double),
		_ => token.parse().ok().map(Value::Int),
	}
}

fn looks_numeric(token: &str) -> bool {
	let digits = token.strip_prefix(['-', '+']).unwrap_or(token);
	digits.starts_with(|ch: char| ch.is_ascii_digit() || ch == '.') && digits.chars().any(|ch| ch.is_ascii_digit())
}

#[cfg(test)]
mod tests;
