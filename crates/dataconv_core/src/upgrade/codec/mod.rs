use tracing::trace;

use crate::upgrade::bytes::{Cursor, Writer};
use crate::upgrade::{ConvertError, Endianness, ListValue, MapValue, ObjectType, Result, Value, mutf8};

/// Tag id of a compound, the only kind accepted at the root of a stream.
pub const COMPOUND_TAG_ID: u8 = 10;

/// Runtime limits and byte order for binary tag streams.
#[derive(Debug, Clone)]
pub struct CodecOptions {
	/// Byte order and string flavor of the stream.
	pub endianness: Endianness,
	/// Maximum nesting of compounds and lists.
	pub max_depth: u32,
}

impl Default for CodecOptions {
	fn default() -> Self {
		Self {
			endianness: Endianness::Big,
			max_depth: 512,
		}
	}
}

impl CodecOptions {
	/// Little-endian streams with plain UTF-8 strings.
	pub fn bedrock() -> Self {
		Self {
			endianness: Endianness::Little,
			..Self::default()
		}
	}
}

/// Root compound of a tag stream together with its (usually empty) name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedRoot {
	/// Root tag name.
	pub name: String,
	/// Root compound.
	pub value: MapValue,
}

impl NamedRoot {
	/// Wrap a map as an unnamed root.
	pub fn unnamed(value: MapValue) -> Self {
		Self { name: String::new(), value }
	}
}

/// Decode a complete stream whose root is a named compound.
pub fn decode_root(bytes: &[u8], opt: &CodecOptions) -> Result<NamedRoot> {
	let mut cursor = Cursor::new(bytes, opt.endianness);
	let id = cursor.read_u8()?;
	if id != COMPOUND_TAG_ID {
		return Err(ConvertError::InvalidRootTag { id });
	}

	let name = read_string(&mut cursor)?;
	let value = read_compound(&mut cursor, opt, 1)?;
	if cursor.remaining() > 0 {
		trace!(trailing = cursor.remaining(), "ignoring bytes after root compound");
	}

	Ok(NamedRoot { name, value })
}

/// Encode a named root compound. Map keys are written in ascending order.
pub fn encode_root(root: &NamedRoot, opt: &CodecOptions) -> Result<Vec<u8>> {
	let mut writer = Writer::new(opt.endianness);
	writer.put_u8(COMPOUND_TAG_ID);
	write_string(&mut writer, &root.name)?;
	write_compound(&mut writer, &root.value, opt, 1)?;
	Ok(writer.into_bytes())
}

fn read_string(cursor: &mut Cursor<'_>) -> Result<String> {
	let len = usize::from(cursor.read_u16()?);
	let at = cursor.pos();
	let raw = cursor.read_exact(len)?;
	let decoded = match cursor.endianness() {
		Endianness::Big => mutf8::decode(raw),
		Endianness::Little => std::str::from_utf8(raw).ok().map(str::to_owned),
	};
	decoded.ok_or(ConvertError::InvalidModifiedUtf8 { at })
}

fn read_len(cursor: &mut Cursor<'_>, elem_size: usize) -> Result<usize> {
	let at = cursor.pos();
	let len = cursor.read_i32()?;
	let len = usize::try_from(len).map_err(|_| ConvertError::NegativeLength { len, at })?;
	let need = len.saturating_mul(elem_size);
	if need > cursor.remaining() {
		return Err(ConvertError::UnexpectedEof {
			at: cursor.pos(),
			need,
			rem: cursor.remaining(),
		});
	}
	Ok(len)
}

fn check_depth(depth: u32, opt: &CodecOptions) -> Result<()> {
	if depth > opt.max_depth {
		return Err(ConvertError::TagDepthExceeded { max_depth: opt.max_depth });
	}
	Ok(())
}

fn read_compound(cursor: &mut Cursor<'_>, opt: &CodecOptions, depth: u32) -> Result<MapValue> {
	check_depth(depth, opt)?;

	let mut map = MapValue::new();
	loop {
		let at = cursor.pos();
		let id = cursor.read_u8()?;
		if id == 0 {
			return Ok(map);
		}
		let kind = ObjectType::from_tag_id(id).ok_or(ConvertError::UnknownTagId { id, at })?;
		let key = read_string(cursor)?;
		let value = read_payload(cursor, kind, opt, depth)?;
		map.insert(key, value);
	}
}

fn read_list(cursor: &mut Cursor<'_>, opt: &CodecOptions, depth: u32) -> Result<ListValue> {
	check_depth(depth, opt)?;

	let at = cursor.pos();
	let id = cursor.read_u8()?;
	let kind = ObjectType::from_tag_id(id).ok_or(ConvertError::UnknownTagId { id, at })?;
	let count_at = cursor.pos();
	let elem_size = if kind == ObjectType::None { 0 } else { 1 };
	let count = read_len(cursor, elem_size)?;
	if kind == ObjectType::None {
		if count > 0 {
			return Err(ConvertError::MissingListType {
				count: count as i32,
				at: count_at,
			});
		}
		return Ok(ListValue::new());
	}

	let mut list = ListValue::new();
	for _ in 0..count {
		list.push(read_payload(cursor, kind, opt, depth)?)?;
	}
	Ok(list)
}

fn read_payload(cursor: &mut Cursor<'_>, kind: ObjectType, opt: &CodecOptions, depth: u32) -> Result<Value> {
	Ok(match kind {
		ObjectType::Byte => Value::Byte(cursor.read_i8()?),
		ObjectType::Short => Value::Short(cursor.read_i16()?),
		ObjectType::Int => Value::Int(cursor.read_i32()?),
		ObjectType::Long => Value::Long(cursor.read_i64()?),
		ObjectType::Float => Value::Float(cursor.read_f32()?),
		ObjectType::Double => Value::Double(cursor.read_f64()?),
		ObjectType::String => Value::String(read_string(cursor)?),
		ObjectType::ByteArray => {
			let len = read_len(cursor, 1)?;
			Value::ByteArray(cursor.read_exact(len)?.iter().map(|byte| *byte as i8).collect())
		}
		ObjectType::IntArray => {
			let len = read_len(cursor, 4)?;
			let mut out = Vec::with_capacity(len);
			for _ in 0..len {
				out.push(cursor.read_i32()?);
			}
			Value::IntArray(out)
		}
		ObjectType::LongArray => {
			let len = read_len(cursor, 8)?;
			let mut out = Vec::with_capacity(len);
			for _ in 0..len {
				out.push(cursor.read_i64()?);
			}
			Value::LongArray(out)
		}
		ObjectType::List => Value::List(read_list(cursor, opt, depth + 1)?),
		ObjectType::Map => Value::Map(read_compound(cursor, opt, depth + 1)?),
		ObjectType::None | ObjectType::Number | ObjectType::ShortArray => {
			return Err(ConvertError::UnknownTagId {
				id: kind.tag_id().unwrap_or(u8::MAX),
				at: cursor.pos(),
			});
		}
	})
}

fn write_string(writer: &mut Writer, text: &str) -> Result<()> {
	let encoded = match writer.endianness() {
		Endianness::Big => mutf8::encode(text),
		Endianness::Little => text.as_bytes().to_vec(),
	};
	let len = u16::try_from(encoded.len()).map_err(|_| ConvertError::StringTooLong { len: encoded.len() })?;
	writer.put_u16(len);
	writer.put_slice(&encoded);
	Ok(())
}

fn write_len(writer: &mut Writer, len: usize) -> Result<()> {
	let len = i32::try_from(len).map_err(|_| ConvertError::LengthTooLarge { len })?;
	writer.put_i32(len);
	Ok(())
}

fn write_compound(writer: &mut Writer, map: &MapValue, opt: &CodecOptions, depth: u32) -> Result<()> {
	check_depth(depth, opt)?;

	for key in map.sorted_keys() {
		let Some(value) = map.get(key) else {
			continue;
		};
		let id = tag_id(value, "compound")?;
		writer.put_u8(id);
		write_string(writer, key)?;
		write_payload(writer, value, opt, depth)?;
	}
	writer.put_u8(0);
	Ok(())
}

fn write_list(writer: &mut Writer, list: &ListValue, opt: &CodecOptions, depth: u32) -> Result<()> {
	check_depth(depth, opt)?;

	let Some(first) = list.get(0) else {
		writer.put_u8(0);
		write_len(writer, 0)?;
		return Ok(());
	};

	let expected = first.kind();
	let id = tag_id(first, "list")?;
	for (index, item) in list.iter().enumerate() {
		if item.kind() != expected {
			return Err(ConvertError::HeterogeneousList {
				expected,
				got: item.kind(),
				index,
			});
		}
	}

	writer.put_u8(id);
	write_len(writer, list.len())?;
	for item in list {
		write_payload(writer, item, opt, depth)?;
	}
	Ok(())
}

fn tag_id(value: &Value, container: &'static str) -> Result<u8> {
	match value.kind().tag_id() {
		Some(0) | None => Err(ConvertError::UnencodableEnd { container }),
		Some(id) => Ok(id),
	}
}

fn write_payload(writer: &mut Writer, value: &Value, opt: &CodecOptions, depth: u32) -> Result<()> {
	match value {
		Value::End => return Err(ConvertError::UnencodableEnd { container: "payload" }),
		Value::Byte(v) => writer.put_i8(*v),
		Value::Short(v) => writer.put_i16(*v),
		Value::Int(v) => writer.put_i32(*v),
		Value::Long(v) => writer.put_i64(*v),
		Value::Float(v) => writer.put_f32(*v),
		Value::Double(v) => writer.put_f64(*v),
		Value::String(v) => write_string(writer, v)?,
		Value::ByteArray(v) => {
			write_len(writer, v.len())?;
			for item in v {
				writer.put_i8(*item);
			}
		}
		Value::IntArray(v) => {
			write_len(writer, v.len())?;
			for item in v {
				writer.put_i32(*item);
			}
		}
		Value::LongArray(v) => {
			write_len(writer, v.len())?;
			for item in v {
				writer.put_i64(*item);
			}
		}
		Value::List(v) => write_list(writer, v, opt, depth + 1)?,
		Value::Map(v) => write_compound(writer, v, opt, depth + 1)?,
	}
	Ok(())
}

#[cfg(test)]
mod tests;
