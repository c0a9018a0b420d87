use std::fmt;
use std::hash::{Hash, Hasher};

use crate::upgrade::{ListValue, MapValue};

/// Kind reported by values, list element types, and typed key checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
	/// Absent value, `End` marker, or the element type of an empty list.
	None,
	/// 8-bit signed integer.
	Byte,
	/// 16-bit signed integer.
	Short,
	/// 32-bit signed integer.
	Int,
	/// 64-bit signed integer.
	Long,
	/// 32-bit float.
	Float,
	/// 64-bit float.
	Double,
	/// Synthetic kind matching every numeric leaf in `has_key_typed`.
	Number,
	/// UTF-8 string.
	String,
	/// Byte array.
	ByteArray,
	/// Short array. Never stored; the backing format has no such tag.
	ShortArray,
	/// Int array.
	IntArray,
	/// Long array.
	LongArray,
	/// Ordered list.
	List,
	/// String-keyed map (compound).
	Map,
}

impl ObjectType {
	/// Whether this is one of the six numeric leaf kinds (or `Number` itself).
	pub fn is_number(self) -> bool {
		matches!(self, Self::Byte | Self::Short | Self::Int | Self::Long | Self::Float | Self::Double | Self::Number)
	}

	/// Whether a value of kind `actual` satisfies a request for `self`.
	pub fn matches(self, actual: ObjectType) -> bool {
		self == actual || (self == Self::Number && actual.is_number() && actual != Self::Number)
	}

	/// Binary tag id for this kind, when the format has one.
	pub fn tag_id(self) -> Option<u8> {
		Some(match self {
			Self::None => 0,
			Self::Byte => 1,
			Self::Short => 2,
			Self::Int => 3,
			Self::Long => 4,
			Self::Float => 5,
			Self::Double => 6,
			Self::ByteArray => 7,
			Self::String => 8,
			Self::List => 9,
			Self::Map => 10,
			Self::IntArray => 11,
			Self::LongArray => 12,
			Self::Number | Self::ShortArray => return None,
		})
	}

	/// Map a binary tag id back to its kind.
	pub fn from_tag_id(id: u8) -> Option<Self> {
		Some(match id {
			0 => Self::None,
			1 => Self::Byte,
			2 => Self::Short,
			3 => Self::Int,
			4 => Self::Long,
			5 => Self::Float,
			6 => Self::Double,
			7 => Self::ByteArray,
			8 => Self::String,
			9 => Self::List,
			10 => Self::Map,
			11 => Self::IntArray,
			12 => Self::LongArray,
			_ => return None,
		})
	}

	/// Render kind as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Byte => "byte",
			Self::Short => "short",
			Self::Int => "int",
			Self::Long => "long",
			Self::Float => "float",
			Self::Double => "double",
			Self::Number => "number",
			Self::String => "string",
			Self::ByteArray => "byte_array",
			Self::ShortArray => "short_array",
			Self::IntArray => "int_array",
			Self::LongArray => "long_array",
			Self::List => "list",
			Self::Map => "map",
		}
	}
}

impl fmt::Display for ObjectType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Numeric leaf read through a kind-agnostic getter.
///
/// Narrowing follows the save format's own accessors: integers wrap, floating
/// values floor into the 32-bit range before narrowing, and widen to `long` by
/// truncation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
	/// 8-bit signed integer.
	Byte(i8),
	/// 16-bit signed integer.
	Short(i16),
	/// 32-bit signed integer.
	Int(i32),
	/// 64-bit signed integer.
	Long(i64),
	/// 32-bit float.
	Float(f32),
	/// 64-bit float.
	Double(f64),
}

impl Number {
	/// Kind of the stored leaf.
	pub fn kind(self) -> ObjectType {
		match self {
			Self::Byte(_) => ObjectType::Byte,
			Self::Short(_) => ObjectType::Short,
			Self::Int(_) => ObjectType::Int,
			Self::Long(_) => ObjectType::Long,
			Self::Float(_) => ObjectType::Float,
			Self::Double(_) => ObjectType::Double,
		}
	}

	/// Narrow to `i8`.
	pub fn to_i8(self) -> i8 {
		match self {
			Self::Byte(v) => v,
			Self::Short(v) => v as i8,
			Self::Int(v) => v as i8,
			Self::Long(v) => v as i8,
			Self::Float(v) => floor_i32(f64::from(v)) as i8,
			Self::Double(v) => floor_i32(v) as i8,
		}
	}

	/// Narrow or widen to `i16`.
	pub fn to_i16(self) -> i16 {
		match self {
			Self::Byte(v) => i16::from(v),
			Self::Short(v) => v,
			Self::Int(v) => v as i16,
			Self::Long(v) => v as i16,
			Self::Float(v) => floor_i32(f64::from(v)) as i16,
			Self::Double(v) => floor_i32(v) as i16,
		}
	}

	/// Narrow or widen to `i32`.
	pub fn to_i32(self) -> i32 {
		match self {
			Self::Byte(v) => i32::from(v),
			Self::Short(v) => i32::from(v),
			Self::Int(v) => v,
			Self::Long(v) => v as i32,
			Self::Float(v) => floor_i32(f64::from(v)),
			Self::Double(v) => floor_i32(v),
		}
	}

	/// Widen to `i64`.
	pub fn to_i64(self) -> i64 {
		match self {
			Self::Byte(v) => i64::from(v),
			Self::Short(v) => i64::from(v),
			Self::Int(v) => i64::from(v),
			Self::Long(v) => v,
			Self::Float(v) => v as i64,
			Self::Double(v) => v as i64,
		}
	}

	/// Convert to `f32`.
	pub fn to_f32(self) -> f32 {
		match self {
			Self::Byte(v) => f32::from(v),
			Self::Short(v) => f32::from(v),
			Self::Int(v) => v as f32,
			Self::Long(v) => v as f32,
			Self::Float(v) => v,
			Self::Double(v) => v as f32,
		}
	}

	/// Convert to `f64`.
	pub fn to_f64(self) -> f64 {
		match self {
			Self::Byte(v) => f64::from(v),
			Self::Short(v) => f64::from(v),
			Self::Int(v) => f64::from(v),
			Self::Long(v) => v as f64,
			Self::Float(v) => f64::from(v),
			Self::Double(v) => v,
		}
	}
}

fn floor_i32(value: f64) -> i32 {
	value.floor() as i32
}

/// One node of a record tree.
#[derive(Debug, Clone)]
pub enum Value {
	/// `End` marker; reports [`ObjectType::None`].
	End,
	/// 8-bit signed integer.
	Byte(i8),
	/// 16-bit signed integer.
	Short(i16),
	/// 32-bit signed integer.
	Int(i32),
	/// 64-bit signed integer.
	Long(i64),
	/// 32-bit float.
	Float(f32),
	/// 64-bit float.
	Double(f64),
	/// UTF-8 string.
	String(String),
	/// Byte array.
	ByteArray(Vec<i8>),
	/// Int array.
	IntArray(Vec<i32>),
	/// Long array.
	LongArray(Vec<i64>),
	/// Ordered list.
	List(ListValue),
	/// String-keyed map.
	Map(MapValue),
}

impl Value {
	/// Kind of this node.
	pub fn kind(&self) -> ObjectType {
		match self {
			Self::End => ObjectType::None,
			Self::Byte(_) => ObjectType::Byte,
			Self::Short(_) => ObjectType::Short,
			Self::Int(_) => ObjectType::Int,
			Self::Long(_) => ObjectType::Long,
			Self::Float(_) => ObjectType::Float,
			Self::Double(_) => ObjectType::Double,
			Self::String(_) => ObjectType::String,
			Self::ByteArray(_) => ObjectType::ByteArray,
			Self::IntArray(_) => ObjectType::IntArray,
			Self::LongArray(_) => ObjectType::LongArray,
			Self::List(_) => ObjectType::List,
			Self::Map(_) => ObjectType::Map,
		}
	}

	/// Numeric view of a numeric leaf.
	pub fn as_number(&self) -> Option<Number> {
		Some(match self {
			Self::Byte(v) => Number::Byte(*v),
			Self::Short(v) => Number::Short(*v),
			Self::Int(v) => Number::Int(*v),
			Self::Long(v) => Number::Long(*v),
			Self::Float(v) => Number::Float(*v),
			Self::Double(v) => Number::Double(*v),
			_ => return None,
		})
	}

	/// String view of a string leaf.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(v) => Some(v),
			_ => None,
		}
	}

	/// Borrow a map node.
	pub fn as_map(&self) -> Option<&MapValue> {
		match self {
			Self::Map(v) => Some(v),
			_ => None,
		}
	}

	/// Mutably borrow a map node.
	pub fn as_map_mut(&mut self) -> Option<&mut MapValue> {
		match self {
			Self::Map(v) => Some(v),
			_ => None,
		}
	}

	/// Borrow a list node.
	pub fn as_list(&self) -> Option<&ListValue> {
		match self {
			Self::List(v) => Some(v),
			_ => None,
		}
	}

	/// Mutably borrow a list node.
	pub fn as_list_mut(&mut self) -> Option<&mut ListValue> {
		match self {
			Self::List(v) => Some(v),
			_ => None,
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::End, Self::End) => true,
			(Self::Byte(a), Self::Byte(b)) => a == b,
			(Self::Short(a), Self::Short(b)) => a == b,
			(Self::Int(a), Self::Int(b)) => a == b,
			(Self::Long(a), Self::Long(b)) => a == b,
			(Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
			(Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
			(Self::String(a), Self::String(b)) => a == b,
			(Self::ByteArray(a), Self::ByteArray(b)) => a == b,
			(Self::IntArray(a), Self::IntArray(b)) => a == b,
			(Self::LongArray(a), Self::LongArray(b)) => a == b,
			(Self::List(a), Self::List(b)) => a == b,
			(Self::Map(a), Self::Map(b)) => a == b,
			_ => false,
		}
	}
}

impl Eq for Value {}

impl Hash for Value {
	fn hash<H: Hasher>(&self, state: &mut H) {
		std::mem::discriminant(self).hash(state);
		match self {
			Self::End => {}
			Self::Byte(v) => v.hash(state),
			Self::Short(v) => v.hash(state),
			Self::Int(v) => v.hash(state),
			Self::Long(v) => v.hash(state),
			Self::Float(v) => v.to_bits().hash(state),
			Self::Double(v) => v.to_bits().hash(state),
			Self::String(v) => v.hash(state),
			Self::ByteArray(v) => v.hash(state),
			Self::IntArray(v) => v.hash(state),
			Self::LongArray(v) => v.hash(state),
			Self::List(v) => v.hash(state),
			Self::Map(v) => v.hash(state),
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Byte(i8::from(value))
	}
}

impl From<i8> for Value {
	fn from(value: i8) -> Self {
		Self::Byte(value)
	}
}

impl From<i16> for Value {
	fn from(value: i16) -> Self {
		Self::Short(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Self::Int(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::Long(value)
	}
}

impl From<f32> for Value {
	fn from(value: f32) -> Self {
		Self::Float(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Double(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<ListValue> for Value {
	fn from(value: ListValue) -> Self {
		Self::List(value)
	}
}

impl From<MapValue> for Value {
	fn from(value: MapValue) -> Self {
		Self::Map(value)
	}
}

#[cfg(test)]
mod tests;
