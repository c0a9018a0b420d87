use crate::upgrade::{ConvertError, MapValue, Number, ObjectType, Result, Value};

/// Ordered record node.
///
/// The element type is whatever the first element is; an empty list reports
/// [`ObjectType::None`]. Index accessors are bound-checked and kind-checked and
/// fail instead of defaulting. Writes keep the list homogeneous: a value of a
/// different kind fails with [`ConvertError::TypeMismatch`], except when it
/// overwrites the only element. `add_*` appends, while `add_*_at` overwrites
/// the element at the index rather than inserting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ListValue {
	items: Vec<Value>,
}

impl ListValue {
	/// Create an empty list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of elements.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Whether the list has no elements.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Kind of the first element, or `None` when empty.
	pub fn element_type(&self) -> ObjectType {
		self.items.first().map_or(ObjectType::None, Value::kind)
	}

	/// Iterate elements.
	pub fn iter(&self) -> std::slice::Iter<'_, Value> {
		self.items.iter()
	}

	/// Iterate elements mutably.
	pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Value> {
		self.items.iter_mut()
	}

	/// Borrow the raw element at `index`.
	pub fn get(&self, index: usize) -> Option<&Value> {
		self.items.get(index)
	}

	/// Remove every element.
	pub fn clear(&mut self) {
		self.items.clear();
	}

	/// Remove and return the element at `index`, shifting later elements down.
	pub fn remove(&mut self, index: usize) -> Result<Value> {
		self.check_index(index)?;
		Ok(self.items.remove(index))
	}

	/// Build a list from raw elements, which must all share one kind.
	pub fn from_values(values: Vec<Value>) -> Result<Self> {
		let mut list = Self::new();
		for value in values {
			list.push(value)?;
		}
		Ok(list)
	}

	/// Append a raw element.
	pub fn push(&mut self, value: impl Into<Value>) -> Result<()> {
		let value = value.into();
		self.check_kind(&value, false)?;
		self.items.push(value);
		Ok(())
	}

	/// Replace the element at `index`, returning the previous element.
	pub fn replace(&mut self, index: usize, value: impl Into<Value>) -> Result<Value> {
		let value = value.into();
		self.check_index(index)?;
		self.check_kind(&value, true)?;
		let slot = self.slot_mut(index)?;
		Ok(std::mem::replace(slot, value))
	}

	fn check_kind(&self, value: &Value, overwrite: bool) -> Result<()> {
		let expected = self.element_type();
		let sole = overwrite && self.items.len() == 1;
		if self.items.is_empty() || sole || value.kind() == expected {
			return Ok(());
		}
		Err(mismatch(expected, value))
	}

	fn check_index(&self, index: usize) -> Result<()> {
		if index >= self.items.len() {
			return Err(ConvertError::IndexOutOfBounds { index, len: self.items.len() });
		}
		Ok(())
	}

	fn at(&self, index: usize) -> Result<&Value> {
		self.items.get(index).ok_or(ConvertError::IndexOutOfBounds { index, len: self.items.len() })
	}

	fn slot_mut(&mut self, index: usize) -> Result<&mut Value> {
		let len = self.items.len();
		self.items.get_mut(index).ok_or(ConvertError::IndexOutOfBounds { index, len })
	}

	fn number_at(&self, index: usize) -> Result<Number> {
		let value = self.at(index)?;
		value.as_number().ok_or(ConvertError::TypeMismatch {
			expected: ObjectType::Number,
			got: value.kind(),
		})
	}

	/// Numeric element at `index`.
	pub fn get_number(&self, index: usize) -> Result<Number> {
		self.number_at(index)
	}

	/// Numeric element narrowed to `i8`.
	pub fn get_byte(&self, index: usize) -> Result<i8> {
		self.number_at(index).map(Number::to_i8)
	}

	/// Numeric element as `i16`.
	pub fn get_short(&self, index: usize) -> Result<i16> {
		self.number_at(index).map(Number::to_i16)
	}

	/// Numeric element as `i32`.
	pub fn get_int(&self, index: usize) -> Result<i32> {
		self.number_at(index).map(Number::to_i32)
	}

	/// Numeric element as `i64`.
	pub fn get_long(&self, index: usize) -> Result<i64> {
		self.number_at(index).map(Number::to_i64)
	}

	/// Numeric element as `f32`.
	pub fn get_float(&self, index: usize) -> Result<f32> {
		self.number_at(index).map(Number::to_f32)
	}

	/// Numeric element as `f64`.
	pub fn get_double(&self, index: usize) -> Result<f64> {
		self.number_at(index).map(Number::to_f64)
	}

	/// String element at `index`.
	pub fn get_string(&self, index: usize) -> Result<&str> {
		match self.at(index)? {
			Value::String(v) => Ok(v),
			other => Err(mismatch(ObjectType::String, other)),
		}
	}

	/// Byte array element at `index`.
	pub fn get_bytes(&self, index: usize) -> Result<&[i8]> {
		match self.at(index)? {
			Value::ByteArray(v) => Ok(v),
			other => Err(mismatch(ObjectType::ByteArray, other)),
		}
	}

	/// Always fails: the backing format has no short array tag.
	pub fn get_shorts(&self, _index: usize) -> Result<&[i16]> {
		Err(ConvertError::ShortArrayUnsupported { op: "list get_shorts" })
	}

	/// Int array element at `index`.
	pub fn get_ints(&self, index: usize) -> Result<&[i32]> {
		match self.at(index)? {
			Value::IntArray(v) => Ok(v),
			other => Err(mismatch(ObjectType::IntArray, other)),
		}
	}

	/// Long array element at `index`.
	pub fn get_longs(&self, index: usize) -> Result<&[i64]> {
		match self.at(index)? {
			Value::LongArray(v) => Ok(v),
			other => Err(mismatch(ObjectType::LongArray, other)),
		}
	}

	/// Nested list element at `index`.
	pub fn get_list(&self, index: usize) -> Result<&ListValue> {
		match self.at(index)? {
			Value::List(v) => Ok(v),
			other => Err(mismatch(ObjectType::List, other)),
		}
	}

	/// Mutable nested list element at `index`.
	pub fn get_list_mut(&mut self, index: usize) -> Result<&mut ListValue> {
		match self.slot_mut(index)? {
			Value::List(v) => Ok(v),
			other => Err(mismatch(ObjectType::List, other)),
		}
	}

	/// Map element at `index`.
	pub fn get_map(&self, index: usize) -> Result<&MapValue> {
		match self.at(index)? {
			Value::Map(v) => Ok(v),
			other => Err(mismatch(ObjectType::Map, other)),
		}
	}

	/// Mutable map element at `index`.
	pub fn get_map_mut(&mut self, index: usize) -> Result<&mut MapValue> {
		match self.slot_mut(index)? {
			Value::Map(v) => Ok(v),
			other => Err(mismatch(ObjectType::Map, other)),
		}
	}

	/// Overwrite element `index` with a byte.
	pub fn set_byte(&mut self, index: usize, value: i8) -> Result<()> {
		self.set(index, Value::Byte(value))
	}

	/// Overwrite element `index` with a short.
	pub fn set_short(&mut self, index: usize, value: i16) -> Result<()> {
		self.set(index, Value::Short(value))
	}

	/// Overwrite element `index` with an int.
	pub fn set_int(&mut self, index: usize, value: i32) -> Result<()> {
		self.set(index, Value::Int(value))
	}

	/// Overwrite element `index` with a long.
	pub fn set_long(&mut self, index: usize, value: i64) -> Result<()> {
		self.set(index, Value::Long(value))
	}

	/// Overwrite element `index` with a float.
	pub fn set_float(&mut self, index: usize, value: f32) -> Result<()> {
		self.set(index, Value::Float(value))
	}

	/// Overwrite element `index` with a double.
	pub fn set_double(&mut self, index: usize, value: f64) -> Result<()> {
		self.set(index, Value::Double(value))
	}

	/// Overwrite element `index` with a string.
	pub fn set_string(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
		self.set(index, Value::String(value.into()))
	}

	/// Overwrite element `index` with a byte array.
	pub fn set_bytes(&mut self, index: usize, value: Vec<i8>) -> Result<()> {
		self.set(index, Value::ByteArray(value))
	}

	/// Always fails: the backing format has no short array tag.
	pub fn set_shorts(&mut self, _index: usize, _value: Vec<i16>) -> Result<()> {
		Err(ConvertError::ShortArrayUnsupported { op: "list set_shorts" })
	}

	/// Overwrite element `index` with an int array.
	pub fn set_ints(&mut self, index: usize, value: Vec<i32>) -> Result<()> {
		self.set(index, Value::IntArray(value))
	}

	/// Overwrite element `index` with a long array.
	pub fn set_longs(&mut self, index: usize, value: Vec<i64>) -> Result<()> {
		self.set(index, Value::LongArray(value))
	}

	/// Overwrite element `index` with a list.
	pub fn set_list(&mut self, index: usize, value: ListValue) -> Result<()> {
		self.set(index, Value::List(value))
	}

	/// Overwrite element `index` with a map.
	pub fn set_map(&mut self, index: usize, value: MapValue) -> Result<()> {
		self.set(index, Value::Map(value))
	}

	/// Overwrite element `index` with a raw value.
	pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<()> {
		self.replace(index, value).map(drop)
	}

	/// Append a byte.
	pub fn add_byte(&mut self, value: i8) -> Result<()> {
		self.push(Value::Byte(value))
	}

	/// Overwrite element `index` with a byte.
	pub fn add_byte_at(&mut self, index: usize, value: i8) -> Result<()> {
		self.set(index, Value::Byte(value))
	}

	/// Append a short.
	pub fn add_short(&mut self, value: i16) -> Result<()> {
		self.push(Value::Short(value))
	}

	/// Overwrite element `index` with a short.
	pub fn add_short_at(&mut self, index: usize, value: i16) -> Result<()> {
		self.set(index, Value::Short(value))
	}

	/// Append an int.
	pub fn add_int(&mut self, value: i32) -> Result<()> {
		self.push(Value::Int(value))
	}

	/// Overwrite element `index` with an int.
	pub fn add_int_at(&mut self, index: usize, value: i32) -> Result<()> {
		self.set(index, Value::Int(value))
	}

	/// Append a long.
	pub fn add_long(&mut self, value: i64) -> Result<()> {
		self.push(Value::Long(value))
	}

	/// Overwrite element `index` with a long.
	pub fn add_long_at(&mut self, index: usize, value: i64) -> Result<()> {
		self.set(index, Value::Long(value))
	}

	/// Append a float.
	pub fn add_float(&mut self, value: f32) -> Result<()> {
		self.push(Value::Float(value))
	}

	/// Overwrite element `index` with a float.
	pub fn add_float_at(&mut self, index: usize, value: f32) -> Result<()> {
		self.set(index, Value::Float(value))
	}

	/// Append a double.
	pub fn add_double(&mut self, value: f64) -> Result<()> {
		self.push(Value::Double(value))
	}

	/// Overwrite element `index` with a double.
	pub fn add_double_at(&mut self, index: usize, value: f64) -> Result<()> {
		self.set(index, Value::Double(value))
	}

	/// Append a byte array.
	pub fn add_byte_array(&mut self, value: Vec<i8>) -> Result<()> {
		self.push(Value::ByteArray(value))
	}

	/// Overwrite element `index` with a byte array.
	pub fn add_byte_array_at(&mut self, index: usize, value: Vec<i8>) -> Result<()> {
		self.set(index, Value::ByteArray(value))
	}

	/// Always fails: the backing format has no short array tag.
	pub fn add_short_array(&mut self, _value: Vec<i16>) -> Result<()> {
		Err(ConvertError::ShortArrayUnsupported { op: "list add_short_array" })
	}

	/// Always fails: the backing format has no short array tag.
	pub fn add_short_array_at(&mut self, _index: usize, _value: Vec<i16>) -> Result<()> {
		Err(ConvertError::ShortArrayUnsupported { op: "list add_short_array_at" })
	}

	/// Append an int array.
	pub fn add_int_array(&mut self, value: Vec<i32>) -> Result<()> {
		self.push(Value::IntArray(value))
	}

	/// Overwrite element `index` with an int array.
	pub fn add_int_array_at(&mut self, index: usize, value: Vec<i32>) -> Result<()> {
		self.set(index, Value::IntArray(value))
	}

	/// Append a long array.
	pub fn add_long_array(&mut self, value: Vec<i64>) -> Result<()> {
		self.push(Value::LongArray(value))
	}

	/// Overwrite element `index` with a long array.
	pub fn add_long_array_at(&mut self, index: usize, value: Vec<i64>) -> Result<()> {
		self.set(index, Value::LongArray(value))
	}

	/// Append a string.
	pub fn add_string(&mut self, value: impl Into<String>) -> Result<()> {
		self.push(Value::String(value.into()))
	}

	/// Overwrite element `index` with a string.
	pub fn add_string_at(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
		self.set(index, Value::String(value.into()))
	}

	/// Append a list.
	pub fn add_list(&mut self, value: ListValue) -> Result<()> {
		self.push(Value::List(value))
	}

	/// Overwrite element `index` with a list.
	pub fn add_list_at(&mut self, index: usize, value: ListValue) -> Result<()> {
		self.set(index, Value::List(value))
	}

	/// Append a map.
	pub fn add_map(&mut self, value: MapValue) -> Result<()> {
		self.push(Value::Map(value))
	}

	/// Overwrite element `index` with a map.
	pub fn add_map_at(&mut self, index: usize, value: MapValue) -> Result<()> {
		self.set(index, Value::Map(value))
	}
}

fn mismatch(expected: ObjectType, got: &Value) -> ConvertError {
	ConvertError::TypeMismatch { expected, got: got.kind() }
}

impl IntoIterator for ListValue {
	type Item = Value;
	type IntoIter = std::vec::IntoIter<Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.items.into_iter()
	}
}

impl<'a> IntoIterator for &'a ListValue {
	type Item = &'a Value;
	type IntoIter = std::slice::Iter<'a, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.items.iter()
	}
}
