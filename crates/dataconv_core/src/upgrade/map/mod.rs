use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::upgrade::{ConvertError, ListValue, Number, ObjectType, Result, Value};

/// String-keyed record node.
///
/// Default-tolerant getters (`get_*`) never fail: a missing key or a value of
/// another kind yields the caller's default. Forced getters (`get_forced_*`)
/// assume presence and report [`ConvertError::MissingKey`] or
/// [`ConvertError::TypeMismatch`]. Nested maps and lists are owned by their
/// parent; read them through `get_*`, edit them in place through `*_mut`, or
/// move them out with `take_*` and back with `set_*`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapValue {
	entries: HashMap<String, Value>,
}

impl MapValue {
	/// Create an empty map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the map has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Remove every entry.
	pub fn clear(&mut self) {
		self.entries.clear();
	}

	/// Iterate keys in unspecified order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	/// Keys in ascending order.
	pub fn sorted_keys(&self) -> Vec<&str> {
		let mut keys: Vec<&str> = self.keys().collect();
		keys.sort_unstable();
		keys
	}

	/// Iterate entries in unspecified order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.entries.iter().map(|(key, value)| (key.as_str(), value))
	}

	/// Whether any value is stored under `key`.
	pub fn has_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	/// Whether the value under `key` is of `kind`; [`ObjectType::Number`] matches any numeric leaf.
	pub fn has_key_typed(&self, key: &str, kind: ObjectType) -> bool {
		self.entries.get(key).is_some_and(|value| kind.matches(value.kind()))
	}

	/// Borrow the raw value under `key`.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.entries.get(key)
	}

	/// Mutably borrow the raw value under `key`.
	pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
		self.entries.get_mut(key)
	}

	/// Store `value` under `key`, returning the previous value.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.entries.insert(key.into(), value.into())
	}

	/// Remove and return the value under `key`.
	pub fn remove(&mut self, key: &str) -> Option<Value> {
		self.entries.remove(key)
	}

	/// Move the value under `from` to `to`, replacing anything stored there.
	pub fn rename_key(&mut self, from: &str, to: &str) -> bool {
		match self.entries.remove(from) {
			Some(value) => {
				self.entries.insert(to.to_owned(), value);
				true
			}
			None => false,
		}
	}

	/// Follow nested maps along `path` and borrow the final value.
	pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
		let (last, parents) = path.split_last()?;
		let mut current = self;
		for key in parents {
			current = current.get_map(key)?;
		}
		current.get(last)
	}

	/// Numeric view of a numeric leaf under `key`.
	pub fn get_number(&self, key: &str) -> Option<Number> {
		self.entries.get(key).and_then(Value::as_number)
	}

	/// Read a numeric leaf as a boolean (non-zero byte), or `default`.
	pub fn get_boolean(&self, key: &str, default: bool) -> bool {
		self.get_number(key).map_or(default, |value| value.to_i8() != 0)
	}

	/// Read a numeric leaf narrowed to `i8`, or `default`.
	pub fn get_byte(&self, key: &str, default: i8) -> i8 {
		self.get_number(key).map_or(default, Number::to_i8)
	}

	/// Read a numeric leaf as `i16`, or `default`.
	pub fn get_short(&self, key: &str, default: i16) -> i16 {
		self.get_number(key).map_or(default, Number::to_i16)
	}

	/// Read a numeric leaf as `i32`, or `default`.
	pub fn get_int(&self, key: &str, default: i32) -> i32 {
		self.get_number(key).map_or(default, Number::to_i32)
	}

	/// Read a numeric leaf as `i64`, or `default`.
	pub fn get_long(&self, key: &str, default: i64) -> i64 {
		self.get_number(key).map_or(default, Number::to_i64)
	}

	/// Read a numeric leaf as `f32`, or `default`.
	pub fn get_float(&self, key: &str, default: f32) -> f32 {
		self.get_number(key).map_or(default, Number::to_f32)
	}

	/// Read a numeric leaf as `f64`, or `default`.
	pub fn get_double(&self, key: &str, default: f64) -> f64 {
		self.get_number(key).map_or(default, Number::to_f64)
	}

	/// Borrow a string leaf.
	pub fn get_string(&self, key: &str) -> Option<&str> {
		self.entries.get(key).and_then(Value::as_str)
	}

	/// Borrow a byte array.
	pub fn get_bytes(&self, key: &str) -> Option<&[i8]> {
		match self.entries.get(key) {
			Some(Value::ByteArray(v)) => Some(v),
			_ => None,
		}
	}

	/// Short arrays are never stored, so this is always `None`.
	pub fn get_shorts(&self, _key: &str) -> Option<&[i16]> {
		None
	}

	/// Borrow an int array.
	pub fn get_ints(&self, key: &str) -> Option<&[i32]> {
		match self.entries.get(key) {
			Some(Value::IntArray(v)) => Some(v),
			_ => None,
		}
	}

	/// Borrow a long array.
	pub fn get_longs(&self, key: &str) -> Option<&[i64]> {
		match self.entries.get(key) {
			Some(Value::LongArray(v)) => Some(v),
			_ => None,
		}
	}

	/// Borrow a list of any element kind.
	pub fn get_list(&self, key: &str) -> Option<&ListValue> {
		self.entries.get(key).and_then(Value::as_list)
	}

	/// Borrow a list whose element kind is `kind` or that is empty.
	pub fn get_list_typed(&self, key: &str, kind: ObjectType) -> Option<&ListValue> {
		self.get_list(key).filter(|list| list_accepts(list, kind))
	}

	/// Mutably borrow a list of any element kind.
	pub fn get_list_mut(&mut self, key: &str) -> Option<&mut ListValue> {
		self.entries.get_mut(key).and_then(Value::as_list_mut)
	}

	/// Mutably borrow a list whose element kind is `kind` or that is empty.
	pub fn get_list_typed_mut(&mut self, key: &str, kind: ObjectType) -> Option<&mut ListValue> {
		self.get_list_mut(key).filter(|list| list_accepts(list, kind))
	}

	/// Borrow a nested map.
	pub fn get_map(&self, key: &str) -> Option<&MapValue> {
		self.entries.get(key).and_then(Value::as_map)
	}

	/// Mutably borrow a nested map.
	pub fn get_map_mut(&mut self, key: &str) -> Option<&mut MapValue> {
		self.entries.get_mut(key).and_then(Value::as_map_mut)
	}

	/// Remove and return a nested map; other kinds are left in place.
	pub fn take_map(&mut self, key: &str) -> Option<MapValue> {
		if !self.has_key_typed(key, ObjectType::Map) {
			return None;
		}
		match self.entries.remove(key) {
			Some(Value::Map(map)) => Some(map),
			_ => None,
		}
	}

	/// Remove and return a nested list; other kinds are left in place.
	pub fn take_list(&mut self, key: &str) -> Option<ListValue> {
		if !self.has_key_typed(key, ObjectType::List) {
			return None;
		}
		match self.entries.remove(key) {
			Some(Value::List(list)) => Some(list),
			_ => None,
		}
	}

	/// Borrow the value under `key`, failing when absent or not of `kind`.
	pub fn get_forced(&self, key: &str, kind: ObjectType) -> Result<&Value> {
		let value = self.entries.get(key).ok_or_else(|| ConvertError::MissingKey { key: key.to_owned() })?;
		if !kind.matches(value.kind()) {
			return Err(ConvertError::TypeMismatch {
				expected: kind,
				got: value.kind(),
			});
		}
		Ok(value)
	}

	/// Read a string that must be present.
	pub fn get_forced_string(&self, key: &str) -> Result<&str> {
		match self.get_forced(key, ObjectType::String)? {
			Value::String(v) => Ok(v),
			other => Err(mismatch(ObjectType::String, other)),
		}
	}

	/// Read a numeric leaf that must be present, as `i32`.
	pub fn get_forced_int(&self, key: &str) -> Result<i32> {
		let value = self.get_forced(key, ObjectType::Number)?;
		value.as_number().map(Number::to_i32).ok_or_else(|| mismatch(ObjectType::Number, value))
	}

	/// Read a numeric leaf that must be present, as `i64`.
	pub fn get_forced_long(&self, key: &str) -> Result<i64> {
		let value = self.get_forced(key, ObjectType::Number)?;
		value.as_number().map(Number::to_i64).ok_or_else(|| mismatch(ObjectType::Number, value))
	}

	/// Borrow a nested map that must be present.
	pub fn get_forced_map(&self, key: &str) -> Result<&MapValue> {
		match self.get_forced(key, ObjectType::Map)? {
			Value::Map(v) => Ok(v),
			other => Err(mismatch(ObjectType::Map, other)),
		}
	}

	/// Borrow a nested list that must be present.
	pub fn get_forced_list(&self, key: &str) -> Result<&ListValue> {
		match self.get_forced(key, ObjectType::List)? {
			Value::List(v) => Ok(v),
			other => Err(mismatch(ObjectType::List, other)),
		}
	}

	/// Store a boolean as a `0`/`1` byte.
	pub fn set_boolean(&mut self, key: impl Into<String>, value: bool) {
		self.entries.insert(key.into(), Value::from(value));
	}

	/// Store a byte.
	pub fn set_byte(&mut self, key: impl Into<String>, value: i8) {
		self.entries.insert(key.into(), Value::Byte(value));
	}

	/// Store a short.
	pub fn set_short(&mut self, key: impl Into<String>, value: i16) {
		self.entries.insert(key.into(), Value::Short(value));
	}

	/// Store an int.
	pub fn set_int(&mut self, key: impl Into<String>, value: i32) {
		self.entries.insert(key.into(), Value::Int(value));
	}

	/// Store a long.
	pub fn set_long(&mut self, key: impl Into<String>, value: i64) {
		self.entries.insert(key.into(), Value::Long(value));
	}

	/// Store a float.
	pub fn set_float(&mut self, key: impl Into<String>, value: f32) {
		self.entries.insert(key.into(), Value::Float(value));
	}

	/// Store a double.
	pub fn set_double(&mut self, key: impl Into<String>, value: f64) {
		self.entries.insert(key.into(), Value::Double(value));
	}

	/// Store a string.
	pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.entries.insert(key.into(), Value::String(value.into()));
	}

	/// Store a byte array.
	pub fn set_bytes(&mut self, key: impl Into<String>, value: Vec<i8>) {
		self.entries.insert(key.into(), Value::ByteArray(value));
	}

	/// Always fails: the backing format has no short array tag.
	pub fn set_shorts(&mut self, _key: impl Into<String>, _value: Vec<i16>) -> Result<()> {
		Err(ConvertError::ShortArrayUnsupported { op: "map set_shorts" })
	}

	/// Store an int array.
	pub fn set_ints(&mut self, key: impl Into<String>, value: Vec<i32>) {
		self.entries.insert(key.into(), Value::IntArray(value));
	}

	/// Store a long array.
	pub fn set_longs(&mut self, key: impl Into<String>, value: Vec<i64>) {
		self.entries.insert(key.into(), Value::LongArray(value));
	}

	/// Store a list.
	pub fn set_list(&mut self, key: impl Into<String>, value: ListValue) {
		self.entries.insert(key.into(), Value::List(value));
	}

	/// Store a nested map.
	pub fn set_map(&mut self, key: impl Into<String>, value: MapValue) {
		self.entries.insert(key.into(), Value::Map(value));
	}
}

fn list_accepts(list: &ListValue, kind: ObjectType) -> bool {
	let element = list.element_type();
	element == kind || element == ObjectType::None
}

fn mismatch(expected: ObjectType, got: &Value) -> ConvertError {
	ConvertError::TypeMismatch { expected, got: got.kind() }
}

impl Hash for MapValue {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.entries.len().hash(state);
		for key in self.sorted_keys() {
			key.hash(state);
			self.entries[key].hash(state);
		}
	}
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for MapValue {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			entries: iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect(),
		}
	}
}

impl IntoIterator for MapValue {
	type Item = (String, Value);
	type IntoIter = std::collections::hash_map::IntoIter<String, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}

#[cfg(test)]
mod tests;
