use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::upgrade::{ListValue, MapValue, Number, ObjectType, Value};

fn hash_of(value: &Value) -> u64 {
	let mut hasher = DefaultHasher::new();
	value.hash(&mut hasher);
	hasher.finish()
}

#[test]
fn kinds_and_tag_ids_line_up() {
	for id in 0..=12_u8 {
		let kind = ObjectType::from_tag_id(id).expect("known tag id");
		assert_eq!(kind.tag_id(), Some(id));
	}
	assert_eq!(ObjectType::from_tag_id(13), None);
	assert_eq!(ObjectType::ShortArray.tag_id(), None);
	assert_eq!(Value::End.kind(), ObjectType::None);
	assert_eq!(Value::from(true), Value::Byte(1));
}

#[test]
fn number_kind_matches_every_numeric_leaf() {
	for kind in [ObjectType::Byte, ObjectType::Short, ObjectType::Int, ObjectType::Long, ObjectType::Float, ObjectType::Double] {
		assert!(ObjectType::Number.matches(kind), "{kind} should match number");
	}
	assert!(!ObjectType::Number.matches(ObjectType::String));
	assert!(!ObjectType::Int.matches(ObjectType::Number));
}

#[test]
fn narrowing_wraps_integers_and_floors_floats() {
	assert_eq!(Number::Int(300).to_i8(), 44);
	assert_eq!(Number::Long(1 << 33).to_i32(), 0);
	assert_eq!(Number::Double(-1.5).to_i32(), -2);
	assert_eq!(Number::Float(2.9).to_i16(), 2);
	assert_eq!(Number::Double(-1.5).to_i64(), -1);
	assert_eq!(Number::Byte(-1).to_f64(), -1.0);
}

#[test]
fn equality_and_hashing_are_structural() {
	let mut a = MapValue::new();
	a.set_int("x", 1);
	a.set_string("y", "two");
	let mut b = MapValue::new();
	b.set_string("y", "two");
	b.set_int("x", 1);

	let (a, b) = (Value::Map(a), Value::Map(b));
	assert_eq!(a, b);
	assert_eq!(hash_of(&a), hash_of(&b));

	assert_ne!(Value::Int(1), Value::Long(1));
	assert_eq!(Value::Double(f64::NAN), Value::Double(f64::NAN));
	assert_ne!(Value::Float(0.0), Value::Float(-0.0));
}

#[test]
fn clones_are_deep() {
	let mut inner = ListValue::new();
	inner.add_int(1).expect("empty list");
	let mut map = MapValue::new();
	map.set_list("items", inner);

	let original = Value::Map(map);
	let mut copy = original.clone();
	copy.as_map_mut()
		.and_then(|map| map.get_list_mut("items"))
		.expect("list present")
		.add_int(2)
		.expect("int list");

	assert_eq!(original.as_map().and_then(|map| map.get_list("items")).map(ListValue::len), Some(1));
	assert_ne!(original, copy);
}
