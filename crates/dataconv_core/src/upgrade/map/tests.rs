mod default_getters {

	use crate::upgrade::{ListValue, MapValue, ObjectType};

	#[test]
	fn missing_or_mismatched_keys_return_the_default() {
		let mut map = MapValue::new();
		map.set_string("name", "x");

		assert_eq!(map.get_int("absent", 7), 7);
		assert_eq!(map.get_int("name", 7), 7);
		assert!(map.get_boolean("name", true));
		assert_eq!(map.get_string("absent"), None);
		assert_eq!(map.get_map("name"), None);
		assert_eq!(map.get_ints("name"), None);
	}

	#[test]
	fn numeric_getters_coerce_between_kinds() {
		let mut map = MapValue::new();
		map.set_double("d", 3.75);
		map.set_byte("b", -1);
		map.set_long("l", 1 << 40);

		assert_eq!(map.get_int("d", 0), 3);
		assert_eq!(map.get_long("b", 0), -1);
		assert_eq!(map.get_int("l", 9), 0);
		assert_eq!(map.get_float("b", 0.0), -1.0);
		assert!(map.get_boolean("b", false));
	}

	#[test]
	fn typed_presence_treats_number_as_any_numeric_leaf() {
		let mut map = MapValue::new();
		map.set_short("s", 1);
		map.set_string("t", "1");
		assert!(map.has_key_typed("s", ObjectType::Number));
		assert!(map.has_key_typed("s", ObjectType::Short));
		assert!(!map.has_key_typed("s", ObjectType::Int));
		assert!(!map.has_key_typed("t", ObjectType::Number));
	}

	#[test]
	fn typed_list_getter_accepts_matching_or_empty_lists() {
		let mut strings = ListValue::new();
		strings.add_string("a").expect("append");
		let mut map = MapValue::new();
		map.set_list("strings", strings);
		map.set_list("empty", ListValue::new());

		assert!(map.get_list_typed("strings", ObjectType::String).is_some());
		assert!(map.get_list_typed("strings", ObjectType::Int).is_none());
		assert!(map.get_list_typed("empty", ObjectType::Map).is_some());
	}

	#[test]
	fn short_arrays_are_never_present() {
		let mut map = MapValue::new();
		assert_eq!(map.get_shorts("x"), None);
		assert!(map.set_shorts("x", vec![1, 2]).is_err());
		assert!(!map.has_key("x"));
	}
}

mod forced_getters {

	use crate::upgrade::{ConvertError, MapValue, ObjectType};

	#[test]
	fn absent_keys_fail_fast() {
		let map = MapValue::new();
		assert!(matches!(map.get_forced_int("x"), Err(ConvertError::MissingKey { .. })));
	}

	#[test]
	fn mismatched_kinds_fail_fast() {
		let mut map = MapValue::new();
		map.set_string("x", "1");
		let err = map.get_forced_int("x").expect_err("string is not an int");
		assert!(matches!(
			err,
			ConvertError::TypeMismatch {
				got: ObjectType::String,
				..
			}
		));
		assert_eq!(map.get_forced_string("x").expect("string"), "1");
	}
}

mod mutation {

	use crate::upgrade::{MapValue, Value};

	#[test]
	fn nested_maps_are_edited_in_place_or_moved() {
		let mut inner = MapValue::new();
		inner.set_int("n", 1);
		let mut map = MapValue::new();
		map.set_map("inner", inner);

		map.get_map_mut("inner").expect("inner").set_int("n", 2);
		assert_eq!(map.get_path(&["inner", "n"]), Some(&Value::Int(2)));

		let mut moved = map.take_map("inner").expect("inner moved out");
		assert!(!map.has_key("inner"));
		moved.set_int("n", 3);
		map.set_map("inner", moved);
		assert_eq!(map.get_path(&["inner", "n"]), Some(&Value::Int(3)));
	}

	#[test]
	fn take_leaves_other_kinds_in_place() {
		let mut map = MapValue::new();
		map.set_int("n", 1);
		assert!(map.take_map("n").is_none());
		assert!(map.take_list("n").is_none());
		assert!(map.has_key("n"));
	}

	#[test]
	fn rename_moves_the_value() {
		let mut map: MapValue = [("Lock", "k")].into_iter().collect();
		assert!(map.rename_key("Lock", "lock"));
		assert!(!map.rename_key("Lock", "lock"));
		assert_eq!(map.get_string("lock"), Some("k"));
		assert_eq!(map.sorted_keys(), vec!["lock"]);
	}
}
