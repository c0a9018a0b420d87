mod render {

	use crate::upgrade::{ListValue, MapValue, Value, to_snbt};

	#[test]
	fn leaves_carry_type_suffixes() {
		let mut map = MapValue::new();
		map.set_byte("b", 1);
		map.set_short("s", 2);
		map.set_int("i", 3);
		map.set_long("l", 4);
		map.set_float("f", 0.5);
		map.set_double("d", 1.25);
		assert_eq!(
			to_snbt(&Value::Map(map)).expect("renders"),
			"{b:1b,d:1.25d,f:0.5f,i:3,l:4L,s:2s}"
		);
	}

	#[test]
	fn strings_and_odd_keys_are_quoted() {
		let mut map = MapValue::new();
		map.set_string("minecraft:lock", "say \"hi\" \\o/");
		assert_eq!(
			to_snbt(&Value::Map(map)).expect("renders"),
			r#"{"minecraft:lock":"say \"hi\" \\o/"}"#
		);
	}

	#[test]
	fn arrays_and_lists() {
		let mut list = ListValue::new();
		list.add_string("a").expect("append");
		list.add_string("b").expect("append");
		let mut map = MapValue::new();
		map.set_bytes("B", vec![1, -1]);
		map.set_ints("I", vec![]);
		map.set_longs("L", vec![7]);
		map.set_list("names", list);
		assert_eq!(
			to_snbt(&Value::Map(map)).expect("renders"),
			r#"{B:[B;1b,-1b],I:[I;],L:[L;7L],names:["a","b"]}"#
		);
	}

	#[test]
	fn end_is_not_renderable() {
		assert!(to_snbt(&Value::End).is_err());
	}
}

mod parse {

	use crate::upgrade::{ConvertError, MapValue, Value, parse_snbt, to_snbt};

	#[test]
	fn parses_typed_record() {
		let text = r#"{ id: "minecraft:chest", Count: 3b, Items: [{Slot: 0b, id: 'minecraft:stone'}], seeds: [L; 1L, -2L], on: true }"#;
		let value = parse_snbt(text).expect("parses");
		let map = value.as_map().expect("map root");

		assert_eq!(map.get_string("id"), Some("minecraft:chest"));
		assert_eq!(map.get("Count"), Some(&Value::Byte(3)));
		assert_eq!(map.get_longs("seeds"), Some(&[1_i64, -2][..]));
		assert_eq!(map.get("on"), Some(&Value::Byte(1)));
		let items = map.get_list("Items").expect("items list");
		assert_eq!(items.get_map(0).expect("first stack").get_string("id"), Some("minecraft:stone"));
	}

	#[test]
	fn number_forms() {
		assert_eq!(parse_snbt("12").expect("int"), Value::Int(12));
		assert_eq!(parse_snbt("-12s").expect("short"), Value::Short(-12));
		assert_eq!(parse_snbt("1.5").expect("double"), Value::Double(1.5));
		assert_eq!(parse_snbt("2.5f").expect("float"), Value::Float(2.5));
		assert_eq!(parse_snbt("7d").expect("double"), Value::Double(7.0));
		assert_eq!(parse_snbt("plain").expect("bare string"), Value::String("plain".to_owned()));
	}

	#[test]
	fn rendered_text_parses_back() {
		let mut inner = MapValue::new();
		inner.set_string("custom_name", "\"mykey\"");
		let mut map = MapValue::new();
		map.set_map("components", inner);
		map.set_float("yaw", -0.1);
		let value = Value::Map(map);

		let text = to_snbt(&value).expect("renders");
		assert_eq!(parse_snbt(&text).expect("parses"), value);
	}

	#[test]
	fn errors_carry_offsets() {
		let err = parse_snbt("{a:1,}").expect_err("dangling comma");
		assert!(matches!(err, ConvertError::SnbtSyntax { at: 5, .. }));

		let err = parse_snbt("[1, \"two\"]").expect_err("mixed list");
		assert!(matches!(err, ConvertError::SnbtSyntax { .. }));

		let err = parse_snbt("300b").expect_err("byte overflow");
		assert!(matches!(err, ConvertError::SnbtSyntax { at: 0, .. }));

		let err = parse_snbt("{} x").expect_err("trailing");
		assert!(matches!(err, ConvertError::SnbtSyntax { .. }));
	}

	#[test]
	fn typed_arrays_reject_wrong_leaf_kinds() {
		let err = parse_snbt("[I; 1, 2L]").expect_err("long in int array");
		assert!(matches!(err, ConvertError::SnbtSyntax { .. }));
	}
}
