mod decode_encode {

	use crate::upgrade::{CodecOptions, ConvertError, ListValue, MapValue, NamedRoot, Value, decode_root, encode_root};

	fn sample() -> MapValue {
		let mut items = ListValue::new();
		let mut stack = MapValue::new();
		stack.set_string("id", "minecraft:stone");
		stack.set_byte("Count", 3);
		items.add_map(stack).expect("map list");

		let mut root = MapValue::new();
		root.set_int("DataVersion", 3465);
		root.set_string("id", "minecraft:chest");
		root.set_list("Items", items);
		root.set_longs("seeds", vec![-1, 0, i64::MAX]);
		root.set_bytes("flags", vec![1, -2]);
		root.set_ints("pos", vec![10, 64, -3]);
		root.set_double("speed", 0.25);
		root.set_float("yaw", -90.5);
		root.set_short("fuse", 80);
		root.set_long("time", 1 << 40);
		root
	}

	#[test]
	fn big_endian_stream_preserves_every_leaf_kind() {
		let root = NamedRoot {
			name: "Level".to_owned(),
			value: sample(),
		};
		let bytes = encode_root(&root, &CodecOptions::default()).expect("encode succeeds");
		assert_eq!(bytes[0], 10, "root must be a compound");

		let back = decode_root(&bytes, &CodecOptions::default()).expect("decode succeeds");
		assert_eq!(back, root);
	}

	#[test]
	fn little_endian_stream_is_readable_with_bedrock_options() {
		let root = NamedRoot::unnamed(sample());
		let bytes = encode_root(&root, &CodecOptions::bedrock()).expect("encode succeeds");
		let back = decode_root(&bytes, &CodecOptions::bedrock()).expect("decode succeeds");
		assert_eq!(back, root);
		assert_ne!(bytes, encode_root(&root, &CodecOptions::default()).expect("encode succeeds"));
	}

	#[test]
	fn encoding_is_deterministic_regardless_of_insertion_order() {
		let mut a = MapValue::new();
		a.set_int("z", 1);
		a.set_int("a", 2);
		let mut b = MapValue::new();
		b.set_int("a", 2);
		b.set_int("z", 1);

		let opt = CodecOptions::default();
		let left = encode_root(&NamedRoot::unnamed(a), &opt).expect("encode succeeds");
		let right = encode_root(&NamedRoot::unnamed(b), &opt).expect("encode succeeds");
		assert_eq!(left, right);
	}

	#[test]
	fn exact_bytes_for_small_compound() {
		let mut map = MapValue::new();
		map.set_byte("b", 7);
		let bytes = encode_root(&NamedRoot::unnamed(map), &CodecOptions::default()).expect("encode succeeds");
		assert_eq!(bytes, vec![10, 0, 0, 1, 0, 1, b'b', 7, 0]);
	}

	#[test]
	fn empty_list_is_written_with_end_element_type() {
		let mut map = MapValue::new();
		map.set_list("l", ListValue::new());
		let bytes = encode_root(&NamedRoot::unnamed(map.clone()), &CodecOptions::default()).expect("encode succeeds");
		assert_eq!(bytes, vec![10, 0, 0, 9, 0, 1, b'l', 0, 0, 0, 0, 0, 0]);
		let back = decode_root(&bytes, &CodecOptions::default()).expect("decode succeeds");
		assert_eq!(back.value, map);
	}

	#[test]
	fn heterogeneous_list_is_rejected() {
		let mut list = ListValue::from_values(vec![Value::Int(1), Value::Int(2)]).expect("int list");
		*list.iter_mut().nth(1).expect("second slot") = Value::String("two".to_owned());
		let mut map = MapValue::new();
		map.set_list("mixed", list);

		let err = encode_root(&NamedRoot::unnamed(map), &CodecOptions::default()).expect_err("mixed list must fail");
		assert!(matches!(err, ConvertError::HeterogeneousList { index: 1, .. }));
	}

	#[test]
	fn end_value_cannot_be_encoded() {
		let mut map = MapValue::new();
		map.insert("gone", Value::End);
		let err = encode_root(&NamedRoot::unnamed(map), &CodecOptions::default()).expect_err("end must fail");
		assert!(matches!(err, ConvertError::UnencodableEnd { container: "compound" }));
	}
}

mod malformed {

	use crate::upgrade::{CodecOptions, ConvertError, MapValue, NamedRoot, decode_root, encode_root};

	#[test]
	fn rejects_non_compound_root() {
		let err = decode_root(&[8, 0, 0, 0, 0], &CodecOptions::default()).expect_err("string root");
		assert!(matches!(err, ConvertError::InvalidRootTag { id: 8 }));
	}

	#[test]
	fn rejects_unknown_tag_id() {
		let err = decode_root(&[10, 0, 0, 42, 0, 1, b'x'], &CodecOptions::default()).expect_err("tag 42");
		assert!(matches!(err, ConvertError::UnknownTagId { id: 42, at: 3 }));
	}

	#[test]
	fn rejects_truncated_input() {
		let mut map = MapValue::new();
		map.set_long("t", 5);
		let bytes = encode_root(&NamedRoot::unnamed(map), &CodecOptions::default()).expect("encode succeeds");
		let err = decode_root(&bytes[..bytes.len() - 4], &CodecOptions::default()).expect_err("truncated");
		assert!(matches!(err, ConvertError::UnexpectedEof { .. }));
	}

	#[test]
	fn rejects_negative_array_length() {
		let bytes = [10, 0, 0, 11, 0, 1, b'a', 0xff, 0xff, 0xff, 0xfe, 0];
		let err = decode_root(&bytes, &CodecOptions::default()).expect_err("negative length");
		assert!(matches!(err, ConvertError::NegativeLength { len: -2, at: 7 }));
	}

	#[test]
	fn rejects_huge_declared_length_without_allocating() {
		let bytes = [10, 0, 0, 12, 0, 1, b'a', 0x7f, 0xff, 0xff, 0xff, 0];
		let err = decode_root(&bytes, &CodecOptions::default()).expect_err("oversized length");
		assert!(matches!(err, ConvertError::UnexpectedEof { .. }));
	}

	#[test]
	fn rejects_typeless_non_empty_list() {
		let bytes = [10, 0, 0, 9, 0, 1, b'l', 0, 0, 0, 0, 2, 0];
		let err = decode_root(&bytes, &CodecOptions::default()).expect_err("end-typed list");
		assert!(matches!(err, ConvertError::MissingListType { count: 2, .. }));
	}

	#[test]
	fn depth_limit_applies_to_nested_compounds() {
		let mut inner = MapValue::new();
		inner.set_int("leaf", 1);
		for _ in 0..8 {
			let mut outer = MapValue::new();
			outer.set_map("next", inner);
			inner = outer;
		}
		let opt = CodecOptions::default();
		let bytes = encode_root(&NamedRoot::unnamed(inner), &opt).expect("encode succeeds");

		let tight = CodecOptions { max_depth: 4, ..opt };
		let err = decode_root(&bytes, &tight).expect_err("too deep");
		assert!(matches!(err, ConvertError::TagDepthExceeded { max_depth: 4 }));
	}
}

mod lengths {

	use super::super::write_len;
	use crate::upgrade::{ConvertError, Endianness, Writer};

	#[test]
	fn counts_past_i32_max_are_rejected_without_writing() {
		let mut writer = Writer::new(Endianness::Big);
		let err = write_len(&mut writer, i32::MAX as usize + 1).expect_err("count overflows");
		assert!(matches!(err, ConvertError::LengthTooLarge { len } if len == i32::MAX as usize + 1));
		assert!(writer.into_bytes().is_empty());
	}

	#[test]
	fn largest_count_is_written_as_is() {
		let mut writer = Writer::new(Endianness::Big);
		write_len(&mut writer, i32::MAX as usize).expect("fits");
		assert_eq!(writer.into_bytes(), vec![0x7f, 0xff, 0xff, 0xff]);
	}
}
