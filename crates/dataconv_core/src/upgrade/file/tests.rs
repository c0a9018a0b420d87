mod disk {

	use crate::upgrade::{CodecOptions, Compression, ConvertError, MapValue, TagFile};

	fn record() -> MapValue {
		let mut map = MapValue::new();
		map.set_int("DataVersion", 2586);
		map.set_string("id", "minecraft:sign");
		map
	}

	#[test]
	fn zstd_file_survives_save_and_open() {
		let dir = tempfile::tempdir().expect("temp dir");
		let path = dir.path().join("sign.dat");

		let file = TagFile::new(record(), Compression::Zstd, CodecOptions::default());
		file.save(&path).expect("save succeeds");

		let back = TagFile::open(&path).expect("open succeeds");
		assert_eq!(back.compression, Compression::Zstd);
		assert_eq!(back.root.value, record());
		assert_eq!(back.data_version(), 2586);
	}

	#[test]
	fn missing_version_reads_as_zero() {
		let file = TagFile::new(MapValue::new(), Compression::None, CodecOptions::default());
		let bytes = file.to_bytes().expect("encode succeeds");
		let back = TagFile::from_bytes(bytes, CodecOptions::default()).expect("decode succeeds");
		assert_eq!(back.data_version(), 0);
	}

	#[test]
	fn missing_file_is_io_error() {
		let dir = tempfile::tempdir().expect("temp dir");
		let err = TagFile::open(dir.path().join("absent.dat")).expect_err("missing file");
		assert!(matches!(err, ConvertError::Io(_)));
	}
}
