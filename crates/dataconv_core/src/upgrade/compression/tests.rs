use crate::upgrade::{Compression, ConvertError, GZIP_MAGIC, ZSTD_MAGIC, decode_bytes, encode_bytes};

const SAMPLE: [u8; 9] = [10, 0, 0, 1, 0, 1, b'b', 7, 0];

#[test]
fn raw_compound_is_passed_through() {
	let raw = vec![10, 0, 0, 0];
	let (mode, bytes) = decode_bytes(raw.clone()).expect("raw stream decodes");
	assert_eq!(mode, Compression::None);
	assert_eq!(bytes, raw);
}

#[test]
fn zstd_frames_are_detected_and_inflated() {
	let packed = encode_bytes(Compression::Zstd, SAMPLE.to_vec()).expect("zstd encodes");
	assert!(packed.starts_with(&ZSTD_MAGIC));

	let (mode, bytes) = decode_bytes(packed).expect("zstd decodes");
	assert_eq!(mode, Compression::Zstd);
	assert_eq!(bytes, SAMPLE);
}

#[test]
fn gzip_members_are_detected_and_inflated() {
	let packed = encode_bytes(Compression::Gzip, SAMPLE.to_vec()).expect("gzip encodes");
	assert!(packed.starts_with(&GZIP_MAGIC));

	let (mode, bytes) = decode_bytes(packed).expect("gzip decodes");
	assert_eq!(mode, Compression::Gzip);
	assert_eq!(bytes, SAMPLE);
}

#[test]
fn zlib_streams_are_detected_and_inflated() {
	let packed = encode_bytes(Compression::Zlib, SAMPLE.to_vec()).expect("zlib encodes");
	assert_eq!(packed.first(), Some(&0x78));

	let (mode, bytes) = decode_bytes(packed).expect("zlib decodes");
	assert_eq!(mode, Compression::Zlib);
	assert_eq!(bytes, SAMPLE);
}

#[test]
fn unknown_magic_reports_first_bytes() {
	let err = decode_bytes(vec![0x50, 0x4b, 3]).expect_err("zip is not a tag stream");
	assert!(matches!(err, ConvertError::UnknownMagic { magic: [0x50, 0x4b, 3, 0] }));

	let err = decode_bytes(vec![0x78, 0x00]).expect_err("bad zlib flags");
	assert!(matches!(err, ConvertError::UnknownMagic { .. }));
}

#[test]
fn labels_are_stable() {
	assert_eq!(Compression::None.as_str(), "none");
	assert_eq!(Compression::Gzip.as_str(), "gzip");
	assert_eq!(Compression::Zlib.as_str(), "zlib");
	assert_eq!(Compression::Zstd.as_str(), "zstd");
}
