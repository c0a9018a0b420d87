use thiserror::Error;

use crate::upgrade::ObjectType;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors produced while decoding, converting, and re-encoding tagged records.
#[derive(Debug, Error)]
pub enum ConvertError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Leading bytes match neither a raw tag stream nor a known compression frame.
	#[error("unsupported compression or not a tag file (magic={magic:?})")]
	UnknownMagic {
		/// First up-to-4 bytes of the stream.
		magic: [u8; 4],
	},
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Tag id byte is not part of the format.
	#[error("unknown tag id {id} at offset {at}")]
	UnknownTagId {
		/// Offending tag id.
		id: u8,
		/// Byte offset of the id.
		at: usize,
	},
	/// Root tag of a stream was not a compound.
	#[error("root tag must be a compound, got tag id {id}")]
	InvalidRootTag {
		/// Tag id found at the root.
		id: u8,
	},
	/// Array or list length prefix was negative.
	#[error("negative length {len} at offset {at}")]
	NegativeLength {
		/// Parsed signed length.
		len: i32,
		/// Byte offset of the length prefix.
		at: usize,
	},
	/// List declared elements of the `End` kind.
	#[error("list at offset {at} declares {count} elements without an element type")]
	MissingListType {
		/// Declared element count.
		count: i32,
		/// Byte offset of the list header.
		at: usize,
	},
	/// String payload is not valid modified UTF-8 (or UTF-8 for little-endian streams).
	#[error("invalid string encoding at offset {at}")]
	InvalidModifiedUtf8 {
		/// Byte offset of the string payload.
		at: usize,
	},
	/// String does not fit the 16-bit length prefix once encoded.
	#[error("string too long to encode: {len} bytes (max 65535)")]
	StringTooLong {
		/// Encoded byte length.
		len: usize,
	},
	/// Array or list has more elements than the signed 32-bit count can carry.
	#[error("length too large to encode: {len} elements (max 2147483647)")]
	LengthTooLarge {
		/// Element count.
		len: usize,
	},
	/// Tag nesting exceeded configured limit while decoding or encoding.
	#[error("tag depth exceeded (max={max_depth})")]
	TagDepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// List elements do not share one tag kind and cannot be encoded.
	#[error("heterogeneous list: expected {expected}, got {got} at index {index}")]
	HeterogeneousList {
		/// Kind of the first element.
		expected: ObjectType,
		/// Kind of the offending element.
		got: ObjectType,
		/// Index of the offending element.
		index: usize,
	},
	/// `End` marker appeared where the format cannot carry it.
	#[error("end tag cannot be encoded inside {container}")]
	UnencodableEnd {
		/// Container kind holding the marker.
		container: &'static str,
	},
	/// SNBT text could not be parsed.
	#[error("snbt syntax error at {at}: {reason}")]
	SnbtSyntax {
		/// Character offset of the failure.
		at: usize,
		/// Short description of what was expected.
		reason: String,
	},
	/// Forced getter found no value under the key.
	#[error("missing key {key:?}")]
	MissingKey {
		/// Requested key.
		key: String,
	},
	/// Forced or indexed accessor found a different value kind.
	#[error("type mismatch: expected {expected}, got {got}")]
	TypeMismatch {
		/// Requested kind.
		expected: ObjectType,
		/// Stored kind.
		got: ObjectType,
	},
	/// List index accessor was out of range.
	#[error("list index {index} out of bounds (len={len})")]
	IndexOutOfBounds {
		/// Requested index.
		index: usize,
		/// List length.
		len: usize,
	},
	/// Short arrays do not exist in the backing format.
	#[error("short arrays are not supported ({op})")]
	ShortArrayUnsupported {
		/// Operation that was attempted.
		op: &'static str,
	},
	/// Legacy numeric id could not be resolved by the external table.
	#[error("legacy id {id} not supported: no legacy table entry")]
	LegacyNotSupported {
		/// Packed legacy id (`block << 4 | data`).
		id: i32,
	},
	/// Data type name was registered twice.
	#[error("data type already registered: {name}")]
	DuplicateType {
		/// Duplicate type name.
		name: String,
	},
	/// Data type name is not registered.
	#[error("unknown data type: {name}")]
	UnknownType {
		/// Requested type name.
		name: String,
	},
	/// Same id converter version registered twice on one type.
	#[error("duplicate converter for id {id:?} at version {version} on {type_name}")]
	DuplicateIdConverter {
		/// Owning data type.
		type_name: String,
		/// Dispatch id.
		id: String,
		/// Converter target version.
		version: i32,
	},
	/// Id converter or walker registered on a type without a dispatch path.
	#[error("data type {type_name} has no dispatch id path")]
	NoDispatchPath {
		/// Owning data type.
		type_name: String,
	},
	/// Converter or walker registered at a version the ladder does not know.
	#[error("unknown version {version} registered on {type_name}")]
	UnknownVersion {
		/// Owning data type.
		type_name: String,
		/// Unregistered version.
		version: i32,
	},
	/// Engine configuration is inconsistent.
	#[error("invalid config: {reason}")]
	InvalidConfig {
		/// What was wrong.
		reason: String,
	},
	/// Cross-type recursion exceeded configured limit.
	#[error("convert depth exceeded (max={max_depth})")]
	ConvertDepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// A converter failed; the whole conversion call is aborted.
	#[error("converter {label} ({type_name} @ {version}) failed: {source}")]
	ConverterFailed {
		/// Owning data type.
		type_name: String,
		/// Converter target version.
		version: i32,
		/// Converter label.
		label: String,
		/// Underlying failure.
		source: Box<ConvertError>,
	},
	/// A walker failed; the whole conversion call is aborted.
	#[error("walker {label} ({type_name} @ {version}) failed: {source}")]
	WalkerFailed {
		/// Owning data type.
		type_name: String,
		/// Walker registration version.
		version: i32,
		/// Walker label.
		label: String,
		/// Underlying failure.
		source: Box<ConvertError>,
	},
}

impl ConvertError {
	/// Unwrap converter/walker context down to the originating error.
	pub fn root_cause(&self) -> &ConvertError {
		let mut current = self;
		while let Self::ConverterFailed { source, .. } | Self::WalkerFailed { source, .. } = current {
			current = &**source;
		}
		current
	}
}
