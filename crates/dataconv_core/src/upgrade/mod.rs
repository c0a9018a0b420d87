mod bytes;
mod catalog;
mod chain;
mod codec;
mod compression;
mod error;
mod file;
mod legacy;
mod list;
mod map;
mod mutf8;
mod registry;
mod snbt;
mod value;
mod version;
mod walk;

/// Byte order and bounded readers/writers for tag streams.
pub use bytes::{Cursor, Endianness, Writer};
/// Built-in data types and registry construction.
pub use catalog::{CHUNK, ENTITY, ITEM_STACK, PLAYER, TILE_ENTITY, TYPE_NAMES, build_registry};
/// Binary tag codec entry points and options.
pub use codec::{COMPOUND_TAG_ID, CodecOptions, NamedRoot, decode_root, encode_root};
/// Compression detection and framing.
pub use compression::{Compression, GZIP_MAGIC, ZSTD_MAGIC, decode_bytes, encode_bytes};
/// Error and result aliases.
pub use error::{ConvertError, Result};
/// Tag file abstraction.
pub use file::{DATA_VERSION_KEY, TagFile};
/// External lookup for pre-flattening ids.
pub use legacy::{LegacyBlockLookup, LegacyTable, NoLegacyTable, resolve_block_state};
/// Ordered list values.
pub use list::ListValue;
/// String-keyed map values.
pub use map::MapValue;
/// Data type registry, converters, and walkers.
pub use registry::{ConvertFn, Converter, DataType, TypeRegistry, TypeRegistryBuilder, WalkFn, Walker};
/// Textual tag notation.
pub use snbt::{map_to_snbt, parse_snbt, to_snbt};
/// Record tree value types.
pub use value::{Number, ObjectType, Value};
/// Version ladder and engine configuration.
pub use version::{
	BUILTIN_VERSIONS, DEFAULT_CURRENT_VERSION, EngineConfig, FLATTENING, V1_20_1, V18W20C, V24W38A, VersionRegistry,
};
/// Cross-type recursion context.
pub use walk::ConvertCtx;
