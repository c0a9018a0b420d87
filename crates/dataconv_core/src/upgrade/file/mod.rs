use std::fs;
use std::path::Path;

use tracing::debug;

use crate::upgrade::compression::{decode_bytes, encode_bytes};
use crate::upgrade::{CodecOptions, Compression, MapValue, NamedRoot, Result, decode_root, encode_root};

/// Key holding the schema version of a stored record.
pub const DATA_VERSION_KEY: &str = "DataVersion";

/// Decoded tag file with the settings needed to write it back unchanged.
#[derive(Debug, Clone)]
pub struct TagFile {
	/// Compression mode detected for source bytes.
	pub compression: Compression,
	/// Codec options used to decode the payload.
	pub options: CodecOptions,
	/// Root compound.
	pub root: NamedRoot,
}

impl TagFile {
	/// Read, decompress, and decode a big-endian tag file from disk.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		Self::open_with(path, CodecOptions::default())
	}

	/// Read a tag file using explicit codec options.
	pub fn open_with(path: impl AsRef<Path>, options: CodecOptions) -> Result<Self> {
		let path = path.as_ref();
		let raw = fs::read(path)?;
		debug!(path = %path.display(), len = raw.len(), "read tag file");
		Self::from_bytes(raw, options)
	}

	/// Decode an in-memory tag file.
	pub fn from_bytes(raw: Vec<u8>, options: CodecOptions) -> Result<Self> {
		let (compression, bytes) = decode_bytes(raw)?;
		let root = decode_root(&bytes, &options)?;
		Ok(Self {
			compression,
			options,
			root,
		})
	}

	/// Wrap a root map for writing.
	pub fn new(root: MapValue, compression: Compression, options: CodecOptions) -> Self {
		Self {
			compression,
			options,
			root: NamedRoot::unnamed(root),
		}
	}

	/// Recorded schema version, `0` when absent.
	pub fn data_version(&self) -> i32 {
		self.root.value.get_int(DATA_VERSION_KEY, 0)
	}

	/// Encode and compress back to bytes.
	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		let bytes = encode_root(&self.root, &self.options)?;
		encode_bytes(self.compression, bytes)
	}

	/// Encode and write to `path`.
	pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
		let bytes = self.to_bytes()?;
		fs::write(path, bytes)?;
		Ok(())
	}
}

#[cfg(test)]
mod tests;
