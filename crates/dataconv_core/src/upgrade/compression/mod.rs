use std::io::{Read, Write};

use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};

use crate::upgrade::codec::COMPOUND_TAG_ID;
use crate::upgrade::{ConvertError, Result};

const MAX_DECOMPRESSED_BYTES: usize = 256 * 1024 * 1024;
/// zstd frame magic used by compressed tag files.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];
/// gzip member header.
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];
/// zlib CMF byte for deflate with a 32 KiB window.
const ZLIB_CMF: u8 = 0x78;
/// FLG bytes emitted for the four standard zlib compression levels.
const ZLIB_FLAGS: [u8; 4] = [0x01, 0x5E, 0x9C, 0xDA];

/// Compression mode detected for a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
	/// Raw uncompressed stream.
	None,
	/// gzip-compressed stream, the usual framing for Java edition files.
	Gzip,
	/// zlib-compressed stream, as found in region chunk payloads.
	Zlib,
	/// zstd-compressed stream.
	Zstd,
}

impl Compression {
	/// Render compression mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Gzip => "gzip",
			Self::Zlib => "zlib",
			Self::Zstd => "zstd",
		}
	}

	fn detect(raw: &[u8]) -> Option<Self> {
		match raw {
			[first, ..] if *first == COMPOUND_TAG_ID => Some(Self::None),
			[a, b, ..] if [*a, *b] == GZIP_MAGIC => Some(Self::Gzip),
			[ZLIB_CMF, flags, ..] if ZLIB_FLAGS.contains(flags) => Some(Self::Zlib),
			_ if raw.starts_with(&ZSTD_MAGIC) => Some(Self::Zstd),
			_ => None,
		}
	}
}

/// Detect and decode compression, returning `(mode, decoded_bytes)`.
pub fn decode_bytes(raw: Vec<u8>) -> Result<(Compression, Vec<u8>)> {
	let Some(mode) = Compression::detect(&raw) else {
		return Err(ConvertError::UnknownMagic { magic: first4(&raw) });
	};

	let out = match mode {
		Compression::None => return Ok((mode, raw)),
		Compression::Gzip => read_capped(GzDecoder::new(raw.as_slice()))?,
		Compression::Zlib => read_capped(ZlibDecoder::new(raw.as_slice()))?,
		Compression::Zstd => read_capped(zstd::stream::read::Decoder::new(raw.as_slice())?)?,
	};
	Ok((mode, out))
}

/// Apply `mode` to an encoded tag stream.
pub fn encode_bytes(mode: Compression, bytes: Vec<u8>) -> Result<Vec<u8>> {
	match mode {
		Compression::None => Ok(bytes),
		Compression::Gzip => {
			let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
			encoder.write_all(&bytes)?;
			Ok(encoder.finish()?)
		}
		Compression::Zlib => {
			let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::default());
			encoder.write_all(&bytes)?;
			Ok(encoder.finish()?)
		}
		Compression::Zstd => Ok(zstd::stream::encode_all(bytes.as_slice(), 0)?),
	}
}

fn read_capped(mut decoder: impl Read) -> Result<Vec<u8>> {
	let mut out = Vec::new();
	let mut buf = [0_u8; 8192];

	loop {
		let read = decoder.read(&mut buf)?;
		if read == 0 {
			break;
		}

		if out.len() + read > MAX_DECOMPRESSED_BYTES {
			return Err(ConvertError::DecompressedTooLarge { limit: MAX_DECOMPRESSED_BYTES });
		}

		out.extend_from_slice(&buf[..read]);
	}

	Ok(out)
}

fn first4(bytes: &[u8]) -> [u8; 4] {
	let mut magic = [0_u8; 4];
	let take = bytes.len().min(4);
	magic[..take].copy_from_slice(&bytes[..take]);
	magic
}

#[cfg(test)]
mod tests;
