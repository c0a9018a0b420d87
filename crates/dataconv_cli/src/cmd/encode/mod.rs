use std::path::PathBuf;

use dataconv::upgrade::{Compression, ConvertError, NamedRoot, ObjectType, Result, TagFile, Value, parse_snbt};
use tracing::debug;

use crate::cmd::util::codec_options;

#[derive(clap::Args)]
pub struct Args {
	/// SNBT text holding a single compound.
	pub input: PathBuf,
	pub output: PathBuf,
	/// Name stored with the root compound.
	#[arg(long, default_value = "")]
	pub name: String,
	#[arg(long, conflicts_with = "gzip")]
	pub zstd: bool,
	/// gzip framing, as Java edition writes level and player files.
	#[arg(long)]
	pub gzip: bool,
	#[arg(long = "little-endian")]
	pub little_endian: bool,
}

/// Encode SNBT text as a binary tag file.
pub fn run(args: Args) -> Result<()> {
	let Args {
		input,
		output,
		name,
		zstd,
		gzip,
		little_endian,
	} = args;

	let text = std::fs::read_to_string(&input)?;
	let value = match parse_snbt(&text)? {
		Value::Map(map) => map,
		other => {
			return Err(ConvertError::TypeMismatch {
				expected: ObjectType::Map,
				got: other.kind(),
			});
		}
	};

	let compression = match (zstd, gzip) {
		(true, _) => Compression::Zstd,
		(_, true) => Compression::Gzip,
		_ => Compression::None,
	};
	let file = TagFile {
		compression,
		options: codec_options(little_endian),
		root: NamedRoot { name, value },
	};
	let bytes = file.to_bytes()?;
	debug!(output = %output.display(), len = bytes.len(), compression = compression.as_str(), "writing tag file");
	std::fs::write(&output, &bytes)?;

	println!("wrote {} bytes to {}", bytes.len(), output.display());
	Ok(())
}
