use std::path::PathBuf;

use dataconv::upgrade::{Result, TagFile, Value, map_to_snbt};

use crate::cmd::util::{codec_options, emit_json, value_to_json};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long = "little-endian")]
	pub little_endian: bool,
	/// Emit a typed JSON tree instead of SNBT.
	#[arg(long)]
	pub json: bool,
}

/// Print the decoded root compound.
pub fn run(args: Args) -> Result<()> {
	let Args { path, little_endian, json } = args;

	let file = TagFile::open_with(&path, codec_options(little_endian))?;

	if json {
		let payload = DumpJson {
			path: path.display().to_string(),
			root_name: file.root.name.clone(),
			root: value_to_json(&Value::Map(file.root.value)),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("{}", map_to_snbt(&file.root.value)?);
	Ok(())
}

#[derive(serde::Serialize)]
struct DumpJson {
	path: String,
	root_name: String,
	root: serde_json::Value,
}
