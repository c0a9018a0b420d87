use std::path::PathBuf;

use dataconv::upgrade::{DATA_VERSION_KEY, EngineConfig, Endianness, Result, TagFile, VersionRegistry};

use crate::cmd::util::{codec_options, emit_json};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Read a little-endian (Bedrock) stream.
	#[arg(long = "little-endian")]
	pub little_endian: bool,
	#[arg(long)]
	pub json: bool,
}

/// Print compression, root name, stored version and top-level keys.
pub fn run(args: Args) -> Result<()> {
	let Args { path, little_endian, json } = args;

	let file = TagFile::open_with(&path, codec_options(little_endian))?;
	let versions = VersionRegistry::new(&EngineConfig::default())?;
	let has_version = file.root.value.has_key(DATA_VERSION_KEY);
	let data_version = file.data_version();
	let keys: Vec<String> = file.root.value.sorted_keys().into_iter().map(str::to_owned).collect();

	if json {
		let payload = InfoJson {
			path: path.display().to_string(),
			compression: file.compression.as_str().to_owned(),
			endianness: endianness_label(file.options.endianness),
			root_name: file.root.name.clone(),
			data_version: has_version.then_some(data_version),
			version_label: has_version.then(|| versions.label(data_version)),
			key_count: keys.len(),
			keys,
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("compression: {}", file.compression.as_str());
	println!("endianness: {}", endianness_label(file.options.endianness));
	println!("root_name: {:?}", file.root.name);
	if has_version {
		println!("data_version: {}", versions.label(data_version));
	} else {
		println!("data_version: <missing>");
	}
	println!("keys: {}", keys.len());
	for key in &keys {
		println!("  {key}");
	}

	Ok(())
}

fn endianness_label(endianness: Endianness) -> &'static str {
	match endianness {
		Endianness::Big => "big",
		Endianness::Little => "little",
	}
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	compression: String,
	endianness: &'static str,
	root_name: String,
	data_version: Option<i32>,
	version_label: Option<String>,
	key_count: usize,
	keys: Vec<String>,
}
