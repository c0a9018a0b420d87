use std::path::PathBuf;

use dataconv::upgrade::{DATA_VERSION_KEY, Result, TagFile};
use tracing::{debug, info};

use crate::cmd::util::{codec_options, emit_json, open_registry};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Data type of the root record.
	#[arg(long = "type")]
	pub type_name: String,
	/// Source version; defaults to the stored `DataVersion` (0 when absent).
	#[arg(long)]
	pub from: Option<i32>,
	/// Target version; defaults to the configured current version.
	#[arg(long)]
	pub to: Option<i32>,
	/// JSON engine configuration.
	#[arg(long)]
	pub config: Option<PathBuf>,
	/// JSON object mapping packed legacy block ids to block names.
	#[arg(long = "legacy-table")]
	pub legacy_table: Option<PathBuf>,
	/// Output path; the input is rewritten in place when omitted.
	#[arg(long)]
	pub out: Option<PathBuf>,
	#[arg(long = "little-endian")]
	pub little_endian: bool,
	/// Convert without writing anything.
	#[arg(long = "dry-run")]
	pub dry_run: bool,
	#[arg(long)]
	pub json: bool,
}

/// Upgrade the root record of a tag file and write it back.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		type_name,
		from,
		to,
		config,
		legacy_table,
		out,
		little_endian,
		dry_run,
		json,
	} = args;

	let registry = open_registry(config.as_deref(), legacy_table.as_deref())?;
	let mut file = TagFile::open_with(&path, codec_options(little_endian))?;

	let stored = file.data_version();
	let source = from.unwrap_or(stored);
	let target = to.unwrap_or_else(|| registry.versions().current());
	debug!(path = %path.display(), type_name = %type_name, source, target, "converting root record");

	let record = std::mem::take(&mut file.root.value);
	file.root.value = registry.convert_map(&type_name, record, source, target)?;

	let bumped = target > source && target > stored;
	if bumped {
		file.root.value.set_int(DATA_VERSION_KEY, target);
	}

	let out = out.unwrap_or_else(|| path.clone());
	if !dry_run {
		file.save(&out)?;
		info!(out = %out.display(), "wrote converted file");
	}

	if json {
		let payload = ConvertJson {
			path: path.display().to_string(),
			out: (!dry_run).then(|| out.display().to_string()),
			type_name,
			source,
			target,
			source_label: registry.versions().label(source),
			target_label: registry.versions().label(target),
			compression: file.compression.as_str().to_owned(),
			data_version_written: bumped,
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("type: {type_name}");
	println!("source: {}", registry.versions().label(source));
	println!("target: {}", registry.versions().label(target));
	if source >= target {
		println!("unchanged: record is already at or past the target");
	}
	if dry_run {
		println!("dry run: nothing written");
	} else {
		println!("wrote: {} ({})", out.display(), file.compression.as_str());
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct ConvertJson {
	path: String,
	out: Option<String>,
	#[serde(rename = "type")]
	type_name: String,
	source: i32,
	target: i32,
	source_label: String,
	target_label: String,
	compression: String,
	data_version_written: bool,
}
