use std::path::PathBuf;

use dataconv::upgrade::{Result, VersionRegistry};

use crate::cmd::util::{emit_json, load_config};

#[derive(clap::Args)]
pub struct Args {
	#[arg(long)]
	pub config: Option<PathBuf>,
	#[arg(long)]
	pub json: bool,
}

/// Print the known version ladder, marking the current version.
pub fn run(args: Args) -> Result<()> {
	let Args { config, json } = args;
	let versions = VersionRegistry::new(&load_config(config.as_deref())?)?;

	if json {
		let payload = VersionsJson {
			current: versions.current(),
			max_depth: versions.max_depth(),
			versions: versions
				.versions()
				.map(|version| VersionJson {
					version,
					name: versions.name(version),
				})
				.collect(),
		};
		emit_json(&payload);
		return Ok(());
	}

	for version in versions.versions() {
		let marker = if version == versions.current() { " (current)" } else { "" };
		println!("{}{marker}", versions.label(version));
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct VersionsJson {
	current: i32,
	max_depth: u32,
	versions: Vec<VersionJson>,
}

#[derive(serde::Serialize)]
struct VersionJson {
	version: i32,
	name: Option<&'static str>,
}

#[cfg(test)]
mod tests;
