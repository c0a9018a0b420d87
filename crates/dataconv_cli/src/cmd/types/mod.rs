use std::path::PathBuf;

use dataconv::upgrade::{DataType, Result};

use crate::cmd::util::{emit_json, open_registry};

#[derive(clap::Args)]
pub struct Args {
	#[arg(long)]
	pub config: Option<PathBuf>,
	#[arg(long)]
	pub json: bool,
}

/// List built-in data types with their converter and walker counts.
pub fn run(args: Args) -> Result<()> {
	let Args { config, json } = args;
	let registry = open_registry(config.as_deref(), None)?;
	let rows: Vec<TypeRowJson> = registry.types().map(type_row).collect();

	if json {
		emit_json(&TypesJson { types: rows });
		return Ok(());
	}

	println!("types: {}", rows.len());
	for row in &rows {
		println!(
			"  {} dispatch={} structure={} by_id={} ids={} walkers={}",
			row.name,
			row.dispatch.as_deref().unwrap_or("-"),
			row.structure_converters,
			row.id_converters,
			row.ids.len(),
			row.walkers
		);
	}
	Ok(())
}

fn type_row(data_type: &DataType) -> TypeRowJson {
	TypeRowJson {
		name: data_type.name().to_owned(),
		dispatch: data_type.dispatch_path().map(|path| path.join(".")),
		structure_converters: data_type.structure_converters().len(),
		id_converters: data_type.id_converter_count(),
		ids: data_type.ids().into_iter().map(str::to_owned).collect(),
		walkers: data_type.walker_count(),
	}
}

#[derive(serde::Serialize)]
struct TypesJson {
	types: Vec<TypeRowJson>,
}

#[derive(serde::Serialize)]
struct TypeRowJson {
	name: String,
	dispatch: Option<String>,
	structure_converters: usize,
	id_converters: usize,
	ids: Vec<String>,
	walkers: usize,
}

#[cfg(test)]
mod tests;
