use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use dataconv::upgrade::{
	CodecOptions, ConvertError, EngineConfig, LegacyBlockLookup, LegacyTable, NoLegacyTable, Result, TypeRegistry, Value,
	build_registry,
};
use serde_json::json;

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: failed to render json: {err}"),
	}
}

/// Codec options for the selected byte order.
pub(crate) fn codec_options(little_endian: bool) -> CodecOptions {
	if little_endian { CodecOptions::bedrock() } else { CodecOptions::default() }
}

/// Load engine settings from a JSON file, or defaults when no path is given.
pub(crate) fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
	match path {
		Some(path) => EngineConfig::from_json(&std::fs::read_to_string(path)?),
		None => Ok(EngineConfig::default()),
	}
}

/// Load a legacy block table mapping packed ids to block names.
///
/// The file is a JSON object such as `{"193": "minecraft:red_sand"}`.
pub(crate) fn load_legacy_table(path: Option<&Path>) -> Result<Arc<dyn LegacyBlockLookup>> {
	let Some(path) = path else {
		return Ok(Arc::new(NoLegacyTable));
	};

	let text = std::fs::read_to_string(path)?;
	let entries: BTreeMap<i32, String> = serde_json::from_str(&text).map_err(|err| ConvertError::InvalidConfig {
		reason: format!("legacy table {}: {err}", path.display()),
	})?;

	let mut table = LegacyTable::new();
	for (id, name) in &entries {
		table.insert_name(*id, name);
	}
	Ok(Arc::new(table))
}

/// Build the built-in registry from optional config and legacy table paths.
pub(crate) fn open_registry(config: Option<&Path>, legacy: Option<&Path>) -> Result<TypeRegistry> {
	let config = load_config(config)?;
	build_registry(&config, load_legacy_table(legacy)?)
}

/// Render a value tree as JSON that keeps every leaf kind.
pub(crate) fn value_to_json(value: &Value) -> serde_json::Value {
	let kind = value.kind().as_str();
	let payload = match value {
		Value::End => serde_json::Value::Null,
		Value::Byte(v) => json!(v),
		Value::Short(v) => json!(v),
		Value::Int(v) => json!(v),
		Value::Long(v) => json!(v),
		Value::Float(v) => json!(v),
		Value::Double(v) => json!(v),
		Value::String(v) => json!(v),
		Value::ByteArray(v) => json!(v),
		Value::IntArray(v) => json!(v),
		Value::LongArray(v) => json!(v),
		Value::List(list) => serde_json::Value::Array(list.iter().map(value_to_json).collect()),
		Value::Map(map) => {
			let mut out = serde_json::Map::new();
			for key in map.sorted_keys() {
				if let Some(child) = map.get(key) {
					out.insert(key.to_owned(), value_to_json(child));
				}
			}
			serde_json::Value::Object(out)
		}
	};
	json!({ "type": kind, "value": payload })
}
