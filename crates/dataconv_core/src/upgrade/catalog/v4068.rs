use crate::upgrade::catalog::{ITEM_STACK, TILE_ENTITY};
use crate::upgrade::{Converter, MapValue, Result, TypeRegistryBuilder, V24W38A, Value};

const VERSION: i32 = V24W38A + 2;

/// Escape backslashes and quotes for embedding in a JSON string literal.
pub(crate) fn escape(input: &str) -> String {
	input.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Replace a plain lock string with an item predicate matching the custom name.
fn convert_lock(root: &mut MapValue, src: &str, dst: &str) {
	let Some(lock) = root.remove(src) else {
		return;
	};
	let Value::String(lock) = lock else {
		return;
	};
	if lock.is_empty() {
		return;
	}

	let mut components = MapValue::new();
	components.set_string("custom_name", format!("\"{}\"", escape(&lock)));
	let mut predicate = MapValue::new();
	predicate.set_map("components", components);
	root.set_map(dst, predicate);
}

pub(super) fn register(builder: &mut TypeRegistryBuilder) -> Result<()> {
	builder
		.data_type_mut(ITEM_STACK)?
		.add_structure_converter(Converter::new(VERSION, "item lock component", |data, _ctx| {
			if let Some(components) = data.get_map_mut("components") {
				convert_lock(components, "minecraft:lock", "minecraft:lock");
			}
			Ok(None)
		}))?;
	builder
		.data_type_mut(TILE_ENTITY)?
		.add_structure_converter(Converter::new(VERSION, "block entity lock", |data, _ctx| {
			convert_lock(data, "Lock", "lock");
			Ok(None)
		}))?;
	Ok(())
}
