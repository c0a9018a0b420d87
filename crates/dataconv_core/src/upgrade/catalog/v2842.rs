use crate::upgrade::catalog::{CHUNK, CHUNK_FLAT_LAYOUT};
use crate::upgrade::{Converter, MapValue, Result, TypeRegistryBuilder};

const RENAMES: [(&str, &str); 7] = [
	("Entities", "entities"),
	("TileEntities", "block_entities"),
	("TileTicks", "block_ticks"),
	("LiquidTicks", "fluid_ticks"),
	("Sections", "sections"),
	("Structures", "structures"),
	("PostProcessing", "post_processing"),
];

/// Hoist the `Level` compound into the chunk root. Root entries such as
/// `DataVersion` win over same-named level entries.
fn remove_level(data: &mut MapValue) -> Option<MapValue> {
	let mut level = data.take_map("Level")?;
	for (key, value) in std::mem::take(data) {
		level.insert(key, value);
	}
	for (from, to) in RENAMES {
		level.rename_key(from, to);
	}
	Some(level)
}

pub(super) fn register(builder: &mut TypeRegistryBuilder) -> Result<()> {
	builder
		.data_type_mut(CHUNK)?
		.add_structure_converter(Converter::new(CHUNK_FLAT_LAYOUT, "chunk level removal", |data, _ctx| {
			Ok(remove_level(data))
		}))?;
	Ok(())
}
