use crate::upgrade::catalog::{ITEM_COMPONENTS, ITEM_STACK};
use crate::upgrade::{Converter, MapValue, Result, TypeRegistryBuilder};

/// Embedded record tags and the component each one becomes.
const MOVED_TAGS: [(&str, &str); 2] = [
	("BlockEntityTag", "minecraft:block_entity_data"),
	("EntityTag", "minecraft:entity_data"),
];

/// Turn the free-form `tag` compound into data components. Whatever no
/// component claims is kept under `minecraft:custom_data`.
fn tag_to_components(data: &mut MapValue) {
	data.rename_key("Count", "count");
	let Some(mut tag) = data.take_map("tag") else {
		return;
	};

	let mut components = data.take_map("components").unwrap_or_default();
	for (from, to) in MOVED_TAGS {
		if let Some(record) = tag.take_map(from) {
			components.set_map(to, record);
		}
	}
	if !tag.is_empty() {
		components.set_map("minecraft:custom_data", tag);
	}
	if !components.is_empty() {
		data.set_map("components", components);
	}
}

pub(super) fn register(builder: &mut TypeRegistryBuilder) -> Result<()> {
	builder
		.data_type_mut(ITEM_STACK)?
		.add_structure_converter(Converter::new(ITEM_COMPONENTS, "item tag components", |data, _ctx| {
			tag_to_components(data);
			Ok(None)
		}))?;
	Ok(())
}
