use crate::upgrade::catalog::TILE_ENTITY;
use crate::upgrade::{Converter, ListValue, MapValue, ObjectType, Result, TypeRegistryBuilder, V1_20_1};

const VERSION: i32 = V1_20_1 + 99;

/// Serialized empty text component.
const EMPTY: &str = "\"\"";

const LEGACY_FIELDS: [&str; 10] = [
	"Text1",
	"Text2",
	"Text3",
	"Text4",
	"FilteredText1",
	"FilteredText2",
	"FilteredText3",
	"FilteredText4",
	"Color",
	"GlowingText",
];

fn is_empty_message(text: &str) -> bool {
	text.is_empty() || text == EMPTY
}

/// Fill blank filtered lines from the unfiltered ones; drop the list when nothing is left.
fn update_text(text: &mut MapValue) -> Result<()> {
	if text.get_boolean("_filtered_correct", false) {
		text.remove("_filtered_correct");
		return Ok(());
	}

	let Some(filtered) = text.get_list_typed("filtered_messages", ObjectType::String) else {
		return Ok(());
	};
	let messages = text.get_list_typed("messages", ObjectType::String);

	let mut merged = ListValue::new();
	let mut all_empty = true;
	for (idx, entry) in filtered.iter().enumerate() {
		let entry = entry.as_str().unwrap_or(EMPTY);
		let message = messages.and_then(|list| list.get(idx)).and_then(|value| value.as_str()).unwrap_or(EMPTY);
		let chosen = if is_empty_message(entry) { message } else { entry };
		all_empty &= is_empty_message(chosen);
		merged.add_string(chosen)?;
	}

	if all_empty {
		text.remove("filtered_messages");
	} else {
		text.set_list("filtered_messages", merged);
	}
	Ok(())
}

pub(super) fn register(builder: &mut TypeRegistryBuilder) -> Result<()> {
	builder.data_type_mut(TILE_ENTITY)?.add_converter_for_ids(
		&["minecraft:sign", "minecraft:hanging_sign"],
		Converter::new(VERSION, "sign filtered text", |data, _ctx| {
			for side in ["front_text", "back_text"] {
				if let Some(text) = data.get_map_mut(side) {
					update_text(text)?;
				}
			}
			for field in LEGACY_FIELDS {
				data.remove(field);
			}
			Ok(None)
		}),
	)?;
	Ok(())
}
