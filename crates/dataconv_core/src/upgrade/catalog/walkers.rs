use crate::upgrade::catalog::{CHUNK, CHUNK_FLAT_LAYOUT, ENTITY, ITEM_COMPONENTS, ITEM_STACK, PLAYER, TILE_ENTITY};
use crate::upgrade::{Result, TypeRegistryBuilder, Walker};

/// Oldest layout the walkers describe.
const BASE: i32 = 99;

pub(super) fn register(builder: &mut TypeRegistryBuilder) -> Result<()> {
	let chunk = builder.data_type_mut(CHUNK)?;
	chunk.add_walker(Walker::new(BASE, "chunk level entities", |data, ctx| {
		if let Some(level) = data.get_map_mut("Level") {
			ctx.convert_list_at(ENTITY, level, "Entities")?;
			ctx.convert_list_at(TILE_ENTITY, level, "TileEntities")?;
		}
		Ok(())
	}))?;
	chunk.add_walker(Walker::new(CHUNK_FLAT_LAYOUT, "chunk entities", |data, ctx| {
		ctx.convert_list_at(ENTITY, data, "entities")?;
		ctx.convert_list_at(TILE_ENTITY, data, "block_entities")
	}))?;

	builder.data_type_mut(PLAYER)?.add_walker(Walker::new(BASE, "player inventory", |data, ctx| {
		ctx.convert_list_at(ITEM_STACK, data, "Inventory")?;
		ctx.convert_list_at(ITEM_STACK, data, "EnderItems")?;
		ctx.convert_map_at(ENTITY, data, "ShoulderEntityLeft")?;
		ctx.convert_map_at(ENTITY, data, "ShoulderEntityRight")
	}))?;

	let entity = builder.data_type_mut(ENTITY)?;
	entity.add_walker(Walker::new(BASE, "entity passengers and equipment", |data, ctx| {
		ctx.convert_list_at(ENTITY, data, "Passengers")?;
		ctx.convert_list_at(ITEM_STACK, data, "HandItems")?;
		ctx.convert_list_at(ITEM_STACK, data, "ArmorItems")
	}))?;
	entity.add_walker_for_id(
		"minecraft:item",
		Walker::new(BASE, "item entity stack", |data, ctx| ctx.convert_map_at(ITEM_STACK, data, "Item")),
	)?;
	entity.add_walker_for_id(
		"minecraft:chest_minecart",
		Walker::new(BASE, "minecart items", |data, ctx| ctx.convert_list_at(ITEM_STACK, data, "Items")),
	)?;

	let tile = builder.data_type_mut(TILE_ENTITY)?;
	tile.add_walker_for_ids(
		&["minecraft:chest", "minecraft:barrel", "minecraft:shulker_box"],
		Walker::new(BASE, "container items", |data, ctx| ctx.convert_list_at(ITEM_STACK, data, "Items")),
	)?;
	tile.add_walker_for_id(
		"minecraft:jukebox",
		Walker::new(BASE, "jukebox record", |data, ctx| ctx.convert_map_at(ITEM_STACK, data, "RecordItem")),
	)?;

	let item = builder.data_type_mut(ITEM_STACK)?;
	item.add_walker(Walker::new(BASE, "item tag", |data, ctx| {
		ctx.convert_path(TILE_ENTITY, data, &["tag", "BlockEntityTag"])?;
		ctx.convert_path(ENTITY, data, &["tag", "EntityTag"])
	}))?;
	item.add_walker(Walker::new(ITEM_COMPONENTS, "item components", |data, ctx| {
		let Some(components) = data.get_map_mut("components") else {
			return Ok(());
		};
		ctx.convert_map_at(TILE_ENTITY, components, "minecraft:block_entity_data")?;
		ctx.convert_map_at(ENTITY, components, "minecraft:entity_data")?;
		ctx.convert_list_at(ITEM_STACK, components, "minecraft:bundle_contents")?;
		if let Some(container) = components.get_list_mut("minecraft:container") {
			for slot in container.iter_mut() {
				if let Some(slot) = slot.as_map_mut() {
					ctx.convert_map_at(ITEM_STACK, slot, "item")?;
				}
			}
		}
		Ok(())
	}))?;

	Ok(())
}
