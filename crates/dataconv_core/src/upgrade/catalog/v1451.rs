use crate::upgrade::catalog::ENTITY;
use crate::upgrade::{Converter, FLATTENING, MapValue, ObjectType, Result, TypeRegistryBuilder};

/// Falling blocks stored a numeric block id and metadata before the
/// flattening; afterwards they carry a full `BlockState` compound.
fn flatten_falling_block(data: &mut MapValue, resolve: impl Fn(i32) -> Result<MapValue>) -> Result<()> {
	if data.has_key_typed("BlockState", ObjectType::Map) {
		return Ok(());
	}

	let block_id = if data.has_key_typed("Block", ObjectType::Number) {
		data.get_int("Block", 0)
	} else if data.has_key_typed("TileID", ObjectType::Number) {
		data.get_int("TileID", 0)
	} else {
		return Ok(());
	};
	let meta = data.get_int("Data", 0) & 15;

	let state = resolve((block_id << 4) | meta)?;
	data.remove("Block");
	data.remove("Data");
	data.remove("TileID");
	data.set_map("BlockState", state);
	Ok(())
}

pub(super) fn register(builder: &mut TypeRegistryBuilder) -> Result<()> {
	builder.data_type_mut(ENTITY)?.add_converter_for_id(
		"minecraft:falling_block",
		Converter::new(FLATTENING, "falling block state", |data, ctx| {
			flatten_falling_block(data, |id| ctx.resolve_legacy_block(id))?;
			Ok(None)
		}),
	)?;
	Ok(())
}
