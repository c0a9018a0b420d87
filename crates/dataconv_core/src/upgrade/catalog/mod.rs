//! Built-in data types, their walkers, and a sample of per-version fixups.

mod v1451;
mod v2842;
mod v3564;
mod v3818;
mod v4068;
mod walkers;

use std::sync::Arc;

use crate::upgrade::{EngineConfig, LegacyBlockLookup, Result, TypeRegistry, TypeRegistryBuilder};

/// Item stacks in inventories, containers, and item entities.
pub const ITEM_STACK: &str = "item_stack";
/// Block entities (signs, chests, ...).
pub const TILE_ENTITY: &str = "tile_entity";
/// Entities.
pub const ENTITY: &str = "entity";
/// Chunk records holding entities and block entities.
pub const CHUNK: &str = "chunk";
/// Player profiles.
pub const PLAYER: &str = "player";

/// Chunks lose the `Level` wrapper and take snake_case list names.
const CHUNK_FLAT_LAYOUT: i32 = 2842;
/// Item stacks move `tag` into data components.
const ITEM_COMPONENTS: i32 = 3818;

/// Built-in type names, sorted.
pub const TYPE_NAMES: &[&str] = &[CHUNK, ENTITY, ITEM_STACK, PLAYER, TILE_ENTITY];

/// Build the registry with every built-in type, walker, and converter.
pub fn build_registry(config: &EngineConfig, legacy: Arc<dyn LegacyBlockLookup>) -> Result<TypeRegistry> {
	let mut builder = TypeRegistryBuilder::new(config)?.with_legacy(legacy);
	register_types(&mut builder)?;
	walkers::register(&mut builder)?;
	v1451::register(&mut builder)?;
	v2842::register(&mut builder)?;
	v3564::register(&mut builder)?;
	v3818::register(&mut builder)?;
	v4068::register(&mut builder)?;
	Ok(builder.build())
}

fn register_types(builder: &mut TypeRegistryBuilder) -> Result<()> {
	builder.register(ITEM_STACK)?.dispatch_on(&["id"]);
	builder.register(TILE_ENTITY)?.dispatch_on(&["id"]);
	builder.register(ENTITY)?.dispatch_on(&["id"]);
	builder.register(CHUNK)?;
	builder.register(PLAYER)?;
	Ok(())
}
