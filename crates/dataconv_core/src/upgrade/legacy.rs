use std::collections::HashMap;

use crate::upgrade::{ConvertError, MapValue, Result};

/// External table resolving pre-flattening numeric block state ids.
pub trait LegacyBlockLookup: Send + Sync {
	/// Return the block state record for `id`, or `None` when the table has no entry.
	fn block_state(&self, id: i32) -> Option<MapValue>;
}

/// Table with no entries. Every pre-flattening lookup fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLegacyTable;

impl LegacyBlockLookup for NoLegacyTable {
	fn block_state(&self, _id: i32) -> Option<MapValue> {
		None
	}
}

/// In-memory table supplied by the host.
#[derive(Debug, Clone, Default)]
pub struct LegacyTable {
	states: HashMap<i32, MapValue>,
}

impl LegacyTable {
	/// Create an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Add or replace the state record for `id`.
	pub fn insert(&mut self, id: i32, state: MapValue) -> &mut Self {
		self.states.insert(id, state);
		self
	}

	/// Add a state with only a `Name` field.
	pub fn insert_name(&mut self, id: i32, name: &str) -> &mut Self {
		let mut state = MapValue::new();
		state.set_string("Name", name);
		self.insert(id, state)
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	/// Whether the table is empty.
	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}
}

impl LegacyBlockLookup for LegacyTable {
	fn block_state(&self, id: i32) -> Option<MapValue> {
		self.states.get(&id).cloned()
	}
}

/// Resolve `id` through `table`, failing with [`ConvertError::LegacyNotSupported`].
pub fn resolve_block_state(table: &dyn LegacyBlockLookup, id: i32) -> Result<MapValue> {
	table.block_state(id).ok_or(ConvertError::LegacyNotSupported { id })
}
