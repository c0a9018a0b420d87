use tracing::warn;

use crate::upgrade::legacy::resolve_block_state;
use crate::upgrade::{ConvertError, ListValue, MapValue, ObjectType, Result, TypeRegistry, Value};

/// Conversion request handed to converters and walkers.
///
/// Every recursion goes through this context so embedded records are upgraded
/// with the same `(source, target)` pair as their parent, one level deeper.
#[derive(Debug, Clone, Copy)]
pub struct ConvertCtx<'a> {
	registry: &'a TypeRegistry,
	type_name: &'a str,
	source: i32,
	target: i32,
	depth: u32,
}

impl<'a> ConvertCtx<'a> {
	pub(crate) fn root(registry: &'a TypeRegistry, type_name: &'a str, source: i32, target: i32) -> Self {
		Self {
			registry,
			type_name,
			source,
			target,
			depth: 0,
		}
	}

	/// Registry the conversion runs against.
	pub fn registry(&self) -> &'a TypeRegistry {
		self.registry
	}

	/// Type of the record currently being converted.
	pub fn type_name(&self) -> &'a str {
		self.type_name
	}

	/// Version the outermost record was stored at.
	pub fn source(&self) -> i32 {
		self.source
	}

	/// Version every record in this call is upgraded to.
	pub fn target(&self) -> i32 {
		self.target
	}

	/// Number of cross-type recursions above this record.
	pub fn depth(&self) -> u32 {
		self.depth
	}

	/// Upgrade an embedded record of another (or the same) type.
	pub fn convert(&self, type_name: &str, record: MapValue) -> Result<MapValue> {
		let max_depth = self.registry.versions().max_depth();
		let depth = self.depth + 1;
		if depth > max_depth {
			warn!(type_name, depth, "conversion nesting limit reached");
			return Err(ConvertError::ConvertDepthExceeded { max_depth });
		}

		let data_type = self.registry.lookup(type_name)?;
		let child = ConvertCtx {
			registry: self.registry,
			type_name: data_type.name(),
			source: self.source,
			target: self.target,
			depth,
		};
		crate::upgrade::chain::run(data_type, record, &child)
	}

	/// Upgrade an embedded value; non-map values are returned unchanged.
	pub fn convert_value(&self, type_name: &str, value: Value) -> Result<Value> {
		match value {
			Value::Map(map) => Ok(Value::Map(self.convert(type_name, map)?)),
			other => Ok(other),
		}
	}

	/// Upgrade the map stored under `key`, if any.
	pub fn convert_map_at(&self, type_name: &str, parent: &mut MapValue, key: &str) -> Result<()> {
		if let Some(record) = parent.take_map(key) {
			parent.set_map(key, self.convert(type_name, record)?);
		}
		Ok(())
	}

	/// Upgrade every map element of the list stored under `key`, if any.
	pub fn convert_list_at(&self, type_name: &str, parent: &mut MapValue, key: &str) -> Result<()> {
		if let Some(list) = parent.get_list_mut(key) {
			self.convert_list(type_name, list)?;
		}
		Ok(())
	}

	/// Upgrade every map element of `list` in place.
	pub fn convert_list(&self, type_name: &str, list: &mut ListValue) -> Result<()> {
		for item in list.iter_mut() {
			if let Value::Map(record) = item {
				let converted = self.convert(type_name, std::mem::take(record))?;
				*record = converted;
			}
		}
		Ok(())
	}

	/// Follow `path` through nested maps and upgrade the map or list of maps at its end.
	pub fn convert_path(&self, type_name: &str, parent: &mut MapValue, path: &[&str]) -> Result<()> {
		let Some((last, parents)) = path.split_last() else {
			return Ok(());
		};

		let mut current = parent;
		for part in parents {
			match current.get_map_mut(part) {
				Some(next) => current = next,
				None => return Ok(()),
			}
		}

		match current.get(last).map(Value::kind) {
			Some(ObjectType::Map) => self.convert_map_at(type_name, current, last),
			Some(ObjectType::List) => self.convert_list_at(type_name, current, last),
			_ => Ok(()),
		}
	}

	/// Resolve a pre-flattening numeric block id through the registry's legacy table.
	pub fn resolve_legacy_block(&self, id: i32) -> Result<MapValue> {
		resolve_block_state(self.registry.legacy(), id)
	}
}
