use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::ops::Bound;
use std::sync::Arc;

use tracing::debug;

use crate::upgrade::{
	ConvertCtx, ConvertError, EngineConfig, LegacyBlockLookup, MapValue, NoLegacyTable, Result, Value, VersionRegistry,
};

/// Signature of a converter body: mutate in place and/or return a replacement record.
pub type ConvertFn = dyn Fn(&mut MapValue, &ConvertCtx<'_>) -> Result<Option<MapValue>> + Send + Sync;
/// Signature of a walker body: recurse into the embedded records of one containment relation.
pub type WalkFn = dyn Fn(&mut MapValue, &ConvertCtx<'_>) -> Result<()> + Send + Sync;

/// One version step of a data type.
#[derive(Clone)]
pub struct Converter {
	target_version: i32,
	label: String,
	apply: Arc<ConvertFn>,
}

impl Converter {
	/// Wrap `apply`, which leaves records valid at `target_version`.
	pub fn new(
		target_version: i32,
		label: impl Into<String>,
		apply: impl Fn(&mut MapValue, &ConvertCtx<'_>) -> Result<Option<MapValue>> + Send + Sync + 'static,
	) -> Self {
		Self {
			target_version,
			label: label.into(),
			apply: Arc::new(apply),
		}
	}

	/// Version the record is valid at after this converter runs.
	pub fn target_version(&self) -> i32 {
		self.target_version
	}

	/// Diagnostic label used in logs and errors.
	pub fn label(&self) -> &str {
		&self.label
	}

	pub(crate) fn apply(&self, record: &mut MapValue, ctx: &ConvertCtx<'_>) -> Result<Option<MapValue>> {
		(self.apply)(record, ctx)
	}
}

impl fmt::Debug for Converter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Converter")
			.field("target_version", &self.target_version)
			.field("label", &self.label)
			.finish_non_exhaustive()
	}
}

/// Hand-coded recursion into embedded records, selected by version floor.
#[derive(Clone)]
pub struct Walker {
	version: i32,
	label: String,
	apply: Arc<WalkFn>,
}

impl Walker {
	/// Wrap `apply`, which describes the record layout from `version` on.
	pub fn new(
		version: i32,
		label: impl Into<String>,
		apply: impl Fn(&mut MapValue, &ConvertCtx<'_>) -> Result<()> + Send + Sync + 'static,
	) -> Self {
		Self {
			version,
			label: label.into(),
			apply: Arc::new(apply),
		}
	}

	/// First version this layout applies to.
	pub fn version(&self) -> i32 {
		self.version
	}

	/// Diagnostic label used in logs and errors.
	pub fn label(&self) -> &str {
		&self.label
	}

	pub(crate) fn apply(&self, record: &mut MapValue, ctx: &ConvertCtx<'_>) -> Result<()> {
		(self.apply)(record, ctx)
	}
}

impl fmt::Debug for Walker {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Walker")
			.field("version", &self.version)
			.field("label", &self.label)
			.finish_non_exhaustive()
	}
}

/// Named record category owning its converter chain and walkers.
pub struct DataType {
	name: String,
	dispatch: Option<Vec<String>>,
	versions: Arc<VersionRegistry>,
	structure: Vec<Converter>,
	by_id: HashMap<String, Vec<Converter>>,
	step_versions: BTreeSet<i32>,
	structure_walkers: Vec<Walker>,
	id_walkers: HashMap<String, Vec<Walker>>,
}

impl DataType {
	fn new(name: String, versions: Arc<VersionRegistry>) -> Self {
		Self {
			name,
			dispatch: None,
			versions,
			structure: Vec::new(),
			by_id: HashMap::new(),
			step_versions: BTreeSet::new(),
			structure_walkers: Vec::new(),
			id_walkers: HashMap::new(),
		}
	}

	/// Registered type name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Read the dispatch id from the string at `path` (e.g. `["id"]`).
	pub fn dispatch_on(&mut self, path: &[&str]) -> &mut Self {
		self.dispatch = Some(path.iter().map(|part| (*part).to_owned()).collect());
		self
	}

	/// Configured dispatch path, if any.
	pub fn dispatch_path(&self) -> Option<&[String]> {
		self.dispatch.as_deref()
	}

	/// Current dispatch id of `record`.
	pub fn dispatch_id(&self, record: &MapValue) -> Option<String> {
		let (last, parents) = self.dispatch.as_deref()?.split_last()?;
		let mut current = record;
		for part in parents {
			current = current.get_map(part)?;
		}
		current.get_string(last).map(str::to_owned)
	}

	/// Add a converter run for every record of this type.
	pub fn add_structure_converter(&mut self, converter: Converter) -> Result<&mut Self> {
		self.check_version(converter.target_version)?;
		self.step_versions.insert(converter.target_version);
		insert_by_version(&mut self.structure, converter, Converter::target_version);
		Ok(self)
	}

	/// Add a converter run only for records whose dispatch id is `id`.
	pub fn add_converter_for_id(&mut self, id: &str, converter: Converter) -> Result<&mut Self> {
		self.check_dispatch()?;
		self.check_version(converter.target_version)?;

		let chain = self.by_id.entry(id.to_owned()).or_default();
		if chain.iter().any(|existing| existing.target_version == converter.target_version) {
			return Err(ConvertError::DuplicateIdConverter {
				type_name: self.name.clone(),
				id: id.to_owned(),
				version: converter.target_version,
			});
		}

		self.step_versions.insert(converter.target_version);
		insert_by_version(chain, converter, Converter::target_version);
		Ok(self)
	}

	/// Register one converter for several ids.
	pub fn add_converter_for_ids(&mut self, ids: &[&str], converter: Converter) -> Result<&mut Self> {
		for id in ids {
			self.add_converter_for_id(id, converter.clone())?;
		}
		Ok(self)
	}

	/// Add a walker applied to every record of this type.
	pub fn add_walker(&mut self, walker: Walker) -> Result<&mut Self> {
		self.check_version(walker.version)?;
		insert_by_version(&mut self.structure_walkers, walker, Walker::version);
		Ok(self)
	}

	/// Add a walker applied only to records whose dispatch id is `id`.
	pub fn add_walker_for_id(&mut self, id: &str, walker: Walker) -> Result<&mut Self> {
		self.check_dispatch()?;
		self.check_version(walker.version)?;
		insert_by_version(self.id_walkers.entry(id.to_owned()).or_default(), walker, Walker::version);
		Ok(self)
	}

	/// Register one walker for several ids.
	pub fn add_walker_for_ids(&mut self, ids: &[&str], walker: Walker) -> Result<&mut Self> {
		for id in ids {
			self.add_walker_for_id(id, walker.clone())?;
		}
		Ok(self)
	}

	/// Structure converters, ascending by version.
	pub fn structure_converters(&self) -> &[Converter] {
		&self.structure
	}

	/// Id converters registered for `id`, ascending by version.
	pub fn id_converters(&self, id: &str) -> &[Converter] {
		self.by_id.get(id).map_or(&[], Vec::as_slice)
	}

	/// Ids with at least one converter or walker, sorted.
	pub fn ids(&self) -> Vec<&str> {
		let mut ids: Vec<&str> = self.by_id.keys().chain(self.id_walkers.keys()).map(String::as_str).collect();
		ids.sort_unstable();
		ids.dedup();
		ids
	}

	/// Total number of id converters across all ids.
	pub fn id_converter_count(&self) -> usize {
		self.by_id.values().map(Vec::len).sum()
	}

	/// Total number of walkers, structure and per-id.
	pub fn walker_count(&self) -> usize {
		self.structure_walkers.len() + self.id_walkers.values().map(Vec::len).sum::<usize>()
	}

	/// Distinct converter versions `v` with `source < v <= target`, ascending.
	pub(crate) fn steps_between(&self, source: i32, target: i32) -> impl Iterator<Item = i32> + '_ {
		self.step_versions
			.range((Bound::Excluded(source), Bound::Included(target)))
			.copied()
	}

	pub(crate) fn structure_at(&self, version: i32) -> &[Converter] {
		slice_at(&self.structure, version, Converter::target_version)
	}

	pub(crate) fn id_converters_at(&self, id: &str, version: i32) -> &[Converter] {
		slice_at(self.id_converters(id), version, Converter::target_version)
	}

	/// Structure walkers in effect at `version`.
	pub fn structure_walkers_at(&self, version: i32) -> &[Walker] {
		floor_slice(&self.structure_walkers, version)
	}

	/// Id walkers in effect for `id` at `version`.
	pub fn id_walkers_at(&self, id: &str, version: i32) -> &[Walker] {
		self.id_walkers.get(id).map_or(&[], |walkers| floor_slice(walkers, version))
	}

	fn check_dispatch(&self) -> Result<()> {
		if self.dispatch.is_none() {
			return Err(ConvertError::NoDispatchPath {
				type_name: self.name.clone(),
			});
		}
		Ok(())
	}

	fn check_version(&self, version: i32) -> Result<()> {
		if !self.versions.is_known(version) {
			return Err(ConvertError::UnknownVersion {
				type_name: self.name.clone(),
				version,
			});
		}
		Ok(())
	}
}

impl fmt::Debug for DataType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DataType")
			.field("name", &self.name)
			.field("dispatch", &self.dispatch)
			.field("structure", &self.structure.len())
			.field("by_id", &self.id_converter_count())
			.field("walkers", &self.walker_count())
			.finish()
	}
}

/// Insert after every entry with version `<= key(item)`, keeping registration order at ties.
fn insert_by_version<T>(items: &mut Vec<T>, item: T, key: fn(&T) -> i32) {
	let version = key(&item);
	let at = items.partition_point(|existing| key(existing) <= version);
	items.insert(at, item);
}

fn slice_at<T>(items: &[T], version: i32, key: fn(&T) -> i32) -> &[T] {
	let start = items.partition_point(|item| key(item) < version);
	let end = items.partition_point(|item| key(item) <= version);
	&items[start..end]
}

fn floor_slice(walkers: &[Walker], version: i32) -> &[Walker] {
	let end = walkers.partition_point(|walker| walker.version <= version);
	let Some(floor) = end.checked_sub(1).map(|last| walkers[last].version) else {
		return &[];
	};
	slice_at(&walkers[..end], floor, Walker::version)
}

/// Mutable registry used while converter modules register themselves.
pub struct TypeRegistryBuilder {
	versions: Arc<VersionRegistry>,
	legacy: Arc<dyn LegacyBlockLookup>,
	types: BTreeMap<String, DataType>,
}

impl TypeRegistryBuilder {
	/// Start an empty registry for `config`, with no legacy table.
	pub fn new(config: &EngineConfig) -> Result<Self> {
		Ok(Self {
			versions: Arc::new(VersionRegistry::new(config)?),
			legacy: Arc::new(NoLegacyTable),
			types: BTreeMap::new(),
		})
	}

	/// Use `legacy` to resolve pre-flattening ids.
	pub fn with_legacy(mut self, legacy: Arc<dyn LegacyBlockLookup>) -> Self {
		self.legacy = legacy;
		self
	}

	/// Known versions converters may be registered at.
	pub fn versions(&self) -> &VersionRegistry {
		&self.versions
	}

	/// Register a new data type.
	pub fn register(&mut self, name: &str) -> Result<&mut DataType> {
		if self.types.contains_key(name) {
			return Err(ConvertError::DuplicateType { name: name.to_owned() });
		}
		let data_type = DataType::new(name.to_owned(), Arc::clone(&self.versions));
		Ok(self.types.entry(name.to_owned()).or_insert(data_type))
	}

	/// Mutable access to an already registered type.
	pub fn data_type_mut(&mut self, name: &str) -> Result<&mut DataType> {
		self.types
			.get_mut(name)
			.ok_or_else(|| ConvertError::UnknownType { name: name.to_owned() })
	}

	/// Freeze the registry.
	pub fn build(self) -> TypeRegistry {
		debug!(types = self.types.len(), current = self.versions.current(), "type registry built");
		TypeRegistry {
			versions: self.versions,
			legacy: self.legacy,
			types: self.types,
		}
	}
}

/// Immutable registry of data types; safe to share across threads.
pub struct TypeRegistry {
	versions: Arc<VersionRegistry>,
	legacy: Arc<dyn LegacyBlockLookup>,
	types: BTreeMap<String, DataType>,
}

impl TypeRegistry {
	/// Data type named `name`, if registered.
	pub fn get(&self, name: &str) -> Option<&DataType> {
		self.types.get(name)
	}

	/// Data type named `name`, failing with [`ConvertError::UnknownType`].
	pub fn lookup(&self, name: &str) -> Result<&DataType> {
		self.get(name).ok_or_else(|| ConvertError::UnknownType { name: name.to_owned() })
	}

	/// All data types, sorted by name.
	pub fn types(&self) -> impl Iterator<Item = &DataType> {
		self.types.values()
	}

	/// Known version ladder.
	pub fn versions(&self) -> &VersionRegistry {
		&self.versions
	}

	/// External table for pre-flattening ids.
	pub fn legacy(&self) -> &dyn LegacyBlockLookup {
		self.legacy.as_ref()
	}

	/// Upgrade `record` of type `type_name` from `source` to `target`.
	///
	/// Non-map values and `source >= target` return the input unchanged.
	pub fn convert(&self, type_name: &str, record: Value, source: i32, target: i32) -> Result<Value> {
		match record {
			Value::Map(map) => Ok(Value::Map(self.convert_map(type_name, map, source, target)?)),
			other => {
				self.lookup(type_name)?;
				Ok(other)
			}
		}
	}

	/// Upgrade a map record of type `type_name` from `source` to `target`.
	pub fn convert_map(&self, type_name: &str, record: MapValue, source: i32, target: i32) -> Result<MapValue> {
		let data_type = self.lookup(type_name)?;
		let ctx = ConvertCtx::root(self, data_type.name(), source, target);
		crate::upgrade::chain::run(data_type, record, &ctx)
	}
}

impl fmt::Debug for TypeRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeRegistry")
			.field("versions", &self.versions)
			.field("types", &self.types)
			.finish_non_exhaustive()
	}
}
