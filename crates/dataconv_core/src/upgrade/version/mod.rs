use std::collections::BTreeMap;

use serde::Deserialize;

use crate::upgrade::{ConvertError, Result};

/// First version whose blocks are addressed by name (17w47a).
pub const FLATTENING: i32 = 1451;
/// 18w20c, where chunk conversion is split for legacy structure data.
pub const V18W20C: i32 = 1493;
/// 1.20.1 release.
pub const V1_20_1: i32 = 3465;
/// 24w38a snapshot.
pub const V24W38A: i32 = 4066;
/// Version the built-in configuration upgrades to (1.21.4).
pub const DEFAULT_CURRENT_VERSION: i32 = 4189;

/// Built-in schema versions, ascending, with release names where they have one.
pub const BUILTIN_VERSIONS: &[(i32, Option<&str>)] = &[
	(99, None),
	(FLATTENING, Some("17w47a")),
	(V18W20C, Some("18w20c")),
	(1519, Some("1.13")),
	(2566, Some("1.16")),
	(2586, Some("1.16.5")),
	(2842, None),
	(2844, Some("21w43a")),
	(2975, Some("1.18.2")),
	(V1_20_1, Some("1.20.1")),
	(V1_20_1 + 99, None),
	(3818, None),
	(3953, Some("1.21")),
	(3955, Some("1.21.1")),
	(V24W38A, Some("24w38a")),
	(V24W38A + 2, None),
	(DEFAULT_CURRENT_VERSION, Some("1.21.4")),
];

const DEFAULT_MAX_DEPTH: u32 = 256;

/// Host-supplied engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
	/// Version records are upgraded to when the host names no target.
	pub current_version: i32,
	/// Locally registered intermediate versions beyond the built-in ladder.
	pub extra_versions: Vec<i32>,
	/// Maximum nesting of cross-type conversion calls.
	pub max_depth: u32,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			current_version: DEFAULT_CURRENT_VERSION,
			extra_versions: Vec::new(),
			max_depth: DEFAULT_MAX_DEPTH,
		}
	}
}

impl EngineConfig {
	/// Parse a JSON configuration document.
	pub fn from_json(text: &str) -> Result<Self> {
		serde_json::from_str(text).map_err(|err| ConvertError::InvalidConfig { reason: err.to_string() })
	}
}

/// Known schema versions: the built-in ladder plus configured extras.
#[derive(Debug, Clone)]
pub struct VersionRegistry {
	versions: BTreeMap<i32, Option<&'static str>>,
	current: i32,
	max_depth: u32,
}

impl VersionRegistry {
	/// Validate `config` and merge its extra versions into the built-in ladder.
	pub fn new(config: &EngineConfig) -> Result<Self> {
		if config.max_depth == 0 {
			return Err(ConvertError::InvalidConfig {
				reason: "max_depth must be at least 1".to_owned(),
			});
		}

		let mut versions: BTreeMap<i32, Option<&'static str>> = BUILTIN_VERSIONS.iter().copied().collect();
		for &extra in &config.extra_versions {
			if extra <= 0 {
				return Err(ConvertError::InvalidConfig {
					reason: format!("extra version {extra} must be positive"),
				});
			}
			versions.entry(extra).or_insert(None);
		}

		if !versions.contains_key(&config.current_version) {
			return Err(ConvertError::InvalidConfig {
				reason: format!("current version {} is not a known version", config.current_version),
			});
		}

		Ok(Self {
			versions,
			current: config.current_version,
			max_depth: config.max_depth,
		})
	}

	/// Whether converters may be registered at `version`.
	pub fn is_known(&self, version: i32) -> bool {
		self.versions.contains_key(&version)
	}

	/// Release name of `version`, if it has one.
	pub fn name(&self, version: i32) -> Option<&'static str> {
		self.versions.get(&version).copied().flatten()
	}

	/// Human label, e.g. `3465 (1.20.1)` or `3564`.
	pub fn label(&self, version: i32) -> String {
		match self.name(version) {
			Some(name) => format!("{version} ({name})"),
			None => version.to_string(),
		}
	}

	/// Configured current version.
	pub fn current(&self) -> i32 {
		self.current
	}

	/// Configured maximum conversion depth.
	pub fn max_depth(&self) -> u32 {
		self.max_depth
	}

	/// All known versions, ascending.
	pub fn versions(&self) -> impl Iterator<Item = i32> + '_ {
		self.versions.keys().copied()
	}
}
