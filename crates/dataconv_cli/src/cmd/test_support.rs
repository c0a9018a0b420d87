use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::OnceLock;

use dataconv::upgrade::{CodecOptions, Compression, MapValue, TagFile, Value, parse_snbt};
use dataconv_testkit::{fixture_text, parse_json_stdout, target_dir as workspace_target_dir};

static DATACONV_BIN: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn run_dataconv(args: &[&str]) -> Output {
	Command::new(dataconv_bin()).args(args).output().expect("dataconv command executes")
}

pub(crate) fn run_dataconv_json(args: &[&str]) -> serde_json::Value {
	let output = run_dataconv(args);
	assert!(
		output.status.success(),
		"dataconv command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	parse_json_stdout(&output.stdout)
}

pub(crate) fn path_arg(path: &Path) -> String {
	path.to_string_lossy().into_owned()
}

/// Parse an SNBT fixture and write it as a tag file under `dir`.
pub(crate) fn write_fixture(dir: &Path, fixture: &str, compression: Compression) -> PathBuf {
	let root = match parse_snbt(&fixture_text(fixture)).expect("fixture parses") {
		Value::Map(map) => map,
		other => panic!("fixture root is {}", other.kind()),
	};
	write_root(dir, &format!("{fixture}.dat"), root, compression)
}

pub(crate) fn write_root(dir: &Path, name: &str, root: MapValue, compression: Compression) -> PathBuf {
	let path = dir.join(name);
	TagFile::new(root, compression, CodecOptions::default()).save(&path).expect("tag file written");
	path
}

fn dataconv_bin() -> &'static PathBuf {
	DATACONV_BIN.get_or_init(resolve_dataconv_bin)
}

fn resolve_dataconv_bin() -> PathBuf {
	if let Some(path) = option_env!("CARGO_BIN_EXE_dataconv") {
		return PathBuf::from(path);
	}

	let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	let target_dir = workspace_target_dir();

	let mut bin = target_dir.join("debug");
	bin.push(if cfg!(windows) { "dataconv.exe" } else { "dataconv" });

	let status = Command::new("cargo")
		.current_dir(&manifest_dir)
		.args(["build", "--quiet", "--bin", "dataconv"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build dataconv binary at {}", bin.display());

	bin
}
