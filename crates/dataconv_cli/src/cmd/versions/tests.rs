use dataconv_testkit::fixture_path;

use crate::cmd::test_support::{path_arg, run_dataconv, run_dataconv_json};

#[test]
fn default_ladder_ends_at_current() {
	let json = run_dataconv_json(&["versions", "--json"]);
	assert_eq!(json["current"], 4189);
	let versions = json["versions"].as_array().expect("versions array");
	assert_eq!(versions.last().map(|row| &row["version"]), Some(&serde_json::json!(4189)));
	assert!(versions.iter().any(|row| row["version"] == 1451 && row["name"] == "17w47a"));
}

#[test]
fn config_extras_join_the_ladder() {
	let config = fixture_path("engine_sparse.json");
	let json = run_dataconv_json(&["versions", "--config", &path_arg(&config), "--json"]);
	assert_eq!(json["current"], 5000);
	assert_eq!(json["max_depth"], 64);
	assert!(json["versions"].as_array().is_some_and(|rows| rows.iter().any(|row| row["version"] == 4500)));
}

#[test]
fn unknown_config_fields_are_rejected() {
	let dir = tempfile::tempdir().expect("tempdir");
	let config = dir.path().join("bad.json");
	std::fs::write(&config, r#"{"current_version": 4189, "colour": "red"}"#).expect("config written");

	let output = run_dataconv(&["versions", "--config", &path_arg(&config)]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("invalid config"));
}
