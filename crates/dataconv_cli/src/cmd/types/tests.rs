use crate::cmd::test_support::run_dataconv_json;

#[test]
fn types_json_lists_every_builtin_type() {
	let json = run_dataconv_json(&["types", "--json"]);
	let types = json["types"].as_array().expect("types array");
	let names: Vec<&str> = types.iter().filter_map(|row| row["name"].as_str()).collect();
	assert_eq!(names, vec!["chunk", "entity", "item_stack", "player", "tile_entity"]);

	let tile = types.iter().find(|row| row["name"] == "tile_entity").expect("tile entity row");
	assert_eq!(tile["dispatch"], "id");
	assert!(tile["ids"].as_array().is_some_and(|ids| ids.iter().any(|id| id == "minecraft:sign")));
	assert!(tile["walkers"].as_u64().is_some_and(|count| count > 0));

	let chunk = types.iter().find(|row| row["name"] == "chunk").expect("chunk row");
	assert!(chunk["dispatch"].is_null());
}
