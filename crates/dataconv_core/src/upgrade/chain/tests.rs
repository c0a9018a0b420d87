use crate::upgrade::{
	ConvertCtx, ConvertError, Converter, EngineConfig, MapValue, Result, TypeRegistry, TypeRegistryBuilder, Walker,
};

const THING: &str = "thing";
const PART: &str = "part";

fn push_log(data: &mut MapValue, step: &str) {
	let mut log = data.take_list("log").unwrap_or_default();
	log.add_string(step).expect("string log");
	data.set_list("log", log);
}

fn logger(step: &'static str) -> impl Fn(&mut MapValue, &ConvertCtx<'_>) -> Result<Option<MapValue>> + Send + Sync + 'static {
	move |data, _ctx| {
		push_log(data, step);
		Ok(None)
	}
}

fn log_of(record: &MapValue) -> Vec<&str> {
	record
		.get_list("log")
		.map(|log| log.iter().filter_map(|value| value.as_str()).collect())
		.unwrap_or_default()
}

/// Sparse ladder 10..40 with a rename at 30 and a replacement at 40.
fn test_registry() -> TypeRegistry {
	let config = EngineConfig {
		current_version: 40,
		extra_versions: vec![10, 20, 30, 40],
		max_depth: 8,
	};
	let mut builder = TypeRegistryBuilder::new(&config).expect("config is valid");

	let thing = builder.register(THING).expect("register thing");
	thing.dispatch_on(&["id"]);
	thing.add_structure_converter(Converter::new(10, "s10", logger("s10"))).expect("s10");
	thing.add_converter_for_id("a", Converter::new(20, "a20", logger("a20"))).expect("a20");
	thing.add_structure_converter(Converter::new(20, "s20", logger("s20"))).expect("s20");
	thing
		.add_structure_converter(Converter::new(30, "rename a to b", |data, _ctx| {
			if data.get_string("id") == Some("a") {
				data.set_string("id", "b");
			}
			push_log(data, "s30");
			Ok(None)
		}))
		.expect("s30");
	thing.add_converter_for_id("a", Converter::new(30, "a30", logger("a30"))).expect("a30");
	thing.add_converter_for_id("b", Converter::new(30, "b30", logger("b30"))).expect("b30");
	thing
		.add_structure_converter(Converter::new(40, "replace", |data, _ctx| {
			let mut replacement = data.clone();
			replacement.set_boolean("replaced", true);
			push_log(&mut replacement, "r40");
			Ok(Some(replacement))
		}))
		.expect("r40");
	thing
		.add_walker(Walker::new(10, "part", |data, ctx| ctx.convert_map_at(PART, data, "part")))
		.expect("walker");

	let part = builder.register(PART).expect("register part");
	part.add_structure_converter(Converter::new(20, "p20", logger("p20"))).expect("p20");
	part.add_structure_converter(Converter::new(30, "p30", logger("p30"))).expect("p30");

	builder.build()
}

fn thing(id: &str) -> MapValue {
	let mut record = MapValue::new();
	record.set_string("id", id);
	record.set_map("part", MapValue::new());
	record
}

mod ordering {

	use super::{THING, log_of, test_registry, thing};

	#[test]
	fn full_ladder_runs_in_version_order_with_structure_first() {
		let out = test_registry().convert_map(THING, thing("a"), 0, 40).expect("converts");
		assert_eq!(log_of(&out), vec!["s10", "s20", "a20", "s30", "b30", "r40"]);
		assert_eq!(out.get_string("id"), Some("b"));
		assert!(out.get_boolean("replaced", false));
	}

	#[test]
	fn source_version_is_exclusive_and_target_inclusive() {
		let out = test_registry().convert_map(THING, thing("a"), 10, 20).expect("converts");
		assert_eq!(log_of(&out), vec!["s20", "a20"]);
	}

	#[test]
	fn targets_between_registered_versions_stop_at_the_floor() {
		let out = test_registry().convert_map(THING, thing("a"), 0, 25).expect("converts");
		assert_eq!(log_of(&out), vec!["s10", "s20", "a20"]);
	}

	#[test]
	fn dispatch_id_is_reread_after_structure_converters() {
		let out = test_registry().convert_map(THING, thing("a"), 20, 30).expect("converts");
		assert_eq!(log_of(&out), vec!["s30", "b30"], "a30 must not run once the id reads b");
	}

	#[test]
	fn embedded_records_share_the_version_pair() {
		let out = test_registry().convert_map(THING, thing("c"), 15, 40).expect("converts");
		let part = out.get_map("part").expect("part kept");
		assert_eq!(log_of(part), vec!["p20", "p30"]);
	}

	#[test]
	fn non_map_values_are_returned_unchanged() {
		let value = crate::upgrade::Value::Int(5);
		let out = test_registry().convert(THING, value.clone(), 0, 40).expect("converts");
		assert_eq!(out, value);
	}
}

mod failures {

	use super::{MapValue, THING};
	use crate::upgrade::{ConvertError, Converter, EngineConfig, TypeRegistryBuilder};

	#[test]
	fn converter_errors_abort_and_name_the_step() {
		let config = EngineConfig {
			current_version: 20,
			extra_versions: vec![10, 20],
			..EngineConfig::default()
		};
		let mut builder = TypeRegistryBuilder::new(&config).expect("config is valid");
		let thing = builder.register(THING).expect("register");
		thing
			.add_structure_converter(Converter::new(10, "needs name", |data, _ctx| {
				data.get_forced_string("name")?;
				Ok(None)
			}))
			.expect("register converter");
		let registry = builder.build();

		let err = registry.convert_map(THING, MapValue::new(), 0, 20).expect_err("name is missing");
		match &err {
			ConvertError::ConverterFailed { label, version, type_name, .. } => {
				assert_eq!(label, "needs name");
				assert_eq!(*version, 10);
				assert_eq!(type_name, THING);
			}
			other => panic!("unexpected error: {other}"),
		}
		assert!(matches!(err.root_cause(), ConvertError::MissingKey { .. }));
	}

	#[test]
	fn unknown_type_is_reported() {
		let registry = TypeRegistryBuilder::new(&EngineConfig::default()).expect("default config").build();
		let err = registry.convert_map("ghost", MapValue::new(), 0, 1).expect_err("no such type");
		assert!(matches!(err, ConvertError::UnknownType { .. }));
	}
}

mod laws {

	use proptest::prelude::*;

	use super::{THING, test_registry, thing};

	fn id_strategy() -> impl Strategy<Value = &'static str> {
		prop_oneof![Just("a"), Just("b"), Just("c")]
	}

	proptest! {
		#[test]
		fn same_version_is_identity(id in id_strategy(), version in 0..50i32) {
			let registry = test_registry();
			let record = thing(id);
			let out = registry.convert_map(THING, record.clone(), version, version).expect("converts");
			prop_assert_eq!(out, record);
		}

		#[test]
		fn downgrade_requests_are_no_ops(id in id_strategy(), source in 0..50i32, target in 0..50i32) {
			prop_assume!(source >= target);
			let registry = test_registry();
			let record = thing(id);
			let out = registry.convert_map(THING, record.clone(), source, target).expect("converts");
			prop_assert_eq!(out, record);
		}

		#[test]
		fn chain_splits_at_any_intermediate_version(id in id_strategy(), versions in proptest::collection::vec(0..50i32, 3)) {
			let mut versions = versions;
			versions.sort_unstable();
			let (v0, v1, v2) = (versions[0], versions[1], versions[2]);
			let registry = test_registry();

			let direct = registry.convert_map(THING, thing(id), v0, v2).expect("direct");
			let first = registry.convert_map(THING, thing(id), v0, v1).expect("first leg");
			let split = registry.convert_map(THING, first, v1, v2).expect("second leg");
			prop_assert_eq!(direct, split);
		}

		#[test]
		fn conversion_is_deterministic(id in id_strategy(), source in 0..50i32, target in 0..50i32) {
			let registry = test_registry();
			let left = registry.convert_map(THING, thing(id), source, target).expect("left");
			let right = registry.convert_map(THING, thing(id), source, target).expect("right");
			prop_assert_eq!(left, right);
		}

		#[test]
		fn id_converters_only_touch_their_id(source in 0..20i32, target in 20..30i32) {
			let registry = test_registry();
			let a = registry.convert_map(THING, thing("a"), source, target).expect("a");
			let c = registry.convert_map(THING, thing("c"), source, target).expect("c");

			let a_log = super::log_of(&a);
			let c_log = super::log_of(&c);
			prop_assert!(a_log.contains(&"a20"));
			prop_assert!(!c_log.contains(&"a20"));
			let structural: Vec<&str> = a_log.iter().copied().filter(|step| *step != "a20").collect();
			prop_assert_eq!(structural, c_log);
		}
	}
}

#[test]
fn errors_are_plain_values() {
	let err = ConvertError::ConvertDepthExceeded { max_depth: 8 };
	assert_eq!(err.to_string(), "convert depth exceeded (max=8)");
}
