use tracing::{debug, trace};

use crate::upgrade::{ConvertCtx, ConvertError, DataType, MapValue, Result};

/// Run the converter chain of `data_type` over `(ctx.source(), ctx.target()]`,
/// then the walkers in effect at the target version.
///
/// At each distinct version, structure converters run first in registration
/// order, then the id converters registered for the dispatch id as it reads
/// at that moment. A converter returning a replacement swaps the record for
/// every later step.
pub(crate) fn run(data_type: &DataType, mut record: MapValue, ctx: &ConvertCtx<'_>) -> Result<MapValue> {
	let (source, target) = (ctx.source(), ctx.target());
	if source >= target {
		return Ok(record);
	}

	debug!(
		type_name = data_type.name(),
		source,
		target,
		depth = ctx.depth(),
		"converting record"
	);

	for version in data_type.steps_between(source, target) {
		for converter in data_type.structure_at(version) {
			trace!(type_name = data_type.name(), version, label = converter.label(), "structure converter");
			let replaced = converter
				.apply(&mut record, ctx)
				.map_err(|err| converter_failed(data_type, version, converter.label(), err))?;
			if let Some(replacement) = replaced {
				record = replacement;
			}
		}

		let Some(id) = data_type.dispatch_id(&record) else {
			continue;
		};
		for converter in data_type.id_converters_at(&id, version) {
			trace!(type_name = data_type.name(), version, id = %id, label = converter.label(), "id converter");
			let replaced = converter
				.apply(&mut record, ctx)
				.map_err(|err| converter_failed(data_type, version, converter.label(), err))?;
			if let Some(replacement) = replaced {
				record = replacement;
			}
		}
	}

	for walker in data_type.structure_walkers_at(target) {
		trace!(type_name = data_type.name(), version = walker.version(), label = walker.label(), "structure walker");
		walker
			.apply(&mut record, ctx)
			.map_err(|err| walker_failed(data_type, walker.version(), walker.label(), err))?;
	}

	if let Some(id) = data_type.dispatch_id(&record) {
		for walker in data_type.id_walkers_at(&id, target) {
			trace!(type_name = data_type.name(), version = walker.version(), id = %id, label = walker.label(), "id walker");
			walker
				.apply(&mut record, ctx)
				.map_err(|err| walker_failed(data_type, walker.version(), walker.label(), err))?;
		}
	}

	Ok(record)
}

fn converter_failed(data_type: &DataType, version: i32, label: &str, source: ConvertError) -> ConvertError {
	ConvertError::ConverterFailed {
		type_name: data_type.name().to_owned(),
		version,
		label: label.to_owned(),
		source: Box::new(source),
	}
}

fn walker_failed(data_type: &DataType, version: i32, label: &str, source: ConvertError) -> ConvertError {
	ConvertError::WalkerFailed {
		type_name: data_type.name().to_owned(),
		version,
		label: label.to_owned(),
		source: Box::new(source),
	}
}

#[cfg(test)]
mod tests;
