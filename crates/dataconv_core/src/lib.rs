//! Version-ladder upgrading of tagged save records.

/// Value trees, the type registry, converter chains, and the tag codecs they round-trip through.
pub mod upgrade;
