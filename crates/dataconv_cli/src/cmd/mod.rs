/// Record upgrade command.
pub mod convert;
/// SNBT / JSON rendering command.
pub mod dump;
/// SNBT to binary tag file command.
pub mod encode;
/// File-level information command.
pub mod info;
/// Registered data type listing.
pub mod types;
/// Version ladder listing.
pub mod versions;

pub(crate) mod util;

#[cfg(test)]
pub(crate) mod test_support;
