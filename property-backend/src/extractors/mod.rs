// property-backend/src/extractors/mod.rs
pub mod path;

pub use path::ValidatedUuid;
