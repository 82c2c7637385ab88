//! Adapters from mesh file parsers to [RawAttributes](crate::RawAttributes).

#[cfg(feature = "de_obj")]
pub mod obj;
