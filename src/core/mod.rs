//! Core processing building blocks: intensity normalization, slice
//! extraction and resizing, and the per-volume pipeline. These are internal
//! primitives consumed by the high-level `api` module.
pub mod params;
pub mod processing;
