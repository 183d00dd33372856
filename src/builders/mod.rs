//! Builders to construct a coordinator from configuration.

pub mod cafe_builder;

pub use cafe_builder::{build_cafe, Cafe};
