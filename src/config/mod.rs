//! Configuration models for the cafe: tables, guests and holding times.

pub mod cafe;

pub use cafe::{CafeConfig, GuestConfig, HoldRange, CONFIG_PATH_ENV};
