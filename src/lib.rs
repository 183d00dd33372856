//! # Cafe Seating
//!
//! A fixed set of tables shared by a stream of concurrently dining guests.
//!
//! Each guest occupies exactly one table for a randomly sampled holding time and
//! then leaves. Guests who arrive while every table is taken wait in a strict FIFO
//! queue and are seated at the next table to free up, regardless of which table
//! that is.
//!
//! ## Key Features
//!
//! - **Single critical section**: table occupancy and the wait queue live behind one
//!   `parking_lot::Mutex`; checking, assigning and dequeuing are one indivisible step
//! - **Strict FIFO**: the earliest waiting guest always gets the freed table
//! - **Signal-driven completion**: guests send a departure message when done; the
//!   coordinator awaits it instead of polling
//! - **Deterministic placement**: arrivals take the lowest-numbered free table
//! - **Graceful drain**: shutdown stops arrivals and lets seated guests finish
//! - **Closure report**: who sat where, in which order, and how long they waited
//!
//! ## Example
//!
//! ```rust,ignore
//! use cafe_seating::config::CafeConfig;
//! use cafe_seating::core::DiningOccupancy;
//! use cafe_seating::builders::build_cafe;
//! use cafe_seating::runtime::TokioSpawner;
//!
//! let cfg = CafeConfig::default();
//! let cafe = build_cafe(&cfg, DiningOccupancy, TokioSpawner::current(), None)?;
//! let report = cafe.coordinator.run(cafe.guests).await?;
//! println!("{}", report.to_json()?);
//! ```
//!
//! For complete examples, see:
//! - `tests/seating_algorithm_test.rs` - ordering and lifecycle scenarios
//! - `src/bin/cafe.rs` - the demo binary

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core seating abstractions and the table pool.
pub mod core;
/// Configuration models for tables, guests and holding times.
pub mod config;
/// Builders to construct a cafe from configuration.
pub mod builders;
/// Infrastructure adapters for wait queues.
pub mod infra;
/// Runtime adapters.
pub mod runtime;
/// Shared utilities.
pub mod util;
