//! Unit tests for individual components

mod error_test;
mod events_test;
mod config_test;
mod util_test;
mod builders_test;
mod runtime_test;
