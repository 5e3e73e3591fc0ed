//! `gentype`: instance and subtype checks over parameterized type descriptors.
//!
//! The relation engine lives in [`solver`] and the text front end in
//! [`syntax`]; this package adds tracing setup and the `gentype` driver.

pub use gentype_solver as solver;
pub use gentype_syntax as syntax;

// Tracing configuration (text / tree / JSON output for debugging)
pub mod tracing_config;

// Command-line driver
#[cfg(feature = "cli")]
pub mod cli;
