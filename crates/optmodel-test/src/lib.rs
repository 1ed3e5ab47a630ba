//! Shared test fixtures for OptModel crates.
//!
//! This crate provides data builders and conformance checks for
//! testing. It stands in for the external model container: it
//! allocates variable handles and assembles functions the way a model
//! implementation would.
//!
//! - [`allocator`] - monotonic variable-handle allocation
//! - [`fixtures`] - compact builders for terms and functions
//! - [`cases`] - the statically registered conformance-check list
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! optmodel-test = { workspace = true }
//! ```

pub mod allocator;
pub mod cases;
pub mod fixtures;

// Re-export commonly used items at crate root for convenience
pub use allocator::VariableAllocator;
pub use fixtures::{affine, quadratic, vector_affine};
