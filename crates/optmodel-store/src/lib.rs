//! OptModel Store - indexed constraint storage
//!
//! This crate provides the per-partition constraint store:
//! - [`ConstraintIndex`] handles tagged by function and set kind
//! - [`ConstraintStore`], an arena of `(function, set)` pairs with
//!   stable, never-reused indices
//! - Cascading variable removal with group-constraint integrity checks
//!
//! One `ConstraintStore<F, S>` holds the constraints of one
//! (function-kind, set-kind) pair; a model container composes stores
//! into a registry keyed by those pairs.

mod removal;
mod store;


pub use removal::{Cascade, CascadeFunction};
pub use store::{ConstraintIndex, ConstraintStore};
