//! OptModel Core - the algebraic data model for optimization problems
//!
//! This crate provides the fundamental value types for OptModel:
//! - Decision-variable handles and the closed six-kind function algebra
//! - Evaluation, substitution, concatenation, and row-wise views
//! - Canonicalization to a unique sorted, merged, zero-free form
//! - The closed modification protocol for delta edits
//! - Constraint set kinds with the dimension-update capability query
//!
//! The constraint stores that persist `(function, set)` pairs live in
//! the companion `optmodel-store` crate.

pub mod error;
pub mod function;
pub mod modification;
pub mod set;
pub mod variable;

pub use error::{ModelError, Result};
pub use function::{
    concatenate, Canonicalize, FilterVariables, Function, FunctionValue, ScalarAffineFunction,
    ScalarAffineTerm, ScalarIter, ScalarQuadraticFunction, ScalarQuadraticTerm, SingleVariable,
    TypedFunction, VectorAffineFunction, VectorAffineTerm, VectorFunction, VectorOfVariables,
    VectorQuadraticFunction, VectorQuadraticTerm,
};
pub use modification::{Modifiable, Modification, RowCoefficients};
pub use set::{
    ConstraintSet, EqualTo, GreaterThan, Interval, LessThan, Nonnegatives, Nonpositives, Reals,
    SecondOrderCone, Zeros,
};
pub use variable::VariableIndex;
