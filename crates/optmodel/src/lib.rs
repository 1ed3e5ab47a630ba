//! OptModel - An Algebraic Modeling Core for Optimization Problems
//!
//! Build linear and quadratic expressions over decision variables,
//! canonicalize them, store them as constraints, and edit them in
//! place with the closed modification protocol.
//!
//! # Example
//!
//! ```rust
//! use optmodel::prelude::*;
//!
//! let x = VariableIndex::new(0);
//!
//! // 2x + 5, constrained to be at most 11.
//! let f = ScalarAffineFunction::new(vec![ScalarAffineTerm::new(2.0, x)], 5.0);
//! let mut store = ConstraintStore::new();
//! let index = store.add(f, LessThan::new(11.0));
//!
//! assert_eq!(store.function(index).unwrap().evaluate(|_| 3.0), 11.0);
//! ```

// Function algebra
pub use optmodel_core::{
    concatenate, Canonicalize, FilterVariables, Function, FunctionValue, ScalarAffineFunction,
    ScalarAffineTerm, ScalarIter, ScalarQuadraticFunction, ScalarQuadraticTerm, SingleVariable,
    TypedFunction, VariableIndex, VectorAffineFunction, VectorAffineTerm, VectorFunction,
    VectorOfVariables, VectorQuadraticFunction, VectorQuadraticTerm,
};

// Modification protocol
pub use optmodel_core::{Modifiable, Modification, RowCoefficients};

// Constraint sets
pub use optmodel_core::{
    ConstraintSet, EqualTo, GreaterThan, Interval, LessThan, Nonnegatives, Nonpositives, Reals,
    SecondOrderCone, Zeros,
};

// Errors
pub use optmodel_core::{ModelError, Result};

// Constraint storage
pub use optmodel_store::{Cascade, CascadeFunction, ConstraintIndex, ConstraintStore};

pub mod prelude {
    //! Everything a model implementation typically needs.
    pub use super::{
        concatenate, Canonicalize, ConstraintIndex, ConstraintSet, ConstraintStore, EqualTo,
        FilterVariables, Function, FunctionValue, GreaterThan, Interval, LessThan, Modifiable,
        Modification, ModelError, Nonnegatives, Nonpositives, Reals, Result,
        ScalarAffineFunction, ScalarAffineTerm, ScalarQuadraticFunction, ScalarQuadraticTerm,
        SecondOrderCone, SingleVariable, VariableIndex, VectorAffineFunction, VectorAffineTerm,
        VectorFunction, VectorOfVariables, VectorQuadraticFunction, VectorQuadraticTerm, Zeros,
    };
}
