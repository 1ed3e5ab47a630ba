//! Compact builders for terms and functions.
//!
//! Tests read better with `affine(&[(2.0, x), (3.0, y)], 5.0)` than
//! with the full constructor chain; these helpers build exactly what
//! the verbose form would.

use optmodel_core::{
    ScalarAffineFunction, ScalarAffineTerm, ScalarQuadraticFunction, ScalarQuadraticTerm,
    VariableIndex, VectorAffineFunction, VectorAffineTerm,
};

/// Builds `sum(coefficient * variable) + constant`.
pub fn affine(terms: &[(f64, VariableIndex)], constant: f64) -> ScalarAffineFunction {
    let terms = terms
        .iter()
        .map(|&(coefficient, variable)| ScalarAffineTerm::new(coefficient, variable))
        .collect();
    ScalarAffineFunction::new(terms, constant)
}

/// Builds a vector affine function from `(row, coefficient, variable)`
/// triples and per-row constants.
pub fn vector_affine(
    terms: &[(usize, f64, VariableIndex)],
    constants: &[f64],
) -> VectorAffineFunction {
    let terms = terms
        .iter()
        .map(|&(row, coefficient, variable)| {
            VectorAffineTerm::new(row, ScalarAffineTerm::new(coefficient, variable))
        })
        .collect();
    VectorAffineFunction::new(terms, constants.to_vec())
}

/// Builds a scalar quadratic function from affine pairs and
/// `(coefficient, variable, variable)` triples.
pub fn quadratic(
    affine_terms: &[(f64, VariableIndex)],
    quadratic_terms: &[(f64, VariableIndex, VariableIndex)],
    constant: f64,
) -> ScalarQuadraticFunction {
    let affine_terms = affine_terms
        .iter()
        .map(|&(coefficient, variable)| ScalarAffineTerm::new(coefficient, variable))
        .collect();
    let quadratic_terms = quadratic_terms
        .iter()
        .map(|&(coefficient, variable_1, variable_2)| {
            ScalarQuadraticTerm::new(coefficient, variable_1, variable_2)
        })
        .collect();
    ScalarQuadraticFunction::new(affine_terms, quadratic_terms, constant)
}
