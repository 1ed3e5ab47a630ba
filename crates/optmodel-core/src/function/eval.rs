//! Evaluation and variable substitution.
//!
//! Evaluation resolves every variable reference through a caller
//! supplied lookup and accumulates term contributions; substitution
//! (`map_variables`) rewrites the references themselves, which is how
//! a function moves between two independently-indexed models.

use crate::variable::VariableIndex;

use super::term::{ScalarAffineTerm, ScalarQuadraticTerm, VectorAffineTerm, VectorQuadraticTerm};
use super::{
    Function, ScalarAffineFunction, ScalarQuadraticFunction, SingleVariable, VectorAffineFunction,
    VectorOfVariables, VectorQuadraticFunction,
};

/// Result of evaluating a [`Function`]: scalar kinds produce one
/// value, vector kinds one value per output row.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionValue {
    /// Value of a scalar-kind function.
    Scalar(f64),
    /// Row values of a vector-kind function.
    Vector(Vec<f64>),
}

impl FunctionValue {
    /// Returns the scalar value, or `None` for a vector result.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            FunctionValue::Scalar(value) => Some(*value),
            FunctionValue::Vector(_) => None,
        }
    }

    /// Returns the row values, or `None` for a scalar result.
    pub fn as_vector(&self) -> Option<&[f64]> {
        match self {
            FunctionValue::Scalar(_) => None,
            FunctionValue::Vector(values) => Some(values),
        }
    }
}

/// Value of one quadratic term under `lookup`. Squares carry the half
/// factor so the sum over all terms reproduces `1/2 x'Qx`.
fn quadratic_term_value(term: &ScalarQuadraticTerm, lookup: impl Fn(VariableIndex) -> f64) -> f64 {
    let value_1 = lookup(term.variable_1);
    let value_2 = lookup(term.variable_2);
    if term.is_square() {
        term.coefficient * value_1 * value_2 / 2.0
    } else {
        term.coefficient * value_1 * value_2
    }
}

impl SingleVariable {
    /// Evaluates the function: the variable's value itself.
    pub fn evaluate(&self, lookup: impl Fn(VariableIndex) -> f64) -> f64 {
        lookup(self.variable)
    }

    /// Replaces the variable reference through `rename`.
    pub fn map_variables(&self, rename: impl Fn(VariableIndex) -> VariableIndex) -> Self {
        SingleVariable::new(rename(self.variable))
    }
}

impl VectorOfVariables {
    /// Evaluates the function: the selected variables' values in
    /// order.
    pub fn evaluate(&self, lookup: impl Fn(VariableIndex) -> f64) -> Vec<f64> {
        self.variables.iter().map(|&v| lookup(v)).collect()
    }

    /// Replaces every variable reference through `rename`.
    pub fn map_variables(&self, rename: impl Fn(VariableIndex) -> VariableIndex) -> Self {
        VectorOfVariables::new(self.variables.iter().map(|&v| rename(v)).collect())
    }
}

impl ScalarAffineFunction {
    /// Evaluates `sum(coefficient_i * lookup(variable_i)) + constant`.
    pub fn evaluate(&self, lookup: impl Fn(VariableIndex) -> f64) -> f64 {
        self.terms
            .iter()
            .map(|term| term.coefficient * lookup(term.variable))
            .sum::<f64>()
            + self.constant
    }

    /// Replaces every variable reference through `rename`.
    pub fn map_variables(&self, rename: impl Fn(VariableIndex) -> VariableIndex) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|term| ScalarAffineTerm::new(term.coefficient, rename(term.variable)))
            .collect();
        ScalarAffineFunction::new(terms, self.constant)
    }
}

impl VectorAffineFunction {
    /// Evaluates the function row-wise: the output starts at the
    /// constants and each term adds its contribution at its row.
    pub fn evaluate(&self, lookup: impl Fn(VariableIndex) -> f64) -> Vec<f64> {
        let mut output = self.constants.clone();
        for term in &self.terms {
            output[term.output_index] +=
                term.scalar_term.coefficient * lookup(term.scalar_term.variable);
        }
        output
    }

    /// Replaces every variable reference through `rename`.
    pub fn map_variables(&self, rename: impl Fn(VariableIndex) -> VariableIndex) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|term| {
                VectorAffineTerm::new(
                    term.output_index,
                    ScalarAffineTerm::new(term.scalar_term.coefficient, rename(term.scalar_term.variable)),
                )
            })
            .collect();
        VectorAffineFunction::new(terms, self.constants.clone())
    }
}

impl ScalarQuadraticFunction {
    /// Evaluates the affine and quadratic terms plus the constant;
    /// square terms contribute `c * v^2 / 2`.
    pub fn evaluate(&self, lookup: impl Fn(VariableIndex) -> f64) -> f64 {
        let affine: f64 = self
            .affine_terms
            .iter()
            .map(|term| term.coefficient * lookup(term.variable))
            .sum();
        let quadratic: f64 = self
            .quadratic_terms
            .iter()
            .map(|term| quadratic_term_value(term, &lookup))
            .sum();
        affine + quadratic + self.constant
    }

    /// Replaces every variable reference through `rename`.
    pub fn map_variables(&self, rename: impl Fn(VariableIndex) -> VariableIndex) -> Self {
        let affine_terms = self
            .affine_terms
            .iter()
            .map(|term| ScalarAffineTerm::new(term.coefficient, rename(term.variable)))
            .collect();
        let quadratic_terms = self
            .quadratic_terms
            .iter()
            .map(|term| {
                ScalarQuadraticTerm::new(
                    term.coefficient,
                    rename(term.variable_1),
                    rename(term.variable_2),
                )
            })
            .collect();
        ScalarQuadraticFunction::new(affine_terms, quadratic_terms, self.constant)
    }
}

impl VectorQuadraticFunction {
    /// Evaluates the function row-wise, squares halved as in the
    /// scalar case.
    pub fn evaluate(&self, lookup: impl Fn(VariableIndex) -> f64) -> Vec<f64> {
        let mut output = self.constants.clone();
        for term in &self.affine_terms {
            output[term.output_index] +=
                term.scalar_term.coefficient * lookup(term.scalar_term.variable);
        }
        for term in &self.quadratic_terms {
            output[term.output_index] += quadratic_term_value(&term.scalar_term, &lookup);
        }
        output
    }

    /// Replaces every variable reference through `rename`.
    pub fn map_variables(&self, rename: impl Fn(VariableIndex) -> VariableIndex) -> Self {
        let affine_terms = self
            .affine_terms
            .iter()
            .map(|term| {
                VectorAffineTerm::new(
                    term.output_index,
                    ScalarAffineTerm::new(term.scalar_term.coefficient, rename(term.scalar_term.variable)),
                )
            })
            .collect();
        let quadratic_terms = self
            .quadratic_terms
            .iter()
            .map(|term| {
                VectorQuadraticTerm::new(
                    term.output_index,
                    ScalarQuadraticTerm::new(
                        term.scalar_term.coefficient,
                        rename(term.scalar_term.variable_1),
                        rename(term.scalar_term.variable_2),
                    ),
                )
            })
            .collect();
        VectorQuadraticFunction::new(affine_terms, quadratic_terms, self.constants.clone())
    }
}

impl Function {
    /// Evaluates the wrapped function under `lookup`.
    pub fn evaluate(&self, lookup: impl Fn(VariableIndex) -> f64) -> FunctionValue {
        match self {
            Function::SingleVariable(f) => FunctionValue::Scalar(f.evaluate(lookup)),
            Function::VectorOfVariables(f) => FunctionValue::Vector(f.evaluate(lookup)),
            Function::ScalarAffine(f) => FunctionValue::Scalar(f.evaluate(lookup)),
            Function::VectorAffine(f) => FunctionValue::Vector(f.evaluate(lookup)),
            Function::ScalarQuadratic(f) => FunctionValue::Scalar(f.evaluate(lookup)),
            Function::VectorQuadratic(f) => FunctionValue::Vector(f.evaluate(lookup)),
        }
    }

    /// Replaces every variable reference through `rename`, preserving
    /// structure.
    pub fn map_variables(&self, rename: impl Fn(VariableIndex) -> VariableIndex) -> Self {
        match self {
            Function::SingleVariable(f) => Function::SingleVariable(f.map_variables(rename)),
            Function::VectorOfVariables(f) => Function::VectorOfVariables(f.map_variables(rename)),
            Function::ScalarAffine(f) => Function::ScalarAffine(f.map_variables(rename)),
            Function::VectorAffine(f) => Function::VectorAffine(f.map_variables(rename)),
            Function::ScalarQuadratic(f) => Function::ScalarQuadratic(f.map_variables(rename)),
            Function::VectorQuadratic(f) => Function::VectorQuadratic(f.map_variables(rename)),
        }
    }
}

/// Term-bearing function kinds whose variable references can be
/// stripped term-wise.
///
/// Stripping removes whole terms; constants are untouched. For a
/// quadratic term, both slots must survive the predicate for the term
/// to be kept.
pub trait FilterVariables: Sized {
    /// Returns a copy keeping only the terms whose variables all
    /// satisfy `keep`.
    fn filter_variables(&self, keep: impl Fn(VariableIndex) -> bool) -> Self;

    /// Returns a copy with every term referencing `variable` removed.
    fn remove_variable(&self, variable: VariableIndex) -> Self {
        self.filter_variables(|v| v != variable)
    }
}

impl FilterVariables for ScalarAffineFunction {
    fn filter_variables(&self, keep: impl Fn(VariableIndex) -> bool) -> Self {
        let terms = self
            .terms
            .iter()
            .filter(|term| keep(term.variable))
            .copied()
            .collect();
        ScalarAffineFunction::new(terms, self.constant)
    }
}

impl FilterVariables for VectorAffineFunction {
    fn filter_variables(&self, keep: impl Fn(VariableIndex) -> bool) -> Self {
        let terms = self
            .terms
            .iter()
            .filter(|term| keep(term.scalar_term.variable))
            .copied()
            .collect();
        VectorAffineFunction::new(terms, self.constants.clone())
    }
}

impl FilterVariables for ScalarQuadraticFunction {
    fn filter_variables(&self, keep: impl Fn(VariableIndex) -> bool) -> Self {
        let affine_terms = self
            .affine_terms
            .iter()
            .filter(|term| keep(term.variable))
            .copied()
            .collect();
        let quadratic_terms = self
            .quadratic_terms
            .iter()
            .filter(|term| keep(term.variable_1) && keep(term.variable_2))
            .copied()
            .collect();
        ScalarQuadraticFunction::new(affine_terms, quadratic_terms, self.constant)
    }
}

impl FilterVariables for VectorQuadraticFunction {
    fn filter_variables(&self, keep: impl Fn(VariableIndex) -> bool) -> Self {
        let affine_terms = self
            .affine_terms
            .iter()
            .filter(|term| keep(term.scalar_term.variable))
            .copied()
            .collect();
        let quadratic_terms = self
            .quadratic_terms
            .iter()
            .filter(|term| {
                keep(term.scalar_term.variable_1) && keep(term.scalar_term.variable_2)
            })
            .copied()
            .collect();
        VectorQuadraticFunction::new(affine_terms, quadratic_terms, self.constants.clone())
    }
}
