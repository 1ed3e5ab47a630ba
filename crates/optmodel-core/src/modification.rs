//! The modification protocol: delta edits applied to stored functions.
//!
//! A [`Modification`] describes a change to one function without
//! rebuilding it: replace the constant, or replace the coefficient of
//! one variable (per row, for vector kinds). Each command targets one
//! function shape; applying it to any other kind fails with
//! [`ModelError::UnsupportedModification`]. Application always
//! produces a fresh, fully-formed value; the original is untouched.

use num_traits::Zero;
use smallvec::SmallVec;

use crate::error::{ModelError, Result};
use crate::function::{
    Function, ScalarAffineFunction, ScalarAffineTerm, ScalarQuadraticFunction, SingleVariable,
    TypedFunction, VectorAffineFunction, VectorAffineTerm, VectorOfVariables,
    VectorQuadraticFunction,
};
use crate::variable::VariableIndex;

/// Per-row coefficient replacements, inline up to four rows.
pub type RowCoefficients = SmallVec<[(usize, f64); 4]>;

/// A described delta applicable to a stored function.
///
/// # Example
///
/// ```
/// use optmodel_core::{Modifiable, Modification, ScalarAffineFunction, VariableIndex};
///
/// let x = VariableIndex::new(0);
/// let f = ScalarAffineFunction::constant(5.0);
///
/// // Inserting a coefficient for an absent variable adds a term.
/// let edited = f
///     .modify(&Modification::Coefficient { variable: x, coefficient: 2.0 })
///     .unwrap();
/// assert_eq!(edited.terms.len(), 1);
/// assert_eq!(edited.evaluate(|_| 3.0), 11.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Modification {
    /// Replace a scalar function's constant wholesale.
    ScalarConstant(f64),

    /// Replace a vector function's constants wholesale. The new vector
    /// must match the function's output dimension.
    VectorConstants(Vec<f64>),

    /// Replace the affine coefficient of one variable in a scalar
    /// function: absent + nonzero inserts a term, present + zero
    /// removes it, otherwise the first occurrence is updated in place
    /// and stale duplicates are dropped.
    Coefficient {
        /// The variable whose coefficient changes.
        variable: VariableIndex,
        /// The new coefficient; zero removes the term.
        coefficient: f64,
    },

    /// Replace the affine coefficient of one variable in the listed
    /// rows of a vector function, with the same insert/update/remove
    /// semantics per row. Unlisted rows are untouched.
    RowCoefficients {
        /// The variable whose coefficients change.
        variable: VariableIndex,
        /// `(row, coefficient)` pairs, one per affected row.
        rows: RowCoefficients,
    },
}

impl Modification {
    /// Name of this command, used in logs and error reports.
    pub fn name(&self) -> &'static str {
        match self {
            Modification::ScalarConstant(_) => "ScalarConstant",
            Modification::VectorConstants(_) => "VectorConstants",
            Modification::Coefficient { .. } => "Coefficient",
            Modification::RowCoefficients { .. } => "RowCoefficients",
        }
    }
}

/// Functions that accept delta edits.
pub trait Modifiable: Sized {
    /// Applies `modification`, producing the edited function. The
    /// receiver is never altered; an error implies no shape-compatible
    /// interpretation of the command exists for this kind.
    fn modify(&self, modification: &Modification) -> Result<Self>;
}

fn unsupported<T>(function_kind: &'static str, modification: &Modification) -> Result<T> {
    Err(ModelError::UnsupportedModification {
        function_kind,
        modification: modification.name(),
    })
}

/// First occurrence updated in place, stale duplicates dropped, zero
/// removes, absent + nonzero appends.
fn set_coefficient(terms: &mut Vec<ScalarAffineTerm>, variable: VariableIndex, coefficient: f64) {
    let mut found = false;
    terms.retain_mut(|term| {
        if term.variable != variable {
            return true;
        }
        if found {
            return false;
        }
        found = true;
        term.coefficient = coefficient;
        !coefficient.is_zero()
    });
    if !found && !coefficient.is_zero() {
        terms.push(ScalarAffineTerm::new(coefficient, variable));
    }
}

/// Row-confined variant of [`set_coefficient`].
fn set_row_coefficients(
    terms: &mut Vec<VectorAffineTerm>,
    variable: VariableIndex,
    rows: &[(usize, f64)],
) {
    for &(row, coefficient) in rows {
        let mut found = false;
        terms.retain_mut(|term| {
            if term.output_index != row || term.scalar_term.variable != variable {
                return true;
            }
            if found {
                return false;
            }
            found = true;
            term.scalar_term.coefficient = coefficient;
            !coefficient.is_zero()
        });
        if !found && !coefficient.is_zero() {
            terms.push(VectorAffineTerm::new(
                row,
                ScalarAffineTerm::new(coefficient, variable),
            ));
        }
    }
}

impl Modifiable for SingleVariable {
    fn modify(&self, modification: &Modification) -> Result<Self> {
        unsupported(Self::KIND, modification)
    }
}

impl Modifiable for VectorOfVariables {
    fn modify(&self, modification: &Modification) -> Result<Self> {
        unsupported(Self::KIND, modification)
    }
}

impl Modifiable for ScalarAffineFunction {
    fn modify(&self, modification: &Modification) -> Result<Self> {
        let mut function = self.clone();
        match modification {
            Modification::ScalarConstant(constant) => function.constant = *constant,
            Modification::Coefficient {
                variable,
                coefficient,
            } => set_coefficient(&mut function.terms, *variable, *coefficient),
            _ => return unsupported(Self::KIND, modification),
        }
        Ok(function)
    }
}

impl Modifiable for ScalarQuadraticFunction {
    fn modify(&self, modification: &Modification) -> Result<Self> {
        let mut function = self.clone();
        match modification {
            Modification::ScalarConstant(constant) => function.constant = *constant,
            Modification::Coefficient {
                variable,
                coefficient,
            } => set_coefficient(&mut function.affine_terms, *variable, *coefficient),
            _ => return unsupported(Self::KIND, modification),
        }
        Ok(function)
    }
}

impl Modifiable for VectorAffineFunction {
    fn modify(&self, modification: &Modification) -> Result<Self> {
        let mut function = self.clone();
        match modification {
            Modification::VectorConstants(constants)
                if constants.len() == function.output_dimension() =>
            {
                function.constants.clone_from(constants);
            }
            Modification::RowCoefficients { variable, rows } => {
                set_row_coefficients(&mut function.terms, *variable, rows)
            }
            _ => return unsupported(Self::KIND, modification),
        }
        Ok(function)
    }
}

impl Modifiable for VectorQuadraticFunction {
    fn modify(&self, modification: &Modification) -> Result<Self> {
        let mut function = self.clone();
        match modification {
            Modification::VectorConstants(constants)
                if constants.len() == function.output_dimension() =>
            {
                function.constants.clone_from(constants);
            }
            Modification::RowCoefficients { variable, rows } => {
                set_row_coefficients(&mut function.affine_terms, *variable, rows)
            }
            _ => return unsupported(Self::KIND, modification),
        }
        Ok(function)
    }
}

impl Modifiable for Function {
    fn modify(&self, modification: &Modification) -> Result<Self> {
        match self {
            Function::SingleVariable(f) => f.modify(modification).map(Function::SingleVariable),
            Function::VectorOfVariables(f) => {
                f.modify(modification).map(Function::VectorOfVariables)
            }
            Function::ScalarAffine(f) => f.modify(modification).map(Function::ScalarAffine),
            Function::VectorAffine(f) => f.modify(modification).map(Function::VectorAffine),
            Function::ScalarQuadratic(f) => f.modify(modification).map(Function::ScalarQuadratic),
            Function::VectorQuadratic(f) => f.modify(modification).map(Function::VectorQuadratic),
        }
    }
}
