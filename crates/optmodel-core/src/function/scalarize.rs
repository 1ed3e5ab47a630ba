//! Row-wise views of vector functions.
//!
//! Every vector kind can be split into its scalar rows, iterated,
//! indexed by row, or projected onto an ordered row subset with
//! renumbered output indices.

use super::term::{ScalarAffineTerm, ScalarQuadraticTerm, VectorAffineTerm, VectorQuadraticTerm};
use super::{
    ScalarAffineFunction, ScalarQuadraticFunction, SingleVariable, VectorAffineFunction,
    VectorOfVariables, VectorQuadraticFunction,
};

/// A vector-valued function that decomposes into scalar rows.
///
/// Row `i` of an affine or quadratic kind collects exactly the terms
/// whose `output_index == i`; row `i` of a [`VectorOfVariables`] is
/// `SingleVariable(variables[i])`.
///
/// # Example
///
/// ```
/// use optmodel_core::{VectorFunction, VectorOfVariables, VariableIndex};
///
/// let x = VariableIndex::new(0);
/// let y = VariableIndex::new(1);
/// let group = VectorOfVariables::new(vec![x, y]);
///
/// let rows: Vec<_> = group.iter_scalars().collect();
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[1].variable, y);
/// ```
pub trait VectorFunction {
    /// The scalar kind produced for one row.
    type Scalar;

    /// Number of output rows.
    fn output_dimension(&self) -> usize;

    /// Extracts row `row` as a scalar function. `row` must be smaller
    /// than the output dimension.
    fn scalar_at(&self, row: usize) -> Self::Scalar;

    /// Projects the listed rows into a new function of dimension
    /// `rows.len()`, renumbering each listed row to its position in
    /// `rows`.
    fn select_rows(&self, rows: &[usize]) -> Self;

    /// Iterates the scalar rows in order. The iterator is finite,
    /// restartable (it is `Clone`), and exact-size.
    fn iter_scalars(&self) -> ScalarIter<'_, Self>
    where
        Self: Sized,
    {
        ScalarIter {
            function: self,
            front: 0,
            back: self.output_dimension(),
        }
    }
}

/// Row iterator returned by [`VectorFunction::iter_scalars`].
#[derive(Debug, Clone)]
pub struct ScalarIter<'a, F: VectorFunction> {
    function: &'a F,
    front: usize,
    back: usize,
}

impl<F: VectorFunction> Iterator for ScalarIter<'_, F> {
    type Item = F::Scalar;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            let row = self.function.scalar_at(self.front);
            self.front += 1;
            Some(row)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<F: VectorFunction> ExactSizeIterator for ScalarIter<'_, F> {}

impl<F: VectorFunction> DoubleEndedIterator for ScalarIter<'_, F> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            self.back -= 1;
            Some(self.function.scalar_at(self.back))
        } else {
            None
        }
    }
}

impl VectorFunction for VectorOfVariables {
    type Scalar = SingleVariable;

    fn output_dimension(&self) -> usize {
        self.variables.len()
    }

    fn scalar_at(&self, row: usize) -> SingleVariable {
        SingleVariable::new(self.variables[row])
    }

    fn select_rows(&self, rows: &[usize]) -> Self {
        VectorOfVariables::new(rows.iter().map(|&row| self.variables[row]).collect())
    }
}

impl VectorFunction for VectorAffineFunction {
    type Scalar = ScalarAffineFunction;

    fn output_dimension(&self) -> usize {
        self.constants.len()
    }

    fn scalar_at(&self, row: usize) -> ScalarAffineFunction {
        let terms = self
            .terms
            .iter()
            .filter(|term| term.output_index == row)
            .map(|term| term.scalar_term)
            .collect();
        ScalarAffineFunction::new(terms, self.constants[row])
    }

    fn select_rows(&self, rows: &[usize]) -> Self {
        let mut terms = Vec::new();
        for (position, &row) in rows.iter().enumerate() {
            terms.extend(
                self.terms
                    .iter()
                    .filter(|term| term.output_index == row)
                    .map(|term| VectorAffineTerm::new(position, term.scalar_term)),
            );
        }
        let constants = rows.iter().map(|&row| self.constants[row]).collect();
        VectorAffineFunction::new(terms, constants)
    }
}

impl VectorFunction for VectorQuadraticFunction {
    type Scalar = ScalarQuadraticFunction;

    fn output_dimension(&self) -> usize {
        self.constants.len()
    }

    fn scalar_at(&self, row: usize) -> ScalarQuadraticFunction {
        let affine_terms: Vec<ScalarAffineTerm> = self
            .affine_terms
            .iter()
            .filter(|term| term.output_index == row)
            .map(|term| term.scalar_term)
            .collect();
        let quadratic_terms: Vec<ScalarQuadraticTerm> = self
            .quadratic_terms
            .iter()
            .filter(|term| term.output_index == row)
            .map(|term| term.scalar_term)
            .collect();
        ScalarQuadraticFunction::new(affine_terms, quadratic_terms, self.constants[row])
    }

    fn select_rows(&self, rows: &[usize]) -> Self {
        let mut affine_terms = Vec::new();
        let mut quadratic_terms = Vec::new();
        for (position, &row) in rows.iter().enumerate() {
            affine_terms.extend(
                self.affine_terms
                    .iter()
                    .filter(|term| term.output_index == row)
                    .map(|term| VectorAffineTerm::new(position, term.scalar_term)),
            );
            quadratic_terms.extend(
                self.quadratic_terms
                    .iter()
                    .filter(|term| term.output_index == row)
                    .map(|term| VectorQuadraticTerm::new(position, term.scalar_term)),
            );
        }
        let constants = rows.iter().map(|&row| self.constants[row]).collect();
        VectorQuadraticFunction::new(affine_terms, quadratic_terms, constants)
    }
}
