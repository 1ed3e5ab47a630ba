//! Canonical normal form.
//!
//! The canonical form of a term list is sorted ascending by the
//! composite key `(output_index, variable[, second variable])` with
//! quadratic pairs normalized low-to-high, holds at most one term per
//! key, and contains no zero coefficients. Two functions representing
//! the same map over the same term set canonicalize to identical term
//! lists, so canonical form doubles as a structural-equality test.

use num_traits::Zero;

use super::term::{ScalarAffineTerm, ScalarQuadraticTerm, VectorAffineTerm, VectorQuadraticTerm};
use super::{
    Function, ScalarAffineFunction, ScalarQuadraticFunction, VectorAffineFunction,
    VectorQuadraticFunction,
};

/// Conversion to the unique sorted, merged, zero-free representation.
///
/// # Example
///
/// ```
/// use optmodel_core::{Canonicalize, ScalarAffineFunction, ScalarAffineTerm, VariableIndex};
///
/// let x = VariableIndex::new(0);
/// // x + x collapses to 2x
/// let f = ScalarAffineFunction::new(
///     vec![
///         ScalarAffineTerm::new(1.0, x),
///         ScalarAffineTerm::new(1.0, x),
///     ],
///     0.0,
/// );
/// let canonical = f.canonicalize();
/// assert_eq!(canonical.terms, vec![ScalarAffineTerm::new(2.0, x)]);
/// assert!(canonical.is_canonical());
/// ```
pub trait Canonicalize: Sized {
    /// Returns the canonical form. Constants are untouched; only term
    /// lists are sorted, merged, and stripped of zeros. O(n log n) in
    /// the term count.
    fn canonicalize(self) -> Self;

    /// Returns true when already in canonical form.
    fn is_canonical(&self) -> bool;
}

/// A term that participates in sort-and-merge canonicalization.
trait CanonicalTerm {
    /// Composite sort key; a total order once the term is normalized.
    type Key: Ord;

    fn key(&self) -> Self::Key;
    fn coefficient(&self) -> f64;
    fn coefficient_mut(&mut self) -> &mut f64;

    /// Puts the term into its normalized representation (quadratic
    /// pairs ordered low-to-high). The default is the identity.
    fn normalize(&mut self) {}

    /// True when `normalize` would be a no-op.
    fn is_normalized(&self) -> bool {
        true
    }
}

impl CanonicalTerm for ScalarAffineTerm {
    type Key = u64;

    fn key(&self) -> u64 {
        self.variable.raw()
    }

    fn coefficient(&self) -> f64 {
        self.coefficient
    }

    fn coefficient_mut(&mut self) -> &mut f64 {
        &mut self.coefficient
    }
}

impl CanonicalTerm for ScalarQuadraticTerm {
    type Key = (u64, u64);

    fn key(&self) -> (u64, u64) {
        let (low, high) = self.sorted_pair();
        (low.raw(), high.raw())
    }

    fn coefficient(&self) -> f64 {
        self.coefficient
    }

    fn coefficient_mut(&mut self) -> &mut f64 {
        &mut self.coefficient
    }

    fn normalize(&mut self) {
        let (low, high) = self.sorted_pair();
        self.variable_1 = low;
        self.variable_2 = high;
    }

    fn is_normalized(&self) -> bool {
        self.variable_1 <= self.variable_2
    }
}

impl CanonicalTerm for VectorAffineTerm {
    type Key = (usize, u64);

    fn key(&self) -> (usize, u64) {
        (self.output_index, self.scalar_term.variable.raw())
    }

    fn coefficient(&self) -> f64 {
        self.scalar_term.coefficient
    }

    fn coefficient_mut(&mut self) -> &mut f64 {
        &mut self.scalar_term.coefficient
    }
}

impl CanonicalTerm for VectorQuadraticTerm {
    type Key = (usize, u64, u64);

    fn key(&self) -> (usize, u64, u64) {
        let (low, high) = self.scalar_term.sorted_pair();
        (self.output_index, low.raw(), high.raw())
    }

    fn coefficient(&self) -> f64 {
        self.scalar_term.coefficient
    }

    fn coefficient_mut(&mut self) -> &mut f64 {
        &mut self.scalar_term.coefficient
    }

    fn normalize(&mut self) {
        self.scalar_term.normalize();
    }

    fn is_normalized(&self) -> bool {
        self.scalar_term.is_normalized()
    }
}

/// Sort by key, merge runs of equal keys by summing coefficients, drop
/// every zero coefficient (including zeros produced by a merge).
fn canonicalize_terms<T: CanonicalTerm>(mut terms: Vec<T>) -> Vec<T> {
    for term in &mut terms {
        term.normalize();
    }
    terms.sort_by(|a, b| a.key().cmp(&b.key()));

    let mut merged: Vec<T> = Vec::with_capacity(terms.len());
    for term in terms {
        match merged.last_mut() {
            Some(last) if last.key() == term.key() => {
                *last.coefficient_mut() += term.coefficient();
            }
            _ => merged.push(term),
        }
    }
    merged.retain(|term| !term.coefficient().is_zero());
    merged
}

/// Strictly increasing keys, normalized terms, no zero coefficients.
fn terms_are_canonical<T: CanonicalTerm>(terms: &[T]) -> bool {
    terms
        .windows(2)
        .all(|pair| pair[0].key() < pair[1].key())
        && terms
            .iter()
            .all(|term| term.is_normalized() && !term.coefficient().is_zero())
}

impl Canonicalize for ScalarAffineFunction {
    fn canonicalize(self) -> Self {
        ScalarAffineFunction::new(canonicalize_terms(self.terms), self.constant)
    }

    fn is_canonical(&self) -> bool {
        terms_are_canonical(&self.terms)
    }
}

impl Canonicalize for VectorAffineFunction {
    fn canonicalize(self) -> Self {
        VectorAffineFunction::new(canonicalize_terms(self.terms), self.constants)
    }

    fn is_canonical(&self) -> bool {
        terms_are_canonical(&self.terms)
    }
}

impl Canonicalize for ScalarQuadraticFunction {
    fn canonicalize(self) -> Self {
        ScalarQuadraticFunction::new(
            canonicalize_terms(self.affine_terms),
            canonicalize_terms(self.quadratic_terms),
            self.constant,
        )
    }

    fn is_canonical(&self) -> bool {
        terms_are_canonical(&self.affine_terms) && terms_are_canonical(&self.quadratic_terms)
    }
}

impl Canonicalize for VectorQuadraticFunction {
    fn canonicalize(self) -> Self {
        VectorQuadraticFunction::new(
            canonicalize_terms(self.affine_terms),
            canonicalize_terms(self.quadratic_terms),
            self.constants,
        )
    }

    fn is_canonical(&self) -> bool {
        terms_are_canonical(&self.affine_terms) && terms_are_canonical(&self.quadratic_terms)
    }
}

impl Canonicalize for Function {
    /// Variable kinds have no term list and are their own canonical
    /// form.
    fn canonicalize(self) -> Self {
        match self {
            Function::SingleVariable(_) | Function::VectorOfVariables(_) => self,
            Function::ScalarAffine(f) => Function::ScalarAffine(f.canonicalize()),
            Function::VectorAffine(f) => Function::VectorAffine(f.canonicalize()),
            Function::ScalarQuadratic(f) => Function::ScalarQuadratic(f.canonicalize()),
            Function::VectorQuadratic(f) => Function::VectorQuadratic(f.canonicalize()),
        }
    }

    fn is_canonical(&self) -> bool {
        match self {
            Function::SingleVariable(_) | Function::VectorOfVariables(_) => true,
            Function::ScalarAffine(f) => f.is_canonical(),
            Function::VectorAffine(f) => f.is_canonical(),
            Function::ScalarQuadratic(f) => f.is_canonical(),
            Function::VectorQuadratic(f) => f.is_canonical(),
        }
    }
}
