//! Constraint set kinds.
//!
//! A constraint pairs a function with a set; the constraint holds when
//! the function's value is a member of the set. Scalar sets constrain
//! one output, vector sets constrain a whole output vector of a fixed
//! dimension.

/// A set that a constrained function's value must belong to.
pub trait ConstraintSet: Clone {
    /// Name of this set kind, used in logs and error reports.
    const KIND: &'static str;

    /// Whether an attached constraint may change output dimension
    /// after creation. The variable-removal cascade queries this
    /// before shrinking a group constraint; resizable vector kinds
    /// opt in, scalar kinds and coupled cones stay fixed.
    const DIMENSION_UPDATABLE: bool;

    /// Output dimension of the set's members.
    fn dimension(&self) -> usize;

    /// Returns the set resized to `dimension`.
    ///
    /// Only called on kinds that declare `DIMENSION_UPDATABLE`;
    /// fixed-dimension kinds return themselves unchanged.
    fn with_dimension(&self, dimension: usize) -> Self;
}

/// The singleton set `{value}`.
///
/// # Example
///
/// ```
/// use optmodel_core::set::{ConstraintSet, EqualTo};
///
/// let set = EqualTo::new(3.0);
/// assert_eq!(set.value, 3.0);
/// assert_eq!(set.dimension(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EqualTo {
    /// The single member of the set.
    pub value: f64,
}

/// The half-line `(-inf, upper]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LessThan {
    /// Inclusive upper bound.
    pub upper: f64,
}

/// The half-line `[lower, +inf)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreaterThan {
    /// Inclusive lower bound.
    pub lower: f64,
}

/// The closed interval `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    /// Inclusive lower bound.
    pub lower: f64,
    /// Inclusive upper bound.
    pub upper: f64,
}

impl EqualTo {
    /// Creates the set `{value}`.
    pub const fn new(value: f64) -> Self {
        Self { value }
    }
}

impl LessThan {
    /// Creates the set `(-inf, upper]`.
    pub const fn new(upper: f64) -> Self {
        Self { upper }
    }
}

impl GreaterThan {
    /// Creates the set `[lower, +inf)`.
    pub const fn new(lower: f64) -> Self {
        Self { lower }
    }
}

impl Interval {
    /// Creates the set `[lower, upper]`.
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }
}

macro_rules! impl_scalar_set {
    ($type:ident) => {
        impl ConstraintSet for $type {
            const KIND: &'static str = stringify!($type);
            const DIMENSION_UPDATABLE: bool = false;

            #[inline]
            fn dimension(&self) -> usize {
                1
            }

            fn with_dimension(&self, _dimension: usize) -> Self {
                *self
            }
        }
    };
}

impl_scalar_set!(EqualTo);
impl_scalar_set!(LessThan);
impl_scalar_set!(GreaterThan);
impl_scalar_set!(Interval);

macro_rules! impl_vector_set {
    ($(#[$doc:meta])* $type:ident, $updatable:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $type {
            /// Dimension of the set's members.
            pub dimension: usize,
        }

        impl $type {
            /// Creates the set with the given dimension.
            pub const fn new(dimension: usize) -> Self {
                Self { dimension }
            }
        }

        impl ConstraintSet for $type {
            const KIND: &'static str = stringify!($type);
            const DIMENSION_UPDATABLE: bool = $updatable;

            #[inline]
            fn dimension(&self) -> usize {
                self.dimension
            }

            fn with_dimension(&self, dimension: usize) -> Self {
                if Self::DIMENSION_UPDATABLE {
                    Self { dimension }
                } else {
                    *self
                }
            }
        }
    };
}

impl_vector_set!(
    /// The origin `{0}^n`.
    Zeros,
    true
);
impl_vector_set!(
    /// The nonnegative orthant.
    Nonnegatives,
    true
);
impl_vector_set!(
    /// The nonpositive orthant.
    Nonpositives,
    true
);
impl_vector_set!(
    /// All of `R^n`.
    Reals,
    true
);
impl_vector_set!(
    /// The second-order cone `{(t, x) : t >= ||x||}`.
    ///
    /// Membership couples every coordinate, so the dimension is fixed
    /// once the set is attached to a constraint.
    SecondOrderCone,
    false
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_sets_have_dimension_one() {
        assert_eq!(EqualTo::new(1.0).dimension(), 1);
        assert_eq!(LessThan::new(1.0).dimension(), 1);
        assert_eq!(GreaterThan::new(1.0).dimension(), 1);
        assert_eq!(Interval::new(0.0, 1.0).dimension(), 1);
        assert!(!EqualTo::DIMENSION_UPDATABLE);
    }

    #[test]
    fn test_vector_set_dimension_update() {
        let set = Nonnegatives::new(3);
        assert!(Nonnegatives::DIMENSION_UPDATABLE);
        assert_eq!(set.with_dimension(2), Nonnegatives::new(2));
    }

    #[test]
    fn test_cone_dimension_is_fixed() {
        assert!(!SecondOrderCone::DIMENSION_UPDATABLE);
        assert_eq!(SecondOrderCone::new(3).with_dimension(2), SecondOrderCone::new(3));
    }

    #[test]
    fn test_set_kind_names() {
        assert_eq!(EqualTo::KIND, "EqualTo");
        assert_eq!(Zeros::KIND, "Zeros");
    }
}
