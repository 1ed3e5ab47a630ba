//! The closed function algebra over decision variables.
//!
//! Six kinds of function cover scalar and vector shapes of variables,
//! affine expressions, and quadratic expressions:
//! - [`SingleVariable`] / [`VectorOfVariables`]
//! - [`ScalarAffineFunction`] / [`VectorAffineFunction`]
//! - [`ScalarQuadraticFunction`] / [`VectorQuadraticFunction`]
//!
//! [`Function`] is the closed union of the six; generic containers use
//! [`TypedFunction`] to recover a concrete kind from it. Every kind
//! evaluates and substitutes variables, canonical forms come from
//! [`Canonicalize`], and vector kinds offer row-wise views through
//! [`VectorFunction`].

mod canonical;
mod eval;
mod scalarize;
mod term;

#[cfg(test)]
mod tests;

pub use canonical::Canonicalize;
pub use eval::{FilterVariables, FunctionValue};
pub use scalarize::{ScalarIter, VectorFunction};
pub use term::{ScalarAffineTerm, ScalarQuadraticTerm, VectorAffineTerm, VectorQuadraticTerm};

use crate::variable::VariableIndex;

/// The function `f(x) = x` of one decision variable.
///
/// # Example
///
/// ```
/// use optmodel_core::{SingleVariable, VariableIndex};
///
/// let f = SingleVariable::new(VariableIndex::new(0));
/// assert_eq!(f.output_dimension(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SingleVariable {
    /// The projected variable.
    pub variable: VariableIndex,
}

impl SingleVariable {
    /// Creates the identity function on `variable`.
    #[inline]
    pub const fn new(variable: VariableIndex) -> Self {
        Self { variable }
    }

    /// Output dimension, always 1.
    #[inline]
    pub const fn output_dimension(&self) -> usize {
        1
    }
}

/// The vector function selecting an ordered group of variables.
///
/// Group constraints over this kind treat the listed variables as one
/// unit; the variable removal cascade enforces that (see the store
/// crate).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VectorOfVariables {
    /// The projected variables, in output order.
    pub variables: Vec<VariableIndex>,
}

impl VectorOfVariables {
    /// Creates the vector function selecting `variables` in order.
    pub fn new(variables: Vec<VariableIndex>) -> Self {
        Self { variables }
    }

    /// Output dimension: the number of selected variables.
    #[inline]
    pub fn output_dimension(&self) -> usize {
        self.variables.len()
    }
}

/// The scalar function `sum(coefficient_i * variable_i) + constant`.
///
/// # Example
///
/// ```
/// use optmodel_core::{ScalarAffineFunction, ScalarAffineTerm, VariableIndex};
///
/// let x = VariableIndex::new(0);
/// // 2x + 5
/// let f = ScalarAffineFunction::new(vec![ScalarAffineTerm::new(2.0, x)], 5.0);
/// assert_eq!(f.evaluate(|_| 3.0), 11.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScalarAffineFunction {
    /// Affine terms; order and duplication are insignificant until
    /// canonicalized.
    pub terms: Vec<ScalarAffineTerm>,
    /// The constant offset.
    pub constant: f64,
}

impl ScalarAffineFunction {
    /// Creates the function `sum(terms) + constant`.
    pub fn new(terms: Vec<ScalarAffineTerm>, constant: f64) -> Self {
        Self { terms, constant }
    }

    /// The constant function with no terms.
    pub fn constant(constant: f64) -> Self {
        Self::new(Vec::new(), constant)
    }

    /// Output dimension, always 1.
    #[inline]
    pub const fn output_dimension(&self) -> usize {
        1
    }
}

/// The vector function `A x + b` in term form.
///
/// Row `i` of the output collects the terms with `output_index == i`
/// plus `constants[i]`. Every term's `output_index` must be smaller
/// than `constants.len()`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VectorAffineFunction {
    /// Row-tagged affine terms.
    pub terms: Vec<VectorAffineTerm>,
    /// Constant offset per output row; its length is the output
    /// dimension.
    pub constants: Vec<f64>,
}

impl VectorAffineFunction {
    /// Creates the function from row-tagged terms and per-row
    /// constants.
    pub fn new(terms: Vec<VectorAffineTerm>, constants: Vec<f64>) -> Self {
        Self { terms, constants }
    }

    /// Output dimension: the number of constant rows.
    #[inline]
    pub fn output_dimension(&self) -> usize {
        self.constants.len()
    }
}

/// The scalar function
/// `1/2 x'Qx + a'x + b` in term form: squares carry the half factor,
/// off-diagonal products are listed once.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScalarQuadraticFunction {
    /// Affine terms `a'x`.
    pub affine_terms: Vec<ScalarAffineTerm>,
    /// Quadratic terms `x'Qx`, squares halved on evaluation.
    pub quadratic_terms: Vec<ScalarQuadraticTerm>,
    /// The constant offset.
    pub constant: f64,
}

impl ScalarQuadraticFunction {
    /// Creates the function from its affine and quadratic term lists.
    pub fn new(
        affine_terms: Vec<ScalarAffineTerm>,
        quadratic_terms: Vec<ScalarQuadraticTerm>,
        constant: f64,
    ) -> Self {
        Self {
            affine_terms,
            quadratic_terms,
            constant,
        }
    }

    /// Output dimension, always 1.
    #[inline]
    pub const fn output_dimension(&self) -> usize {
        1
    }
}

/// The vector-valued quadratic function, one quadratic expression per
/// output row.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VectorQuadraticFunction {
    /// Row-tagged affine terms.
    pub affine_terms: Vec<VectorAffineTerm>,
    /// Row-tagged quadratic terms.
    pub quadratic_terms: Vec<VectorQuadraticTerm>,
    /// Constant offset per output row; its length is the output
    /// dimension.
    pub constants: Vec<f64>,
}

impl VectorQuadraticFunction {
    /// Creates the function from row-tagged terms and per-row
    /// constants.
    pub fn new(
        affine_terms: Vec<VectorAffineTerm>,
        quadratic_terms: Vec<VectorQuadraticTerm>,
        constants: Vec<f64>,
    ) -> Self {
        Self {
            affine_terms,
            quadratic_terms,
            constants,
        }
    }

    /// Output dimension: the number of constant rows.
    #[inline]
    pub fn output_dimension(&self) -> usize {
        self.constants.len()
    }
}

/// The closed union of the six function kinds.
///
/// Containers that must hold arbitrary kinds store this; containers
/// dedicated to one kind store the kind struct directly and use
/// [`TypedFunction::from_function`] at their type-erased boundary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Function {
    /// See [`SingleVariable`].
    SingleVariable(SingleVariable),
    /// See [`VectorOfVariables`].
    VectorOfVariables(VectorOfVariables),
    /// See [`ScalarAffineFunction`].
    ScalarAffine(ScalarAffineFunction),
    /// See [`VectorAffineFunction`].
    VectorAffine(VectorAffineFunction),
    /// See [`ScalarQuadraticFunction`].
    ScalarQuadratic(ScalarQuadraticFunction),
    /// See [`VectorQuadraticFunction`].
    VectorQuadratic(VectorQuadraticFunction),
}

impl Function {
    /// Output dimension of the wrapped function.
    pub fn output_dimension(&self) -> usize {
        match self {
            Function::SingleVariable(f) => f.output_dimension(),
            Function::VectorOfVariables(f) => f.output_dimension(),
            Function::ScalarAffine(f) => f.output_dimension(),
            Function::VectorAffine(f) => f.output_dimension(),
            Function::ScalarQuadratic(f) => f.output_dimension(),
            Function::VectorQuadratic(f) => f.output_dimension(),
        }
    }

    /// Name of the wrapped kind, used in logs and error reports.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Function::SingleVariable(_) => SingleVariable::KIND,
            Function::VectorOfVariables(_) => VectorOfVariables::KIND,
            Function::ScalarAffine(_) => ScalarAffineFunction::KIND,
            Function::VectorAffine(_) => VectorAffineFunction::KIND,
            Function::ScalarQuadratic(_) => ScalarQuadraticFunction::KIND,
            Function::VectorQuadratic(_) => VectorQuadraticFunction::KIND,
        }
    }
}

/// A concrete function kind that round-trips through [`Function`].
///
/// Lets generic containers accept the type-erased union at their
/// boundary and recover their declared kind, reporting a mismatch
/// instead of panicking.
pub trait TypedFunction: Clone + Into<Function> {
    /// Name of this kind, used in logs and error reports.
    const KIND: &'static str;

    /// Extracts this kind from the union; `None` if the variant
    /// differs.
    fn from_function(function: Function) -> Option<Self>;
}

macro_rules! impl_typed_function {
    ($type:ident, $variant:ident) => {
        impl From<$type> for Function {
            fn from(function: $type) -> Function {
                Function::$variant(function)
            }
        }

        impl TypedFunction for $type {
            const KIND: &'static str = stringify!($type);

            fn from_function(function: Function) -> Option<Self> {
                match function {
                    Function::$variant(f) => Some(f),
                    _ => None,
                }
            }
        }
    };
}

impl_typed_function!(SingleVariable, SingleVariable);
impl_typed_function!(VectorOfVariables, VectorOfVariables);
impl_typed_function!(ScalarAffineFunction, ScalarAffine);
impl_typed_function!(VectorAffineFunction, VectorAffine);
impl_typed_function!(ScalarQuadraticFunction, ScalarQuadratic);
impl_typed_function!(VectorQuadraticFunction, VectorQuadratic);

// Lifting conversions: a scalar kind promotes to its vector
// equivalent of dimension 1, a bare variable to unit-coefficient
// affine form.

impl From<VariableIndex> for SingleVariable {
    fn from(variable: VariableIndex) -> Self {
        SingleVariable::new(variable)
    }
}

impl From<VariableIndex> for ScalarAffineFunction {
    fn from(variable: VariableIndex) -> Self {
        ScalarAffineFunction::new(vec![ScalarAffineTerm::new(1.0, variable)], 0.0)
    }
}

impl From<SingleVariable> for ScalarAffineFunction {
    fn from(function: SingleVariable) -> Self {
        function.variable.into()
    }
}

impl From<ScalarAffineFunction> for VectorAffineFunction {
    fn from(function: ScalarAffineFunction) -> Self {
        let terms = function
            .terms
            .into_iter()
            .map(|term| VectorAffineTerm::new(0, term))
            .collect();
        VectorAffineFunction::new(terms, vec![function.constant])
    }
}

impl From<SingleVariable> for VectorAffineFunction {
    fn from(function: SingleVariable) -> Self {
        ScalarAffineFunction::from(function).into()
    }
}

impl From<VectorOfVariables> for VectorAffineFunction {
    fn from(function: VectorOfVariables) -> Self {
        let dimension = function.variables.len();
        let terms = function
            .variables
            .into_iter()
            .enumerate()
            .map(|(row, variable)| {
                VectorAffineTerm::new(row, ScalarAffineTerm::new(1.0, variable))
            })
            .collect();
        VectorAffineFunction::new(terms, vec![0.0; dimension])
    }
}

impl From<ScalarAffineFunction> for ScalarQuadraticFunction {
    fn from(function: ScalarAffineFunction) -> Self {
        ScalarQuadraticFunction::new(function.terms, Vec::new(), function.constant)
    }
}

impl From<ScalarQuadraticFunction> for VectorQuadraticFunction {
    fn from(function: ScalarQuadraticFunction) -> Self {
        let affine_terms = function
            .affine_terms
            .into_iter()
            .map(|term| VectorAffineTerm::new(0, term))
            .collect();
        let quadratic_terms = function
            .quadratic_terms
            .into_iter()
            .map(|term| VectorQuadraticTerm::new(0, term))
            .collect();
        VectorQuadraticFunction::new(affine_terms, quadratic_terms, vec![function.constant])
    }
}

/// Stacks the parts vertically into one vector affine function.
///
/// Each part's row indices are offset by the combined dimension of the
/// parts before it; constants are concatenated in order. The result's
/// dimension is the sum of the parts' dimensions.
///
/// # Example
///
/// ```
/// use optmodel_core::{concatenate, ScalarAffineFunction, ScalarAffineTerm, VariableIndex};
///
/// let x = VariableIndex::new(0);
/// let f = ScalarAffineFunction::new(vec![ScalarAffineTerm::new(2.0, x)], 1.0);
/// let g = ScalarAffineFunction::new(vec![ScalarAffineTerm::new(3.0, x)], 4.0);
///
/// let stacked = concatenate([f, g]);
/// assert_eq!(stacked.output_dimension(), 2);
/// assert_eq!(stacked.constants, vec![1.0, 4.0]);
/// assert_eq!(stacked.terms[1].output_index, 1);
/// ```
pub fn concatenate<I>(parts: I) -> VectorAffineFunction
where
    I: IntoIterator,
    I::Item: Into<VectorAffineFunction>,
{
    let mut terms = Vec::new();
    let mut constants = Vec::new();
    for part in parts {
        let part: VectorAffineFunction = part.into();
        let offset = constants.len();
        terms.extend(
            part.terms
                .into_iter()
                .map(|term| VectorAffineTerm::new(term.output_index + offset, term.scalar_term)),
        );
        constants.extend(part.constants);
    }
    VectorAffineFunction::new(terms, constants)
}
