//! Cascading variable removal with referential-integrity checks.
//!
//! Removing (or filtering) variables touches every constraint in a
//! partition: term-bearing functions lose the terms that reference a
//! dropped variable, single-variable constraints on a dropped variable
//! disappear, and group constraints shrink, disappear, or refuse the
//! removal depending on their set kind. The store runs the cascade in
//! two passes: every entry's outcome is computed (and validated) before
//! any entry is mutated, so a refused removal leaves the partition
//! exactly as it was.

use smallvec::SmallVec;

use optmodel_core::{
    ConstraintSet, FilterVariables, ModelError, Result, ScalarAffineFunction,
    ScalarQuadraticFunction, SingleVariable, TypedFunction, VariableIndex, VectorAffineFunction,
    VectorOfVariables, VectorQuadraticFunction,
};

use crate::store::ConstraintStore;

/// Outcome of a variable filter for one stored constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum Cascade<F> {
    /// No referenced variable was dropped; the entry stays as is.
    Keep,
    /// Terms referencing dropped variables were stripped; the output
    /// dimension is unchanged.
    Strip(F),
    /// A group constraint keeps `dimension` members; the stored set
    /// follows via `ConstraintSet::with_dimension`.
    Shrink {
        /// The shrunken function.
        function: F,
        /// Its new output dimension.
        dimension: usize,
    },
    /// The whole constraint is deleted.
    Delete,
}

/// Per-kind response of a stored function to a variable filter.
///
/// The six kinds are closed, so each spells out its own rule here and
/// [`ConstraintStore::retain_variables`] runs one uniform cascade over
/// any partition.
pub trait CascadeFunction: TypedFunction {
    /// Computes this function's outcome under `keep` without mutating
    /// anything. `dimension_updatable` is the partition set kind's
    /// capability; a group constraint that may not change dimension
    /// fails with [`ModelError::DeleteNotAllowed`] naming the first
    /// variable whose removal was refused.
    fn cascade(
        &self,
        keep: impl Fn(VariableIndex) -> bool,
        dimension_updatable: bool,
    ) -> Result<Cascade<Self>>;
}

impl CascadeFunction for SingleVariable {
    fn cascade(
        &self,
        keep: impl Fn(VariableIndex) -> bool,
        _dimension_updatable: bool,
    ) -> Result<Cascade<Self>> {
        if keep(self.variable) {
            Ok(Cascade::Keep)
        } else {
            Ok(Cascade::Delete)
        }
    }
}

impl CascadeFunction for VectorOfVariables {
    fn cascade(
        &self,
        keep: impl Fn(VariableIndex) -> bool,
        dimension_updatable: bool,
    ) -> Result<Cascade<Self>> {
        let mut first_removed = None;
        let mut remaining = Vec::with_capacity(self.variables.len());
        for &v in &self.variables {
            if keep(v) {
                remaining.push(v);
            } else if first_removed.is_none() {
                first_removed = Some(v);
            }
        }
        let Some(variable) = first_removed else {
            return Ok(Cascade::Keep);
        };
        // A group of size > 1 only changes dimension when its set kind
        // can follow; a group left with one or zero members goes away
        // entirely.
        if self.variables.len() > 1 && !dimension_updatable {
            return Err(ModelError::DeleteNotAllowed { variable });
        }
        if remaining.len() <= 1 {
            return Ok(Cascade::Delete);
        }
        let dimension = remaining.len();
        Ok(Cascade::Shrink {
            function: VectorOfVariables::new(remaining),
            dimension,
        })
    }
}

macro_rules! impl_cascade_by_stripping {
    ($type:ident) => {
        impl CascadeFunction for $type {
            fn cascade(
                &self,
                keep: impl Fn(VariableIndex) -> bool,
                _dimension_updatable: bool,
            ) -> Result<Cascade<Self>> {
                let stripped = self.filter_variables(keep);
                if stripped == *self {
                    Ok(Cascade::Keep)
                } else {
                    Ok(Cascade::Strip(stripped))
                }
            }
        }
    };
}

impl_cascade_by_stripping!(ScalarAffineFunction);
impl_cascade_by_stripping!(VectorAffineFunction);
impl_cascade_by_stripping!(ScalarQuadraticFunction);
impl_cascade_by_stripping!(VectorQuadraticFunction);

impl<F, S> ConstraintStore<F, S>
where
    F: CascadeFunction,
    S: ConstraintSet,
{
    /// Removes every reference to `variable` from the partition.
    ///
    /// Term-bearing functions lose the terms mentioning the variable
    /// (either slot of a quadratic term), single-variable constraints
    /// on it are deleted, and group constraints follow the rules of
    /// [`CascadeFunction`]. Validation runs over the whole partition
    /// before anything mutates.
    pub fn remove_variable(&mut self, variable: VariableIndex) -> Result<()> {
        self.retain_variables(|v| v != variable)
    }

    /// Like [`remove_variable`](Self::remove_variable), driven by a
    /// keep predicate instead of a single target.
    pub fn retain_variables(&mut self, keep: impl Fn(VariableIndex) -> bool) -> Result<()> {
        // Pass 1: compute and validate every outcome. A refusal
        // returns here, before any entry has changed.
        let mut outcomes = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            outcomes.push(entry.function.cascade(&keep, S::DIMENSION_UPDATABLE)?);
        }

        // Pass 2: apply.
        let mut doomed: SmallVec<[u64; 4]> = SmallVec::new();
        let mut stripped = 0usize;
        for (entry, outcome) in self.entries.iter_mut().zip(outcomes) {
            match outcome {
                Cascade::Keep => {}
                Cascade::Strip(function) => {
                    entry.function = function;
                    stripped += 1;
                }
                Cascade::Shrink {
                    function,
                    dimension,
                } => {
                    entry.function = function;
                    entry.set = entry.set.with_dimension(dimension);
                    stripped += 1;
                }
                Cascade::Delete => doomed.push(entry.raw),
            }
        }
        let deleted = doomed.len();
        for raw in doomed {
            self.remove_raw(raw);
        }
        if stripped > 0 || deleted > 0 {
            tracing::debug!(
                function_kind = F::KIND,
                set_kind = S::KIND,
                rewritten = stripped,
                deleted,
                "variable removal cascade applied"
            );
        }
        Ok(())
    }
}
