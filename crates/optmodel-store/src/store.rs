//! The per-partition constraint arena.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use optmodel_core::{
    ConstraintSet, Function, Modifiable, Modification, ModelError, Result, TypedFunction,
};

/// Handle to one constraint inside a [`ConstraintStore`] partition.
///
/// The handle is tagged by the partition's function and set kinds, so
/// an index can only be presented to stores of the matching partition
/// type. Within its partition a raw value is issued at most once; a
/// deleted index stays invalid forever.
pub struct ConstraintIndex<F, S> {
    raw: u64,
    _partition: PhantomData<fn() -> (F, S)>,
}

impl<F, S> ConstraintIndex<F, S> {
    pub(crate) const fn new(raw: u64) -> Self {
        Self {
            raw,
            _partition: PhantomData,
        }
    }

    /// Returns the raw value backing this handle.
    #[inline]
    pub const fn raw(&self) -> u64 {
        self.raw
    }
}

// Manual impls: the derived versions would bound F and S, which are
// only phantom tags here.

impl<F, S> Clone for ConstraintIndex<F, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F, S> Copy for ConstraintIndex<F, S> {}

impl<F, S> PartialEq for ConstraintIndex<F, S> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<F, S> Eq for ConstraintIndex<F, S> {}

impl<F, S> PartialOrd for ConstraintIndex<F, S> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<F, S> Ord for ConstraintIndex<F, S> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<F, S> Hash for ConstraintIndex<F, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<F, S> fmt::Debug for ConstraintIndex<F, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConstraintIndex").field(&self.raw).finish()
    }
}

impl<F, S> fmt::Display for ConstraintIndex<F, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.raw)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Entry<F, S> {
    pub(crate) raw: u64,
    pub(crate) function: F,
    pub(crate) set: S,
}

/// An ordered arena of `(function, set)` pairs for one
/// (function-kind, set-kind) partition.
///
/// Indices are assigned monotonically and never reused, even across
/// deletions and [`clear`](Self::clear). Entries sit in a dense
/// backing vector in insertion order; a raw-index-to-slot table
/// translates handles to slots, so every lookup is two direct array
/// accesses and no operation ever hashes. A delete compacts only this
/// partition's backing vector.
///
/// # Example
///
/// ```
/// use optmodel_core::{EqualTo, ScalarAffineFunction};
/// use optmodel_store::ConstraintStore;
///
/// let mut store = ConstraintStore::new();
/// let index = store.add(ScalarAffineFunction::constant(1.0), EqualTo::new(1.0));
///
/// assert_eq!(store.len(), 1);
/// assert_eq!(store.set(index).unwrap().value, 1.0);
///
/// store.delete(index).unwrap();
/// assert!(store.function(index).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ConstraintStore<F, S> {
    pub(crate) entries: Vec<Entry<F, S>>,
    /// Raw index -> slot in `entries`; `None` once deleted. Its length
    /// is the next raw value to issue.
    slots: Vec<Option<u32>>,
}

impl<F, S> Default for ConstraintStore<F, S>
where
    F: TypedFunction,
    S: ConstraintSet,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<F, S> ConstraintStore<F, S>
where
    F: TypedFunction,
    S: ConstraintSet,
{
    /// Creates an empty partition.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            slots: Vec::new(),
        }
    }

    /// Adds a constraint and returns its index.
    pub fn add(&mut self, function: F, set: S) -> ConstraintIndex<F, S> {
        let raw = self.slots.len() as u64;
        self.slots.push(Some(self.entries.len() as u32));
        self.entries.push(Entry { raw, function, set });
        tracing::debug!(
            index = raw,
            function_kind = F::KIND,
            set_kind = S::KIND,
            "constraint added"
        );
        ConstraintIndex::new(raw)
    }

    /// Adds a constraint supplied through the type-erased union.
    ///
    /// This is the entry point for registry layers that dispatch on
    /// runtime kinds; it fails with [`ModelError::TypeMismatch`] when
    /// the union's variant is not this partition's function kind.
    pub fn try_add(&mut self, function: Function, set: S) -> Result<ConstraintIndex<F, S>> {
        let actual = function.kind_name();
        let function = F::from_function(function).ok_or(ModelError::TypeMismatch {
            expected: F::KIND,
            actual,
        })?;
        Ok(self.add(function, set))
    }

    fn slot(&self, index: ConstraintIndex<F, S>) -> Result<usize> {
        self.slots
            .get(index.raw() as usize)
            .copied()
            .flatten()
            .map(|slot| slot as usize)
            .ok_or(ModelError::InvalidIndex { index: index.raw() })
    }

    /// Returns the stored function.
    pub fn function(&self, index: ConstraintIndex<F, S>) -> Result<&F> {
        Ok(&self.entries[self.slot(index)?].function)
    }

    /// Returns the stored set.
    pub fn set(&self, index: ConstraintIndex<F, S>) -> Result<&S> {
        Ok(&self.entries[self.slot(index)?].set)
    }

    /// Returns true when `index` currently refers to a live entry.
    pub fn contains(&self, index: ConstraintIndex<F, S>) -> bool {
        self.slot(index).is_ok()
    }

    /// Applies a modification to the stored function.
    ///
    /// The replacement value is fully built before the entry is
    /// touched, so a failed modification leaves the store unchanged.
    pub fn modify(&mut self, index: ConstraintIndex<F, S>, modification: &Modification) -> Result<()>
    where
        F: Modifiable,
    {
        let slot = self.slot(index)?;
        let updated = self.entries[slot].function.modify(modification)?;
        self.entries[slot].function = updated;
        tracing::debug!(
            index = index.raw(),
            modification = modification.name(),
            "constraint modified"
        );
        Ok(())
    }

    /// Replaces the stored function wholesale.
    pub fn replace_function(&mut self, index: ConstraintIndex<F, S>, function: F) -> Result<()> {
        let slot = self.slot(index)?;
        self.entries[slot].function = function;
        Ok(())
    }

    /// Replaces the stored set wholesale.
    pub fn replace_set(&mut self, index: ConstraintIndex<F, S>, set: S) -> Result<()> {
        let slot = self.slot(index)?;
        self.entries[slot].set = set;
        Ok(())
    }

    /// Deletes the constraint. Every later use of `index` fails with
    /// [`ModelError::InvalidIndex`]; the remaining entries keep their
    /// insertion order.
    pub fn delete(&mut self, index: ConstraintIndex<F, S>) -> Result<()> {
        self.slot(index)?;
        self.remove_raw(index.raw());
        tracing::debug!(index = index.raw(), "constraint deleted");
        Ok(())
    }

    /// Removes a live entry by raw value and re-points the translation
    /// table at the entries that shifted down.
    pub(crate) fn remove_raw(&mut self, raw: u64) {
        if let Some(slot) = self.slots[raw as usize].take() {
            let slot = slot as usize;
            self.entries.remove(slot);
            for moved in slot..self.entries.len() {
                let moved_raw = self.entries[moved].raw as usize;
                self.slots[moved_raw] = Some(moved as u32);
            }
        }
    }

    /// Iterates the currently valid indices in insertion order.
    pub fn indices(&self) -> impl Iterator<Item = ConstraintIndex<F, S>> + '_ {
        self.entries.iter().map(|entry| ConstraintIndex::new(entry.raw))
    }

    /// Number of live constraints.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the partition holds no constraints.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deletes every constraint. Previously issued indices stay
    /// invalid and are not reissued by later adds.
    pub fn clear(&mut self) {
        for entry in &self.entries {
            self.slots[entry.raw as usize] = None;
        }
        self.entries.clear();
    }
}
