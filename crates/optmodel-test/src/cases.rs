//! Statically registered conformance checks.
//!
//! Each check drives the algebra and the store through one invariant a
//! conforming composition must uphold. The list is declared once, in
//! [`ALL`], and mapped to plain function pointers; harnesses iterate
//! it instead of discovering cases by name at runtime.

use optmodel_core::{
    Canonicalize, ConstraintSet, EqualTo, Modifiable, Modification, ModelError, Nonnegatives,
    SecondOrderCone, VectorOfVariables,
};
use optmodel_store::ConstraintStore;

use crate::allocator::VariableAllocator;
use crate::fixtures::affine;

/// A named conformance check.
pub type Case = (&'static str, fn());

/// The conformance checks, in execution order.
pub static ALL: &[Case] = &[
    ("canonicalize_is_idempotent", canonicalize_is_idempotent),
    ("canonicalize_preserves_value", canonicalize_preserves_value),
    ("coefficient_edit_roundtrips", coefficient_edit_roundtrips),
    ("store_never_reuses_indices", store_never_reuses_indices),
    ("group_removal_respects_set_kind", group_removal_respects_set_kind),
];

fn canonicalize_is_idempotent() {
    let mut vars = VariableAllocator::new();
    let [x, y] = vars.take();
    let f = affine(&[(2.0, y), (1.0, x), (-2.0, x)], 5.0);
    let once = f.canonicalize();
    assert_eq!(once.clone().canonicalize(), once);
    assert!(once.is_canonical());
}

fn canonicalize_preserves_value() {
    let mut vars = VariableAllocator::new();
    let [x, y, z] = vars.take();
    let f = affine(&[(2.0, y), (1.0, x), (3.0, z), (-3.0, z)], 5.0);
    let lookup = |v: optmodel_core::VariableIndex| (v.raw() * 2 + 1) as f64;
    assert_eq!(f.clone().canonicalize().evaluate(lookup), f.evaluate(lookup));
}

fn coefficient_edit_roundtrips() {
    let mut vars = VariableAllocator::new();
    let [x, y] = vars.take();
    let f = affine(&[(2.0, y)], 5.0);
    let inserted = f
        .modify(&Modification::Coefficient {
            variable: x,
            coefficient: 3.0,
        })
        .unwrap();
    let restored = inserted
        .modify(&Modification::Coefficient {
            variable: x,
            coefficient: 0.0,
        })
        .unwrap();
    assert_eq!(restored, f);
}

fn store_never_reuses_indices() {
    let mut vars = VariableAllocator::new();
    let [x] = vars.take();
    let mut store = ConstraintStore::new();
    let first = store.add(affine(&[(1.0, x)], 0.0), EqualTo::new(0.0));
    store.delete(first).unwrap();
    let second = store.add(affine(&[(1.0, x)], 0.0), EqualTo::new(0.0));
    assert_ne!(first, second);
    assert_eq!(
        store.function(first).unwrap_err(),
        ModelError::InvalidIndex { index: first.raw() }
    );
}

fn group_removal_respects_set_kind() {
    let mut vars = VariableAllocator::new();
    let [x, y, z] = vars.take();

    let mut fixed = ConstraintStore::new();
    let group = fixed.add(
        VectorOfVariables::new(vec![x, y, z]),
        SecondOrderCone::new(3),
    );
    assert_eq!(
        fixed.remove_variable(y),
        Err(ModelError::DeleteNotAllowed { variable: y })
    );
    assert_eq!(fixed.function(group).unwrap().variables.len(), 3);

    let mut resizable = ConstraintStore::new();
    let group = resizable.add(VectorOfVariables::new(vec![x, y, z]), Nonnegatives::new(3));
    resizable.remove_variable(y).unwrap();
    assert_eq!(resizable.function(group).unwrap().variables, vec![x, z]);
    assert_eq!(resizable.set(group).unwrap().dimension(), 2);
}
