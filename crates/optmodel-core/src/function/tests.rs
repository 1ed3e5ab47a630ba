//! Tests for the function algebra: evaluation, substitution,
//! concatenation, canonical forms, and row-wise views.

use super::*;
use crate::variable::VariableIndex;

fn x() -> VariableIndex {
    VariableIndex::new(0)
}

fn y() -> VariableIndex {
    VariableIndex::new(1)
}

fn z() -> VariableIndex {
    VariableIndex::new(2)
}

/// Lookup fixture: v0 -> 1.0, v1 -> 2.0, v2 -> 3.0, ...
fn values(v: VariableIndex) -> f64 {
    (v.raw() + 1) as f64
}

#[test]
fn test_evaluate_single_variable() {
    assert_eq!(SingleVariable::new(y()).evaluate(values), 2.0);
}

#[test]
fn test_evaluate_vector_of_variables() {
    let group = VectorOfVariables::new(vec![z(), x()]);
    assert_eq!(group.evaluate(values), vec![3.0, 1.0]);
}

#[test]
fn test_evaluate_scalar_affine() {
    // 2x + 3y + 5 at x=1, y=2
    let f = ScalarAffineFunction::new(
        vec![ScalarAffineTerm::new(2.0, x()), ScalarAffineTerm::new(3.0, y())],
        5.0,
    );
    assert_eq!(f.evaluate(values), 13.0);
}

#[test]
fn test_evaluate_vector_affine_accumulates_per_row() {
    // rows: [2x + 1, 3y + x]
    let f = VectorAffineFunction::new(
        vec![
            VectorAffineTerm::new(0, ScalarAffineTerm::new(2.0, x())),
            VectorAffineTerm::new(1, ScalarAffineTerm::new(3.0, y())),
            VectorAffineTerm::new(1, ScalarAffineTerm::new(1.0, x())),
        ],
        vec![1.0, 0.0],
    );
    assert_eq!(f.evaluate(values), vec![3.0, 7.0]);
}

#[test]
fn test_evaluate_square_term_is_halved() {
    // 4 * x^2 / 2 at x=3
    let f = ScalarQuadraticFunction::new(
        vec![],
        vec![ScalarQuadraticTerm::new(4.0, x(), x())],
        0.0,
    );
    assert_eq!(f.evaluate(|_| 3.0), 18.0);
}

#[test]
fn test_evaluate_cross_term_is_not_halved() {
    // 4 * x * y at x=1, y=2
    let f = ScalarQuadraticFunction::new(
        vec![],
        vec![ScalarQuadraticTerm::new(4.0, x(), y())],
        0.0,
    );
    assert_eq!(f.evaluate(values), 8.0);
}

#[test]
fn test_evaluate_vector_quadratic() {
    // rows: [x^2 (coef 2, halved), x*y + 10]
    let f = VectorQuadraticFunction::new(
        vec![],
        vec![
            VectorQuadraticTerm::new(0, ScalarQuadraticTerm::new(2.0, x(), x())),
            VectorQuadraticTerm::new(1, ScalarQuadraticTerm::new(1.0, x(), y())),
        ],
        vec![0.0, 10.0],
    );
    assert_eq!(f.evaluate(values), vec![1.0, 12.0]);
}

#[test]
fn test_evaluate_through_the_union() {
    let f: Function = ScalarAffineFunction::new(vec![ScalarAffineTerm::new(2.0, x())], 1.0).into();
    assert_eq!(f.evaluate(values), FunctionValue::Scalar(3.0));
    assert_eq!(f.evaluate(values).as_scalar(), Some(3.0));

    let g: Function = VectorOfVariables::new(vec![x(), y()]).into();
    assert_eq!(g.evaluate(values).as_vector(), Some(&[1.0, 2.0][..]));
}

#[test]
fn test_map_variables_rewrites_every_reference() {
    let shift = |v: VariableIndex| VariableIndex::new(v.raw() + 10);

    let f = ScalarQuadraticFunction::new(
        vec![ScalarAffineTerm::new(1.0, x())],
        vec![ScalarQuadraticTerm::new(2.0, x(), y())],
        7.0,
    );
    let mapped = f.map_variables(shift);
    assert_eq!(mapped.affine_terms[0].variable, VariableIndex::new(10));
    assert_eq!(mapped.quadratic_terms[0].variable_1, VariableIndex::new(10));
    assert_eq!(mapped.quadratic_terms[0].variable_2, VariableIndex::new(11));
    assert_eq!(mapped.constant, 7.0);
}

#[test]
fn test_map_variables_preserves_structure() {
    let f: Function = VectorOfVariables::new(vec![x(), y(), x()]).into();
    let mapped = f.map_variables(|v| VariableIndex::new(v.raw() + 1));
    match mapped {
        Function::VectorOfVariables(g) => {
            assert_eq!(g.variables, vec![y(), z(), y()]);
        }
        other => panic!("unexpected kind: {:?}", other),
    }
}

#[test]
fn test_map_variables_then_evaluate_translates_models() {
    // The classic use: evaluate a function against another model's
    // numbering by renaming on the way in.
    let f = ScalarAffineFunction::new(vec![ScalarAffineTerm::new(1.0, x())], 0.0);
    let translated = f.map_variables(|_| z());
    assert_eq!(translated.evaluate(values), 3.0);
}

#[test]
fn test_concatenate_offsets_rows() {
    let scalar = ScalarAffineFunction::new(vec![ScalarAffineTerm::new(2.0, x())], 1.0);
    let vector = VectorAffineFunction::new(
        vec![VectorAffineTerm::new(1, ScalarAffineTerm::new(3.0, y()))],
        vec![4.0, 5.0],
    );

    let stacked = concatenate([VectorAffineFunction::from(scalar), vector]);
    assert_eq!(stacked.output_dimension(), 3);
    assert_eq!(stacked.constants, vec![1.0, 4.0, 5.0]);
    assert_eq!(stacked.terms[0].output_index, 0);
    // The vector part's row 1 lands at 1 + offset 1 = 2.
    assert_eq!(stacked.terms[1].output_index, 2);
}

#[test]
fn test_concatenate_evaluates_as_stack() {
    let f = ScalarAffineFunction::new(vec![ScalarAffineTerm::new(2.0, x())], 1.0);
    let g = ScalarAffineFunction::new(vec![ScalarAffineTerm::new(3.0, y())], 0.0);
    let stacked = concatenate([VectorAffineFunction::from(f.clone()), g.clone().into()]);
    assert_eq!(
        stacked.evaluate(values),
        vec![f.evaluate(values), g.evaluate(values)]
    );
}

#[test]
fn test_lift_variable_to_affine() {
    let f = ScalarAffineFunction::from(x());
    assert_eq!(f.terms, vec![ScalarAffineTerm::new(1.0, x())]);
    assert_eq!(f.constant, 0.0);
    assert_eq!(f.evaluate(values), values(x()));
}

#[test]
fn test_lift_scalar_to_vector_of_dimension_one() {
    let f = ScalarAffineFunction::new(vec![ScalarAffineTerm::new(2.0, x())], 5.0);
    let lifted = VectorAffineFunction::from(f.clone());
    assert_eq!(lifted.output_dimension(), 1);
    assert_eq!(lifted.evaluate(values), vec![f.evaluate(values)]);
}

#[test]
fn test_lift_group_to_affine() {
    let group = VectorOfVariables::new(vec![y(), x()]);
    let lifted = VectorAffineFunction::from(group.clone());
    assert_eq!(lifted.evaluate(values), group.evaluate(values));
}

#[test]
fn test_lift_quadratic_chain() {
    let affine = ScalarAffineFunction::new(vec![ScalarAffineTerm::new(2.0, x())], 1.0);
    let quadratic = ScalarQuadraticFunction::from(affine.clone());
    assert!(quadratic.quadratic_terms.is_empty());
    assert_eq!(quadratic.evaluate(values), affine.evaluate(values));

    let lifted = VectorQuadraticFunction::from(quadratic.clone());
    assert_eq!(lifted.output_dimension(), 1);
    assert_eq!(lifted.evaluate(values), vec![quadratic.evaluate(values)]);
}

// Canonicalization

#[test]
fn test_canonicalize_sorts_merges_and_drops_zeros() {
    // Terms [(2,y),(1,x),(3,z),(-2,x),(-3,z)], constant 5 canonicalize
    // to [(-1,x),(2,y)], constant 5: z cancels and is dropped.
    let f = ScalarAffineFunction::new(
        vec![
            ScalarAffineTerm::new(2.0, y()),
            ScalarAffineTerm::new(1.0, x()),
            ScalarAffineTerm::new(3.0, z()),
            ScalarAffineTerm::new(-2.0, x()),
            ScalarAffineTerm::new(-3.0, z()),
        ],
        5.0,
    );
    let canonical = f.canonicalize();
    assert_eq!(
        canonical.terms,
        vec![ScalarAffineTerm::new(-1.0, x()), ScalarAffineTerm::new(2.0, y())]
    );
    assert_eq!(canonical.constant, 5.0);
}

#[test]
fn test_canonicalize_is_idempotent() {
    let f = ScalarAffineFunction::new(
        vec![
            ScalarAffineTerm::new(2.0, y()),
            ScalarAffineTerm::new(1.0, x()),
            ScalarAffineTerm::new(-2.0, x()),
        ],
        5.0,
    );
    let once = f.canonicalize();
    let twice = once.clone().canonicalize();
    assert_eq!(once, twice);
}

#[test]
fn test_canonicalize_is_order_independent() {
    let terms = vec![
        ScalarAffineTerm::new(2.0, y()),
        ScalarAffineTerm::new(1.0, x()),
        ScalarAffineTerm::new(3.0, z()),
        ScalarAffineTerm::new(-2.0, x()),
    ];
    let mut permuted = terms.clone();
    permuted.reverse();
    permuted.swap(0, 1);

    let a = ScalarAffineFunction::new(terms, 5.0).canonicalize();
    let b = ScalarAffineFunction::new(permuted, 5.0).canonicalize();
    assert_eq!(a, b);
}

#[test]
fn test_canonicalize_keys_are_unique_and_nonzero() {
    let f = ScalarAffineFunction::new(
        vec![
            ScalarAffineTerm::new(1.0, x()),
            ScalarAffineTerm::new(0.0, y()),
            ScalarAffineTerm::new(2.0, x()),
            ScalarAffineTerm::new(-1.0, z()),
        ],
        0.0,
    );
    let canonical = f.canonicalize();
    assert!(canonical.is_canonical());
    for pair in canonical.terms.windows(2) {
        assert!(pair[0].variable < pair[1].variable);
    }
    assert!(canonical.terms.iter().all(|t| t.coefficient != 0.0));
}

#[test]
fn test_canonicalize_preserves_value() {
    let f = ScalarQuadraticFunction::new(
        vec![
            ScalarAffineTerm::new(2.0, y()),
            ScalarAffineTerm::new(-2.0, y()),
            ScalarAffineTerm::new(1.0, x()),
        ],
        vec![
            ScalarQuadraticTerm::new(1.0, y(), x()),
            ScalarQuadraticTerm::new(2.0, x(), y()),
            ScalarQuadraticTerm::new(3.0, z(), z()),
        ],
        5.0,
    );
    let canonical = f.clone().canonicalize();
    assert_eq!(canonical.evaluate(values), f.evaluate(values));
}

#[test]
fn test_canonicalize_merges_swapped_quadratic_pairs() {
    // (x,y) and (y,x) are the same unordered pair and must merge.
    let f = ScalarQuadraticFunction::new(
        vec![],
        vec![
            ScalarQuadraticTerm::new(1.0, y(), x()),
            ScalarQuadraticTerm::new(2.0, x(), y()),
        ],
        0.0,
    );
    let canonical = f.canonicalize();
    assert_eq!(
        canonical.quadratic_terms,
        vec![ScalarQuadraticTerm::new(3.0, x(), y())]
    );
}

#[test]
fn test_canonicalize_vector_kinds_sort_by_row_first() {
    let f = VectorAffineFunction::new(
        vec![
            VectorAffineTerm::new(1, ScalarAffineTerm::new(1.0, x())),
            VectorAffineTerm::new(0, ScalarAffineTerm::new(2.0, y())),
            VectorAffineTerm::new(0, ScalarAffineTerm::new(3.0, x())),
        ],
        vec![0.0, 0.0],
    );
    let canonical = f.canonicalize();
    assert_eq!(
        canonical.terms,
        vec![
            VectorAffineTerm::new(0, ScalarAffineTerm::new(3.0, x())),
            VectorAffineTerm::new(0, ScalarAffineTerm::new(2.0, y())),
            VectorAffineTerm::new(1, ScalarAffineTerm::new(1.0, x())),
        ]
    );
}

#[test]
fn test_canonicalize_union_passes_variable_kinds_through() {
    let f: Function = VectorOfVariables::new(vec![x(), y()]).into();
    let canonical = f.clone().canonicalize();
    assert_eq!(canonical, f);
    assert!(canonical.is_canonical());
}

#[test]
fn test_canonical_form_as_structural_equality() {
    // Same map, different term lists.
    let a = ScalarAffineFunction::new(
        vec![ScalarAffineTerm::new(1.0, x()), ScalarAffineTerm::new(1.0, x())],
        0.0,
    );
    let b = ScalarAffineFunction::new(vec![ScalarAffineTerm::new(2.0, x())], 0.0);
    assert_ne!(a, b);
    assert_eq!(a.canonicalize(), b.canonicalize());
}

// Row-wise views

#[test]
fn test_scalar_at_collects_matching_rows() {
    let f = VectorAffineFunction::new(
        vec![
            VectorAffineTerm::new(0, ScalarAffineTerm::new(2.0, x())),
            VectorAffineTerm::new(1, ScalarAffineTerm::new(3.0, y())),
            VectorAffineTerm::new(0, ScalarAffineTerm::new(4.0, z())),
        ],
        vec![7.0, 8.0],
    );
    let row0 = f.scalar_at(0);
    assert_eq!(
        row0.terms,
        vec![ScalarAffineTerm::new(2.0, x()), ScalarAffineTerm::new(4.0, z())]
    );
    assert_eq!(row0.constant, 7.0);

    let row1 = f.scalar_at(1);
    assert_eq!(row1.terms, vec![ScalarAffineTerm::new(3.0, y())]);
}

#[test]
fn test_iter_scalars_is_exact_and_restartable() {
    let group = VectorOfVariables::new(vec![x(), y(), z()]);
    let iter = group.iter_scalars();
    assert_eq!(iter.len(), 3);

    let first: Vec<_> = iter.clone().collect();
    let second: Vec<_> = iter.collect();
    assert_eq!(first, second);
    assert_eq!(first[2], SingleVariable::new(z()));
}

#[test]
fn test_iter_scalars_matches_elementwise_evaluation() {
    let f = VectorQuadraticFunction::new(
        vec![VectorAffineTerm::new(1, ScalarAffineTerm::new(2.0, x()))],
        vec![VectorQuadraticTerm::new(0, ScalarQuadraticTerm::new(2.0, y(), y()))],
        vec![1.0, 2.0],
    );
    let whole = f.evaluate(values);
    let by_rows: Vec<f64> = f.iter_scalars().map(|row| row.evaluate(values)).collect();
    assert_eq!(whole, by_rows);
}

#[test]
fn test_iter_scalars_double_ended() {
    let group = VectorOfVariables::new(vec![x(), y()]);
    let reversed: Vec<_> = group.iter_scalars().rev().collect();
    assert_eq!(reversed[0], SingleVariable::new(y()));
}

#[test]
fn test_select_rows_renumbers_to_positions() {
    let f = VectorAffineFunction::new(
        vec![
            VectorAffineTerm::new(0, ScalarAffineTerm::new(1.0, x())),
            VectorAffineTerm::new(2, ScalarAffineTerm::new(3.0, z())),
        ],
        vec![10.0, 20.0, 30.0],
    );
    let projected = f.select_rows(&[2, 0]);
    assert_eq!(projected.constants, vec![30.0, 10.0]);
    // Old row 2 is now position 0, old row 0 now position 1.
    assert_eq!(
        projected.terms,
        vec![
            VectorAffineTerm::new(0, ScalarAffineTerm::new(3.0, z())),
            VectorAffineTerm::new(1, ScalarAffineTerm::new(1.0, x())),
        ]
    );
}

#[test]
fn test_select_rows_on_group() {
    let group = VectorOfVariables::new(vec![x(), y(), z()]);
    assert_eq!(
        group.select_rows(&[1, 1, 0]),
        VectorOfVariables::new(vec![y(), y(), x()])
    );
}

#[test]
fn test_concatenate_of_rows_roundtrips_canonically() {
    let f = VectorAffineFunction::new(
        vec![
            VectorAffineTerm::new(0, ScalarAffineTerm::new(2.0, x())),
            VectorAffineTerm::new(1, ScalarAffineTerm::new(3.0, y())),
        ],
        vec![1.0, 2.0],
    )
    .canonicalize();
    let restacked = concatenate(f.iter_scalars().map(VectorAffineFunction::from)).canonicalize();
    assert_eq!(restacked, f);
}

// Filtering

#[test]
fn test_filter_variables_strips_terms_not_constants() {
    let f = ScalarAffineFunction::new(
        vec![ScalarAffineTerm::new(2.0, x()), ScalarAffineTerm::new(3.0, y())],
        5.0,
    );
    let stripped = f.remove_variable(x());
    assert_eq!(stripped.terms, vec![ScalarAffineTerm::new(3.0, y())]);
    assert_eq!(stripped.constant, 5.0);
}

#[test]
fn test_filter_variables_checks_both_quadratic_slots() {
    let f = ScalarQuadraticFunction::new(
        vec![ScalarAffineTerm::new(1.0, y())],
        vec![
            ScalarQuadraticTerm::new(1.0, x(), y()),
            ScalarQuadraticTerm::new(2.0, y(), z()),
        ],
        0.0,
    );
    let stripped = f.remove_variable(x());
    assert_eq!(stripped.affine_terms.len(), 1);
    assert_eq!(
        stripped.quadratic_terms,
        vec![ScalarQuadraticTerm::new(2.0, y(), z())]
    );
}

#[test]
fn test_filter_variables_with_predicate() {
    let f = VectorAffineFunction::new(
        vec![
            VectorAffineTerm::new(0, ScalarAffineTerm::new(1.0, x())),
            VectorAffineTerm::new(0, ScalarAffineTerm::new(2.0, y())),
            VectorAffineTerm::new(1, ScalarAffineTerm::new(3.0, z())),
        ],
        vec![0.0, 0.0],
    );
    let kept = f.filter_variables(|v| v.raw() < 2);
    assert_eq!(kept.terms.len(), 2);
    assert_eq!(kept.constants, vec![0.0, 0.0]);
}

#[test]
fn test_output_dimensions() {
    assert_eq!(SingleVariable::new(x()).output_dimension(), 1);
    assert_eq!(VectorOfVariables::new(vec![x(), y()]).output_dimension(), 2);
    assert_eq!(ScalarAffineFunction::constant(0.0).output_dimension(), 1);
    assert_eq!(
        VectorAffineFunction::new(vec![], vec![0.0; 4]).output_dimension(),
        4
    );

    let f: Function = VectorQuadraticFunction::new(vec![], vec![], vec![0.0; 3]).into();
    assert_eq!(f.output_dimension(), 3);
}

#[test]
fn test_typed_function_roundtrip() {
    let f = ScalarAffineFunction::constant(1.0);
    let erased: Function = f.clone().into();
    assert_eq!(erased.kind_name(), "ScalarAffineFunction");
    assert_eq!(ScalarAffineFunction::from_function(erased.clone()), Some(f));
    assert_eq!(SingleVariable::from_function(erased), None);
}
