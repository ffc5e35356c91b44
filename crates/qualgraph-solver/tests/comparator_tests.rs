use super::*;
use crate::test_fixtures::Fixture;

#[test]
fn test_absent_graphs() {
    let mut f = Fixture::new();
    let string = f.class("String", &[], &[]);
    assert!(equals(&f.graph, None, None));
    assert!(!equals(&f.graph, Some(string), None));
    assert!(!equals(&f.graph, None, Some(string)));
    assert_eq!(hash(&f.graph, None), 0);
}

#[test]
fn test_equality_is_reflexive() {
    let mut f = Fixture::new();
    let t = f.f_bounded("T");
    let string = f.class("String", &["NonNull"], &[]);
    let wildcard = f.wildcard(&["Nullable"], Some(string));
    let map = f.class("Map", &[], &[t, wildcard]);
    let void = f.prim("void", &[]);
    let method = f.method("m", &[t], &[map], void, &[string]);

    for id in [t, string, wildcard, map, method] {
        assert!(equals(&f.graph, Some(id), Some(id)));
    }
}

#[test]
fn test_structurally_equal_separate_builds() {
    let mut f = Fixture::new();
    let a_string = f.class("String", &["NonNull"], &[]);
    let a = f.class("List", &[], &[a_string]);
    let b_string = f.class("String", &["NonNull"], &[]);
    let b = f.class("List", &[], &[b_string]);

    assert!(equals(&f.graph, Some(a), Some(b)));
    assert!(equals(&f.graph, Some(b), Some(a)));
    assert_eq!(hash(&f.graph, Some(a)), hash(&f.graph, Some(b)));
}

#[test]
fn test_qualifiers_base_and_kind_matter() {
    let mut f = Fixture::new();
    let non_null = f.class("String", &["NonNull"], &[]);
    let nullable = f.class("String", &["Nullable"], &[]);
    let integer = f.class("Integer", &["NonNull"], &[]);
    let t = f.tvar("String", &["NonNull"], None);

    assert!(!equals(&f.graph, Some(non_null), Some(nullable)));
    assert!(!equals(&f.graph, Some(non_null), Some(integer)));
    assert!(!equals(&f.graph, Some(non_null), Some(t)));
    assert!(!equals(&f.graph, Some(nullable), Some(non_null)));
}

#[test]
fn test_type_argument_arity_matters() {
    let mut f = Fixture::new();
    let string = f.class("String", &[], &[]);
    let one = f.class("List", &[], &[string]);
    let two = f.class("List", &[], &[string, string]);
    assert!(!equals(&f.graph, Some(one), Some(two)));
}

#[test]
fn test_optional_bounds_must_both_be_present_or_absent() {
    let mut f = Fixture::new();
    let object = f.class("Object", &[], &[]);
    let bounded = f.tvar("T", &[], Some(object));
    let unbounded = f.tvar("T", &[], None);
    assert!(!equals(&f.graph, Some(bounded), Some(unbounded)));

    let w1 = f.wildcard(&[], None);
    let w2 = f.wildcard(&[], None);
    assert!(equals(&f.graph, Some(w1), Some(w2)));
}

#[test]
fn test_flags_are_not_compared() {
    let mut f = Fixture::new();
    let w1 = f.wildcard(&[], None);
    let w2 = f.wildcard(&[], None);
    f.graph.mark_type_argument(w2).unwrap();
    assert!(equals(&f.graph, Some(w1), Some(w2)));
}

#[test]
fn test_cyclic_graphs_compare_coinductively() {
    let mut f = Fixture::new();
    let t1 = f.f_bounded("T");
    let t2 = f.f_bounded("T");
    assert!(equals(&f.graph, Some(t1), Some(t2)));
    assert_eq!(hash(&f.graph, Some(t1)), hash(&f.graph, Some(t2)));

    let u = f.f_bounded("U");
    assert!(!equals(&f.graph, Some(t1), Some(u)));
}

#[test]
fn test_differently_unrolled_cycles_are_equal_and_hash_equal() {
    let mut f = Fixture::new();
    // T extends Comparable<T>
    let t = f.f_bounded("T");
    // T' extends Comparable<T''>, T'' extends Comparable<T''>
    let inner = f.f_bounded("T");
    let outer = f.tvar("T", &[], None);
    let outer_bound = f.class("Comparable", &[], &[inner]);
    f.graph.set_upper_bound(outer, Some(outer_bound)).unwrap();

    assert!(equals(&f.graph, Some(t), Some(outer)));
    assert_eq!(hash(&f.graph, Some(t)), hash(&f.graph, Some(outer)));
}

/// Equal graphs that differ only in sharing hash equally: the hash folds a
/// shared node once per path, exactly like its unshared duplicate.
#[test]
fn test_shared_and_unshared_dags_hash_equal() {
    let mut f = Fixture::new();
    let shared = f.class("String", &["NonNull"], &[]);
    let b = f.class("Pair", &[], &[shared, shared]);

    let left = f.class("String", &["NonNull"], &[]);
    let right = f.class("String", &["NonNull"], &[]);
    let a = f.class("Pair", &[], &[left, right]);

    assert!(equals(&f.graph, Some(a), Some(b)));
    assert_eq!(hash(&f.graph, Some(a)), hash(&f.graph, Some(b)));
}

#[test]
fn test_hash_depends_on_qualifiers_and_base() {
    let mut f = Fixture::new();
    let a = f.class("String", &["NonNull"], &[]);
    let b = f.class("String", &["Nullable"], &[]);
    let c = f.class("Integer", &["NonNull"], &[]);
    let ha = hash(&f.graph, Some(a));
    assert_ne!(ha, hash(&f.graph, Some(b)));
    assert_ne!(ha, hash(&f.graph, Some(c)));
}

#[test]
fn test_hash_ignores_qualifier_insertion_order() {
    let mut f = Fixture::new();
    let a = f.class("String", &["A", "B"], &[]);
    let b = f.class("String", &["B", "A"], &[]);
    assert_eq!(hash(&f.graph, Some(a)), hash(&f.graph, Some(b)));
}

#[test]
fn test_copies_hash_like_originals() {
    let mut f = Fixture::new();
    let t = f.f_bounded("T");
    let list = f.class("List", &["Nullable"], &[t]);
    let copied = crate::copier::copy(&mut f.graph, list);
    assert_eq!(hash(&f.graph, Some(list)), hash(&f.graph, Some(copied)));
}

#[test]
fn test_executable_element_is_not_compared() {
    let mut f = Fixture::new();
    let void = f.prim("void", &[]);
    let m1 = f.method("run", &[], &[], void, &[]);
    let base = f.graph.base_type("run");
    let m2 = f.graph.executable(
        base,
        crate::types::QualifierSet::new(),
        crate::graph::ExecutableParts {
            element: crate::types::ElementRef(99),
            receiver: None,
            params: vec![],
            thrown: vec![],
            return_type: void,
            type_params: vec![],
        },
    );
    assert!(equals(&f.graph, Some(m1), Some(m2)));
}

#[test]
fn test_shared_dags_compare_in_linear_time() {
    let mut f = Fixture::new();
    let mut a = f.class("String", &["NonNull"], &[]);
    let mut b = f.class("String", &["NonNull"], &[]);
    for _ in 0..64 {
        a = f.class("Pair", &[], &[a, a]);
        b = f.class("Pair", &[], &[b, b]);
    }
    assert!(equals(&f.graph, Some(a), Some(b)));

    let mut c = f.class("String", &["Nullable"], &[]);
    for _ in 0..64 {
        c = f.class("Pair", &[], &[c, c]);
    }
    assert!(!equals(&f.graph, Some(a), Some(c)));
}

#[test]
fn test_comparator_reuse_keeps_answers() {
    let mut f = Fixture::new();
    let t = f.f_bounded("T");
    let u = f.f_bounded("T");
    let string = f.class("String", &[], &[]);
    let mut comparator = StructuralComparator::new(&f.graph);
    assert!(comparator.equals(Some(t), Some(u)));
    assert!(comparator.equals(Some(t), Some(u)));
    assert!(!comparator.equals(Some(t), Some(string)));
}
