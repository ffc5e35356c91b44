use super::*;
use crate::error::ContractError;
use crate::hierarchy::AcceptAllHierarchy;
use crate::subtype::QualifierMatch;
use crate::test_fixtures::Fixture;
use crate::types::BaseType;

struct Everything;

impl BaseTypeRelation for Everything {
    fn is_base_subtype(&self, _graph: &TypeGraph, _sub: BaseType, _sup: BaseType) -> bool {
        true
    }
}

#[test]
fn test_query_subtype() {
    let mut f = Fixture::new();
    let h = f.nullness();
    let non_null = f.class("String", &["NonNull"], &[]);
    let nullable = f.class("String", &["Nullable"], &[]);

    let result = query_relation(
        &f.graph,
        &h,
        Some(non_null),
        Some(nullable),
        RelationKind::Subtype,
    )
    .unwrap();
    assert_eq!(result.kind, RelationKind::Subtype);
    assert!(result.is_related());

    let reverse = query_relation(
        &f.graph,
        &h,
        Some(nullable),
        Some(non_null),
        RelationKind::Subtype,
    )
    .unwrap();
    assert!(!reverse.is_related());
}

#[test]
fn test_query_subtype_in_hierarchy() {
    let mut f = Fixture::new();
    let h = f.nullness_and_taint();
    let sub = f.class("String", &["NonNull", "Tainted"], &[]);
    let sup = f.class("String", &["Nullable", "Untainted"], &[]);
    let nullable = f.graph.qualifier("Nullable");

    let result = query_relation(
        &f.graph,
        &h,
        Some(sub),
        Some(sup),
        RelationKind::SubtypeIn(nullable),
    )
    .unwrap();
    assert!(result.related);
    assert_eq!(result.kind, RelationKind::SubtypeIn(nullable));
}

#[test]
fn test_query_equivalent() {
    let mut f = Fixture::new();
    let h = f.nullness();
    let a = f.class("String", &["NonNull"], &[]);
    let b = f.class("String", &["NonNull"], &[]);
    let c = f.class("String", &["Nullable"], &[]);

    let same = query_relation(&f.graph, &h, Some(a), Some(b), RelationKind::Equivalent).unwrap();
    assert!(same.related);
    let different =
        query_relation(&f.graph, &h, Some(a), Some(c), RelationKind::Equivalent).unwrap();
    assert!(!different.related);
}

#[test]
fn test_query_structural_equality_accepts_absent_graphs() {
    let mut f = Fixture::new();
    let string = f.class("String", &[], &[]);
    let h = AcceptAllHierarchy;

    let both_absent =
        query_relation(&f.graph, &h, None, None, RelationKind::StructurallyEqual).unwrap();
    assert!(both_absent.related);
    let one_absent = query_relation(
        &f.graph,
        &h,
        Some(string),
        None,
        RelationKind::StructurallyEqual,
    )
    .unwrap();
    assert!(!one_absent.related);
}

#[test]
fn test_query_subtype_requires_both_graphs() {
    let mut f = Fixture::new();
    let string = f.class("String", &[], &[]);
    let h = AcceptAllHierarchy;

    let err = query_relation(&f.graph, &h, None, Some(string), RelationKind::Subtype).unwrap_err();
    assert_eq!(
        err,
        ContractError::MissingGraph {
            context: "subtype operand"
        }
    );
    let err =
        query_relation(&f.graph, &h, Some(string), None, RelationKind::Equivalent).unwrap_err();
    assert!(matches!(err, ContractError::MissingGraph { .. }));
}

#[test]
fn test_query_with_custom_relation_and_config() {
    let mut f = Fixture::new();
    let h = f.nullness();
    let string = f.class("String", &["NonNull"], &[]);
    let object = f.class("Object", &["Nullable"], &[]);

    let nominal = query_relation(
        &f.graph,
        &h,
        Some(string),
        Some(object),
        RelationKind::Subtype,
    )
    .unwrap();
    assert!(!nominal.related);

    let related = query_relation_with_relation(
        &f.graph,
        &h,
        &Everything,
        SubtypeConfig::default(),
        Some(string),
        Some(object),
        RelationKind::Subtype,
    )
    .unwrap();
    assert!(related.related);

    let strict = SubtypeConfig::strict();
    assert_eq!(strict.declared_qualifiers, QualifierMatch::Exact);
    let exact = query_relation_with_relation(
        &f.graph,
        &h,
        &Everything,
        strict,
        Some(string),
        Some(object),
        RelationKind::Subtype,
    )
    .unwrap();
    assert!(!exact.related);
}

#[test]
fn test_query_propagates_contract_errors() {
    let mut f = Fixture::new();
    let h = f.nullness();
    let void = f.prim("void", &[]);
    let method = f.method("run", &[], &[], void, &[]);
    let string = f.class("String", &[], &[]);

    let err = query_relation(
        &f.graph,
        &h,
        Some(method),
        Some(string),
        RelationKind::Subtype,
    )
    .unwrap_err();
    assert!(matches!(err, ContractError::UnexpectedCombination { .. }));
}
