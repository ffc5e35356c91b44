use super::*;
use crate::comparator::equals;
use crate::test_fixtures::Fixture;

#[test]
fn test_substitutes_type_argument() {
    let mut f = Fixture::new();
    let t = f.tvar("T", &[], None);
    let list_t = f.class("List", &[], &[t]);
    let string = f.class("String", &["NonNull"], &[]);

    let mut mapping = TypeSubstitution::new();
    mapping.insert(f.graph.base(t), string);
    let result = substitute(&mut f.graph, &mapping, list_t);

    assert_eq!(f.graph.render(result), "List<@NonNull String>");
    let expected_arg = f.class("String", &["NonNull"], &[]);
    let expected = f.class("List", &[], &[expected_arg]);
    assert!(equals(&f.graph, Some(result), Some(expected)));
    // The original is untouched.
    assert_eq!(f.graph.render(list_t), "List<T>");
}

#[test]
fn test_use_site_qualifiers_take_precedence() {
    let mut f = Fixture::new();
    let t = f.tvar("T", &["Q1"], None);
    let u = f.tvar("U", &[], None);
    let pair = f.class("Pair", &[], &[t, u]);
    let string = f.class("String", &["Q2"], &[]);
    let integer = f.class("Integer", &["Q3"], &[]);

    let mut mapping = TypeSubstitution::new();
    mapping.insert(f.graph.base(t), string);
    mapping.insert(f.graph.base(u), integer);
    let result = substitute(&mut f.graph, &mapping, pair);

    assert_eq!(f.graph.render(result), "Pair<@Q1 String, @Q3 Integer>");
}

#[test]
fn test_arguments_are_not_mutated() {
    let mut f = Fixture::new();
    let t = f.tvar("T", &["Q1"], None);
    let list_t = f.class("List", &[], &[t]);
    let string = f.class("String", &["Q2"], &[]);

    let mut mapping = TypeSubstitution::new();
    mapping.insert(f.graph.base(t), string);
    let result = substitute(&mut f.graph, &mapping, list_t);

    let replaced = f.graph.type_arguments(result)[0];
    assert_ne!(replaced, string);
    assert_eq!(f.graph.render(replaced), "@Q1 String");
    assert_eq!(f.graph.render(string), "@Q2 String");
}

#[test]
fn test_repeated_use_shares_replacement() {
    let mut f = Fixture::new();
    let t = f.tvar("T", &[], None);
    let pair = f.class("Pair", &[], &[t, t]);
    let string = f.class("String", &[], &[]);

    let mut mapping = TypeSubstitution::new();
    mapping.insert(f.graph.base(t), string);
    let result = substitute(&mut f.graph, &mapping, pair);

    let args = f.graph.type_arguments(result);
    assert_eq!(args[0], args[1]);
}

#[test]
fn test_unmapped_variable_is_copied() {
    let mut f = Fixture::new();
    let t = f.tvar("T", &[], None);
    let u = f.tvar("U", &["Nullable"], None);
    let list_u = f.class("List", &[], &[u]);
    let string = f.class("String", &[], &[]);

    let mut mapping = TypeSubstitution::new();
    mapping.insert(f.graph.base(t), string);
    let result = substitute(&mut f.graph, &mapping, list_u);

    let copied = f.graph.type_arguments(result)[0];
    assert_ne!(copied, u);
    assert_eq!(f.graph.render(result), "List<@Nullable U>");
}

#[test]
fn test_empty_mapping_is_a_copy() {
    let mut f = Fixture::new();
    let t = f.f_bounded("T");
    let list = f.class("List", &["Nullable"], &[t]);

    let result = substitute(&mut f.graph, &TypeSubstitution::new(), list);
    assert_ne!(result, list);
    assert!(equals(&f.graph, Some(result), Some(list)));
}

#[test]
fn test_own_type_parameters_are_not_substituted() {
    let mut f = Fixture::new();
    // <T> T id(T)
    let t = f.tvar("T", &[], None);
    let method = f.method("id", &[t], &[t], t, &[]);
    let string = f.class("String", &[], &[]);

    let mut mapping = TypeSubstitution::new();
    mapping.insert(f.graph.base(t), string);
    let result = substitute(&mut f.graph, &mapping, method);

    assert_eq!(f.graph.render(result), "<T> T id(T)");
    let shape = f.graph.executable_shape(result).unwrap();
    assert_ne!(shape.type_params[0], t);
    assert_eq!(shape.return_type, shape.type_params[0]);
}

#[test]
fn test_own_parameter_bounds_are_substituted() {
    let mut f = Fixture::new();
    // <U extends T> U m(T), with T from the enclosing class.
    let t = f.tvar("T", &[], None);
    let u = f.tvar("U", &[], Some(t));
    let method = f.method("m", &[u], &[t], u, &[]);
    let string = f.class("String", &[], &[]);

    let mut mapping = TypeSubstitution::new();
    mapping.insert(f.graph.base(t), string);
    let result = substitute(&mut f.graph, &mapping, method);

    assert_eq!(f.graph.render(result), "<U> U m(String)");
    let own = f.graph.executable_shape(result).unwrap().type_params[0];
    let bound = f.graph.upper_bound(own).unwrap();
    assert_eq!(f.graph.render(bound), "String");
}

#[test]
fn test_cycles_are_preserved() {
    let mut f = Fixture::new();
    // Comparable<T> where T extends Comparable<T>, with T -> List<T>.
    let t = f.f_bounded("T");
    let comparable = f.graph.upper_bound(t).unwrap();
    let list_t = f.class("List", &[], &[t]);

    let mut mapping = TypeSubstitution::new();
    mapping.insert(f.graph.base(t), list_t);
    let result = substitute(&mut f.graph, &mapping, comparable);

    // The argument's own children are shared, not substituted again.
    assert_eq!(f.graph.render(result), "Comparable<List<T>>");
    let replaced = f.graph.type_arguments(result)[0];
    assert_eq!(f.graph.type_arguments(replaced), &[t]);
}

#[test]
fn test_from_args() {
    let mut f = Fixture::new();
    let t = f.tvar("T", &[], None);
    let u = f.tvar("U", &[], None);
    let string = f.class("String", &[], &[]);
    let integer = f.class("Integer", &[], &[]);

    let mapping = TypeSubstitution::from_args(&f.graph, &[t, u], &[string, integer]).unwrap();
    assert_eq!(mapping.len(), 2);
    assert_eq!(mapping.get(f.graph.base(u)), Some(integer));
    assert!(!mapping.is_empty());

    assert_eq!(
        TypeSubstitution::from_args(&f.graph, &[t, u], &[string]).unwrap_err(),
        ContractError::ArityMismatch {
            expected: 2,
            found: 1
        }
    );
    let err = TypeSubstitution::from_args(&f.graph, &[string], &[integer]).unwrap_err();
    assert!(matches!(
        err,
        ContractError::KindMismatch {
            expected: TypeKind::TypeVariable,
            found: TypeKind::Declared,
            ..
        }
    ));
}
