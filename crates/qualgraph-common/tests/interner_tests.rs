use super::*;

#[test]
fn test_intern_deduplicates() {
    let mut interner = Interner::new();
    let a = interner.intern("java.lang.String");
    let b = interner.intern("java.lang.String");
    let c = interner.intern("java.lang.Integer");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.len(), 3);
}

#[test]
fn test_empty_string_is_none_atom() {
    let mut interner = Interner::new();
    assert!(interner.is_empty());
    assert_eq!(interner.intern(""), Atom::NONE);
    assert!(Atom::NONE.is_none());
    assert_eq!(interner.resolve(Atom::NONE), "");
}

#[test]
fn test_resolve_out_of_bounds() {
    let interner = Interner::new();
    assert_eq!(interner.resolve(Atom(999)), "");
    assert_eq!(interner.try_resolve(Atom(999)), None);
}

#[test]
fn test_get_does_not_intern() {
    let mut interner = Interner::new();
    assert_eq!(interner.get("Nullable"), None);
    let atom = interner.intern("Nullable");
    assert_eq!(interner.get("Nullable"), Some(atom));
    assert_eq!(interner.len(), 2);
}
