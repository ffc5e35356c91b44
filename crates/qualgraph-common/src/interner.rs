//! Name interning for base types and qualifiers.
//!
//! A type graph refers to names (`java.util.List`, `Nullable`) by [`Atom`],
//! so base-type identity and qualifier membership are integer comparisons.
//! Each graph owns its [`Interner`]; atoms from different interners are not
//! comparable.

use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Handle to a name in one [`Interner`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Atom(pub u32);

impl Atom {
    /// The empty name, pre-interned at index 0.
    pub const NONE: Atom = Atom(0);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

/// Deduplicating name pool.
///
/// ```
/// use qualgraph_common::interner::Interner;
/// let mut names = Interner::new();
/// let list = names.intern("java.util.List");
/// assert_eq!(names.intern("java.util.List"), list);
/// assert_eq!(names.resolve(list), "java.util.List");
/// ```
#[derive(Debug, Clone)]
pub struct Interner {
    atoms: FxHashMap<Arc<str>, Atom>,
    names: Vec<Arc<str>>,
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl Interner {
    pub fn new() -> Self {
        let empty: Arc<str> = Arc::from("");
        let mut atoms = FxHashMap::default();
        atoms.insert(empty.clone(), Atom::NONE);
        Self {
            atoms,
            names: vec![empty],
        }
    }

    pub fn intern(&mut self, name: &str) -> Atom {
        if let Some(&atom) = self.atoms.get(name) {
            return atom;
        }
        let atom = Atom(self.names.len() as u32);
        let shared: Arc<str> = Arc::from(name);
        self.names.push(shared.clone());
        self.atoms.insert(shared, atom);
        atom
    }

    /// The atom for `name` if it was interned before.
    #[inline]
    pub fn get(&self, name: &str) -> Option<Atom> {
        self.atoms.get(name).copied()
    }

    /// The name of `atom`; `""` for an atom this interner never produced.
    #[inline]
    pub fn resolve(&self, atom: Atom) -> &str {
        self.try_resolve(atom).unwrap_or("")
    }

    #[inline]
    pub fn try_resolve(&self, atom: Atom) -> Option<&str> {
        self.names.get(atom.0 as usize).map(|name| &**name)
    }

    /// Number of names, counting the pre-interned empty name.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// No name besides the empty one.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.len() <= 1
    }
}

#[cfg(test)]
#[path = "../tests/interner_tests.rs"]
mod tests;
