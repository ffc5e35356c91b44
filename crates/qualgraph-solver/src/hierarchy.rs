//! Qualifier hierarchies.
//!
//! The engine never interprets qualifiers itself. Every comparison goes
//! through a [`QualifierHierarchy`], which partitions qualifiers into one or
//! more lattices, each identified by its top.
//!
//! Two implementations ship with the crate:
//! - [`AcceptAllHierarchy`]: degenerate, every comparison succeeds.
//! - [`GraphQualifierHierarchy`]: a lattice defined by explicit
//!   (sub, super) edges. Callers supply the qualifier names; no domain is
//!   built in.

use crate::error::{ContractError, Result};
use crate::types::{Qualifier, QualifierSet};
use indexmap::IndexSet;
use smallvec::SmallVec;

/// Lattice operations over qualifiers, possibly spanning several hierarchies.
pub trait QualifierHierarchy: Send + Sync {
    /// One top per hierarchy.
    fn tops(&self) -> &[Qualifier];

    /// One bottom per hierarchy.
    fn bottoms(&self) -> &[Qualifier];

    /// Top of the hierarchy `qualifier` belongs to.
    fn top_of(&self, qualifier: Qualifier) -> Option<Qualifier>;

    /// Bottom of the hierarchy `qualifier` belongs to.
    fn bottom_of(&self, qualifier: Qualifier) -> Option<Qualifier>;

    fn is_subtype(&self, sub: Qualifier, sup: Qualifier) -> bool;

    /// `None` when the qualifiers belong to different hierarchies.
    fn least_upper_bound(&self, a: Qualifier, b: Qualifier) -> Option<Qualifier>;

    /// `None` when the qualifiers belong to different hierarchies.
    fn greatest_lower_bound(&self, a: Qualifier, b: Qualifier) -> Option<Qualifier>;

    /// The member of `set` that lives in the hierarchy rooted at `top`.
    fn find_in_hierarchy(&self, set: &QualifierSet, top: Qualifier) -> Option<Qualifier> {
        set.iter().find(|&q| self.top_of(q) == Some(top))
    }

    fn is_top(&self, qualifier: Qualifier) -> bool {
        self.tops().contains(&qualifier)
    }

    /// Set-level subtyping: for every hierarchy where both sets carry a
    /// qualifier, the subtype's must be below the supertype's.
    fn is_subtype_sets(&self, sub: &QualifierSet, sup: &QualifierSet) -> bool {
        self.tops().iter().all(|&top| {
            match (
                self.find_in_hierarchy(sub, top),
                self.find_in_hierarchy(sup, top),
            ) {
                (Some(a), Some(b)) => self.is_subtype(a, b),
                _ => true,
            }
        })
    }

    /// Per-hierarchy least upper bounds of two sets.
    fn least_upper_bounds(&self, a: &QualifierSet, b: &QualifierSet) -> QualifierSet {
        self.tops()
            .iter()
            .filter_map(|&top| {
                let qa = self.find_in_hierarchy(a, top)?;
                let qb = self.find_in_hierarchy(b, top)?;
                self.least_upper_bound(qa, qb)
            })
            .collect()
    }

    /// Per-hierarchy greatest lower bounds of two sets.
    fn greatest_lower_bounds(&self, a: &QualifierSet, b: &QualifierSet) -> QualifierSet {
        self.tops()
            .iter()
            .filter_map(|&top| {
                let qa = self.find_in_hierarchy(a, top)?;
                let qb = self.find_in_hierarchy(b, top)?;
                self.greatest_lower_bound(qa, qb)
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// AcceptAllHierarchy
// ---------------------------------------------------------------------------

/// Hierarchy in which every qualifier relation holds.
///
/// It has no tops, so multi-hierarchy checks compare nothing, and it never
/// finds a qualifier inside a set.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAllHierarchy;

impl QualifierHierarchy for AcceptAllHierarchy {
    fn tops(&self) -> &[Qualifier] {
        &[]
    }

    fn bottoms(&self) -> &[Qualifier] {
        &[]
    }

    fn top_of(&self, qualifier: Qualifier) -> Option<Qualifier> {
        Some(qualifier)
    }

    fn bottom_of(&self, qualifier: Qualifier) -> Option<Qualifier> {
        Some(qualifier)
    }

    fn is_subtype(&self, _sub: Qualifier, _sup: Qualifier) -> bool {
        true
    }

    fn least_upper_bound(&self, a: Qualifier, _b: Qualifier) -> Option<Qualifier> {
        Some(a)
    }

    fn greatest_lower_bound(&self, a: Qualifier, _b: Qualifier) -> Option<Qualifier> {
        Some(a)
    }

    fn find_in_hierarchy(&self, _set: &QualifierSet, _top: Qualifier) -> Option<Qualifier> {
        None
    }
}

// ---------------------------------------------------------------------------
// GraphQualifierHierarchy
// ---------------------------------------------------------------------------

/// Builder for [`GraphQualifierHierarchy`].
#[derive(Clone, Debug, Default)]
pub struct GraphQualifierHierarchyBuilder {
    qualifiers: IndexSet<Qualifier>,
    edges: Vec<(usize, usize)>,
}

impl GraphQualifierHierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a qualifier that may have no edges (a one-element hierarchy).
    pub fn add_qualifier(&mut self, qualifier: Qualifier) -> &mut Self {
        self.qualifiers.insert(qualifier);
        self
    }

    /// Declare `sub` a direct subtype of `sup`.
    pub fn add_subtype(&mut self, sub: Qualifier, sup: Qualifier) -> &mut Self {
        let (sub_idx, _) = self.qualifiers.insert_full(sub);
        let (sup_idx, _) = self.qualifiers.insert_full(sup);
        self.edges.push((sub_idx, sup_idx));
        self
    }

    /// Close the relation and validate it.
    ///
    /// Every connected component must have exactly one top and one bottom,
    /// and the relation must be acyclic.
    pub fn build(&self) -> Result<GraphQualifierHierarchy> {
        let n = self.qualifiers.len();
        let mut below = vec![false; n * n];
        for i in 0..n {
            below[i * n + i] = true;
        }
        for &(sub, sup) in &self.edges {
            below[sub * n + sup] = true;
        }
        // Floyd-Warshall transitive closure.
        for k in 0..n {
            for i in 0..n {
                if !below[i * n + k] {
                    continue;
                }
                for j in 0..n {
                    if below[k * n + j] {
                        below[i * n + j] = true;
                    }
                }
            }
        }

        for i in 0..n {
            for j in (i + 1)..n {
                if below[i * n + j] && below[j * n + i] {
                    return Err(ContractError::InvalidHierarchy {
                        reason: format!(
                            "cycle between {:?} and {:?}",
                            self.qualifiers[i], self.qualifiers[j]
                        ),
                    });
                }
            }
        }

        let component = components(n, &self.edges);
        let mut tops = SmallVec::<[Qualifier; 4]>::new();
        let mut bottoms = SmallVec::<[Qualifier; 4]>::new();
        let mut top_idx = vec![usize::MAX; n];
        let mut bottom_idx = vec![usize::MAX; n];

        let mut roots: Vec<usize> = component.clone();
        // Representatives are the smallest member index, so this is registration order.
        roots.sort_unstable();
        roots.dedup();

        for root in roots {
            let members: Vec<usize> = (0..n).filter(|&i| component[i] == root).collect();
            let maximal: Vec<usize> = members
                .iter()
                .copied()
                .filter(|&i| members.iter().all(|&j| j == i || !below[i * n + j]))
                .collect();
            let minimal: Vec<usize> = members
                .iter()
                .copied()
                .filter(|&i| members.iter().all(|&j| j == i || !below[j * n + i]))
                .collect();
            let (&[top], &[bottom]) = (maximal.as_slice(), minimal.as_slice()) else {
                return Err(ContractError::InvalidHierarchy {
                    reason: format!(
                        "hierarchy containing {:?} has {} tops and {} bottoms",
                        self.qualifiers[root],
                        maximal.len(),
                        minimal.len()
                    ),
                });
            };
            tops.push(self.qualifiers[top]);
            bottoms.push(self.qualifiers[bottom]);
            for &member in &members {
                top_idx[member] = top;
                bottom_idx[member] = bottom;
            }
        }

        Ok(GraphQualifierHierarchy {
            qualifiers: self.qualifiers.clone(),
            below,
            top_idx,
            bottom_idx,
            tops,
            bottoms,
        })
    }
}

/// Component representative (smallest index) per qualifier, ignoring edge direction.
fn components(n: usize, edges: &[(usize, usize)]) -> Vec<usize> {
    let mut parent: Vec<usize> = (0..n).collect();
    fn find(parent: &mut [usize], mut i: usize) -> usize {
        while parent[i] != i {
            parent[i] = parent[parent[i]];
            i = parent[i];
        }
        i
    }
    for &(a, b) in edges {
        let ra = find(&mut parent, a);
        let rb = find(&mut parent, b);
        if ra != rb {
            let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
            parent[hi] = lo;
        }
    }
    (0..n).map(|i| find(&mut parent, i)).collect()
}

/// A finite qualifier lattice given by explicit subtype edges.
#[derive(Clone, Debug)]
pub struct GraphQualifierHierarchy {
    qualifiers: IndexSet<Qualifier>,
    /// `below[i * n + j]`: qualifier `i` is a (reflexive, transitive) subtype of `j`.
    below: Vec<bool>,
    top_idx: Vec<usize>,
    bottom_idx: Vec<usize>,
    tops: SmallVec<[Qualifier; 4]>,
    bottoms: SmallVec<[Qualifier; 4]>,
}

impl GraphQualifierHierarchy {
    pub fn builder() -> GraphQualifierHierarchyBuilder {
        GraphQualifierHierarchyBuilder::new()
    }

    /// All qualifiers in registration order.
    pub fn qualifiers(&self) -> impl Iterator<Item = Qualifier> + '_ {
        self.qualifiers.iter().copied()
    }

    #[inline]
    fn le(&self, i: usize, j: usize) -> bool {
        self.below[i * self.qualifiers.len() + j]
    }

    fn same_hierarchy(&self, a: Qualifier, b: Qualifier) -> Option<(usize, usize)> {
        let ia = self.qualifiers.get_index_of(&a)?;
        let ib = self.qualifiers.get_index_of(&b)?;
        (self.top_idx[ia] == self.top_idx[ib]).then_some((ia, ib))
    }

    /// The candidate below (`least`) or above every other candidate.
    fn extreme(&self, candidates: &[usize], least: bool) -> Option<Qualifier> {
        candidates
            .iter()
            .copied()
            .find(|&k| {
                candidates
                    .iter()
                    .all(|&c| if least { self.le(k, c) } else { self.le(c, k) })
            })
            .map(|k| self.qualifiers[k])
    }
}

impl QualifierHierarchy for GraphQualifierHierarchy {
    fn tops(&self) -> &[Qualifier] {
        &self.tops
    }

    fn bottoms(&self) -> &[Qualifier] {
        &self.bottoms
    }

    fn top_of(&self, qualifier: Qualifier) -> Option<Qualifier> {
        let idx = self.qualifiers.get_index_of(&qualifier)?;
        Some(self.qualifiers[self.top_idx[idx]])
    }

    fn bottom_of(&self, qualifier: Qualifier) -> Option<Qualifier> {
        let idx = self.qualifiers.get_index_of(&qualifier)?;
        Some(self.qualifiers[self.bottom_idx[idx]])
    }

    fn is_subtype(&self, sub: Qualifier, sup: Qualifier) -> bool {
        if sub == sup {
            return true;
        }
        match (
            self.qualifiers.get_index_of(&sub),
            self.qualifiers.get_index_of(&sup),
        ) {
            (Some(i), Some(j)) => self.le(i, j),
            _ => false,
        }
    }

    fn least_upper_bound(&self, a: Qualifier, b: Qualifier) -> Option<Qualifier> {
        let (ia, ib) = self.same_hierarchy(a, b)?;
        let upper: SmallVec<[usize; 8]> = (0..self.qualifiers.len())
            .filter(|&k| self.le(ia, k) && self.le(ib, k))
            .collect();
        self.extreme(&upper, true)
    }

    fn greatest_lower_bound(&self, a: Qualifier, b: Qualifier) -> Option<Qualifier> {
        let (ia, ib) = self.same_hierarchy(a, b)?;
        let lower: SmallVec<[usize; 8]> = (0..self.qualifiers.len())
            .filter(|&k| self.le(k, ia) && self.le(k, ib))
            .collect();
        self.extreme(&lower, false)
    }
}

#[cfg(test)]
#[path = "../tests/hierarchy_tests.rs"]
mod tests;
