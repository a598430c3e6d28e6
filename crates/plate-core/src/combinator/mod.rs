//! Bounded, rule-filtered combination of per-position value sets.
//!
//! The full cartesian product of a plate pattern is large (12 letters and 10
//! digits over 8 positions is billions of codes), so facets are first grouped
//! by value class, the product is taken only inside each group, and the
//! resulting `HigherOrderFacet`s are sampled cyclically:
//!
//! ```text
//! facets ──group_facets──▶ groups ──cartesian_product──▶ tuples
//!        ──filter_digit_group (digit groups)──▶ HigherOrderFacet[]
//!        ──mix / mix_independently──▶ DisjointCombination[]
//! ```

mod grouping;
mod rules;
mod sampling;

pub use grouping::{group_facets, FacetGroup};
pub use rules::{filter_digit_group, RangeKind, RangeRule, RuleSet};
pub use sampling::{
    combinations_limit, generate_requested_count, mix, mix_independently, representative_count,
    sweep, GenerationOptions,
};

use tracing::debug;

use crate::facet::{Facet, FacetValue, ValueClass};

/// One value per facet of a group, in facet order.
pub type ValueTuple = Vec<FacetValue>;

/// One value per original facet, in original facet order.
pub type DisjointCombination = Vec<FacetValue>;

/// The product of one group of adjacent same-class facets.
///
/// Tuples keep per-position provenance so digit rules can inspect positions.
/// The tuples themselves are never mutated after construction; filtering
/// builds a new sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HigherOrderFacet {
    class: ValueClass,
    tuples: Vec<ValueTuple>,
}

impl HigherOrderFacet {
    pub fn new(class: ValueClass, tuples: Vec<ValueTuple>) -> Self {
        Self { class, tuples }
    }

    pub fn class(&self) -> ValueClass {
        self.class
    }

    pub fn tuples(&self) -> &[ValueTuple] {
        &self.tuples
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }
}

/// Unrestricted cartesian product, leftmost facet varying slowest.
///
/// Only ever applied within a group; see [`higher_order_facets`].
pub fn cartesian_product<'a, I>(facets: I) -> Vec<ValueTuple>
where
    I: IntoIterator<Item = &'a Facet>,
{
    facets
        .into_iter()
        .fold(vec![Vec::new()], |acc: Vec<ValueTuple>, facet| {
            let mut next = Vec::with_capacity(acc.len() * facet.len());
            for prefix in &acc {
                for value in facet.values() {
                    let mut tuple = prefix.clone();
                    tuple.push(value.clone());
                    next.push(tuple);
                }
            }
            next
        })
}

/// Group facets, expand each group, and filter pure digit groups by `rules`.
pub fn higher_order_facets(facets: &[Facet], rules: &RuleSet) -> Vec<HigherOrderFacet> {
    let groups = group_facets(facets);
    debug!(facet_count = facets.len(), group_count = groups.len(), "grouped facets");

    groups
        .into_iter()
        .map(|group| {
            let tuples = cartesian_product(group.facets.iter().copied());
            let tuples = if group.is_pure_digits() && rules.filters_digits() {
                let before = tuples.len();
                let filtered = filter_digit_group(tuples, rules);
                debug!(before, after = filtered.len(), "filtered digit group");
                filtered
            } else {
                tuples
            };
            HigherOrderFacet::new(group.class, tuples)
        })
        .collect()
}
