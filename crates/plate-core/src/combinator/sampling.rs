//! Cyclic sampling over filtered groups.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, debug_span};

use super::{DisjointCombination, HigherOrderFacet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Defaults to [`representative_count`] when `None`.
    pub requested_count: Option<usize>,
    pub shuffle: bool,
    /// Seed for the shuffle. `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

/// The true product size of the filtered groups. Saturates on overflow.
pub fn combinations_limit(groups: &[HigherOrderFacet]) -> usize {
    if groups.is_empty() {
        return 0;
    }
    groups
        .iter()
        .fold(1usize, |acc, g| acc.saturating_mul(g.len()))
}

/// Length of the longest group: the smallest sample that visits every value
/// of every group at least once.
pub fn representative_count(groups: &[HigherOrderFacet]) -> usize {
    groups.iter().map(HigherOrderFacet::len).max().unwrap_or(0)
}

/// One combination per index of the longest group, cycling shorter groups.
pub fn mix(groups: &[HigherOrderFacet]) -> Vec<DisjointCombination> {
    mix_independently(groups, 0)
}

/// [`mix`] with a per-group phase derived from `offset`.
///
/// `offset` is read as a mixed-radix number over every group except the
/// longest one (the last of them, when several tie), least significant digit
/// on the rightmost group. Sweeping `offset` over `0..limit / longest`
/// produces every combination exactly once.
pub fn mix_independently(groups: &[HigherOrderFacet], offset: usize) -> Vec<DisjointCombination> {
    let max_len = representative_count(groups);
    if max_len == 0 || groups.iter().any(HigherOrderFacet::is_empty) {
        return Vec::new();
    }

    let shifts = phase_shifts(groups, max_len, offset);
    (0..max_len)
        .map(|i| {
            groups
                .iter()
                .zip(&shifts)
                .flat_map(|(group, shift)| {
                    group.tuples()[(i + shift) % group.len()].iter().cloned()
                })
                .collect()
        })
        .collect()
}

/// Every combination of the filtered space, lazily, one offset at a time.
pub fn sweep(groups: &[HigherOrderFacet]) -> impl Iterator<Item = DisjointCombination> + '_ {
    let representative = representative_count(groups);
    let offsets = if representative == 0 {
        0
    } else {
        combinations_limit(groups) / representative
    };
    (0..offsets).flat_map(move |offset| mix_independently(groups, offset))
}

fn phase_shifts(groups: &[HigherOrderFacet], max_len: usize, mut offset: usize) -> Vec<usize> {
    let mut shifts = vec![0; groups.len()];
    let anchor = groups.iter().rposition(|g| g.len() == max_len);

    for (idx, group) in groups.iter().enumerate().rev() {
        if offset == 0 {
            break;
        }
        if Some(idx) == anchor {
            continue;
        }
        shifts[idx] = offset % group.len();
        offset /= group.len();
    }
    shifts
}

/// Produce exactly `requested_count` distinct combinations, or the whole
/// filtered space when it is smaller, without expanding the full product.
pub fn generate_requested_count(
    groups: &[HigherOrderFacet],
    options: &GenerationOptions,
) -> Vec<DisjointCombination> {
    let representative = representative_count(groups);
    let limit = combinations_limit(groups);
    let requested = options.requested_count.unwrap_or(representative);
    let _span = debug_span!("generate_requested_count", requested, limit).entered();
    if representative == 0 || requested == 0 {
        return Vec::new();
    }

    let wanted = requested.min(limit);
    let sweeps = wanted.div_ceil(representative);
    let mut combinations: Vec<DisjointCombination> =
        sweep(groups).take(sweeps * representative).collect();

    if options.shuffle {
        match options.seed {
            Some(seed) => combinations.shuffle(&mut StdRng::seed_from_u64(seed)),
            None => combinations.shuffle(&mut rand::thread_rng()),
        }
    }
    combinations.truncate(wanted);

    debug!(sweeps, produced = combinations.len());
    combinations
}
