//! Numeric rules for digit groups.
//!
//! A digit group is filtered in a single pass over its tuples. Each tuple is
//! viewed least-significant digit first, which makes suffix matching and
//! per-position bookkeeping index from the same end:
//!
//! 1. `Exact` ranges drop tuples whose whole value falls inside them.
//! 2. `SuffixInclude` ranges keep a tuple whose trailing digits fall inside
//!    them, once per distinct trailing number.
//! 3. A tuple that brings a not-yet-seen digit at some position is kept. The
//!    positions below the first new digit are rewritten round-robin from the
//!    digits already seen there, which spreads the output instead of emitting
//!    long runs of numbers that differ only in the last place.
//! 4. Anything else survives only if it has a repeated-digit run (`22`, `777`)
//!    of a digit and length not emitted before.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::ValueTuple;
use crate::facet::FacetValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangeKind {
    /// Blacklist: drop values inside the range.
    Exact,
    /// Whitelist: keep values whose trailing digits fall inside the range.
    SuffixInclude,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeRule {
    /// Inclusive `[min, max]`.
    pub range: [u64; 2],
    pub kind: RangeKind,
}

impl RangeRule {
    pub fn exact(min: u64, max: u64) -> Self {
        Self {
            range: [min, max],
            kind: RangeKind::Exact,
        }
    }

    pub fn suffix_include(min: u64, max: u64) -> Self {
        Self {
            range: [min, max],
            kind: RangeKind::SuffixInclude,
        }
    }

    pub fn min(&self) -> u64 {
        self.range[0]
    }

    pub fn max(&self) -> u64 {
        self.range[1]
    }

    pub fn contains(&self, value: u128) -> bool {
        u128::from(self.min()) <= value && value <= u128::from(self.max())
    }

    /// Number of trailing digits a suffix rule inspects: the width of `max`.
    pub fn suffix_width(&self) -> usize {
        self.max().to_string().len()
    }
}

/// Immutable rule configuration handed to the combinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    ranges: Vec<RangeRule>,
    filter_digits: bool,
}

impl RuleSet {
    pub fn new(ranges: Vec<RangeRule>) -> Self {
        Self {
            ranges,
            filter_digits: true,
        }
    }

    /// No all-zero numbers; `x10`..`x19` always allowed.
    pub fn standard() -> Self {
        Self::new(vec![RangeRule::exact(0, 0), RangeRule::suffix_include(10, 19)])
    }

    /// Plain per-group product, no digit filtering at all.
    pub fn unfiltered() -> Self {
        Self {
            ranges: Vec::new(),
            filter_digits: false,
        }
    }

    pub fn ranges(&self) -> &[RangeRule] {
        &self.ranges
    }

    pub fn filters_digits(&self) -> bool {
        self.filter_digits
    }

    fn of_kind(&self, kind: RangeKind) -> impl Iterator<Item = &RangeRule> {
        self.ranges.iter().filter(move |r| r.kind == kind)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Filter (and partially rewrite) the tuples of a pure digit group.
///
/// All tuples must have the same width. The output never contains the same
/// tuple twice.
pub fn filter_digit_group(tuples: Vec<ValueTuple>, rules: &RuleSet) -> Vec<ValueTuple> {
    let width = tuples.first().map_or(0, Vec::len);
    let mut filter = DigitFilter::new(width);
    let mut emitted: HashSet<ValueTuple> = HashSet::new();
    let mut out = Vec::new();

    for tuple in tuples {
        if let Some(kept) = filter.apply(tuple, rules) {
            if emitted.insert(kept.clone()) {
                out.push(kept);
            }
        }
    }
    out
}

/// Per-pass state. Positions are indexed least-significant first.
struct DigitFilter {
    /// Digits seen at each position, in first-seen order (the rewrite pool).
    seen: Vec<Vec<FacetValue>>,
    /// Round-robin pointer into `seen` per position.
    cursor: Vec<usize>,
    whitelisted: HashSet<u64>,
    used_runs: HashSet<(char, usize)>,
}

impl DigitFilter {
    fn new(width: usize) -> Self {
        Self {
            seen: vec![Vec::new(); width],
            cursor: vec![0; width],
            whitelisted: HashSet::new(),
            used_runs: HashSet::new(),
        }
    }

    fn apply(&mut self, tuple: ValueTuple, rules: &RuleSet) -> Option<ValueTuple> {
        let digits: String = tuple.concat();
        let value = digits.parse::<u128>().ok();

        if let Some(value) = value {
            if rules.of_kind(RangeKind::Exact).any(|r| r.contains(value)) {
                return None;
            }
        }

        let mut reversed = tuple;
        reversed.reverse();

        if self.take_whitelist(&digits, rules) {
            self.record_seen(&reversed, 0);
            reversed.reverse();
            return Some(reversed);
        }

        if let Some(first_new) = self.first_new_position(&reversed) {
            self.record_seen(&reversed, first_new);
            for pos in 0..first_new {
                reversed[pos] = self.next_seen(pos);
            }
            reversed.reverse();
            return Some(reversed);
        }

        let runs = digit_runs(&digits);
        if runs.iter().any(|run| !self.used_runs.contains(run)) {
            self.used_runs.extend(runs);
            reversed.reverse();
            return Some(reversed);
        }

        None
    }

    /// Consume the first suffix rule this tuple qualifies for.
    fn take_whitelist(&mut self, digits: &str, rules: &RuleSet) -> bool {
        let char_count = digits.chars().count();
        for rule in rules.of_kind(RangeKind::SuffixInclude) {
            let width = rule.suffix_width();
            if char_count < width {
                continue;
            }
            let suffix: String = digits.chars().skip(char_count - width).collect();
            let Ok(suffix) = suffix.parse::<u64>() else {
                continue;
            };
            if rule.contains(u128::from(suffix)) && self.whitelisted.insert(suffix) {
                return true;
            }
        }
        false
    }

    fn first_new_position(&self, reversed: &[FacetValue]) -> Option<usize> {
        reversed
            .iter()
            .zip(&self.seen)
            .position(|(value, seen)| !seen.contains(value))
    }

    fn record_seen(&mut self, reversed: &[FacetValue], from: usize) {
        for (pos, value) in reversed.iter().enumerate().skip(from) {
            let seen = &mut self.seen[pos];
            if !seen.contains(value) {
                seen.push(value.clone());
            }
        }
    }

    fn next_seen(&mut self, pos: usize) -> FacetValue {
        let pool = &self.seen[pos];
        let value = pool[self.cursor[pos] % pool.len()].clone();
        self.cursor[pos] += 1;
        value
    }
}

/// Maximal runs of one repeated digit, length two or more.
fn digit_runs(digits: &str) -> Vec<(char, usize)> {
    let mut runs = Vec::new();
    let mut chars = digits.chars().peekable();
    while let Some(c) = chars.next() {
        let mut len = 1;
        while chars.peek() == Some(&c) {
            chars.next();
            len += 1;
        }
        if len >= 2 {
            runs.push((c, len));
        }
    }
    runs
}
