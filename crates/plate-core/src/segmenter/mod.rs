//! Splits generated codes into configured sub-fields and tiles each field
//! with dictionary keys.

mod tiling;

pub use tiling::{rank, tile};

use tracing::{debug, debug_span, warn};

use crate::text::code_point_hex;

/// Dictionary keys whose concatenation reproduces one field, in order.
pub type KeySet = Vec<String>;

/// One named sub-field of a code, `length` characters wide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConfig {
    pub id: String,
    pub length: usize,
}

/// A sub-field of a code together with all of its tilings, best first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealFacet {
    pub config: FieldConfig,
    pub value: String,
    pub key_sets: Vec<KeySet>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentedCode {
    pub code: String,
    pub facets: Vec<RealFacet>,
}

pub struct FacetSegmenter {
    keys: Vec<String>,
    drop_unresolved: bool,
}

impl FacetSegmenter {
    /// Keys are tried in the given order wherever several match at one offset.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            drop_unresolved: false,
        }
    }

    /// Strip characters no key contains before tiling, instead of leaving
    /// the whole field without key sets.
    pub fn with_drop_unresolved(mut self, drop_unresolved: bool) -> Self {
        self.drop_unresolved = drop_unresolved;
        self
    }

    /// Segment every code. An empty `layout` treats the whole code as one
    /// field. Logs a warning for characters no key can cover.
    pub fn segment<S: AsRef<str>>(
        &self,
        codes: &[S],
        layout: &[FieldConfig],
    ) -> Vec<SegmentedCode> {
        let _span = debug_span!("segment", code_count = codes.len()).entered();
        warn_unresolved(&self.unresolved_chars(codes));

        codes
            .iter()
            .map(|code| self.segment_code(code.as_ref(), layout))
            .collect()
    }

    /// Distinct characters, in first-seen order, that occur in no key.
    pub fn unresolved_chars<S: AsRef<str>>(&self, codes: &[S]) -> Vec<char> {
        let mut unresolved: Vec<char> = Vec::new();
        for c in codes.iter().flat_map(|code| code.as_ref().chars()) {
            if !unresolved.contains(&c) && !self.is_resolvable(c) {
                unresolved.push(c);
            }
        }
        unresolved
    }

    fn is_resolvable(&self, c: char) -> bool {
        self.keys.iter().any(|key| key.contains(c))
    }

    fn segment_code(&self, code: &str, layout: &[FieldConfig]) -> SegmentedCode {
        let code_keys: Vec<&str> = self.keys_within(code);
        let facets = split_fields(code, layout)
            .into_iter()
            .map(|(config, value)| {
                let tiled = if self.drop_unresolved {
                    value.chars().filter(|&c| self.is_resolvable(c)).collect()
                } else {
                    value.clone()
                };
                let field_keys: Vec<&str> = code_keys
                    .iter()
                    .copied()
                    .filter(|key| tiled.contains(key))
                    .collect();
                let mut key_sets = tile(&tiled, &field_keys);
                rank(&mut key_sets);
                RealFacet {
                    config,
                    value,
                    key_sets,
                }
            })
            .collect::<Vec<_>>();

        debug!(
            code,
            key_sets = facets.iter().map(|f| f.key_sets.len()).sum::<usize>()
        );
        SegmentedCode {
            code: code.to_string(),
            facets,
        }
    }

    fn keys_within(&self, s: &str) -> Vec<&str> {
        self.keys
            .iter()
            .map(String::as_str)
            .filter(|key| !key.is_empty() && s.contains(key))
            .collect()
    }
}

/// Cut `code` into consecutive fields by character count. Fields past the
/// end of a short code come out empty; characters past the last field are
/// ignored.
fn split_fields(code: &str, layout: &[FieldConfig]) -> Vec<(FieldConfig, String)> {
    if layout.is_empty() {
        let whole = FieldConfig {
            id: String::new(),
            length: code.chars().count(),
        };
        return vec![(whole, code.to_string())];
    }

    let mut rest = code.chars();
    layout
        .iter()
        .map(|config| {
            let value: String = rest.by_ref().take(config.length).collect();
            (config.clone(), value)
        })
        .collect()
}

fn warn_unresolved(chars: &[char]) {
    if chars.is_empty() {
        return;
    }
    warn!("The following characters are not found in any dictionary key:");
    for &c in chars {
        warn!("  {c} [{}]", code_point_hex(c));
    }
}
