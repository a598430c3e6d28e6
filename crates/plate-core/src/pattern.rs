//! Parsers for the two pattern dialects.
//!
//! The generation dialect resolves `[L, D, D, S, R]` against definitions such
//! as `L=[А,В,Е]` or `D=[0-9]` into facets. The layout dialect describes how a
//! generated code splits into named sub-fields for voiceover rendering.

use std::collections::HashMap;

use crate::facet::{Facet, FacetValue};
use crate::segmenter::FieldConfig;
use crate::text::split_list;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("can not find a definition for: '{0}'")]
    UnresolvedDefinition(String),

    #[error("invalid definition (expected NAME=[values]): {0}")]
    InvalidDefinition(String),

    #[error("definition '{0}' has no values")]
    EmptyFacet(String),

    #[error("invalid range {start}-{end} in definition '{name}'")]
    InvalidRange {
        name: String,
        start: char,
        end: char,
    },
}

/// Resolve a position pattern against its definitions.
///
/// Fails on the first position without a definition, before anything else is
/// generated.
pub fn parse_pattern<S: AsRef<str>>(
    pattern: &str,
    definitions: &[S],
) -> Result<Vec<Facet>, PatternError> {
    let mut by_name: HashMap<String, Facet> = HashMap::new();
    for def in definitions {
        let (name, facet) = parse_definition(def.as_ref())?;
        by_name.insert(name, facet);
    }

    parse_ids(pattern)
        .into_iter()
        .map(|id| {
            by_name
                .get(&id)
                .cloned()
                .ok_or(PatternError::UnresolvedDefinition(id))
        })
        .collect()
}

/// Parse a field layout: runs of adjacent equal identifiers become one field
/// whose length is the run length.
pub fn parse_field_layout(pattern: &str) -> Vec<FieldConfig> {
    let mut fields: Vec<FieldConfig> = Vec::new();
    for id in parse_ids(pattern) {
        match fields.last_mut() {
            Some(last) if last.id == id => last.length += 1,
            _ => fields.push(FieldConfig { id, length: 1 }),
        }
    }
    fields
}

fn parse_ids(pattern: &str) -> Vec<String> {
    strip_brackets(pattern.trim())
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_brackets(s: &str) -> &str {
    let s = s.strip_prefix('[').unwrap_or(s);
    s.strip_suffix(']').unwrap_or(s)
}

fn parse_definition(def: &str) -> Result<(String, Facet), PatternError> {
    let (name, body) = def
        .split_once('=')
        .ok_or_else(|| PatternError::InvalidDefinition(def.to_string()))?;
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(PatternError::InvalidDefinition(def.to_string()));
    }

    let mut values: Vec<FacetValue> = Vec::new();
    for item in split_list(strip_brackets(body.trim())) {
        if item.is_empty() {
            continue;
        }
        match single_char_range(item) {
            Some((start, end)) if start > end => {
                return Err(PatternError::InvalidRange { name, start, end });
            }
            Some((start, end)) => values.extend((start..=end).map(String::from)),
            None => values.push(item.to_string()),
        }
    }

    let facet = Facet::new(values).ok_or_else(|| PatternError::EmptyFacet(name.clone()))?;
    Ok((name, facet))
}

/// `a-z` with exactly one character on each side of the dash.
fn single_char_range(item: &str) -> Option<(char, char)> {
    let (start, end) = item.split_once('-')?;
    let mut s = start.chars();
    let mut e = end.chars();
    match (s.next(), s.next(), e.next(), e.next()) {
        (Some(start), None, Some(end), None) => Some((start, end)),
        _ => None,
    }
}
