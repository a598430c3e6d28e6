//! Diversity-preserving voiceover rendering.
//!
//! Each code is rendered several times. Every rendering picks, per field, the
//! best-ranked key set whose keys all still have unconsumed options, so that
//! successive renderings of one code (and of codes sharing keys) rotate
//! through the dictionary instead of repeating its first options.
//!
//! Option pools are shared across one renderer's lifetime. In the default
//! mode every key used by a rendering contributes its current head option and
//! is advanced once afterwards, so a repeated key reads the same phrase within
//! one rendering. Quirk mode advances the pool on every occurrence instead.

mod pool;
#[cfg(test)]
mod tests;

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::dict::VoiceoverDictionary;
use crate::segmenter::{KeySet, RealFacet, SegmentedCode};
use pool::OptionPools;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("key '{0}' is not in the dictionary")]
    UnknownKey(String),

    #[error("key '{0}' has no options in the dictionary")]
    NoOptions(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Renderings per code; `None` renders until the first duplicate.
    pub count_per_number: Option<usize>,
    pub quirk: bool,
    pub separator: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            count_per_number: None,
            quirk: false,
            separator: " ".to_string(),
        }
    }
}

/// One rendering of the code `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Voiceover {
    pub name: String,
    pub options: Vec<String>,
}

impl Voiceover {
    pub fn new(name: impl Into<String>, option: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: vec![option.into()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOutcome {
    pub voiceovers: Vec<Voiceover>,
    /// Key sets that made it into a rendering, first use order.
    pub used_key_sets: Vec<KeySet>,
}

pub struct VoiceoverRenderer<'d> {
    pools: OptionPools<'d>,
    options: RenderOptions,
    used_key_sets: Vec<KeySet>,
    seen_key_sets: HashSet<KeySet>,
}

impl<'d> VoiceoverRenderer<'d> {
    pub fn new(dictionary: &'d VoiceoverDictionary, options: RenderOptions) -> Self {
        Self {
            pools: OptionPools::new(dictionary),
            options,
            used_key_sets: Vec::new(),
            seen_key_sets: HashSet::new(),
        }
    }

    /// Render every code in order against the shared option pools.
    pub fn render_all(&mut self, codes: &[SegmentedCode]) -> Result<RenderOutcome, RenderError> {
        let _span = debug_span!("render_all", code_count = codes.len()).entered();

        let mut voiceovers = Vec::new();
        for code in codes {
            voiceovers.extend(self.render(&code.facets, &code.code)?);
        }
        debug!(voiceover_count = voiceovers.len(), "rendered");

        self.seen_key_sets.clear();
        Ok(RenderOutcome {
            voiceovers,
            used_key_sets: std::mem::take(&mut self.used_key_sets),
        })
    }

    /// Render one code's fields up to `count_per_number` times. Stops early
    /// on the first rendering that repeats an earlier one, or that is empty.
    pub fn render(
        &mut self,
        facets: &[RealFacet],
        name: &str,
    ) -> Result<Vec<Voiceover>, RenderError> {
        let mut produced: HashSet<String> = HashSet::new();
        let mut voiceovers = Vec::new();

        while self
            .options
            .count_per_number
            .map_or(true, |count| voiceovers.len() < count)
        {
            let (rendered, key_sets) = self.render_once(facets)?;
            if rendered.is_empty() || !produced.insert(rendered.clone()) {
                break;
            }
            for key_set in key_sets {
                self.record_used(key_set);
            }
            voiceovers.push(Voiceover::new(name, rendered));
        }

        if voiceovers.is_empty() {
            debug!(name, "no voiceover rendered");
        }
        Ok(voiceovers)
    }

    fn render_once<'f>(
        &mut self,
        facets: &'f [RealFacet],
    ) -> Result<(String, Vec<&'f KeySet>), RenderError> {
        let mut pieces: Vec<String> = Vec::new();
        let mut chosen: Vec<&KeySet> = Vec::new();
        let mut to_shift: Vec<&str> = Vec::new();

        for facet in facets {
            let Some(key_set) = self.select_key_set(&facet.key_sets)? else {
                continue;
            };
            for key in key_set {
                if self.options.quirk {
                    pieces.push(self.pools.pop(key)?);
                } else {
                    pieces.push(self.pools.head(key)?);
                    if !to_shift.contains(&key.as_str()) {
                        to_shift.push(key);
                    }
                }
            }
            chosen.push(key_set);
        }

        for key in to_shift {
            self.pools.shift(key);
        }
        Ok((pieces.join(self.options.separator.as_str()), chosen))
    }

    /// First key set whose keys all have options left; otherwise the top
    /// ranked one with its exhausted pools refilled. `None` for a field
    /// without key sets.
    fn select_key_set<'f>(
        &mut self,
        key_sets: &'f [KeySet],
    ) -> Result<Option<&'f KeySet>, RenderError> {
        for key_set in key_sets {
            if self.all_available(key_set)? {
                return Ok(Some(key_set));
            }
        }

        let Some(top) = key_sets.first() else {
            return Ok(None);
        };
        for key in top {
            self.pools.replenish_if_empty(key)?;
        }
        Ok(Some(top))
    }

    fn all_available(&self, key_set: &KeySet) -> Result<bool, RenderError> {
        for key in key_set {
            if !self.pools.is_available(key)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn record_used(&mut self, key_set: &KeySet) {
        if self.seen_key_sets.insert(key_set.clone()) {
            self.used_key_sets.push(key_set.clone());
        }
    }
}
