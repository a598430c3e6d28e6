//! Post-run statistics: which dictionary keys were used and how much of each
//! key's option list made it into the renderings.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::dict::VoiceoverDictionary;
use crate::render::Voiceover;
use crate::segmenter::KeySet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyUtilization {
    pub key: String,
    pub used_options: usize,
    pub total_options: usize,
}

impl KeyUtilization {
    pub fn is_full(&self) -> bool {
        self.used_options >= self.total_options
    }

    /// Floored percentage.
    pub fn percent(&self) -> usize {
        if self.total_options == 0 {
            return 100;
        }
        self.used_options * 100 / self.total_options
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    /// Distinct keys, in first-use order.
    pub used_keys: Vec<String>,
    /// One entry per used key, in dictionary order.
    pub utilization: Vec<KeyUtilization>,
}

impl Statistics {
    pub fn compute(
        voiceovers: &[Voiceover],
        used_key_sets: &[KeySet],
        dictionary: &VoiceoverDictionary,
    ) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let used_keys: Vec<String> = used_key_sets
            .iter()
            .flatten()
            .filter(|key| seen.insert(key.as_str()))
            .cloned()
            .collect();

        let renderings: Vec<&str> = voiceovers
            .iter()
            .flat_map(|v| v.options.iter().map(String::as_str))
            .collect();

        let utilization = dictionary
            .iter()
            .filter(|(key, _)| seen.contains(key))
            .map(|(key, options)| KeyUtilization {
                key: key.to_string(),
                used_options: options
                    .iter()
                    .filter(|option| renderings.iter().any(|r| mentions(r, option)))
                    .count(),
                total_options: options.len(),
            })
            .collect();

        Self {
            used_keys,
            utilization,
        }
    }

    /// Keys with at least one option that no rendering used.
    pub fn underused(&self) -> impl Iterator<Item = &KeyUtilization> {
        self.utilization.iter().filter(|u| !u.is_full())
    }
}

/// `option` occurs in `rendering` as the whole text, or followed or preceded
/// by a space.
fn mentions(rendering: &str, option: &str) -> bool {
    rendering == option
        || rendering.contains(&format!(" {option}"))
        || rendering.contains(&format!("{option} "))
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Used keys:")?;
        writeln!(f, "{}", self.used_keys.join(", "))?;
        writeln!(f, "Keys utilization:")?;

        let mut underused = self.underused().peekable();
        if underused.peek().is_none() {
            return writeln!(f, "All keys are fully utilized.");
        }
        for u in underused {
            writeln!(f, "  {}: {:>2}%", u.key, u.percent())?;
        }
        writeln!(f, "Other keys are fully utilized.")
    }
}
