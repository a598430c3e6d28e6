//! Voiceover dictionary: key → ordered phrase options.
//!
//! Text format, one entry per line:
//!
//! ```text
//! М;эм, мэ, Марина
//! 00;два нуля, дубль ноль
//!  ;регион
//! ```
//!
//! Key order and option order are both preserved; option order is the
//! preference order the renderer draws from.


use std::collections::HashMap;

use crate::text::{split_lines, trim_invisible};

const FIELD_SEPARATOR: char = ';';
const OPTION_SEPARATOR: char = ',';

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceoverDictionary {
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl VoiceoverDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the `key;opt1,opt2` text format.
    ///
    /// Keys lose only BOM / zero-width characters, so `" "` and `"М "` are
    /// valid keys. Lines with an empty key or no options are skipped.
    pub fn parse(text: &str) -> Self {
        let mut dict = Self::new();
        for line in split_lines(text) {
            let mut fields = line.split(FIELD_SEPARATOR);
            let key = trim_invisible(fields.next().unwrap_or_default());
            let options = parse_options(fields.next().unwrap_or_default());
            if key.is_empty() || options.is_empty() {
                continue;
            }
            dict.insert(key.to_string(), options);
        }
        dict
    }

    /// Insert or replace. A replaced key keeps its original position.
    pub fn insert(&mut self, key: String, options: Vec<String>) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = options,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, options));
            }
        }
    }

    pub fn options(&self, key: &str) -> Option<&[String]> {
        self.index.get(key).map(|&i| self.entries[i].1.as_slice())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, Vec<V>)> for VoiceoverDictionary
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Vec<V>)>>(iter: I) -> Self {
        let mut dict = Self::new();
        for (key, options) in iter {
            dict.insert(key.into(), options.into_iter().map(Into::into).collect());
        }
        dict
    }
}

fn parse_options(field: &str) -> Vec<String> {
    let field = trim_invisible(field.trim()).trim();
    if field.is_empty() {
        return Vec::new();
    }
    field
        .split(OPTION_SEPARATOR)
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .map(str::to_string)
        .collect()
}
