//! Exact tilings of a string by overlapping, variable-length keys.

use std::cmp::Ordering;

use super::KeySet;

/// All ways to cover `value` end to end with keys from `keys`.
///
/// Works like a segmentation lattice: for every char offset, collect the keys
/// that start there (a key can start at several offsets), then walk from
/// offset 0, letting each chosen key jump to the offset right after it. Only
/// walks that land exactly on the end survive. Keys at one offset are tried in
/// `keys` order, so the output order is deterministic.
pub fn tile<'k>(value: &str, keys: &[&'k str]) -> Vec<KeySet> {
    let byte_offsets: Vec<usize> = value.char_indices().map(|(i, _)| i).collect();
    let char_count = byte_offsets.len();
    if char_count == 0 {
        return Vec::new();
    }

    // starts[p] = (key, key length in chars) for keys matching at char offset p
    let mut starts: Vec<Vec<(&'k str, usize)>> = vec![Vec::new(); char_count];
    for &key in keys {
        let key_chars = key.chars().count();
        if key_chars == 0 {
            continue;
        }
        for (pos, &byte) in byte_offsets.iter().enumerate() {
            if value[byte..].starts_with(key) {
                starts[pos].push((key, key_chars));
            }
        }
    }

    let mut tilings = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    walk(&starts, 0, &mut current, &mut tilings);
    tilings
}

fn walk<'k>(
    starts: &[Vec<(&'k str, usize)>],
    pos: usize,
    current: &mut Vec<&'k str>,
    out: &mut Vec<KeySet>,
) {
    if pos == starts.len() {
        out.push(current.iter().map(|k| k.to_string()).collect());
        return;
    }
    for &(key, len) in &starts[pos] {
        current.push(key);
        walk(starts, pos + len, current, out);
        current.pop();
    }
}

/// Longest-match-first ordering.
///
/// 1. Longest key in the set, descending.
/// 2. Number of keys, ascending.
/// 3. Index of the (first) longest key, ascending.
///
/// The sort is stable, so ties keep tiling order.
pub fn rank(key_sets: &mut [KeySet]) {
    key_sets.sort_by(compare_key_sets);
}

fn compare_key_sets(a: &KeySet, b: &KeySet) -> Ordering {
    let (a_len, a_pos) = longest_key(a);
    let (b_len, b_pos) = longest_key(b);
    b_len
        .cmp(&a_len)
        .then_with(|| a.len().cmp(&b.len()))
        .then_with(|| a_pos.cmp(&b_pos))
}

/// (length in chars, index) of the first longest key.
fn longest_key(key_set: &KeySet) -> (usize, usize) {
    key_set
        .iter()
        .enumerate()
        .map(|(i, key)| (key.chars().count(), i))
        .fold((0, 0), |best, (len, i)| if len > best.0 { (len, i) } else { best })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets(raw: &[&[&str]]) -> Vec<KeySet> {
        raw.iter()
            .map(|set| set.iter().map(|k| k.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_tile_overlapping_keys() {
        let tilings = tile("177", &["1", "7", "17", "77", "177"]);
        assert_eq!(
            tilings,
            sets(&[&["1", "7", "7"], &["1", "77"], &["17", "7"], &["177"]])
        );
    }

    #[test]
    fn test_tile_requires_full_cover() {
        assert!(tile("A0", &["0"]).is_empty());
        assert!(tile("", &["0"]).is_empty());
    }

    #[test]
    fn test_tile_multibyte() {
        let tilings = tile("ВВ", &["В", "ВВ"]);
        assert_eq!(tilings, sets(&[&["В", "В"], &["ВВ"]]));
    }

    #[test]
    fn test_rank_longest_first() {
        let mut tilings = tile("177", &["1", "7", "17", "77", "177"]);
        rank(&mut tilings);
        assert_eq!(
            tilings,
            sets(&[&["177"], &["17", "7"], &["1", "77"], &["1", "7", "7"]])
        );
    }

    #[test]
    fn test_rank_prefers_fewer_keys() {
        let mut tilings = sets(&[&["М", "2", "51"], &["М", "25", "1"], &["М", "251"]]);
        rank(&mut tilings);
        assert_eq!(tilings[0], vec!["М", "251"]);
        assert_eq!(tilings[1], vec!["М", "25", "1"]);
        assert_eq!(tilings[2], vec!["М", "2", "51"]);
    }
}
