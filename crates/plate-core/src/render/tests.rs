use crate::dict::VoiceoverDictionary;
use crate::pattern::parse_field_layout;
use crate::render::{RenderError, RenderOptions, VoiceoverRenderer};
use crate::segmenter::{FacetSegmenter, FieldConfig, RealFacet, SegmentedCode};

fn dict(entries: Vec<(&str, Vec<&str>)>) -> VoiceoverDictionary {
    entries.into_iter().collect()
}

fn segment(
    codes: &[&str],
    dict: &VoiceoverDictionary,
    layout: &[FieldConfig],
) -> Vec<SegmentedCode> {
    FacetSegmenter::new(dict.keys()).segment(codes, layout)
}

fn options(count: Option<usize>, quirk: bool) -> RenderOptions {
    RenderOptions {
        count_per_number: count,
        quirk,
        ..RenderOptions::default()
    }
}

/// (name, rendering) pairs for compact assertions.
fn render(
    codes: &[&str],
    dict: &VoiceoverDictionary,
    layout: &[FieldConfig],
    options: RenderOptions,
) -> Vec<(String, String)> {
    let segmented = segment(codes, dict, layout);
    VoiceoverRenderer::new(dict, options)
        .render_all(&segmented)
        .unwrap()
        .voiceovers
        .into_iter()
        .map(|v| (v.name, v.options.join(",")))
        .collect()
}

fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
    raw.iter()
        .map(|(n, r)| (n.to_string(), r.to_string()))
        .collect()
}

fn mixed_dict() -> VoiceoverDictionary {
    dict(vec![
        ("М", vec!["м", "мы", "мэ", "эм", "Марина"]),
        ("Н", vec!["эн", "нэ"]),
        ("0", vec!["нуль", "ноль"]),
        ("1", vec!["один"]),
        ("2", vec!["два"]),
    ])
}

#[test]
fn test_renders_until_duplicate() {
    let dict = dict(vec![
        ("0", vec!["нуль", "ноль"]),
        ("7", vec!["семь", "семёрка"]),
        ("8", vec!["восемь", "восьмёрка"]),
    ]);
    let rendered = render(&["078"], &dict, &[], options(None, false));
    assert_eq!(
        rendered,
        pairs(&[
            ("078", "нуль семь восемь"),
            ("078", "ноль семёрка восьмёрка"),
        ])
    );
}

#[test]
fn test_repeated_key_reads_one_option() {
    let dict = dict(vec![("0", vec!["нуль", "ноль"]), ("78", vec!["семьдесят восемь"])]);
    let rendered = render(&["00078"], &dict, &[], options(None, false));
    assert_eq!(
        rendered,
        pairs(&[
            ("00078", "нуль нуль нуль семьдесят восемь"),
            ("00078", "ноль ноль ноль семьдесят восемь"),
        ])
    );
}

#[test]
fn test_quirk_advances_per_occurrence() {
    let dict = dict(vec![("0", vec!["нуль", "ноль"]), ("78", vec!["семьдесят восемь"])]);
    let rendered = render(&["00078"], &dict, &[], options(None, true));
    assert_eq!(
        rendered,
        pairs(&[
            ("00078", "нуль ноль нуль семьдесят восемь"),
            ("00078", "ноль нуль ноль семьдесят восемь"),
        ])
    );
}

#[test]
fn test_pools_shared_across_codes() {
    let rendered = render(&["М01", "Н02"], &mixed_dict(), &[], options(Some(3), false));
    assert_eq!(
        rendered,
        pairs(&[
            ("М01", "м нуль один"),
            ("М01", "мы ноль один"),
            ("М01", "мэ нуль один"),
            ("Н02", "эн ноль два"),
            ("Н02", "нэ нуль два"),
        ])
    );
}

#[test]
fn test_count_capped_by_unique_space() {
    let rendered = render(&["М01"], &mixed_dict(), &[], options(Some(20), false));
    let expected: Vec<String> = [
        "м нуль", "мы ноль", "мэ нуль", "эм ноль", "Марина нуль",
        "м ноль", "мы нуль", "мэ ноль", "эм нуль", "Марина ноль",
    ]
    .iter()
    .map(|prefix| format!("{prefix} один"))
    .collect();
    let got: Vec<String> = rendered.into_iter().map(|(_, r)| r).collect();
    assert_eq!(got, expected);
}

#[test]
fn test_prefers_key_sets_with_options_left() {
    let dict = dict(vec![
        ("Н", vec!["эн", "нэ"]),
        ("М", vec!["м", "мы", "мэ", "эм", "Марина"]),
        ("0", vec!["нуль", "ноль", "зеро"]),
        ("00", vec!["два ноля", "дубль ноль", "дуплет нулей"]),
    ]);
    let rendered = render(&["Н00", "М00"], &dict, &[], options(Some(3), false));
    assert_eq!(
        rendered,
        pairs(&[
            ("Н00", "эн два ноля"),
            ("Н00", "нэ дубль ноль"),
            ("Н00", "эн дуплет нулей"),
            ("М00", "м нуль нуль"),
            ("М00", "мы ноль ноль"),
            ("М00", "мэ зеро зеро"),
        ])
    );
}

#[test]
fn test_renders_layout_fields() {
    let dict = dict(vec![
        ("А", vec!["а", "Александр"]),
        ("В", vec!["вэ", "в"]),
        ("ВВ", vec!["дубль вэ"]),
        ("0", vec!["ноль"]),
        ("00", vec!["два ноля"]),
        ("2", vec!["два"]),
        ("7", vec!["семь"]),
        ("8", vec!["восемь"]),
        ("78", vec!["семьдесят восемь"]),
        (" ", vec!["регион"]),
    ]);
    let layout = parse_field_layout("[L1, D, D, D, L2, L2, S, R, R]");
    let rendered = render(&["А002ВВ 78"], &dict, &layout, options(Some(3), false));
    let got: Vec<String> = rendered.into_iter().map(|(_, r)| r).collect();
    assert_eq!(
        got,
        vec![
            "а два ноля два дубль вэ регион семьдесят восемь",
            "Александр два ноля два вэ вэ регион семь восемь",
            "а два ноля два в в регион семьдесят восемь",
        ]
    );
}

#[test]
fn test_custom_separator() {
    let dict = dict(vec![("1", vec!["один"]), ("2", vec!["два"])]);
    let opts = RenderOptions {
        separator: "-".to_string(),
        ..RenderOptions::default()
    };
    let rendered = render(&["12"], &dict, &[], opts);
    assert_eq!(rendered, pairs(&[("12", "один-два")]));
}

#[test]
fn test_unresolvable_code_renders_nothing() {
    let dict = dict(vec![("1", vec!["один"])]);
    let rendered = render(&["1Х"], &dict, &[], options(Some(3), false));
    assert!(rendered.is_empty());
}

#[test]
fn test_unknown_key_is_error() {
    let dict = dict(vec![("1", vec!["один"])]);
    let facets = vec![RealFacet {
        config: FieldConfig {
            id: "D".into(),
            length: 2,
        },
        value: "12".into(),
        key_sets: vec![vec!["1".into(), "2".into()]],
    }];
    let mut renderer = VoiceoverRenderer::new(&dict, RenderOptions::default());
    assert_eq!(
        renderer.render(&facets, "12"),
        Err(RenderError::UnknownKey("2".into()))
    );
}

#[test]
fn test_used_key_sets_first_use_order() {
    let segmented = segment(&["М01", "Н02", "М01"], &mixed_dict(), &[]);
    let outcome = VoiceoverRenderer::new(&mixed_dict(), options(Some(2), false))
        .render_all(&segmented)
        .unwrap();
    assert_eq!(outcome.voiceovers.len(), 6);
    assert_eq!(
        outcome.used_key_sets,
        vec![vec!["М", "0", "1"], vec!["Н", "0", "2"]]
    );
}

#[test]
fn test_master_dictionary_untouched() {
    let dict = mixed_dict();
    let segmented = segment(&["М01"], &dict, &[]);
    VoiceoverRenderer::new(&dict, options(Some(20), true))
        .render_all(&segmented)
        .unwrap();
    assert_eq!(dict, mixed_dict());
}
