//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`
//!
//! The engines never read the singleton; callers turn the sections into
//! `RuleSet`, `GenerationOptions` and `RenderOptions` and pass those in.

use std::sync::OnceLock;

use serde::Deserialize;

use crate::combinator::{GenerationOptions, RangeRule, RuleSet};
use crate::render::RenderOptions;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub rules: RuleSettings,
    pub generation: GenerationSettings,
    pub segmentation: SegmentationSettings,
    pub render: RenderSettings,
    pub output: OutputSettings,
}

impl Settings {
    pub fn rule_set(&self) -> RuleSet {
        if self.rules.filter_digits {
            RuleSet::new(self.rules.ranges.clone())
        } else {
            RuleSet::unfiltered()
        }
    }

    pub fn generation_options(&self, requested_count: Option<usize>) -> GenerationOptions {
        GenerationOptions {
            requested_count,
            shuffle: self.generation.shuffle,
            seed: self.generation.seed,
        }
    }

    pub fn render_options(&self, count_per_number: Option<usize>) -> RenderOptions {
        RenderOptions {
            count_per_number,
            quirk: self.render.quirk,
            separator: self.render.separator.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuleSettings {
    pub filter_digits: bool,
    #[serde(default)]
    pub ranges: Vec<RangeRule>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationSettings {
    pub shuffle: bool,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SegmentationSettings {
    pub drop_unresolved: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderSettings {
    pub separator: String,
    pub quirk: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    pub numbers: String,
    pub voiceovers: String,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_non_empty {
        ($section:ident . $field:ident) => {
            if s.$section.$field.is_empty() {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        };
    }

    for (i, rule) in s.rules.ranges.iter().enumerate() {
        if rule.min() > rule.max() {
            return Err(SettingsError::InvalidValue {
                field: format!("rules.ranges[{i}]"),
                reason: format!("min {} is greater than max {}", rule.min(), rule.max()),
            });
        }
    }

    check_non_empty!(render.separator);
    check_non_empty!(output.numbers);
    check_non_empty!(output.voiceovers);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::RangeKind;

    const CUSTOM: &str = r#"
[rules]
filter_digits = true
ranges = [{ range = [0, 9], kind = "exact" }]

[generation]
shuffle = true
seed = 7

[segmentation]
drop_unresolved = true

[render]
separator = "_"
quirk = true

[output]
numbers = "out/n.txt"
voiceovers = "out/v.csv"
"#;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert!(s.rules.filter_digits);
        assert_eq!(
            s.rules.ranges,
            vec![RangeRule::exact(0, 0), RangeRule::suffix_include(10, 19)]
        );
        assert_eq!(s.rule_set(), RuleSet::standard());
        assert!(!s.generation.shuffle);
        assert_eq!(s.generation.seed, None);
        assert!(!s.segmentation.drop_unresolved);
        assert_eq!(s.render.separator, " ");
        assert!(!s.render.quirk);
        assert_eq!(s.output.numbers, "./output/numbers.txt");
        assert_eq!(s.output.voiceovers, "./output/voiceovers.csv");
    }

    #[test]
    fn parse_valid_custom_toml() {
        let s = parse_settings_toml(CUSTOM).unwrap();
        assert_eq!(s.rules.ranges[0].kind, RangeKind::Exact);
        assert_eq!(s.rules.ranges[0].range, [0, 9]);

        let options = s.generation_options(Some(5));
        assert_eq!(options.requested_count, Some(5));
        assert!(options.shuffle);
        assert_eq!(options.seed, Some(7));

        let render = s.render_options(None);
        assert_eq!(render.separator, "_");
        assert!(render.quirk);
    }

    #[test]
    fn filter_digits_off_gives_unfiltered_rules() {
        let toml = CUSTOM.replace("filter_digits = true", "filter_digits = false");
        let s = parse_settings_toml(&toml).unwrap();
        assert!(!s.rule_set().filters_digits());
    }

    #[test]
    fn error_inverted_range() {
        let toml = CUSTOM.replace("[0, 9]", "[9, 0]");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(err.to_string().contains("rules.ranges[0]"));
    }

    #[test]
    fn error_empty_separator() {
        let toml = CUSTOM.replace(r#"separator = "_""#, r#"separator = """#);
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("render.separator"));
    }

    #[test]
    fn error_unknown_range_kind() {
        let toml = CUSTOM.replace(r#"kind = "exact""#, r#"kind = "prefix""#);
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let toml = CUSTOM.replace("[segmentation]\ndrop_unresolved = true\n", "");
        assert!(parse_settings_toml(&toml).is_err());
    }
}
