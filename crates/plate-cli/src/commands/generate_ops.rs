use std::path::PathBuf;

use plate_core::combinator::{GenerationOptions, RuleSet};
use plate_core::generator::{CodeGenerator, SpaceLimits};
use plate_core::pattern::parse_pattern;
use plate_core::settings::Settings;
use tracing::info;

use crate::io::{export_lines, CliError};

/// Resolved `numgen` arguments. Flags left unset fall back to settings.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub pattern: String,
    pub definitions: Vec<String>,
    pub output: PathBuf,
    pub count: Option<usize>,
    pub shuffle: bool,
    pub seed: Option<u64>,
    pub no_filter: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    pub code_count: usize,
    pub limits: SpaceLimits,
}

pub fn generate(
    request: &GenerateRequest,
    settings: &Settings,
) -> Result<GenerateSummary, CliError> {
    let facets = parse_pattern(&request.pattern, &request.definitions)?;

    let rules = if request.no_filter {
        RuleSet::unfiltered()
    } else {
        settings.rule_set()
    };
    let defaults = settings.generation_options(request.count);
    let options = GenerationOptions {
        shuffle: request.shuffle || defaults.shuffle,
        seed: request.seed.or(defaults.seed),
        ..defaults
    };

    let generator = CodeGenerator::new(rules);
    let limits = generator.limits(&facets);
    info!(
        combinations = limits.combinations,
        representative = limits.representative,
        "generation space"
    );

    let codes = generator.generate(&facets, &options);
    export_lines(&request.output, &codes)?;

    Ok(GenerateSummary {
        code_count: codes.len(),
        limits,
    })
}
