use std::path::PathBuf;

use plate_core::pattern::parse_field_layout;
use plate_core::render::VoiceoverRenderer;
use plate_core::segmenter::FacetSegmenter;
use plate_core::settings::Settings;
use plate_core::stats::Statistics;
use tracing::info;

use crate::io::{export_voiceovers, read_codes, read_dictionary, CliError};

/// Resolved `voicegen` arguments.
#[derive(Debug, Clone)]
pub struct VoiceoverRequest {
    pub input: PathBuf,
    pub dictionary: PathBuf,
    /// Field layout such as `[L1, D, D, D, L2, L2, S, R, R]`. Without one
    /// every code is a single field.
    pub layout: Option<String>,
    pub output: PathBuf,
    pub count_per_number: Option<usize>,
    pub quirk: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VoiceoverSummary {
    pub code_count: usize,
    pub voiceover_count: usize,
    pub statistics: Statistics,
}

pub fn render_voiceovers(
    request: &VoiceoverRequest,
    settings: &Settings,
) -> Result<VoiceoverSummary, CliError> {
    let codes = read_codes(&request.input)?;
    let dictionary = read_dictionary(&request.dictionary)?;
    info!(codes = codes.len(), keys = dictionary.len(), "loaded inputs");

    let layout = request
        .layout
        .as_deref()
        .map(parse_field_layout)
        .unwrap_or_default();
    let segmented = FacetSegmenter::new(dictionary.keys())
        .with_drop_unresolved(settings.segmentation.drop_unresolved)
        .segment(&codes, &layout);

    let mut options = settings.render_options(request.count_per_number);
    options.quirk |= request.quirk;
    let outcome = VoiceoverRenderer::new(&dictionary, options).render_all(&segmented)?;

    export_voiceovers(&request.output, &outcome.voiceovers)?;

    Ok(VoiceoverSummary {
        code_count: codes.len(),
        voiceover_count: outcome.voiceovers.len(),
        statistics: Statistics::compute(
            &outcome.voiceovers,
            &outcome.used_key_sets,
            &dictionary,
        ),
    })
}
