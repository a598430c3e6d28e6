//! Flat code generation on top of the combinator.

use tracing::{debug, debug_span};

use crate::combinator::{
    combinations_limit, generate_requested_count, higher_order_facets, mix_independently,
    representative_count, GenerationOptions, RuleSet,
};
use crate::facet::Facet;

/// Size of the filtered space for a facet list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpaceLimits {
    pub combinations: usize,
    pub representative: usize,
}

pub struct CodeGenerator {
    rules: RuleSet,
}

impl CodeGenerator {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Generate codes by joining each combination's values.
    pub fn generate(&self, facets: &[Facet], options: &GenerationOptions) -> Vec<String> {
        let _span = debug_span!("generate_codes", facet_count = facets.len()).entered();
        let groups = higher_order_facets(facets, &self.rules);
        let codes: Vec<String> = generate_requested_count(&groups, options)
            .into_iter()
            .map(|combination| combination.concat())
            .collect();
        debug!(code_count = codes.len());
        codes
    }

    /// The whole filtered space in sweep order, generated lazily.
    pub fn sweep(&self, facets: &[Facet]) -> impl Iterator<Item = String> {
        let groups = higher_order_facets(facets, &self.rules);
        let representative = representative_count(&groups);
        let offsets = if representative == 0 {
            0
        } else {
            combinations_limit(&groups) / representative
        };
        (0..offsets)
            .flat_map(move |offset| mix_independently(&groups, offset))
            .map(|combination| combination.concat())
    }

    pub fn limits(&self, facets: &[Facet]) -> SpaceLimits {
        let groups = higher_order_facets(facets, &self.rules);
        SpaceLimits {
            combinations: combinations_limit(&groups),
            representative: representative_count(&groups),
        }
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(RuleSet::standard())
    }
}
