use crate::catalog::CatalogSnapshot;
use crate::record::GeneType;

use super::PlatformMatcher;

const MICROARRAY: &str = "microarray";

/// Turns the text of a `%` directive into a signed gene type code.
pub struct GeneTypeClassifier<'a> {
    catalog: &'a CatalogSnapshot,
    matcher: PlatformMatcher,
}

impl<'a> GeneTypeClassifier<'a> {
    pub fn new(catalog: &'a CatalogSnapshot, matcher: PlatformMatcher) -> Self {
        Self { catalog, matcher }
    }

    /// `microarray <platform>` is matched against platform names only. Any
    /// other token is looked up as a gene type name first and, failing that,
    /// fuzzily as a platform name. The error is the message to report.
    pub fn classify(&self, token: &str) -> Result<GeneType, String> {
        let token = token.trim();

        if let Some(platform) = strip_microarray(token) {
            return self
                .match_platform(platform)
                .ok_or_else(|| format!("{} is an invalid platform", platform));
        }

        if let Some(gene_type) = self.catalog.gene_types.id(token).and_then(GeneType::canonical) {
            return Ok(gene_type);
        }

        self.match_platform(token)
            .ok_or_else(|| format!("{} is an invalid gene type", token.to_lowercase()))
    }

    fn match_platform(&self, name: &str) -> Option<GeneType> {
        self.matcher
            .best_match(&self.catalog.platforms, name)
            .and_then(|(id, _)| GeneType::platform(id))
    }
}

/// Text after the first `microarray` word, if the token has one.
fn strip_microarray(token: &str) -> Option<&str> {
    // ASCII lower-casing keeps byte offsets valid for slicing
    let start = token.to_ascii_lowercase().find(MICROARRAY)?;
    Some(token[start + MICROARRAY.len()..].trim())
}
