use std::path::Path;

use anyhow::{bail, Context};
use serde::Deserialize;

/// Similarity a platform name must exceed before it is accepted as a match.
pub const DEFAULT_PLATFORM_SIMILARITY: f64 = 0.65;

/// Number of description words written per `+` line.
pub const DEFAULT_DESCRIPTION_WORDS_PER_LINE: usize = 8;

/// Tunables shared by the batch reader and writer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub platform_similarity_threshold: f64,
    pub description_words_per_line: usize,
    /// Writer emits the tier, attribution and user directives.
    pub dev_fields: bool,
    /// Writer emits raw catalog ids instead of names.
    pub no_catalog: bool,
    /// Extra `##` comment placed under the writer's header line.
    pub header_comment: Option<String>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            platform_similarity_threshold: DEFAULT_PLATFORM_SIMILARITY,
            description_words_per_line: DEFAULT_DESCRIPTION_WORDS_PER_LINE,
            dev_fields: false,
            no_catalog: false,
            header_comment: None,
        }
    }
}

impl BatchConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..1.0).contains(&self.platform_similarity_threshold) {
            bail!(
                "platform_similarity_threshold must be in [0, 1), got {}",
                self.platform_similarity_threshold
            );
        }
        if self.description_words_per_line == 0 {
            bail!("description_words_per_line must be positive");
        }
        Ok(())
    }
}
