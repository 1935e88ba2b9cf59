use std::path::Path;

use log::{debug, warn};

use crate::catalog::{AttributionId, CatalogSnapshot, PublicationId, SpeciesId};
use crate::config::BatchConfig;
use crate::error::{Error, Result};
use crate::parser::{PRIVATE_GROUP, PRIVATE_TIER};
use crate::record::{GeneType, ResolvedRecord, Threshold, ThresholdType};
use crate::record::{DEFAULT_CORRELATION, DEFAULT_EFFECT, DEFAULT_SIGNIFICANCE};

const HEADER: &str = "## Machine generated BGF file";

/// Directive values written for the previous gene set. A directive is only
/// written again when its value changes, matching how the reader carries
/// header fields forward.
#[derive(Default)]
struct Emitted {
    threshold: Option<Threshold>,
    species: Option<SpeciesId>,
    gene_type: Option<GeneType>,
    genome_build: Option<String>,
    pmid: Option<String>,
    publication_id: Option<PublicationId>,
    annotations: Option<Vec<String>>,
    uri: Option<String>,
    access: bool,
    tier: Option<i64>,
    attribution_id: Option<AttributionId>,
    user_id: Option<i64>,
}

/// Serializes resolved gene sets into the batch format.
pub struct BatchWriter<'a> {
    catalog: &'a CatalogSnapshot,
    config: BatchConfig,
}

impl<'a> BatchWriter<'a> {
    pub fn new(catalog: &'a CatalogSnapshot, config: BatchConfig) -> Self {
        Self { catalog, config }
    }

    /// The batch text for `records`. Gene sets failing the completeness check
    /// are reported, and any reported problem rejects the whole output.
    pub fn serialize(&self, records: &[ResolvedRecord]) -> Result<String> {
        let mut lines: Vec<String> = vec![HEADER.to_string()];
        if let Some(comment) = &self.config.header_comment {
            lines.push(format!("## {}", comment));
        }
        lines.push("#".to_string());
        lines.push(String::new());

        let mut errors = Vec::new();
        let mut emitted = Emitted::default();
        for record in records {
            if !passes_sanity_check(record, &mut errors) {
                continue;
            }
            self.write_record(record, &mut emitted, &mut lines, &mut errors);
        }

        if !errors.is_empty() {
            warn!("refusing to write batch file: {} errors", errors.len());
            return Err(Error::Rejected { errors });
        }
        debug!("serialized {} gene sets into {} lines", records.len(), lines.len());

        let mut text = lines.join("\n");
        text.push('\n');
        Ok(text)
    }

    /// Writes the batch file only if serialization succeeded as a whole.
    pub fn write_path(&self, records: &[ResolvedRecord], path: &Path) -> Result<()> {
        let text = self.serialize(records)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    fn write_record(
        &self,
        record: &ResolvedRecord,
        emitted: &mut Emitted,
        lines: &mut Vec<String>,
        errors: &mut Vec<String>,
    ) {
        let draft = &record.draft;

        if let Some(threshold) = &draft.threshold {
            if emitted.threshold.as_ref() != Some(threshold) {
                lines.push(format_threshold(threshold));
                emitted.threshold = Some(threshold.clone());
            }
        }
        if let Some(species) = draft.species {
            if emitted.species != Some(species) {
                lines.extend(self.format_species(species, errors));
                emitted.species = Some(species);
            }
        }
        if let Some(gene_type) = draft.gene_type {
            if emitted.gene_type != Some(gene_type) {
                lines.extend(self.format_gene_type(gene_type, errors));
                emitted.gene_type = Some(gene_type);
            }
        }
        if let Some(build) = draft.genome_build.as_ref().filter(|b| !b.is_empty()) {
            if emitted.genome_build.as_ref() != Some(build) {
                lines.push(format!("$ {}", build));
                emitted.genome_build = Some(build.clone());
            }
        }
        if let Some(pmid) = draft.pmid.as_ref().filter(|p| !p.is_empty()) {
            if emitted.pmid.as_ref() != Some(pmid) {
                lines.push(format!("P {}", pmid));
                emitted.pmid = Some(pmid.clone());
            }
        } else if let Some(publication_id) = record.publication_id {
            if emitted.publication_id != Some(publication_id) {
                lines.extend(self.format_publication(publication_id));
                emitted.publication_id = Some(publication_id);
            }
        }
        if !draft.annotations.is_empty() && emitted.annotations.as_ref() != Some(&draft.annotations) {
            lines.extend(draft.annotations.iter().map(|a| format!("~ {}", a)));
            emitted.annotations = Some(draft.annotations.clone());
        }
        if let Some(uri) = draft.uri.as_ref().filter(|u| !u.is_empty()) {
            if emitted.uri.as_ref() != Some(uri) {
                lines.push(format!("> {}", uri));
                emitted.uri = Some(uri.clone());
            }
        }
        // written once per file, from the first gene set
        if !emitted.access {
            lines.push(format_access(&draft.groups, draft.tier));
            emitted.access = true;
        }

        if self.config.dev_fields {
            if let Some(tier) = draft.tier {
                if emitted.tier != Some(tier) {
                    lines.push(format!("T {}", tier));
                    emitted.tier = Some(tier);
                }
            }
            if let Some(attribution_id) = record.attribution_id {
                if emitted.attribution_id != Some(attribution_id) {
                    lines.extend(self.format_attribution(attribution_id, errors));
                    emitted.attribution_id = Some(attribution_id);
                }
            }
            if let Some(user_id) = draft.user_id {
                if emitted.user_id != Some(user_id) {
                    lines.push(format!("U {}", user_id));
                    emitted.user_id = Some(user_id);
                }
            }
        }

        lines.push(String::new());
        lines.push(format!(": {}", draft.abbreviation));
        lines.push(format!("= {}", draft.name));
        lines.extend(self.format_description(&draft.description));
        lines.push(String::new());
        lines.extend(record.values.iter().map(|v| format!("{}\t{}", v.reference, v.score)));
        lines.push(String::new());
    }

    fn format_species(&self, species: SpeciesId, errors: &mut Vec<String>) -> Option<String> {
        if self.config.no_catalog {
            return Some(format!("@ {}", species));
        }
        match self.catalog.species.name(species) {
            Some(name) => Some(format!("@ {}", name)),
            None => {
                errors.push(format!("Invalid species ID ({})", species));
                None
            }
        }
    }

    fn format_gene_type(&self, gene_type: GeneType, errors: &mut Vec<String>) -> Option<String> {
        if self.config.no_catalog {
            return Some(format!("% {}", gene_type.code()));
        }
        match gene_type {
            GeneType::Canonical(id) => match self.catalog.gene_types.name(id) {
                Some(name) => Some(format!("% {}", name)),
                None => {
                    errors.push(format!("Invalid gene type ({})", id));
                    None
                }
            },
            GeneType::Platform(id) => match self.catalog.platforms.name(id) {
                Some(name) => Some(format!("% microarray {}", name)),
                None => {
                    errors.push(format!("Invalid expression platform ({})", id));
                    None
                }
            },
        }
    }

    fn format_publication(&self, publication_id: PublicationId) -> Option<String> {
        if self.config.no_catalog {
            return None;
        }
        self.catalog
            .publications
            .name(publication_id)
            .map(|pmid| format!("P {}", pmid))
    }

    fn format_attribution(
        &self,
        attribution_id: AttributionId,
        errors: &mut Vec<String>,
    ) -> Option<String> {
        if self.config.no_catalog {
            return Some(format!("D {}", attribution_id));
        }
        match self.catalog.attributions.name(attribution_id) {
            Some(abbrev) => Some(format!("D {}", abbrev)),
            None => {
                errors.push(format!("Invalid attribution ID ({})", attribution_id));
                None
            }
        }
    }

    fn format_description(&self, description: &str) -> Vec<String> {
        let words: Vec<&str> = description.split_whitespace().collect();
        words
            .chunks(self.config.description_words_per_line.max(1))
            .map(|chunk| format!("+ {}", chunk.join(" ")))
            .collect()
    }
}

fn format_threshold(threshold: &Threshold) -> String {
    let value = threshold.value.trim();
    match threshold.kind {
        ThresholdType::PValue | ThresholdType::QValue => {
            let value = if value.is_empty() { DEFAULT_SIGNIFICANCE } else { value };
            format!("! {} < {}", threshold.kind, value)
        }
        ThresholdType::Binary => "! Binary".to_string(),
        ThresholdType::Correlation | ThresholdType::Effect => {
            let default = if threshold.kind == ThresholdType::Correlation {
                DEFAULT_CORRELATION
            } else {
                DEFAULT_EFFECT
            };
            let (lo, hi) = threshold
                .bounds()
                .or_else(|| default.split_once(','))
                .unwrap_or(("0", "1"));
            format!("! {} < {} < {}", lo, threshold.kind, hi)
        }
    }
}

fn format_access(groups: &[i64], tier: Option<i64>) -> String {
    if groups.contains(&PRIVATE_GROUP) || tier == Some(PRIVATE_TIER) {
        "A Private".to_string()
    } else {
        "A Public".to_string()
    }
}

/// Checks that the fields every gene set needs are present. Whether their
/// values map to catalog names is checked while formatting.
fn passes_sanity_check(record: &ResolvedRecord, errors: &mut Vec<String>) -> bool {
    let draft = &record.draft;
    let label = draft.label();
    let label = if label.is_empty() { "(unnamed)" } else { label };
    let missing: Vec<&str> = [
        ("name", draft.name.is_empty()),
        ("abbreviation", draft.abbreviation.is_empty()),
        ("description", draft.description.trim().is_empty()),
        ("species", draft.species.is_none()),
        ("threshold type", draft.threshold.is_none()),
        ("gene type", draft.gene_type.is_none()),
        ("resolved values", record.values.is_empty()),
    ]
    .into_iter()
    .filter_map(|(field, is_missing)| is_missing.then_some(field))
    .collect();

    for field in &missing {
        errors.push(format!("{} input gene set is missing {}", label, field));
    }
    missing.is_empty()
}
