use crate::catalog::{PublicationId, SpeciesId};

use super::{GeneType, Threshold};

/// One `reference<TAB>score` row of a gene set.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuePair {
    pub reference: String,
    pub score: f64,
}

impl ValuePair {
    pub fn new(reference: &str, score: f64) -> Self {
        Self {
            reference: reference.to_string(),
            score,
        }
    }
}

/// A gene set while its batch file section is being read.
///
/// `species`, `gene_type`, `threshold`, `genome_build`, `pmid`, `groups` and
/// the dev-only fields carry over to the next gene set of the file; the
/// remaining fields are cleared by [`DraftRecord::reset`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftRecord {
    pub name: String,
    pub description: String,
    pub abbreviation: String,
    pub species: Option<SpeciesId>,
    pub gene_type: Option<GeneType>,
    pub threshold: Option<Threshold>,
    pub values: Vec<ValuePair>,
    /// Ontology term references as written after `~`.
    pub annotations: Vec<String>,
    pub genome_build: Option<String>,
    pub pmid: Option<String>,
    pub publication_id: Option<PublicationId>,
    pub uri: Option<String>,
    /// Access groups; `0` is public, `-1` private.
    pub groups: Vec<i64>,
    pub tier: Option<i64>,
    /// Attribution abbreviation.
    pub attribution: Option<String>,
    pub user_id: Option<i64>,
}

impl DraftRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// A draft is complete once it holds at least one value row.
    pub fn is_complete(&self) -> bool {
        !self.values.is_empty()
    }

    pub fn has_required_fields(&self) -> bool {
        !self.name.is_empty()
            && !self.description.is_empty()
            && !self.abbreviation.is_empty()
            && self.gene_type.is_some()
            && self.threshold.is_some()
            && self.species.is_some()
    }

    /// Clears the per-gene-set fields and keeps the carried-over ones.
    pub fn reset(&mut self) {
        self.name.clear();
        self.description.clear();
        self.abbreviation.clear();
        self.values.clear();
        self.annotations.clear();
        self.uri = None;
    }

    /// Abbreviation, or the name when no abbreviation was given.
    pub fn label(&self) -> &str {
        if self.abbreviation.is_empty() {
            &self.name
        } else {
            &self.abbreviation
        }
    }
}
