use crate::catalog::{AttributionId, GeneId, OntologyId, PublicationId};

use super::DraftRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedValue {
    pub reference: String,
    pub gene_id: GeneId,
    pub score: f64,
}

impl ResolvedValue {
    pub fn new(reference: &str, gene_id: GeneId, score: f64) -> Self {
        Self {
            reference: reference.to_string(),
            gene_id,
            score,
        }
    }
}

/// A parsed gene set whose references were mapped to gene ids.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRecord {
    pub draft: DraftRecord,
    pub values: Vec<ResolvedValue>,
    pub ontology_ids: Vec<OntologyId>,
    pub attribution_id: Option<AttributionId>,
    pub publication_id: Option<PublicationId>,
}

impl ResolvedRecord {
    pub fn new(draft: DraftRecord) -> Self {
        let publication_id = draft.publication_id;
        Self {
            draft,
            values: Vec::new(),
            ontology_ids: Vec::new(),
            attribution_id: None,
            publication_id,
        }
    }

    pub fn gene_count(&self) -> usize {
        self.values.len()
    }

    /// Only records with at least one resolved gene may be stored.
    pub fn is_usable(&self) -> bool {
        self.gene_count() > 0
    }
}
