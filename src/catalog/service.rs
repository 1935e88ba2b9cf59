use std::collections::HashMap;

use ontolius::TermId;

use super::{AttributionId, GeneTypeId, OntologyId, PlatformId, PublicationId, SpeciesId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneTypeEntry {
    pub id: GeneTypeId,
    pub name: String,
    pub short_name: Option<String>,
}

impl GeneTypeEntry {
    pub fn new(id: GeneTypeId, name: &str, short_name: Option<&str>) -> Self {
        Self {
            id,
            name: name.to_string(),
            short_name: short_name.map(str::to_string),
        }
    }
}

/// Reference tables kept by the database that owns the gene sets.
///
/// The table getters are called once per session by
/// [`CatalogSnapshot::load`](super::CatalogSnapshot::load). Ontology terms are
/// looked up on demand during resolution.
pub trait CatalogService {
    fn species(&self) -> anyhow::Result<Vec<(String, SpeciesId)>>;

    fn gene_types(&self) -> anyhow::Result<Vec<GeneTypeEntry>>;

    fn platforms(&self) -> anyhow::Result<Vec<(String, PlatformId)>>;

    /// Attribution abbreviations; rows with an empty abbreviation are ignored.
    fn attributions(&self) -> anyhow::Result<Vec<(String, AttributionId)>>;

    /// PMID -> publication id.
    fn publications(&self) -> anyhow::Result<Vec<(String, PublicationId)>>;

    /// Internal ids for the given ontology terms. Unknown terms are absent
    /// from the returned map.
    fn ontology_ids(&self, terms: &[TermId]) -> anyhow::Result<HashMap<TermId, OntologyId>>;
}
