use log::debug;

use crate::error::Result;

use super::{
    AttributionId, Bijection, CatalogService, GeneTypeEntry, GeneTypeId, PlatformId,
    PublicationId, SpeciesId,
};

const VARIANT_GENE_TYPE: &str = "variant";

/// Immutable copy of the catalog tables for one reader or writer session.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub species: Bijection<SpeciesId>,
    pub gene_types: Bijection<GeneTypeId>,
    pub platforms: Bijection<PlatformId>,
    pub attributions: Bijection<AttributionId>,
    pub publications: Bijection<PublicationId>,
    variant_gene_type: Option<GeneTypeId>,
}

impl Default for CatalogSnapshot {
    fn default() -> Self {
        Self {
            species: Bijection::new("species"),
            gene_types: Bijection::new("gene type"),
            platforms: Bijection::new("platform"),
            attributions: Bijection::new("attribution"),
            publications: Bijection::new("publication"),
            variant_gene_type: None,
        }
    }
}

impl CatalogSnapshot {
    pub fn load<C: CatalogService + ?Sized>(service: &C) -> Result<Self> {
        let snapshot = Self::from_tables(
            service.species()?,
            service.gene_types()?,
            service.platforms()?,
            service.attributions()?,
            service.publications()?,
        )?;
        debug!(
            "catalog snapshot: {} species, {} gene types, {} platforms, {} attributions",
            snapshot.species.len(),
            snapshot.gene_types.len(),
            snapshot.platforms.len(),
            snapshot.attributions.len()
        );
        Ok(snapshot)
    }

    pub fn from_tables(
        species: Vec<(String, SpeciesId)>,
        gene_types: Vec<GeneTypeEntry>,
        platforms: Vec<(String, PlatformId)>,
        attributions: Vec<(String, AttributionId)>,
        publications: Vec<(String, PublicationId)>,
    ) -> Result<Self> {
        let mut gene_type_map = Bijection::new("gene type");
        let mut variant_gene_type = None;
        for entry in &gene_types {
            gene_type_map.insert(entry.name.as_str(), entry.id)?;
            if entry.name.to_lowercase() == VARIANT_GENE_TYPE {
                variant_gene_type = Some(entry.id);
            }
        }
        for entry in &gene_types {
            if let Some(short_name) = entry.short_name.as_deref().filter(|s| !s.is_empty()) {
                gene_type_map.insert_alias(short_name, entry.id)?;
            }
        }

        let attributions = attributions
            .into_iter()
            .filter(|(abbrev, _)| !abbrev.trim().is_empty());

        Ok(Self {
            species: Bijection::from_pairs("species", species)?,
            gene_types: gene_type_map,
            platforms: Bijection::from_pairs("platform", platforms)?,
            attributions: Bijection::from_pairs("attribution", attributions)?,
            publications: Bijection::from_pairs("publication", publications)?,
            variant_gene_type,
        })
    }

    /// Id of the gene type whose references are variant (rs) ids.
    pub fn variant_gene_type(&self) -> Option<GeneTypeId> {
        self.variant_gene_type
    }
}
