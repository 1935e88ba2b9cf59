use std::collections::HashMap;

use crate::catalog::{GeneId, SpeciesId};
use crate::record::GeneType;

/// Scope of one set of reference lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub species: SpeciesId,
    pub gene_type: GeneType,
    /// Only set for variant references, whose ids depend on the build.
    pub genome_build: Option<String>,
}

impl CacheKey {
    pub fn new(species: SpeciesId, gene_type: GeneType) -> Self {
        Self {
            species,
            gene_type,
            genome_build: None,
        }
    }

    pub fn with_build(species: SpeciesId, gene_type: GeneType, genome_build: &str) -> Self {
        Self {
            species,
            gene_type,
            genome_build: Some(genome_build.to_string()),
        }
    }
}

/// Reference -> gene ids lookups already made during one session.
///
/// Misses are stored as empty gene lists so they are not asked for again.
/// Nothing is ever evicted.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: HashMap<CacheKey, HashMap<String, Vec<GeneId>>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` when the reference was never looked up in this scope.
    pub fn get(&self, key: &CacheKey, reference: &str) -> Option<&[GeneId]> {
        self.entries.get(key)?.get(reference).map(Vec::as_slice)
    }

    /// References from `references` that still need a lookup, without repeats.
    pub fn missing<'r>(
        &self,
        key: &CacheKey,
        references: impl IntoIterator<Item = &'r str>,
    ) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();
        for reference in references {
            if self.get(key, reference).is_none() && !missing.iter().any(|m| m == reference) {
                missing.push(reference.to_string());
            }
        }
        missing
    }

    pub fn insert(&mut self, key: &CacheKey, reference: String, genes: Vec<GeneId>) {
        self.entries
            .entry(key.clone())
            .or_default()
            .insert(reference, genes);
    }

    /// Number of cached references in a scope.
    pub fn len(&self, key: &CacheKey) -> usize {
        self.entries.get(key).map_or(0, HashMap::len)
    }
}
