use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::debug;

use crate::catalog::{CatalogSnapshot, GeneId, GeneTypeId, PlatformId, ProbeId, SpeciesId};
use crate::error::Result;
use crate::parser::Diagnostics;
use crate::record::{DraftRecord, GeneType, ResolvedValue};

use super::{CacheKey, GeneIdentifierResolver, ResolutionCache};

pub const VARIANT_BUILD_REQUIRED: &str = "Variant gene sets require a genome build.";

/// Reference as reported back, its score and the genes it resolved to.
type Lookup = (String, f64, Vec<GeneId>);

/// Maps the references of draft gene sets to gene ids, going through the
/// session cache before asking the resolver.
pub struct GeneIdMapper<'a, R: ?Sized> {
    resolver: &'a R,
    catalog: &'a CatalogSnapshot,
    cache: ResolutionCache,
    /// Probe name -> probe id, loaded once per platform.
    probes: HashMap<PlatformId, HashMap<String, ProbeId>>,
}

impl<'a, R> GeneIdMapper<'a, R>
where
    R: GeneIdentifierResolver + ?Sized,
{
    pub fn new(resolver: &'a R, catalog: &'a CatalogSnapshot) -> Self {
        Self {
            resolver,
            catalog,
            cache: ResolutionCache::new(),
            probes: HashMap::new(),
        }
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// Resolved `(reference, gene id, score)` triples of one gene set.
    ///
    /// Unresolved references are dropped with a warning, and so is every
    /// reference whose gene was already claimed by an earlier row.
    pub fn map_record(
        &mut self,
        draft: &DraftRecord,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<ResolvedValue>> {
        let (species, gene_type) = match (draft.species, draft.gene_type) {
            (Some(species), Some(gene_type)) if draft.is_complete() => (species, gene_type),
            _ => return Ok(Vec::new()),
        };

        let lookups = match gene_type {
            GeneType::Canonical(id) if Some(id) == self.catalog.variant_gene_type() => {
                match draft.genome_build.as_deref() {
                    Some(build) => self.map_variants(species, gene_type, build, draft)?,
                    None => {
                        diagnostics.error(VARIANT_BUILD_REQUIRED);
                        return Ok(Vec::new());
                    }
                }
            }
            GeneType::Canonical(id) => self.map_symbols(species, gene_type, id, draft)?,
            GeneType::Platform(id) => self.map_probes(species, gene_type, id, draft)?,
        };

        Ok(drop_duplicates(lookups, diagnostics))
    }

    fn map_symbols(
        &mut self,
        species: SpeciesId,
        gene_type: GeneType,
        gene_type_id: GeneTypeId,
        draft: &DraftRecord,
    ) -> Result<Vec<Lookup>> {
        let key = CacheKey::new(species, gene_type);
        let lowered: Vec<String> = draft.values.iter().map(|v| v.reference.to_lowercase()).collect();

        let missing = self.cache.missing(&key, lowered.iter().map(String::as_str));
        if !missing.is_empty() {
            let found: HashMap<String, GeneId> = self
                .resolver
                .resolve_symbols(species, gene_type_id, &missing)?
                .into_iter()
                .map(|(reference, gene)| (reference.to_lowercase(), gene))
                .collect();
            debug!(
                "resolved {}/{} symbols for species {} type {}",
                found.len(),
                missing.len(),
                species,
                gene_type
            );
            for reference in missing {
                let genes = found.get(&reference).map(|g| vec![*g]).unwrap_or_default();
                self.cache.insert(&key, reference, genes);
            }
        }

        Ok(draft
            .values
            .iter()
            .zip(&lowered)
            .map(|(value, lower)| (value.reference.clone(), value.score, self.cached(&key, lower)))
            .collect())
    }

    fn map_variants(
        &mut self,
        species: SpeciesId,
        gene_type: GeneType,
        build: &str,
        draft: &DraftRecord,
    ) -> Result<Vec<Lookup>> {
        let key = CacheKey::with_build(species, gene_type, build);
        let stripped: Vec<String> = draft
            .values
            .iter()
            .map(|v| strip_rs(&v.reference).to_string())
            .collect();

        let missing = self.cache.missing(&key, stripped.iter().map(String::as_str));
        if !missing.is_empty() {
            let numbers: Vec<u64> = missing.iter().filter_map(|r| r.parse().ok()).collect();
            let found = if numbers.is_empty() {
                HashMap::new()
            } else {
                self.resolver.resolve_variants(build, &numbers)?
            };
            debug!("resolved {}/{} variants in {}", found.len(), missing.len(), build);
            for reference in missing {
                let genes = reference
                    .parse::<u64>()
                    .ok()
                    .and_then(|number| found.get(&number))
                    .map(|g| vec![*g])
                    .unwrap_or_default();
                self.cache.insert(&key, reference, genes);
            }
        }

        // the stripped reference is what gets stored
        Ok(draft
            .values
            .iter()
            .zip(stripped)
            .map(|(value, reference)| {
                let genes = self.cached(&key, &reference);
                (reference, value.score, genes)
            })
            .collect())
    }

    fn map_probes(
        &mut self,
        species: SpeciesId,
        gene_type: GeneType,
        platform: PlatformId,
        draft: &DraftRecord,
    ) -> Result<Vec<Lookup>> {
        let key = CacheKey::new(species, gene_type);

        let missing = self.cache.missing(&key, draft.values.iter().map(|v| v.reference.as_str()));
        if !missing.is_empty() {
            let probes = match self.probes.entry(platform) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let probes = self.resolver.resolve_platform_probes(platform)?;
                    debug!("loaded {} probes of platform {}", probes.len(), platform);
                    entry.insert(probes)
                }
            };

            let mut probe_ids: Vec<ProbeId> =
                missing.iter().filter_map(|r| probes.get(r).copied()).collect();
            probe_ids.sort_unstable();
            probe_ids.dedup();
            let probe_genes = if probe_ids.is_empty() {
                HashMap::new()
            } else {
                self.resolver.resolve_probe_genes(&probe_ids)?
            };
            debug!(
                "resolved {}/{} probes of platform {}",
                probe_genes.len(),
                missing.len(),
                platform
            );

            for reference in missing {
                let genes = probes
                    .get(&reference)
                    .and_then(|probe| probe_genes.get(probe))
                    .cloned()
                    .unwrap_or_default();
                self.cache.insert(&key, reference, genes);
            }
        }

        Ok(draft
            .values
            .iter()
            .map(|value| (value.reference.clone(), value.score, self.cached(&key, &value.reference)))
            .collect())
    }

    fn cached(&self, key: &CacheKey, reference: &str) -> Vec<GeneId> {
        self.cache.get(key, reference).map(<[GeneId]>::to_vec).unwrap_or_default()
    }
}

fn strip_rs(reference: &str) -> &str {
    reference
        .strip_prefix("rs")
        .or_else(|| reference.strip_prefix("RS"))
        .unwrap_or(reference)
}

/// Keeps the first reference claiming each gene id.
fn drop_duplicates(lookups: Vec<Lookup>, diagnostics: &mut Diagnostics) -> Vec<ResolvedValue> {
    let mut claimed: HashMap<GeneId, String> = HashMap::new();
    let mut values = Vec::new();
    let mut n_unmapped = 0;

    for (reference, score, genes) in lookups {
        if genes.is_empty() {
            n_unmapped += 1;
            diagnostics.warn(format!("No gene/locus data exists for {}", reference));
            continue;
        }
        for gene in genes {
            if let Some(first) = claimed.get(&gene) {
                diagnostics.warn(format!(
                    "{} and {} are duplicates, only {} was added",
                    reference, first, first
                ));
                continue;
            }
            claimed.insert(gene, reference.clone());
            values.push(ResolvedValue::new(&reference, gene, score));
        }
    }

    if n_unmapped > 0 {
        debug!("A total of {} references haven't been mapped successfully", n_unmapped);
    }
    values
}
