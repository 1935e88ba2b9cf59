use std::collections::HashMap;

use crate::catalog::{GeneId, GeneTypeId, PlatformId, ProbeId, SpeciesId};

/// Gene identifier lookups backed by the gene database.
///
/// Every call may fail; failures are passed up unchanged; retrying is up to
/// the implementation.
pub trait GeneIdentifierResolver {
    /// Gene ids for symbols or external references of one gene type. The
    /// references are passed lower-cased; keys of the result are compared
    /// case-insensitively.
    fn resolve_symbols(
        &self,
        species: SpeciesId,
        gene_type: GeneTypeId,
        references: &[String],
    ) -> anyhow::Result<HashMap<String, GeneId>>;

    /// Gene ids of numeric variant ids (rs numbers without the prefix) in one
    /// genome build.
    fn resolve_variants(
        &self,
        genome_build: &str,
        references: &[u64],
    ) -> anyhow::Result<HashMap<u64, GeneId>>;

    /// Every probe reference known for a platform.
    fn resolve_platform_probes(&self, platform: PlatformId) -> anyhow::Result<HashMap<String, ProbeId>>;

    /// Genes measured by each probe; one probe may map to several genes.
    fn resolve_probe_genes(&self, probes: &[ProbeId]) -> anyhow::Result<HashMap<ProbeId, Vec<GeneId>>>;
}
