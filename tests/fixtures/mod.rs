#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use ontolius::TermId;
use rstest::fixture;

use geneset_batch::catalog::{
    AttributionId, CatalogService, CatalogSnapshot, GeneId, GeneTypeEntry, GeneTypeId, OntologyId, PlatformId,
    ProbeId, PublicationId, SpeciesId,
};
use geneset_batch::record::ResolvedRecord;
use geneset_batch::resolver::GeneIdentifierResolver;
use geneset_batch::sink::PersistenceSink;

pub const MOUSE: SpeciesId = 1;
pub const HUMAN: SpeciesId = 2;
pub const SYMBOL: GeneTypeId = 7;
pub const VARIANT: GeneTypeId = 8;
pub const MOUSE_430: PlatformId = 11;
pub const CTD: AttributionId = 3;

pub struct InMemoryCatalog {
    ontology: HashMap<TermId, OntologyId>,
    pub ontology_calls: RefCell<usize>,
}

impl CatalogService for InMemoryCatalog {
    fn species(&self) -> anyhow::Result<Vec<(String, SpeciesId)>> {
        Ok(vec![("Mus musculus".into(), MOUSE), ("Homo sapiens".into(), HUMAN)])
    }

    fn gene_types(&self) -> anyhow::Result<Vec<GeneTypeEntry>> {
        Ok(vec![
            GeneTypeEntry::new(SYMBOL, "Gene Symbol", Some("Symbol")),
            GeneTypeEntry::new(VARIANT, "Variant", None),
        ])
    }

    fn platforms(&self) -> anyhow::Result<Vec<(String, PlatformId)>> {
        Ok(vec![
            ("Affymetrix GeneChip Mouse Genome 430 2.0 Array".into(), MOUSE_430),
            ("Illumina HumanHT-12 V4.0 expression beadchip".into(), 12),
        ])
    }

    fn attributions(&self) -> anyhow::Result<Vec<(String, AttributionId)>> {
        Ok(vec![("CTD".into(), CTD), ("".into(), 4)])
    }

    fn publications(&self) -> anyhow::Result<Vec<(String, PublicationId)>> {
        Ok(vec![("12345678".into(), 40)])
    }

    fn ontology_ids(&self, terms: &[TermId]) -> anyhow::Result<HashMap<TermId, OntologyId>> {
        *self.ontology_calls.borrow_mut() += 1;
        Ok(terms
            .iter()
            .filter_map(|t| self.ontology.get(t).map(|id| (t.clone(), *id)))
            .collect())
    }
}

/// Gene database stand-in that records how often it was asked.
#[derive(Default)]
pub struct InMemoryResolver {
    pub symbol_calls: RefCell<Vec<Vec<String>>>,
    pub probe_loads: RefCell<usize>,
    pub probe_gene_calls: RefCell<Vec<Vec<ProbeId>>>,
    /// Symbol lookup number (1-based) that fails.
    pub failing_symbol_call: Option<usize>,
}

impl InMemoryResolver {
    pub fn failing_on_symbol_call(call: usize) -> Self {
        Self {
            failing_symbol_call: Some(call),
            ..Self::default()
        }
    }
}

impl GeneIdentifierResolver for InMemoryResolver {
    fn resolve_symbols(
        &self,
        species: SpeciesId,
        _gene_type: GeneTypeId,
        references: &[String],
    ) -> anyhow::Result<HashMap<String, GeneId>> {
        self.symbol_calls.borrow_mut().push(references.to_vec());
        if self.failing_symbol_call == Some(self.symbol_calls.borrow().len()) {
            anyhow::bail!("gene database connection lost");
        }
        let known: &[(&str, GeneId)] = match species {
            MOUSE => &[("mobp", 101), ("daxx", 102), ("tnf", 103), ("mbp", 104)],
            HUMAN => &[("tnf", 203), ("tp53", 204)],
            _ => &[],
        };
        Ok(known
            .iter()
            .filter(|(symbol, _)| references.iter().any(|r| r.as_str() == *symbol))
            .map(|(symbol, gene)| (symbol.to_uppercase(), *gene))
            .collect())
    }

    fn resolve_variants(&self, _genome_build: &str, references: &[u64]) -> anyhow::Result<HashMap<u64, GeneId>> {
        Ok(references
            .iter()
            .filter(|n| **n < 1000)
            .map(|n| (*n, 5000 + *n as GeneId))
            .collect())
    }

    fn resolve_platform_probes(&self, platform: PlatformId) -> anyhow::Result<HashMap<String, ProbeId>> {
        *self.probe_loads.borrow_mut() += 1;
        if platform != MOUSE_430 {
            return Ok(HashMap::new());
        }
        Ok(HashMap::from([
            ("1415670_at".to_string(), 1),
            ("1415671_at".to_string(), 2),
            ("1415672_at".to_string(), 3),
        ]))
    }

    fn resolve_probe_genes(&self, probes: &[ProbeId]) -> anyhow::Result<HashMap<ProbeId, Vec<GeneId>>> {
        self.probe_gene_calls.borrow_mut().push(probes.to_vec());
        let genes = HashMap::from([(1, vec![101]), (2, vec![102, 104]), (3, vec![101])]);
        Ok(probes
            .iter()
            .filter_map(|p| genes.get(p).map(|g| (*p, g.clone())))
            .collect())
    }
}

/// Sink that keeps what it was given.
#[derive(Default)]
pub struct MemorySink {
    pub stored: Vec<ResolvedRecord>,
}

impl PersistenceSink for MemorySink {
    fn insert_geneset(&mut self, record: &ResolvedRecord) -> anyhow::Result<i64> {
        self.stored.push(record.clone());
        Ok(1000 + self.stored.len() as i64)
    }
}

pub struct FailingSink;

impl PersistenceSink for FailingSink {
    fn insert_geneset(&mut self, _record: &ResolvedRecord) -> anyhow::Result<i64> {
        anyhow::bail!("database is read-only")
    }
}

#[fixture]
pub fn catalog_service() -> InMemoryCatalog {
    let ontology = [("GO:0008150", 1), ("HP:0001250", 2)]
        .into_iter()
        .map(|(curie, id)| (curie.parse::<TermId>().expect("valid term id"), id))
        .collect();
    InMemoryCatalog {
        ontology,
        ontology_calls: RefCell::new(0),
    }
}

#[fixture]
pub fn resolver() -> InMemoryResolver {
    InMemoryResolver::default()
}

#[fixture]
pub fn catalog(catalog_service: InMemoryCatalog) -> CatalogSnapshot {
    CatalogSnapshot::load(&catalog_service).expect("the in-memory catalog is consistent")
}

/// Two mouse gene sets sharing their header directives.
pub const TWO_SETS: &str = "\
# hippocampus study
! P-Value < 0.01
@ Mus musculus
% Gene Symbol

: HIPPO
= Hippocampal genes
+ Genes enriched in
+ the hippocampus

Mobp\t0.001
Daxx\t0.02

: CORTEX
= Cortical genes
+ Genes enriched in the cortex

Tnf\t0.003
Mbp\t0.004
";
