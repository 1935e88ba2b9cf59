use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::bufread::GzDecoder;
use log::{debug, info};

use crate::catalog::{CatalogService, CatalogSnapshot};
use crate::config::BatchConfig;
use crate::error::Result;
use crate::parser::{Diagnostics, RecordParser};
use crate::record::{DraftRecord, ResolvedRecord};
use crate::resolver::{AnnotationMapper, GeneIdMapper, GeneIdentifierResolver, ResolutionCache};
use crate::sink::PersistenceSink;

/// One batch import session: reads batch files, resolves their gene sets and
/// hands the usable ones to a [`PersistenceSink`].
///
/// The resolution caches live as long as the reader, so a reader must not be
/// shared between concurrent imports.
pub struct BatchReader<'a, C: ?Sized, R: ?Sized> {
    catalog: &'a CatalogSnapshot,
    config: BatchConfig,
    genes: GeneIdMapper<'a, R>,
    annotations: AnnotationMapper<'a, C>,
    records: Vec<ResolvedRecord>,
    diagnostics: Diagnostics,
    parse_failed: bool,
}

impl<'a, C, R> BatchReader<'a, C, R>
where
    C: CatalogService + ?Sized,
    R: GeneIdentifierResolver + ?Sized,
{
    pub fn new(
        service: &'a C,
        resolver: &'a R,
        catalog: &'a CatalogSnapshot,
        config: BatchConfig,
    ) -> Self {
        Self {
            catalog,
            config,
            genes: GeneIdMapper::new(resolver, catalog),
            annotations: AnnotationMapper::new(service),
            records: Vec::new(),
            diagnostics: Diagnostics::new(),
            parse_failed: false,
        }
    }

    /// Reads a batch file; files ending in `.gz` are decompressed first.
    pub fn parse_path(&mut self, path: &Path) -> Result<&[ResolvedRecord]> {
        let text = read_batch_file(path)?;
        debug!("read {} bytes from {}", text.len(), path.display());
        self.parse_str(&text)
    }

    /// Parses and resolves the gene sets of a batch file.
    ///
    /// Nothing is resolved when the file has fatal errors; check
    /// [`errors`](Self::errors) before using the returned records.
    pub fn parse_str(&mut self, text: &str) -> Result<&[ResolvedRecord]> {
        self.records.clear();
        self.diagnostics = Diagnostics::new();

        let outcome = RecordParser::new(self.catalog, &self.config).parse(text);
        self.diagnostics.extend(outcome.diagnostics);
        self.parse_failed = self.diagnostics.has_errors();
        if self.parse_failed {
            info!("batch file has {} errors, nothing resolved", self.diagnostics.errors.len());
            return Ok(self.records.as_slice());
        }

        let mut records = Vec::with_capacity(outcome.records.len());
        for draft in outcome.records {
            match self.resolve(draft) {
                Ok(record) => records.push(record),
                Err(e) => {
                    // a half resolved batch must never reach the sink
                    self.parse_failed = true;
                    return Err(e);
                }
            }
        }
        self.records = records;
        info!(
            "resolved {} gene sets, {} usable",
            self.records.len(),
            self.records.iter().filter(|r| r.is_usable()).count()
        );
        Ok(self.records.as_slice())
    }

    fn resolve(&mut self, draft: DraftRecord) -> Result<ResolvedRecord> {
        let values = self.genes.map_record(&draft, &mut self.diagnostics)?;
        let ontology_ids = self
            .annotations
            .map_annotations(&draft.annotations, &mut self.diagnostics)?;

        let mut record = ResolvedRecord::new(draft);
        record.values = values;
        record.ontology_ids = ontology_ids;

        if let Some(abbrev) = record.draft.attribution.as_deref().filter(|a| !a.is_empty()) {
            record.attribution_id = self.catalog.attributions.id(abbrev);
            if record.attribution_id.is_none() {
                self.diagnostics.warn(format!("{} is an unknown attribution", abbrev));
            }
        }
        if record.publication_id.is_none() {
            record.publication_id = record
                .draft
                .pmid
                .as_deref()
                .and_then(|pmid| self.catalog.publications.id(pmid));
        }

        if !record.is_usable() {
            let label = record.draft.label();
            let label = if label.is_empty() { "(unnamed)" } else { label };
            self.diagnostics.error(format!(
                "No genes in the set {} mapped to gene identifiers so it will not be stored",
                label
            ));
        }
        Ok(record)
    }

    /// Stores every usable record and returns the storage ids. Does nothing
    /// when the last parsed file had fatal syntax errors or failed to resolve.
    pub fn insert_genesets<S: PersistenceSink + ?Sized>(&self, sink: &mut S) -> Result<Vec<i64>> {
        if self.parse_failed {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for record in self.records.iter().filter(|r| r.is_usable()) {
            ids.push(sink.insert_geneset(record)?);
        }
        info!("stored {} of {} gene sets", ids.len(), self.records.len());
        Ok(ids)
    }

    pub fn records(&self) -> &[ResolvedRecord] {
        &self.records
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn errors(&self) -> &[String] {
        &self.diagnostics.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.diagnostics.warnings
    }

    pub fn cache(&self) -> &ResolutionCache {
        self.genes.cache()
    }
}

fn read_batch_file(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut text = String::new();
    if path.extension().map_or(false, |ext| ext == "gz") {
        GzDecoder::new(BufReader::new(file)).read_to_string(&mut text)?;
    } else {
        BufReader::new(file).read_to_string(&mut text)?;
    }
    Ok(text)
}
