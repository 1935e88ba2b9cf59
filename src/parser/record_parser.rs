use log::debug;

use crate::catalog::CatalogSnapshot;
use crate::config::BatchConfig;
use crate::record::{parse_threshold, DraftRecord, ThresholdParse, ValuePair};

use super::{classify, Diagnostics, GeneTypeClassifier, LineKind, PlatformMatcher};

pub const MISSING_REQUIRED_FIELDS: &str = "One or more of the required fields are missing.";

/// Tier given to public gene sets until they are curated.
pub const PUBLIC_TIER: i64 = 4;
pub const PRIVATE_TIER: i64 = 5;
pub const PUBLIC_GROUP: i64 = 0;
pub const PRIVATE_GROUP: i64 = -1;

/// Draft records read from a batch file, with the messages raised on the way.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub records: Vec<DraftRecord>,
    pub diagnostics: Diagnostics,
}

/// Single pass state machine over the lines of a batch file.
///
/// Gene sets are not delimited explicitly: the first metadata directive after
/// a block of value rows closes the current gene set. Header fields that are
/// not repeated carry over to the next gene set.
pub struct RecordParser<'a> {
    catalog: &'a CatalogSnapshot,
    gene_types: GeneTypeClassifier<'a>,
    current: DraftRecord,
    records: Vec<DraftRecord>,
    diagnostics: Diagnostics,
}

impl<'a> RecordParser<'a> {
    pub fn new(catalog: &'a CatalogSnapshot, config: &BatchConfig) -> Self {
        let matcher = PlatformMatcher::new(config.platform_similarity_threshold);
        Self {
            catalog,
            gene_types: GeneTypeClassifier::new(catalog, matcher),
            current: DraftRecord::new(),
            records: Vec::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn parse(mut self, text: &str) -> ParseOutcome {
        for (index, line) in text.split('\n').enumerate() {
            self.parse_line(index + 1, line.trim());
        }

        // the last gene set is kept even when incomplete; resolution rejects it
        self.records.push(self.current);
        debug!(
            "parsed {} gene sets, {} errors, {} warnings",
            self.records.len(),
            self.diagnostics.errors.len(),
            self.diagnostics.warnings.len()
        );

        ParseOutcome {
            records: self.records,
            diagnostics: self.diagnostics,
        }
    }

    fn parse_line(&mut self, number: usize, line: &str) {
        let kind = classify(line);
        if kind.is_metadata() {
            self.close_if_complete();
        }

        match kind {
            LineKind::Tier(text) => match text.parse::<i64>() {
                Ok(tier) => self.current.tier = Some(tier),
                Err(_) => self.diagnostics.line_error(number, format!("invalid tier id ({})", text)),
            },
            LineKind::User(text) => match text.parse::<i64>() {
                Ok(user_id) => self.current.user_id = Some(user_id),
                Err(_) => self.diagnostics.line_error(number, format!("invalid user id ({})", text)),
            },
            LineKind::Attribution(abbrev) => self.current.attribution = Some(abbrev.to_string()),
            LineKind::Abbreviation(abbrev) => self.current.abbreviation = abbrev.to_string(),
            LineKind::Name(name) => self.current.name = name.to_string(),
            LineKind::Description(text) => {
                self.current.description.push_str(text);
                self.current.description.push(' ');
            }
            LineKind::ScoreType(text) => self.parse_score_type(number, text),
            LineKind::Species(name) => match self.catalog.species.id(name) {
                Some(species) => self.current.species = Some(species),
                None => self
                    .diagnostics
                    .line_error(number, format!("{} is an invalid species", name)),
            },
            LineKind::GenomeBuild(build) => self.current.genome_build = Some(build.to_string()),
            LineKind::GeneType(token) => match self.gene_types.classify(token) {
                Ok(gene_type) => self.current.gene_type = Some(gene_type),
                Err(message) => self.diagnostics.line_error(number, message),
            },
            LineKind::PubMed(pmid) => self.current.pmid = Some(pmid.to_string()),
            LineKind::Access(group) => {
                // anything that is not explicitly public stays private
                if group.eq_ignore_ascii_case("public") {
                    self.current.groups = vec![PUBLIC_GROUP];
                    self.current.tier = Some(PUBLIC_TIER);
                } else {
                    self.current.groups = vec![PRIVATE_GROUP];
                    self.current.tier = Some(PRIVATE_TIER);
                }
            }
            LineKind::Annotation(term) => self.current.annotations.push(term.to_string()),
            LineKind::Uri(uri) => self.current.uri = Some(uri.to_string()),
            LineKind::Value { reference, score } => self.parse_value(number, reference, score),
            LineKind::Comment | LineKind::Blank => {}
            LineKind::Unknown => self.diagnostics.line_warn(
                number,
                format!("Skipping line with unknown identifiers ({})", line),
            ),
        }
    }

    fn parse_score_type(&mut self, number: usize, text: &str) {
        match parse_threshold(text) {
            ThresholdParse::Parsed(threshold) => self.current.threshold = Some(threshold),
            ThresholdParse::Defaulted(threshold, warning) => {
                self.diagnostics.line_warn(number, warning);
                self.current.threshold = Some(threshold);
            }
            ThresholdParse::Unknown => self.diagnostics.line_error(
                number,
                format!("An unknown score type ({}) was provided.", text),
            ),
        }
    }

    fn parse_value(&mut self, number: usize, reference: &str, score: &str) {
        if !self.current.has_required_fields() {
            self.diagnostics.error_once(MISSING_REQUIRED_FIELDS);
            return;
        }
        match score.trim().parse::<f64>() {
            Ok(score) => self.current.values.push(ValuePair::new(reference.trim(), score)),
            Err(_) => self.diagnostics.line_warn(
                number,
                format!("Skipping {} with a non-numeric score ({})", reference, score),
            ),
        }
    }

    fn close_if_complete(&mut self) {
        if self.current.is_complete() {
            self.records.push(self.current.clone());
            self.current.reset();
        }
    }
}
