//! Reading the batch gene set format into draft records.

mod diagnostics;
mod gene_type_classifier;
mod line_kind;
mod platform_matcher;
mod record_parser;

pub use diagnostics::Diagnostics;
pub use gene_type_classifier::GeneTypeClassifier;
pub use line_kind::{classify, LineKind};
pub use platform_matcher::{digrams, similarity, PlatformMatcher};
pub use record_parser::{ParseOutcome, RecordParser, MISSING_REQUIRED_FIELDS};
pub use record_parser::{PRIVATE_GROUP, PRIVATE_TIER, PUBLIC_GROUP, PUBLIC_TIER};
