mod draft;
mod gene_type;
mod resolved;
mod threshold;

pub use draft::{DraftRecord, ValuePair};
pub use gene_type::GeneType;
pub use resolved::{ResolvedRecord, ResolvedValue};
pub use threshold::{parse_threshold, Threshold, ThresholdParse, ThresholdType};
pub use threshold::{DEFAULT_CORRELATION, DEFAULT_EFFECT, DEFAULT_SIGNIFICANCE};
