//! Mapping user supplied gene and ontology references to internal ids.

mod annotation_mapper;
mod cache;
mod gene_id_mapper;
mod service;

pub use annotation_mapper::AnnotationMapper;
pub use cache::{CacheKey, ResolutionCache};
pub use gene_id_mapper::GeneIdMapper;
pub use service::GeneIdentifierResolver;
