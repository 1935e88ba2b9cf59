//! Name <-> id lookup tables shared by the reader and the writer.

mod bijection;
mod service;
mod snapshot;

pub use bijection::Bijection;
pub use service::{CatalogService, GeneTypeEntry};
pub use snapshot::CatalogSnapshot;

pub type SpeciesId = i64;
pub type GeneTypeId = i64;
pub type PlatformId = i64;
pub type AttributionId = i64;
pub type PublicationId = i64;
pub type OntologyId = i64;
pub type GeneId = i64;
pub type ProbeId = i64;
