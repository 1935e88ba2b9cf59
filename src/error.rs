//! Error types for the batch gene set reader and writer.

use thiserror::Error;

/// Errors that stop a reader or writer session.
///
/// File-level and record-level problems found while reading a batch file are
/// not reported through this type; they are collected in
/// [`Diagnostics`](crate::parser::Diagnostics) and returned with the records.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The catalog tables could not be turned into invertible lookups.
    #[error("catalog: {0}")]
    Catalog(String),

    /// A catalog service, gene resolver or persistence sink call failed.
    #[error("collaborator call failed: {0:#}")]
    Collaborator(#[from] anyhow::Error),

    /// The writer refused to produce output.
    #[error("batch output rejected ({} errors): {}", .errors.len(), .errors.join("; "))]
    Rejected { errors: Vec<String> },
}

pub type Result<T> = std::result::Result<T, Error>;
