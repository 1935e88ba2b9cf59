//! Reader and writer for batch gene set files.
//!
//! A batch file holds several gene sets. Header directives (`!`, `@`, `%`, ...)
//! carry forward from one gene set to the next, and each set ends with its
//! `reference<TAB>score` rows. [`BatchReader`] parses a file and resolves its
//! references to gene ids through the [`resolver`] collaborators;
//! [`BatchWriter`] turns resolved gene sets back into batch text.

pub mod catalog;
pub mod config;
pub mod error;
pub mod parser;
pub mod reader;
pub mod record;
pub mod resolver;
pub mod sink;
pub mod writer;

pub use config::BatchConfig;
pub use error::{Error, Result};
pub use reader::BatchReader;
pub use writer::BatchWriter;
