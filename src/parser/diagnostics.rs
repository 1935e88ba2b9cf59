use log::{error, warn};

/// Messages collected while reading a batch file.
///
/// `errors` are fatal for the whole file: nothing should be resolved or stored
/// while any are present. `warnings` never block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        error!("{}", message);
        self.errors.push(message);
    }

    /// Records `message` unless the exact same error is already present.
    pub fn error_once(&mut self, message: &str) {
        if !self.errors.iter().any(|e| e == message) {
            self.error(message);
        }
    }

    pub fn line_error(&mut self, line: usize, message: impl AsRef<str>) {
        self.error(format!("LINE {}: {}", line, message.as_ref()));
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.warnings.push(message);
    }

    pub fn line_warn(&mut self, line: usize, message: impl AsRef<str>) {
        self.warn(format!("LINE {}: {}", line, message.as_ref()));
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}
