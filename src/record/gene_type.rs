use std::fmt;

use crate::catalog::{GeneTypeId, PlatformId};

/// Identifier type of the references in a gene set.
///
/// Stored as a signed code: canonical gene types are negative, expression
/// platforms positive. Zero is never a valid code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneType {
    /// Symbols and external references resolved directly.
    Canonical(GeneTypeId),
    /// Probe references resolved through a platform.
    Platform(PlatformId),
}

impl GeneType {
    pub fn canonical(id: GeneTypeId) -> Option<Self> {
        (id > 0).then_some(GeneType::Canonical(id))
    }

    pub fn platform(id: PlatformId) -> Option<Self> {
        (id > 0).then_some(GeneType::Platform(id))
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            c if c < 0 => Some(GeneType::Canonical(-c)),
            c if c > 0 => Some(GeneType::Platform(c)),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            GeneType::Canonical(id) => -id,
            GeneType::Platform(id) => id,
        }
    }
}

impl fmt::Display for GeneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_convention() {
        assert_eq!(GeneType::canonical(7).unwrap().code(), -7);
        assert_eq!(GeneType::platform(12).unwrap().code(), 12);
        assert_eq!(GeneType::from_code(-7), Some(GeneType::Canonical(7)));
        assert_eq!(GeneType::from_code(12), Some(GeneType::Platform(12)));
    }

    #[test]
    fn test_zero_is_never_produced() {
        assert_eq!(GeneType::from_code(0), None);
        assert_eq!(GeneType::canonical(0), None);
        assert_eq!(GeneType::platform(-3), None);
    }
}
