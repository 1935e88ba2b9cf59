use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // best-effort numeric scan; tolerates signs and decimals but is no grammar
    static ref SINGLE_NUMBER: Regex = Regex::new(r"([0-9.-]{2,})").unwrap();
    static ref NUMBER_PAIR: Regex =
        Regex::new(r"([0-9.-]{2,})[^0-9.-]*([0-9.-]{2,})").unwrap();
}

pub const DEFAULT_SIGNIFICANCE: &str = "0.05";
pub const DEFAULT_CORRELATION: &str = "-0.75,0.75";
pub const DEFAULT_EFFECT: &str = "0,1";

/// Scoring scheme of a gene set, stored by its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThresholdType {
    PValue,
    QValue,
    Binary,
    Correlation,
    Effect,
}

impl ThresholdType {
    pub fn code(self) -> u8 {
        match self {
            ThresholdType::PValue => 1,
            ThresholdType::QValue => 2,
            ThresholdType::Binary => 3,
            ThresholdType::Correlation => 4,
            ThresholdType::Effect => 5,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(ThresholdType::PValue),
            2 => Some(ThresholdType::QValue),
            3 => Some(ThresholdType::Binary),
            4 => Some(ThresholdType::Correlation),
            5 => Some(ThresholdType::Effect),
            _ => None,
        }
    }
}

impl fmt::Display for ThresholdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ThresholdType::PValue => "P-Value",
            ThresholdType::QValue => "Q-Value",
            ThresholdType::Binary => "Binary",
            ThresholdType::Correlation => "Correlation",
            ThresholdType::Effect => "Effect",
        };
        f.write_str(name)
    }
}

/// Threshold type plus its textual value. Two-sided thresholds keep both
/// bounds joined by a comma, e.g. `-0.75,0.75`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Threshold {
    pub kind: ThresholdType,
    pub value: String,
}

impl Threshold {
    pub fn new(kind: ThresholdType, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }

    /// Lower and upper bound of a two-sided threshold.
    pub fn bounds(&self) -> Option<(&str, &str)> {
        let mut parts = self.value.split(',');
        match (parts.next(), parts.next()) {
            (Some(lo), Some(hi)) => Some((lo.trim(), hi.trim())),
            _ => None,
        }
    }
}

/// Outcome of reading the text after a `!` directive.
#[derive(Debug, Clone, PartialEq)]
pub enum ThresholdParse {
    Parsed(Threshold),
    /// The score type was recognized but its numbers were not; the default
    /// threshold was used instead.
    Defaulted(Threshold, &'static str),
    Unknown,
}

/// Reads a score type and its threshold, e.g. `P-Value < 0.01` or
/// `0.40 < Correlation < 0.50`.
///
/// Correlation and effect thresholds need two numbers; a one-sided bound such
/// as `Effect < 5` falls back to the default.
pub fn parse_threshold(text: &str) -> ThresholdParse {
    let lower = text.trim().to_lowercase();

    if lower == "binary" {
        ThresholdParse::Parsed(Threshold::new(ThresholdType::Binary, "1"))
    } else if lower.contains("p-value") {
        single_sided(&lower, ThresholdType::PValue, "Invalid threshold. Using p < 0.05.")
    } else if lower.contains("q-value") {
        single_sided(&lower, ThresholdType::QValue, "Invalid threshold. Using q < 0.05.")
    } else if lower.contains("correlation") {
        two_sided(
            &lower,
            ThresholdType::Correlation,
            DEFAULT_CORRELATION,
            "Invalid threshold. Using -0.75 < Correlation < 0.75.",
        )
    } else if lower.contains("effect") {
        two_sided(
            &lower,
            ThresholdType::Effect,
            DEFAULT_EFFECT,
            "Invalid threshold. Using 0 < Effect < 1.",
        )
    } else {
        ThresholdParse::Unknown
    }
}

fn single_sided(lower: &str, kind: ThresholdType, warning: &'static str) -> ThresholdParse {
    match SINGLE_NUMBER.captures(lower) {
        Some(caps) => ThresholdParse::Parsed(Threshold::new(kind, &caps[1])),
        None => ThresholdParse::Defaulted(Threshold::new(kind, DEFAULT_SIGNIFICANCE), warning),
    }
}

fn two_sided(
    lower: &str,
    kind: ThresholdType,
    default: &str,
    warning: &'static str,
) -> ThresholdParse {
    match NUMBER_PAIR.captures(lower) {
        Some(caps) => {
            ThresholdParse::Parsed(Threshold::new(kind, &format!("{},{}", &caps[1], &caps[2])))
        }
        None => ThresholdParse::Defaulted(Threshold::new(kind, default), warning),
    }
}
