/// A trimmed batch file line, classified by its leading directive.
///
/// Payloads are the text after the directive, trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Tier(&'a str),
    User(&'a str),
    Attribution(&'a str),
    Abbreviation(&'a str),
    Name(&'a str),
    Description(&'a str),
    ScoreType(&'a str),
    Species(&'a str),
    GenomeBuild(&'a str),
    GeneType(&'a str),
    PubMed(&'a str),
    Access(&'a str),
    Annotation(&'a str),
    Uri(&'a str),
    Value { reference: &'a str, score: &'a str },
    Comment,
    Blank,
    Unknown,
}

impl<'a> LineKind<'a> {
    /// Directives that start a new gene set once the current one holds values.
    pub fn is_metadata(&self) -> bool {
        !matches!(
            self,
            LineKind::Value { .. } | LineKind::Comment | LineKind::Blank | LineKind::Unknown
        )
    }
}

/// Classifies one line. Several prefixes overlap, so the checks run from the
/// most specific to the least specific.
pub fn classify(line: &str) -> LineKind<'_> {
    let has_tab = line.contains('\t');

    if directive(line, "t ") {
        LineKind::Tier(payload(line))
    } else if directive(line, "u ") {
        LineKind::User(payload(line))
    } else if directive(line, "d ") {
        LineKind::Attribution(payload(line))
    } else if line.starts_with(':') {
        LineKind::Abbreviation(payload(line))
    } else if line.starts_with('=') {
        LineKind::Name(payload(line))
    } else if line.starts_with('+') {
        LineKind::Description(payload(line))
    } else if line.starts_with('!') {
        LineKind::ScoreType(payload(line))
    } else if line.starts_with('@') {
        LineKind::Species(payload(line))
    } else if line.starts_with("$ ") {
        LineKind::GenomeBuild(payload(line))
    } else if line.starts_with('%') {
        LineKind::GeneType(payload(line))
    } else if directive(line, "p ") && !has_tab {
        LineKind::PubMed(payload(line))
    } else if directive(line, "a ") && !has_tab {
        LineKind::Access(payload(line))
    } else if line.starts_with("~ ") {
        LineKind::Annotation(payload(line))
    } else if line.starts_with("> ") {
        LineKind::Uri(payload(line))
    } else if let Some((reference, score)) = split_value_row(line) {
        LineKind::Value { reference, score }
    } else if line.starts_with('#') {
        LineKind::Comment
    } else if line.is_empty() {
        LineKind::Blank
    } else {
        LineKind::Unknown
    }
}

/// Letter directives are matched without regard to case.
fn directive(line: &str, prefix: &str) -> bool {
    line.as_bytes()
        .get(..prefix.len())
        .map_or(false, |head| head.eq_ignore_ascii_case(prefix.as_bytes()))
}

/// Text after a single byte directive character.
fn payload(line: &str) -> &str {
    line[1..].trim()
}

/// Exactly two tab separated columns.
fn split_value_row(line: &str) -> Option<(&str, &str)> {
    let mut columns = line.split('\t');
    match (columns.next(), columns.next(), columns.next()) {
        (Some(reference), Some(score), None) => Some((reference, score)),
        _ => None,
    }
}
