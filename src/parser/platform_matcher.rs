use std::collections::HashMap;

use crate::catalog::{Bijection, PlatformId};

/// Overlapping two-character windows of `s`. Strings of two characters or
/// fewer are their own single digram.
pub fn digrams(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 2 {
        return vec![s.to_string()];
    }
    chars.windows(2).map(|w| w.iter().collect()).collect()
}

/// Dice coefficient over the digram multisets of both strings.
pub fn similarity(a: &str, b: &str) -> f64 {
    let da = digrams(a);
    let db = digrams(b);

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for digram in &da {
        *counts.entry(digram.as_str()).or_insert(0) += 1;
    }
    let mut shared = 0;
    for digram in &db {
        if let Some(count) = counts.get_mut(digram.as_str()) {
            if *count > 0 {
                *count -= 1;
                shared += 1;
            }
        }
    }

    (2 * shared) as f64 / (da.len() + db.len()) as f64
}

/// Picks the expression platform whose name is most similar to free text.
/// Platform names are written inconsistently, so exact lookups are not enough.
#[derive(Debug, Clone, Copy)]
pub struct PlatformMatcher {
    threshold: f64,
}

impl PlatformMatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Best platform strictly above the acceptance threshold. On ties the
    /// platform registered first wins.
    pub fn best_match(
        &self,
        platforms: &Bijection<PlatformId>,
        name: &str,
    ) -> Option<(PlatformId, f64)> {
        let wanted = name.to_lowercase();
        let mut best: Option<(PlatformId, f64)> = None;
        let mut best_score = self.threshold;

        for (platform, id) in platforms.iter() {
            let score = similarity(&platform.to_lowercase(), &wanted);
            if score > best_score {
                best_score = score;
                best = Some((id, score));
            }
        }
        best
    }
}
