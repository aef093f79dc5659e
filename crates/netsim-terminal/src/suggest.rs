//! "Did you mean" suggestions for unrecognized input.
//!
//! Similarity is the Sørensen-Dice coefficient over character bigrams of the
//! lower-cased strings: `2 * |shared bigrams| / (|bigrams(a)| + |bigrams(b)|)`,
//! counting repeated bigrams as often as they occur.

use std::collections::HashMap;

/// Maximum number of suggestions returned.
pub const MAX_SUGGESTIONS: usize = 3;

/// Candidates must score strictly above this.
pub const THRESHOLD: f64 = 0.6;

fn bigrams(text: &str) -> HashMap<(char, char), usize> {
    let chars: Vec<char> = text.to_lowercase().chars().collect();
    let mut counts = HashMap::new();
    for pair in chars.windows(2) {
        *counts.entry((pair[0], pair[1])).or_insert(0) += 1;
    }
    counts
}

/// Similarity of `a` and `b` in `0.0..=1.0`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let left = bigrams(a);
    let right = bigrams(b);
    let total: usize = left.values().sum::<usize>() + right.values().sum::<usize>();
    if total == 0 {
        // Neither string has a bigram.
        return if a.to_lowercase() == b.to_lowercase() {
            1.0
        } else {
            0.0
        };
    }
    let shared: usize = left
        .iter()
        .map(|(pair, n)| (*n).min(right.get(pair).copied().unwrap_or(0)))
        .sum();
    (2 * shared) as f64 / total as f64
}

/// Up to [`MAX_SUGGESTIONS`] candidates scoring above [`THRESHOLD`], best
/// first. Equal scores keep the order of `candidates`.
pub fn suggest<S: AsRef<str>>(input: &str, candidates: &[S]) -> Vec<String> {
    let mut scored: Vec<(f64, &str)> = candidates
        .iter()
        .map(|c| (similarity(input, c.as_ref()), c.as_ref()))
        .filter(|(score, _)| *score > THRESHOLD)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, c)| c.to_string())
        .collect()
}
