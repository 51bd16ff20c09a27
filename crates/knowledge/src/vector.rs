//! Vector similarity utilities.

use ragent_core::knowledge::{IndexedEntry, ScoredEntry};

/// Compute cosine similarity between two vectors.
///
/// Returns a value in [-1, 1] where 1 = identical, 0 = orthogonal, -1 = opposite.
/// Returns 0.0 if the lengths differ or either vector is empty or all zeros.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b.iter()) {
        let x = *x as f64;
        let y = *y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < 1e-10 {
        return 0.0;
    }

    (dot / denom) as f32
}

/// Rank entries by cosine similarity to `query`, best first, keeping `limit`.
///
/// Ties keep insertion order, so the entry indexed first wins.
pub fn rank_by_similarity(entries: &[IndexedEntry], query: &[f32], limit: usize) -> Vec<ScoredEntry> {
    let mut scored: Vec<ScoredEntry> = entries
        .iter()
        .map(|entry| ScoredEntry {
            key: entry.key,
            content: entry.content.clone(),
            score: cosine_similarity(&entry.vector, query),
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);
    scored
}
