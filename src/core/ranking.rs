use crate::models::ScoredRecord;

/// Order scored records best-first.
///
/// The sort is stable: records with equal scores keep their input order.
/// Callers needing both a wide and a narrow cut (top-100 and top-5) take
/// prefixes of the same ranked vector instead of sorting twice.
pub fn rank(mut scored: Vec<ScoredRecord>) -> Vec<ScoredRecord> {
    scored.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    scored
}

/// The best `n` entries of an already ranked list.
pub fn top(ranked: &[ScoredRecord], n: usize) -> &[ScoredRecord] {
    &ranked[..ranked.len().min(n)]
}
