//! Similarity scoring between name vectors.
//!
//! The score is the cosine of the two count vectors, computed over the
//! characters both strings share. Candidate sets are small (a few thousand
//! names at most), so search is a plain linear scan.

use super::vector::NameVector;

/// A candidate scored against a query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<'a> {
    pub vector: &'a NameVector,
    /// Similarity in [0, 1].
    pub similarity: f64,
}

/// Cosine similarity of `a` and `b`, in [0, 1].
///
/// Returns 0 when either vector is empty, so an empty string never matches
/// anything, not even another empty string. The dot product and the norms
/// are integers until the final division, which keeps the result exactly
/// symmetric and makes the self-similarity of any non-empty string exactly 1.
pub fn similarity(a: &NameVector, b: &NameVector) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (small, large) = if a.distinct_len() <= b.distinct_len() {
        (a, b)
    } else {
        (b, a)
    };

    let dot: u64 = small
        .counts()
        .iter()
        .map(|(c, &n)| u64::from(n) * u64::from(large.count(*c)))
        .sum();

    if dot == 0 {
        return 0.0;
    }

    let denominator = ((a.norm_squared() as f64) * (b.norm_squared() as f64)).sqrt();
    (dot as f64 / denominator).min(1.0)
}

/// The candidate with the highest similarity to `query`.
///
/// Ties go to the candidate seen first. Returns `None` only when there are
/// no candidates; an all-zero field still yields the first candidate.
pub fn best_match<'a, I>(query: &NameVector, candidates: I) -> Option<SearchResult<'a>>
where
    I: IntoIterator<Item = &'a NameVector>,
{
    let mut best: Option<SearchResult<'a>> = None;

    for vector in candidates {
        let score = similarity(query, vector);
        match &best {
            Some(current) if score <= current.similarity => {}
            _ => {
                best = Some(SearchResult {
                    vector,
                    similarity: score,
                })
            }
        }
    }

    best
}

/// Every candidate scored against `query`, highest first.
///
/// The sort is stable: candidates with equal scores keep their input order.
pub fn ranked_search<'a, I>(query: &NameVector, candidates: I) -> Vec<SearchResult<'a>>
where
    I: IntoIterator<Item = &'a NameVector>,
{
    let mut results: Vec<SearchResult<'a>> = candidates
        .into_iter()
        .map(|vector| SearchResult {
            vector,
            similarity: similarity(query, vector),
        })
        .collect();

    results.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    results
}
