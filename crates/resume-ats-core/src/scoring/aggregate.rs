//! Overall score from the five category scores.

use super::CategoryScore;
use crate::profile::CategoryWeights;

/// The five category scores the aggregator joins.
#[derive(Debug, Clone, Copy)]
pub struct CategoryScores<'a> {
    /// Keyword category.
    pub keyword: &'a CategoryScore,
    /// Formatting category.
    pub formatting: &'a CategoryScore,
    /// Structure category.
    pub structure: &'a CategoryScore,
    /// Tone category.
    pub tone: &'a CategoryScore,
    /// Grammar category.
    pub grammar: &'a CategoryScore,
}

/// Weighted percentage of available points, rounded and clamped to `0..=100`.
///
/// Depends on the five scores and the weights only. With equal weights and
/// the default maxima (40 + 20 + 15 + 15 + 10) this is the plain sum.
pub fn aggregate(scores: CategoryScores<'_>, weights: &CategoryWeights) -> u32 {
    let parts = [
        (scores.keyword, weights.keyword),
        (scores.formatting, weights.formatting),
        (scores.structure, weights.structure),
        (scores.tone, weights.tone),
        (scores.grammar, weights.grammar),
    ];

    let (earned, available) = parts.iter().fold((0.0, 0.0), |(earned, available), (cat, w)| {
        let w = w.max(0.0);
        let score = f64::from(cat.score.min(cat.max));
        (earned + w * score, available + w * f64::from(cat.max))
    });

    if available <= 0.0 {
        return 0;
    }
    (earned / available * 100.0).round().clamp(0.0, 100.0) as u32
}
