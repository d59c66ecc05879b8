//! Log-scaled cloud factors.

use super::aggregate::ScoredKeyword;
use serde::{Deserialize, Serialize};

/// Smallest cloud factor.
pub const MIN_CLOUD_FACTOR: u8 = 1;
/// Largest cloud factor.
pub const MAX_CLOUD_FACTOR: u8 = 7;

/// Ranked keyword with its visual intensity bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCloudEntry {
    /// Keyword as extracted (tag or note path).
    pub display_name: String,
    /// File name of the note the keyword resolves to, or the keyword itself.
    pub resolved_file_name: String,
    /// 1-based rank.
    pub rank: usize,
    /// Occurrences across the candidate set.
    pub score: usize,
    /// Notes in the backlink scope containing the keyword.
    pub backlink_count: usize,
    /// Visual bucket in `1..=7`.
    pub cloud_factor: u8,
}

impl KeywordCloudEntry {
    /// CSS-style class name (`cloud1` … `cloud7`).
    #[must_use]
    pub fn cloud_class(&self) -> String {
        format!("cloud{}", self.cloud_factor)
    }
}

#[allow(clippy::cast_precision_loss)]
fn log_score(score: usize) -> f64 {
    (score as f64 + 1.0).ln()
}

/// Map raw scores onto `1..=7` using log compression.
///
/// Empty input stays empty; equal scores all land on factor 1.
#[must_use]
pub fn scale_cloud_factors(scored: Vec<ScoredKeyword>) -> Vec<KeywordCloudEntry> {
    let (Some(min_score), Some(max_score)) = (
        scored.iter().map(|entry| entry.score).min(),
        scored.iter().map(|entry| entry.score).max(),
    ) else {
        return Vec::new();
    };

    let log_min = log_score(min_score);
    let log_max = log_score(max_score);
    let range = (log_max - log_min).max(1.0);

    scored
        .into_iter()
        .map(|entry| {
            let relative = (log_score(entry.score) - log_min) / range;
            let bucket = (1.0 + relative * 6.0)
                .round()
                .clamp(f64::from(MIN_CLOUD_FACTOR), f64::from(MAX_CLOUD_FACTOR));
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let cloud_factor = bucket as u8;
            KeywordCloudEntry {
                display_name: entry.display_name,
                resolved_file_name: entry.resolved_file_name,
                rank: entry.rank,
                score: entry.score,
                backlink_count: entry.backlink_count,
                cloud_factor,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(scores: &[usize]) -> Vec<ScoredKeyword> {
        scores
            .iter()
            .enumerate()
            .map(|(index, score)| ScoredKeyword {
                display_name: format!("k{index}"),
                resolved_file_name: format!("k{index}"),
                rank: index + 1,
                score: *score,
                backlink_count: 0,
            })
            .collect()
    }

    fn factors(scores: &[usize]) -> Vec<u8> {
        scale_cloud_factors(scored(scores))
            .iter()
            .map(|entry| entry.cloud_factor)
            .collect()
    }

    #[test]
    fn test_empty_input_is_noop() {
        assert!(scale_cloud_factors(Vec::new()).is_empty());
    }

    #[test]
    fn test_equal_scores_all_factor_one() {
        assert_eq!(factors(&[4, 4, 4]), vec![1, 1, 1]);
    }

    #[test]
    fn test_small_range_is_not_stretched() {
        // ln(3) - ln(2) < 1, so the range floor of 1 applies.
        assert_eq!(factors(&[2, 1]), vec![3, 1]);
    }

    #[test]
    fn test_long_tail_spans_full_scale() {
        let out = factors(&[100, 10, 3, 1]);
        assert_eq!(out.first(), Some(&7));
        assert_eq!(out.last(), Some(&1));
        assert!(out.windows(2).all(|pair| pair[0] >= pair[1]));
        assert_eq!(scale_cloud_factors(scored(&[5]))[0].cloud_class(), "cloud1");
    }
}
