use crate::domain::metrics::HistoricalSnapshot;
use anyhow::Result;
use chrono::{Duration, Utc};

pub const DEFAULT_HISTORY_DEPTH: usize = 10;
/// One year of daily snapshots.
pub const MAX_HISTORY_DEPTH: usize = 365;

/// Supplies prior snapshots for an api, newest first.
#[async_trait::async_trait]
pub trait HistorySource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self, api_id: &str, depth: usize) -> Result<Vec<HistoricalSnapshot>>;
}

/// Deterministic daily history that trends from mediocre toward healthy.
#[derive(Debug, Clone, Default)]
pub struct SyntheticHistory;

impl SyntheticHistory {
    pub fn generate(depth: usize) -> Vec<HistoricalSnapshot> {
        let now = Utc::now();
        (0..depth.min(MAX_HISTORY_DEPTH))
            .map(|i| {
                let step = i as f64;
                HistoricalSnapshot {
                    uptime_percentage: Some(98.5 + step * 0.1),
                    avg_response_time: Some(150.0 - step * 2.0),
                    error_rate: Some((2.0 - step * 0.05).max(0.1)),
                    security_score: Some((7.0 + step * 0.05).min(10.0)),
                    timestamp: now - Duration::days(i as i64 + 1),
                }
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl HistorySource for SyntheticHistory {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    async fn fetch(&self, _api_id: &str, depth: usize) -> Result<Vec<HistoricalSnapshot>> {
        Ok(Self::generate(depth))
    }
}

#[derive(Debug, Clone, Default)]
pub struct NoHistory;

#[async_trait::async_trait]
impl HistorySource for NoHistory {
    fn name(&self) -> &'static str {
        "none"
    }

    async fn fetch(&self, _api_id: &str, _depth: usize) -> Result<Vec<HistoricalSnapshot>> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_history_shape() {
        let h = SyntheticHistory::generate(DEFAULT_HISTORY_DEPTH);
        assert_eq!(h.len(), 10);
        assert_eq!(h[0].uptime_percentage, Some(98.5));
        assert_eq!(h[0].avg_response_time, Some(150.0));
        assert_eq!(h[0].error_rate, Some(2.0));
        assert_eq!(h[0].security_score, Some(7.0));
        assert!(h[0].timestamp > h[9].timestamp);
    }

    #[test]
    fn synthetic_history_depth_is_capped() {
        assert_eq!(SyntheticHistory::generate(usize::MAX).len(), MAX_HISTORY_DEPTH);
    }

    #[test]
    fn synthetic_history_respects_bounds() {
        let h = SyntheticHistory::generate(100);
        assert!(h.iter().all(|s| s.error_rate.unwrap() >= 0.1));
        assert!(h.iter().all(|s| s.security_score.unwrap() <= 10.0));
    }
}
