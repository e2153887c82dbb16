use crate::domain::metrics::{AggregatedMetrics, HistoricalSnapshot, MetricSnapshot};

pub const DECAY_FACTOR: f64 = 0.95;

/// Weight of the `i`-th most recent historical entry. The current snapshot
/// always carries weight 1.0.
pub fn decay_weight(i: usize) -> f64 {
    DECAY_FACTOR.powf(i as f64)
}

/// Folds `history` (newest first) into `current`. The four rate fields become
/// time-weighted averages; request and user counts are taken from `current`.
pub fn aggregate(current: &MetricSnapshot, history: &[HistoricalSnapshot]) -> AggregatedMetrics {
    let mut out = AggregatedMetrics::from(current);
    if history.is_empty() {
        return out;
    }

    out.uptime_percentage = weighted(current.uptime_percentage, history, |h| h.uptime_percentage);
    out.avg_response_time = weighted(current.avg_response_time, history, |h| h.avg_response_time);
    out.error_rate = weighted(current.error_rate, history, |h| h.error_rate);
    out.security_score = weighted(current.security_score, history, |h| h.security_score);
    out
}

fn weighted<F>(current: f64, history: &[HistoricalSnapshot], field: F) -> f64
where
    F: Fn(&HistoricalSnapshot) -> Option<f64>,
{
    let mut sum = current;
    let mut total_weight = 1.0;
    for (i, entry) in history.iter().enumerate() {
        if let Some(v) = field(entry) {
            let w = decay_weight(i);
            sum += w * v;
            total_weight += w;
        }
    }
    sum / total_weight
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn current() -> MetricSnapshot {
        MetricSnapshot {
            api_id: "api-1".to_string(),
            uptime_percentage: 100.0,
            avg_response_time: 50.0,
            total_requests: 4_000,
            error_rate: 1.0,
            active_users: 300,
            security_score: 8.0,
            timestamp: chrono::Utc.timestamp_opt(1_700_000_000, 0).single().unwrap(),
        }
    }

    fn hist(uptime: Option<f64>, latency: Option<f64>) -> HistoricalSnapshot {
        HistoricalSnapshot {
            uptime_percentage: uptime,
            avg_response_time: latency,
            error_rate: None,
            security_score: None,
            timestamp: chrono::Utc.timestamp_opt(1_699_900_000, 0).single().unwrap(),
        }
    }

    #[test]
    fn empty_history_is_identity() {
        let c = current();
        assert_eq!(aggregate(&c, &[]), AggregatedMetrics::from(&c));
    }

    #[test]
    fn decays_older_entries() {
        let m = aggregate(&current(), &[hist(Some(90.0), None), hist(Some(80.0), None)]);
        let expected = (100.0 + 90.0 + 0.95 * 80.0) / (1.0 + 1.0 + 0.95);
        assert!((m.uptime_percentage - expected).abs() < 1e-9);
    }

    #[test]
    fn missing_fields_do_not_dilute_average() {
        let m = aggregate(&current(), &[hist(None, Some(150.0)), hist(Some(80.0), None)]);
        let uptime = (100.0 + 0.95 * 80.0) / 1.95;
        let latency = (50.0 + 150.0) / 2.0;
        assert!((m.uptime_percentage - uptime).abs() < 1e-9);
        assert!((m.avg_response_time - latency).abs() < 1e-9);
        assert_eq!(m.error_rate, 1.0);
        assert_eq!(m.security_score, 8.0);
    }

    #[test]
    fn decay_weight_stays_positive_for_huge_indices() {
        assert_eq!(decay_weight(0), 1.0);
        assert!((decay_weight(2) - 0.9025).abs() < 1e-12);
        let far = decay_weight(i32::MAX as usize + 10);
        assert!(far >= 0.0 && far < decay_weight(1_000));
    }

    #[test]
    fn counts_pass_through() {
        let m = aggregate(&current(), &[hist(Some(10.0), Some(10.0))]);
        assert_eq!(m.total_requests, 4_000);
        assert_eq!(m.active_users, 300);
    }
}
