use crate::domain::badge::{BadgeDefinition, EarnedBadge};
use crate::domain::metrics::AggregatedMetrics;
use crate::domain::report::round2;
use crate::scoring::catalog::BadgeCatalog;
use crate::scoring::types::{BadgeEvaluation, CriterionScore, CriterionScorer};
use chrono::{DateTime, Utc};

pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.85;
pub const NEUTRAL_SCORE: f64 = 0.5;
/// Lower bound applied to each score inside the geometric mean.
pub const SCORE_FLOOR: f64 = 0.01;
pub const MIN_RESPONSE_TIME_MS: f64 = 1.0;
pub const MIN_ERROR_RATE: f64 = 0.01;

static CRITERION_SCORERS: &[(&str, CriterionScorer)] = &[
    ("uptime", uptime_score),
    ("response_time", response_time_score),
    ("error_rate", error_rate_score),
    ("security_score", security_score),
    ("min_requests", min_requests_score),
    ("active_users", active_users_score),
];

pub fn clamp01(v: f64) -> f64 {
    if v.is_nan() || v < 0.0 {
        0.0
    } else if v > 1.0 {
        1.0
    } else {
        v
    }
}

fn uptime_score(m: &AggregatedMetrics, threshold: f64) -> f64 {
    (m.uptime_percentage / threshold).min(1.0)
}

fn response_time_score(m: &AggregatedMetrics, threshold: f64) -> f64 {
    (threshold / m.avg_response_time.max(MIN_RESPONSE_TIME_MS)).min(1.0)
}

fn error_rate_score(m: &AggregatedMetrics, threshold: f64) -> f64 {
    (threshold / m.error_rate.max(MIN_ERROR_RATE)).min(1.0)
}

fn security_score(m: &AggregatedMetrics, threshold: f64) -> f64 {
    (m.security_score / threshold).min(1.0)
}

fn min_requests_score(m: &AggregatedMetrics, threshold: f64) -> f64 {
    (m.total_requests as f64 / threshold).min(1.0)
}

fn active_users_score(m: &AggregatedMetrics, threshold: f64) -> f64 {
    (m.active_users as f64 / threshold).min(1.0)
}

pub fn scorer_for(criterion: &str) -> Option<CriterionScorer> {
    CRITERION_SCORERS
        .iter()
        .find(|(name, _)| *name == criterion)
        .map(|(_, scorer)| *scorer)
}

pub fn is_known_criterion(criterion: &str) -> bool {
    scorer_for(criterion).is_some()
}

pub fn known_criteria() -> impl Iterator<Item = &'static str> {
    CRITERION_SCORERS.iter().map(|(name, _)| *name)
}

/// Per-criterion score in [0, 1]. Unrecognized criteria score neutrally.
pub fn criterion_score(metrics: &AggregatedMetrics, criterion: &str, threshold: f64) -> f64 {
    let raw = match scorer_for(criterion) {
        Some(scorer) => scorer(metrics, threshold),
        None => NEUTRAL_SCORE,
    };
    clamp01(raw)
}

/// Geometric mean of the floored scores; 0.0 when there are none.
pub fn confidence_score(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let product: f64 = scores.iter().map(|s| s.max(SCORE_FLOOR)).product();
    clamp01(product.powf(1.0 / scores.len() as f64))
}

pub fn evaluate_badge(metrics: &AggregatedMetrics, badge: &BadgeDefinition, threshold: f64) -> BadgeEvaluation {
    let criteria: Vec<CriterionScore> = badge
        .criteria
        .iter()
        .map(|c| CriterionScore {
            criterion: c.name.clone(),
            threshold: c.threshold,
            score: criterion_score(metrics, &c.name, c.threshold),
            recognized: is_known_criterion(&c.name),
        })
        .collect();

    let scores: Vec<f64> = criteria.iter().map(|c| c.score).collect();
    let confidence = confidence_score(&scores);

    BadgeEvaluation {
        badge_id: badge.id.clone(),
        confidence,
        earned: !scores.is_empty() && confidence >= threshold,
        criteria,
    }
}

/// Scores every badge in catalog order, earned or not.
pub fn score_catalog(metrics: &AggregatedMetrics, catalog: &BadgeCatalog, threshold: f64) -> Vec<BadgeEvaluation> {
    catalog
        .badges()
        .iter()
        .map(|badge| evaluate_badge(metrics, badge, threshold))
        .collect()
}

/// Badges whose confidence clears `threshold`, in catalog order. The reported
/// confidence is rounded to two decimals; the comparison uses the exact value.
pub fn evaluate(
    metrics: &AggregatedMetrics,
    catalog: &BadgeCatalog,
    threshold: f64,
    issued_at: DateTime<Utc>,
) -> Vec<EarnedBadge> {
    catalog
        .badges()
        .iter()
        .filter_map(|badge| {
            let evaluation = evaluate_badge(metrics, badge, threshold);
            evaluation.earned.then(|| EarnedBadge {
                badge: badge.clone(),
                confidence_score: round2(evaluation.confidence),
                earned_at: issued_at,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::badge::Criterion;

    fn metrics() -> AggregatedMetrics {
        AggregatedMetrics {
            api_id: "api-1".to_string(),
            uptime_percentage: 99.5,
            avg_response_time: 75.0,
            total_requests: 15_000,
            error_rate: 0.5,
            active_users: 2_500,
            security_score: 9.2,
        }
    }

    fn single(name: &str, threshold: f64) -> BadgeDefinition {
        BadgeDefinition {
            id: "b".to_string(),
            name: "B".to_string(),
            icon: "*".to_string(),
            description: String::new(),
            criteria: vec![Criterion::new(name, threshold)],
        }
    }

    #[test]
    fn unknown_criterion_scores_neutral() {
        assert_eq!(criterion_score(&metrics(), "latency_p99", 10.0), NEUTRAL_SCORE);
    }

    #[test]
    fn response_time_floor_prevents_blowup() {
        let mut m = metrics();
        m.avg_response_time = 0.0;
        assert_eq!(criterion_score(&m, "response_time", 100.0), 1.0);
        assert_eq!(criterion_score(&m, "response_time", 0.5), 0.5);
    }

    #[test]
    fn zero_error_rate_uses_floor() {
        let mut m = metrics();
        m.error_rate = 0.0;
        assert!((criterion_score(&m, "error_rate", 0.005) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn scores_stay_in_unit_interval() {
        let mut m = metrics();
        m.uptime_percentage = 0.0;
        m.total_requests = 0;
        for name in known_criteria() {
            for threshold in [0.0, 1e-9, 1.0, 50.0, 1e9] {
                let s = criterion_score(&m, name, threshold);
                assert!((0.0..=1.0).contains(&s), "{name} {threshold} -> {s}");
            }
        }
    }

    #[test]
    fn geometric_mean_with_floor() {
        assert_eq!(confidence_score(&[]), 0.0);
        assert!((confidence_score(&[1.0, 1.0, 1.0]) - 1.0).abs() < 1e-12);
        assert!((confidence_score(&[0.0, 1.0]) - 0.1).abs() < 1e-12);
        assert!((confidence_score(&[0.25, 1.0]) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn empty_criteria_is_never_earned() {
        let mut badge = single("uptime", 1.0);
        badge.criteria.clear();
        let eval = evaluate_badge(&metrics(), &badge, 0.0);
        assert_eq!(eval.confidence, 0.0);
        assert!(!eval.earned);
    }

    #[test]
    fn threshold_compares_unrounded_confidence() {
        // sqrt(0.7225) sits on the threshold; 72.0 falls just under it.
        let mut m = metrics();
        m.uptime_percentage = 72.25;
        let badge = BadgeDefinition {
            criteria: vec![Criterion::new("uptime", 100.0), Criterion::new("min_requests", 1.0)],
            ..single("uptime", 100.0)
        };
        let eval = evaluate_badge(&m, &badge, DEFAULT_CONFIDENCE_THRESHOLD);
        assert!((eval.confidence - 0.85).abs() < 1e-9);

        m.uptime_percentage = 72.0;
        let earned = evaluate(&m, &BadgeCatalog::new(vec![badge]), DEFAULT_CONFIDENCE_THRESHOLD, Utc::now());
        assert!(earned.is_empty());
    }
}
