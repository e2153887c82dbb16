use crate::domain::metrics::AggregatedMetrics;
use serde::Serialize;

/// Maps a metric set and a criterion threshold to a raw score.
pub type CriterionScorer = fn(&AggregatedMetrics, f64) -> f64;

#[derive(Debug, Clone, Serialize)]
pub struct CriterionScore {
    pub criterion: String,
    pub threshold: f64,
    pub score: f64,
    pub recognized: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BadgeEvaluation {
    pub badge_id: String,
    pub confidence: f64,
    pub earned: bool,
    pub criteria: Vec<CriterionScore>,
}
