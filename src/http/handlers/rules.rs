use crate::commission::estimator::CommissionPolicy;
use crate::metrics::aggregator::DECAY_FACTOR;
use crate::scoring::catalog::BadgeCatalog;
use crate::scoring::engine::{known_criteria, NEUTRAL_SCORE, SCORE_FLOOR};
use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct BadgeRulesResponse<'a> {
    pub available_badges: &'a BadgeCatalog,
    pub commission_structure: &'a CommissionPolicy,
    pub algorithm_info: AlgorithmInfo,
}

#[derive(Debug, Serialize)]
pub struct AlgorithmInfo {
    pub confidence_threshold: f64,
    pub weighting_strategy: &'static str,
    pub decay_factor: f64,
    pub evaluation_method: &'static str,
    pub score_floor: f64,
    pub unknown_criterion_score: f64,
    pub supported_criteria: Vec<&'static str>,
    pub history_depth: usize,
    pub history_source: &'static str,
}

pub async fn badge_rules(State(state): State<AppState>) -> impl IntoResponse {
    let engine = &state.badge_service.engine;
    let resp = BadgeRulesResponse {
        available_badges: &engine.catalog,
        commission_structure: &engine.commission,
        algorithm_info: AlgorithmInfo {
            confidence_threshold: engine.confidence_threshold,
            weighting_strategy: "temporal_decay",
            decay_factor: DECAY_FACTOR,
            evaluation_method: "geometric_mean",
            score_floor: SCORE_FLOOR,
            unknown_criterion_score: NEUTRAL_SCORE,
            supported_criteria: known_criteria().collect(),
            history_depth: engine.history_depth,
            history_source: state.badge_service.history.name(),
        },
    };
    (axum::http::StatusCode::OK, Json(resp)).into_response()
}
