use crate::commission::estimator::{estimate, project_revenue};
use crate::config::EngineConfig;
use crate::domain::error::{err, ErrorEnvelope};
use crate::domain::metrics::{HistoricalSnapshot, MetricSnapshot};
use crate::domain::report::{BadgeReport, BadgeSummary, BulkItemResult, BulkReport, ReportMetadata};
use crate::metrics::aggregator::aggregate;
use crate::metrics::history::HistorySource;
use crate::scoring::engine::evaluate;
use crate::service::validation::{api_id_hint, base_revenue, validate_snapshot};
use axum::http::StatusCode;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

pub const SAMPLE_API_ID: &str = "test-api-123";

#[derive(Clone)]
pub struct BadgeService {
    pub engine: Arc<EngineConfig>,
    pub history: Arc<dyn HistorySource>,
}

impl BadgeService {
    pub fn new(engine: EngineConfig, history: Arc<dyn HistorySource>) -> Self {
        Self {
            engine: Arc::new(engine),
            history,
        }
    }

    /// Same engine, different history supply.
    pub fn with_history(&self, history: Arc<dyn HistorySource>) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            history,
        }
    }

    pub async fn evaluate_one(&self, raw: &Value) -> Result<BadgeReport, (StatusCode, ErrorEnvelope)> {
        let started = Instant::now();
        let snapshot = validate_snapshot(raw).map_err(|e| (StatusCode::BAD_REQUEST, e.to_envelope()))?;
        let base_revenue = base_revenue(raw).map_err(|e| (StatusCode::BAD_REQUEST, e.to_envelope()))?;

        let history = self
            .history
            .fetch(&snapshot.api_id, self.engine.history_depth)
            .await
            .map_err(|e| {
                tracing::warn!(
                    api_id = %snapshot.api_id,
                    source = self.history.name(),
                    "history fetch failed: {e:#}"
                );
                (
                    StatusCode::BAD_GATEWAY,
                    err("HISTORY_UNAVAILABLE", &format!("history unavailable: {e}")),
                )
            })?;

        let mut report = self.evaluate_snapshot(&snapshot, &history);
        if let Some(revenue) = base_revenue {
            report.revenue_projection = Some(project_revenue(
                revenue,
                report.badges.len(),
                &self.engine.commission,
            ));
        }
        report.metadata.processing_time_ms = started.elapsed().as_millis() as u64;
        Ok(report)
    }

    /// Aggregate, evaluate and estimate for an already validated snapshot.
    pub fn evaluate_snapshot(&self, snapshot: &MetricSnapshot, history: &[HistoricalSnapshot]) -> BadgeReport {
        let now = chrono::Utc::now();
        let metrics = aggregate(snapshot, history);
        let badges = evaluate(
            &metrics,
            &self.engine.catalog,
            self.engine.confidence_threshold,
            now,
        );
        let business_impact = estimate(badges.len(), &self.engine.commission);

        tracing::debug!(
            api_id = %snapshot.api_id,
            badges = badges.len(),
            history_points = history.len(),
            "badges evaluated"
        );

        BadgeReport {
            success: true,
            api_id: snapshot.api_id.clone(),
            badge_summary: BadgeSummary::from_badges(&badges),
            badges,
            business_impact,
            revenue_projection: None,
            aggregated_metrics: metrics,
            metadata: ReportMetadata {
                evaluation_id: Uuid::new_v4(),
                calculated_at: now,
                algorithm_version: self.engine.algorithm_version.clone(),
                processing_time_ms: 0,
                history_points: history.len(),
            },
        }
    }

    /// Runs every item on its own task. A failing item is reported in place and
    /// never aborts its siblings.
    pub async fn evaluate_bulk(&self, items: Vec<Value>) -> BulkReport {
        let handles: Vec<_> = items
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                let service = self.clone();
                tokio::spawn(async move { service.evaluate_item(index, raw).await })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for (index, handle) in handles.into_iter().enumerate() {
            let item = match handle.await {
                Ok(item) => item,
                Err(e) => {
                    tracing::error!(index, "bulk item task failed: {e}");
                    BulkItemResult::failed(index, None, err("INTERNAL_ERROR", &e.to_string()).error)
                }
            };
            results.push(item);
        }

        let report = BulkReport::from_results(results);
        tracing::info!(
            processed = report.processed_apis,
            succeeded = report.succeeded,
            failed = report.failed,
            "bulk evaluation finished"
        );
        report
    }

    async fn evaluate_item(&self, index: usize, raw: Value) -> BulkItemResult {
        match self.evaluate_one(&raw).await {
            Ok(report) => BulkItemResult::ok(index, report),
            Err((status, envelope)) => {
                tracing::warn!(
                    index,
                    status = status.as_u16(),
                    code = %envelope.error.code,
                    "bulk item rejected: {}",
                    envelope.error.message
                );
                BulkItemResult::failed(index, api_id_hint(&raw), envelope.error)
            }
        }
    }

    pub async fn sample_report(&self) -> Result<BadgeReport, (StatusCode, ErrorEnvelope)> {
        self.evaluate_one(&sample_snapshot()).await
    }
}

pub fn sample_snapshot() -> Value {
    serde_json::json!({
        "api_id": SAMPLE_API_ID,
        "uptime_percentage": 99.5,
        "avg_response_time": 75,
        "total_requests": 15000,
        "error_rate": 0.5,
        "active_users": 2500,
        "security_score": 9.2
    })
}
