use crate::domain::badge::EarnedBadge;
use crate::domain::commission::{CommissionResult, RevenueProjection};
use crate::domain::error::ErrorPayload;
use crate::domain::metrics::AggregatedMetrics;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct BadgeReport {
    pub success: bool,
    pub api_id: String,
    pub badges: Vec<EarnedBadge>,
    pub badge_summary: BadgeSummary,
    pub business_impact: CommissionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_projection: Option<RevenueProjection>,
    pub aggregated_metrics: AggregatedMetrics,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct BadgeSummary {
    pub total_badges: usize,
    pub badge_types: Vec<String>,
    pub highest_confidence: f64,
}

impl BadgeSummary {
    pub fn from_badges(badges: &[EarnedBadge]) -> Self {
        Self {
            total_badges: badges.len(),
            badge_types: badges.iter().map(|b| b.badge.id.clone()).collect(),
            highest_confidence: badges
                .iter()
                .map(|b| b.confidence_score)
                .fold(0.0, f64::max),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub evaluation_id: Uuid,
    pub calculated_at: DateTime<Utc>,
    pub algorithm_version: String,
    pub processing_time_ms: u64,
    pub history_points: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkItemResult {
    pub index: usize,
    pub api_id: Option<String>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<BadgeReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorPayload>,
}

impl BulkItemResult {
    pub fn ok(index: usize, report: BadgeReport) -> Self {
        Self {
            index,
            api_id: Some(report.api_id.clone()),
            success: true,
            report: Some(report),
            error: None,
        }
    }

    pub fn failed(index: usize, api_id: Option<String>, error: ErrorPayload) -> Self {
        Self {
            index,
            api_id,
            success: false,
            report: None,
            error: Some(error),
        }
    }

    pub fn badge_count(&self) -> usize {
        self.report.as_ref().map(|r| r.badges.len()).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkSummary {
    pub total_badges_awarded: usize,
    pub avg_badges_per_api: f64,
    pub processed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkReport {
    pub success: bool,
    pub processed_apis: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<BulkItemResult>,
    pub processing_summary: BulkSummary,
}

impl BulkReport {
    pub fn from_results(results: Vec<BulkItemResult>) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        let total_badges_awarded: usize = results.iter().map(BulkItemResult::badge_count).sum();
        let avg_badges_per_api = if succeeded == 0 {
            0.0
        } else {
            round2(total_badges_awarded as f64 / succeeded as f64)
        };

        Self {
            success: true,
            processed_apis: results.len(),
            succeeded,
            failed: results.len() - succeeded,
            results,
            processing_summary: BulkSummary {
                total_badges_awarded,
                avg_badges_per_api,
                processed_at: Utc::now(),
            },
        }
    }
}

/// Two-decimal rounding of the exact stored value (0.865 is 0.86499.. and
/// rounds down).
pub fn round2(v: f64) -> f64 {
    format!("{v:.2}").parse().unwrap_or(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_uses_exact_stored_value() {
        assert_eq!(round2(0.865), 0.86);
        assert_eq!(round2(0.945), 0.94);
        assert_eq!(round2(0.995), 0.99);
        assert_eq!(round2(0.862_465_020_996_279_2), 0.86);
        assert_eq!(round2(0.998_663_546_686_890_3), 1.0);
        assert_eq!(round2(7.0 / 3.0), 2.33);
    }
}
