use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One point-in-time reading of an API's operational metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    pub api_id: String,
    pub uptime_percentage: f64,
    pub avg_response_time: f64,
    pub total_requests: u64,
    pub error_rate: f64,
    pub active_users: u64,
    pub security_score: f64,
    pub timestamp: DateTime<Utc>,
}

/// A prior reading as supplied by a history source. Any trend field may be
/// absent; absent fields are skipped when averaging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSnapshot {
    pub uptime_percentage: Option<f64>,
    pub avg_response_time: Option<f64>,
    pub error_rate: Option<f64>,
    pub security_score: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedMetrics {
    pub api_id: String,
    pub uptime_percentage: f64,
    pub avg_response_time: f64,
    pub total_requests: u64,
    pub error_rate: f64,
    pub active_users: u64,
    pub security_score: f64,
}

impl From<&MetricSnapshot> for AggregatedMetrics {
    fn from(s: &MetricSnapshot) -> Self {
        Self {
            api_id: s.api_id.clone(),
            uptime_percentage: s.uptime_percentage,
            avg_response_time: s.avg_response_time,
            total_requests: s.total_requests,
            error_rate: s.error_rate,
            active_users: s.active_users,
            security_score: s.security_score,
        }
    }
}
