use crate::commission::estimator::CommissionPolicy;
use crate::metrics::history::{DEFAULT_HISTORY_DEPTH, MAX_HISTORY_DEPTH};
use crate::scoring::catalog::BadgeCatalog;
use crate::scoring::engine::DEFAULT_CONFIDENCE_THRESHOLD;

pub const DEFAULT_MAX_BULK_ITEMS: usize = 500;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub history_depth: usize,
    pub confidence_threshold: f64,
    pub algorithm_version: String,
    pub max_bulk_items: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            history_depth: parse_history_depth(std::env::var("HISTORY_DEPTH").ok().as_deref()),
            confidence_threshold: parse_threshold(std::env::var("CONFIDENCE_THRESHOLD").ok().as_deref()),
            algorithm_version: std::env::var("ALGORITHM_VERSION")
                .unwrap_or_else(|_| "1.0.0".to_string()),
            max_bulk_items: std::env::var("MAX_BULK_ITEMS")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(DEFAULT_MAX_BULK_ITEMS),
        }
    }
}

/// Thresholds outside (0, 1] fall back to the default.
pub fn parse_threshold(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| *v > 0.0 && *v <= 1.0)
        .unwrap_or(DEFAULT_CONFIDENCE_THRESHOLD)
}

pub fn parse_history_depth(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .map(|d| d.min(MAX_HISTORY_DEPTH))
        .unwrap_or(DEFAULT_HISTORY_DEPTH)
}

/// Everything a badge evaluation reads. Built once at startup and shared
/// read-only between requests.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub catalog: BadgeCatalog,
    pub confidence_threshold: f64,
    pub commission: CommissionPolicy,
    pub history_depth: usize,
    pub algorithm_version: String,
    pub max_bulk_items: usize,
}

impl EngineConfig {
    pub fn from_app(cfg: &AppConfig) -> Self {
        Self {
            catalog: BadgeCatalog::standard(),
            confidence_threshold: cfg.confidence_threshold,
            commission: CommissionPolicy::default(),
            history_depth: cfg.history_depth,
            algorithm_version: cfg.algorithm_version.clone(),
            max_bulk_items: cfg.max_bulk_items,
        }
    }

    /// Logs catalog entries that will be scored neutrally.
    pub fn warn_on_unknown_criteria(&self) -> usize {
        let unknown = self.catalog.unknown_criteria();
        for (badge_id, criterion) in &unknown {
            tracing::warn!(
                badge_id = %badge_id,
                criterion = %criterion,
                "criterion has no scoring rule; it will score neutrally"
            );
        }
        unknown.len()
    }

    pub fn threshold_is_sane(&self) -> bool {
        self.confidence_threshold > 0.0 && self.confidence_threshold <= 1.0
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            catalog: BadgeCatalog::standard(),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            commission: CommissionPolicy::default(),
            history_depth: DEFAULT_HISTORY_DEPTH,
            algorithm_version: "1.0.0".to_string(),
            max_bulk_items: DEFAULT_MAX_BULK_ITEMS,
        }
    }
}
