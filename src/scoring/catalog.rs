use crate::domain::badge::{BadgeDefinition, Criterion};
use crate::scoring::engine::is_known_criterion;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BadgeCatalog {
    badges: Vec<BadgeDefinition>,
}

impl BadgeCatalog {
    pub fn new(badges: Vec<BadgeDefinition>) -> Self {
        Self { badges }
    }

    /// The eight certification badges, in issuance order.
    pub fn standard() -> Self {
        Self::new(vec![
            badge(
                "trusted_api",
                "Trusted API",
                "🟢",
                "99%+ uptime verified over 30 days",
                &[("uptime", 99.0), ("min_requests", 1000.0)],
            ),
            badge(
                "lightning_fast",
                "Lightning Fast",
                "⚡",
                "Average response time under 100ms",
                &[("response_time", 100.0), ("min_requests", 500.0)],
            ),
            badge(
                "blazing_speed",
                "Blazing Speed",
                "🚀",
                "Average response time under 50ms",
                &[("response_time", 50.0), ("min_requests", 200.0)],
            ),
            badge(
                "enterprise_ready",
                "Enterprise Ready",
                "🛡️",
                "99.9%+ uptime with high security score",
                &[("uptime", 99.9), ("security_score", 8.0), ("min_requests", 2000.0)],
            ),
            badge(
                "community_proven",
                "Community Proven",
                "👥",
                "1000+ active users with reliable performance",
                &[("active_users", 1000.0), ("uptime", 95.0)],
            ),
            badge(
                "zero_downtime",
                "Zero Downtime",
                "💎",
                "99.99%+ uptime - mission critical grade",
                &[("uptime", 99.99), ("min_requests", 5000.0)],
            ),
            badge(
                "security_certified",
                "Security Certified",
                "🔒",
                "Exceptional security score with low error rate",
                &[("security_score", 9.0), ("error_rate", 1.0)],
            ),
            badge(
                "high_volume",
                "High Volume Ready",
                "📊",
                "Handles 10K+ requests reliably",
                &[("min_requests", 10000.0), ("uptime", 98.0)],
            ),
        ])
    }

    pub fn badges(&self) -> &[BadgeDefinition] {
        &self.badges
    }

    pub fn get(&self, id: &str) -> Option<&BadgeDefinition> {
        self.badges.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.badges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.badges.is_empty()
    }

    /// `(badge_id, criterion)` pairs that have no scoring rule and will be
    /// scored neutrally.
    pub fn unknown_criteria(&self) -> Vec<(String, String)> {
        self.badges
            .iter()
            .flat_map(|b| {
                b.criteria
                    .iter()
                    .filter(|c| !is_known_criterion(&c.name))
                    .map(move |c| (b.id.clone(), c.name.clone()))
            })
            .collect()
    }
}

fn badge(id: &str, name: &str, icon: &str, description: &str, criteria: &[(&str, f64)]) -> BadgeDefinition {
    BadgeDefinition {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        description: description.to_string(),
        criteria: criteria
            .iter()
            .map(|(name, threshold)| Criterion::new(name, *threshold))
            .collect(),
    }
}
