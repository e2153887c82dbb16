use crate::domain::commission::{CommissionResult, RevenueProjection};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommissionPolicy {
    pub base_commission: f64,
    pub max_commission: f64,
    pub badge_bonus: f64,
    pub max_badge_bonus: f64,
}

impl Default for CommissionPolicy {
    fn default() -> Self {
        Self {
            base_commission: 0.20,
            max_commission: 0.30,
            badge_bonus: 0.01,
            max_badge_bonus: 0.10,
        }
    }
}

/// Categorical uplift: 0 badges -> 0, 1-2 -> 25%, 3-4 -> 45%, 5+ -> 65%.
pub fn revenue_increase_estimate(badge_count: usize) -> f64 {
    match badge_count {
        0 => 0.0,
        1..=2 => 0.25,
        3..=4 => 0.45,
        _ => 0.65,
    }
}

pub fn estimate(badge_count: usize, policy: &CommissionPolicy) -> CommissionResult {
    let badge_bonus = (badge_count as f64 * policy.badge_bonus).min(policy.max_badge_bonus);
    let total_commission = (policy.base_commission + badge_bonus).min(policy.max_commission);

    CommissionResult {
        base_commission: policy.base_commission,
        badge_bonus,
        total_commission,
        revenue_increase_estimate: revenue_increase_estimate(badge_count),
    }
}

pub fn project_revenue(base_revenue: f64, badge_count: usize, policy: &CommissionPolicy) -> RevenueProjection {
    let base_revenue = if base_revenue.is_finite() {
        base_revenue.max(0.0)
    } else {
        0.0
    };
    let result = estimate(badge_count, policy);
    let commission_amount = base_revenue * result.total_commission;
    let base_amount = base_revenue * policy.base_commission;
    let roi_improvement = if base_amount > 0.0 {
        (commission_amount / base_amount - 1.0) * 100.0
    } else {
        0.0
    };

    RevenueProjection {
        base_revenue,
        commission_rate: result.total_commission,
        commission_amount,
        badge_bonus_amount: commission_amount - base_amount,
        projected_revenue: base_revenue * (1.0 + result.revenue_increase_estimate),
        roi_improvement,
    }
}
