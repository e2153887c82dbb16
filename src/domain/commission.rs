use serde::Serialize;

/// All values are fractions of revenue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommissionResult {
    pub base_commission: f64,
    pub badge_bonus: f64,
    pub total_commission: f64,
    pub revenue_increase_estimate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueProjection {
    pub base_revenue: f64,
    pub commission_rate: f64,
    pub commission_amount: f64,
    pub badge_bonus_amount: f64,
    pub projected_revenue: f64,
    /// Percent gain of the badge-adjusted commission over the base rate.
    pub roi_improvement: f64,
}
