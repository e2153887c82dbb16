use api_badges::commission::estimator::{estimate, CommissionPolicy};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn no_badges_keeps_base_commission() {
    let r = estimate(0, &CommissionPolicy::default());
    assert!(close(r.base_commission, 0.20));
    assert!(close(r.total_commission, 0.20));
    assert_eq!(r.badge_bonus, 0.0);
    assert_eq!(r.revenue_increase_estimate, 0.0);
}

#[test]
fn many_badges_saturate_every_cap() {
    let r = estimate(12, &CommissionPolicy::default());
    assert!(close(r.badge_bonus, 0.10));
    assert!(close(r.total_commission, 0.30));
    assert!(r.total_commission <= 0.30);
    assert_eq!(r.revenue_increase_estimate, 0.65);
}

#[test]
fn commission_never_decreases_with_badges() {
    let policy = CommissionPolicy::default();
    let mut previous = estimate(0, &policy);
    for count in 1..=20 {
        let r = estimate(count, &policy);
        assert!(r.total_commission >= previous.total_commission);
        assert!(r.revenue_increase_estimate >= previous.revenue_increase_estimate);
        assert!(r.total_commission <= policy.max_commission);
        previous = r;
    }
}
