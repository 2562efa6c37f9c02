use super::panels::{PanelField, CANDIDATE_COUNT};
use super::tower::FlowSample;

/// Free-stream dynamic pressure q = 0.613 * v^2 in Pa.
pub fn dynamic_pressure(velocity: f64) -> f64 {
    0.613 * velocity * velocity
}

/// Nominal Reynolds number shown in the tower title, v * 1000 truncated.
pub fn reynolds_label(velocity: f64) -> i64 {
    (velocity * 1000.0) as i64
}

/// Min and max wind speed over the flow samples, `(0, 0)` when empty.
pub fn speed_range(flow: &[FlowSample]) -> (f64, f64) {
    if flow.is_empty() {
        return (0.0, 0.0);
    }
    flow.iter()
        .map(FlowSample::speed)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| (lo.min(s), hi.max(s)))
}

/// Fraction of the 2000 candidate panels that survived.
pub fn survival_ratio(field: &PanelField) -> f64 {
    field.panels.len() as f64 / CANDIDATE_COUNT as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{generate_panels, tower::flow_field};

    #[test]
    fn test_dynamic_pressure_default() {
        // 45 m/s -> 1241.325 Pa, shown as 1241
        assert!((dynamic_pressure(45.0) - 1241.325).abs() < 1e-9);
        assert_eq!(dynamic_pressure(45.0) as i64, 1241);
    }

    #[test]
    fn test_reynolds_label() {
        assert_eq!(reynolds_label(45.0), 45000);
        assert_eq!(reynolds_label(10.0), 10000);
    }

    #[test]
    fn test_speed_range_ordered() {
        let flow = flow_field(45.0);
        let (lo, hi) = speed_range(&flow);
        assert!(lo >= 0.0);
        assert!(hi > lo, "lo={} hi={}", lo, hi);
        for s in &flow {
            let v = s.speed();
            assert!(v >= lo && v <= hi);
        }
    }

    #[test]
    fn test_speed_range_empty() {
        assert_eq!(speed_range(&[]), (0.0, 0.0));
    }

    #[test]
    fn test_survival_ratio_bounds() {
        assert_eq!(survival_ratio(&generate_panels(10.0, 5000.0)), 1.0);
        let r = survival_ratio(&generate_panels(100.0, 1000.0));
        assert!((r - 176.0 / 2000.0).abs() < 1e-12, "r={}", r);
    }
}
