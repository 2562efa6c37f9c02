/// Evenly spaced samples over the closed interval `[start, stop]`.
///
/// The last sample is pinned to `stop` so both ends are exact regardless of
/// rounding in the step. `count == 1` yields `[start]`, `count == 0` is empty.
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            let mut out: Vec<f64> = (0..count).map(|i| start + i as f64 * step).collect();
            out[count - 1] = stop;
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints_exact() {
        let v = linspace(-40.0, 40.0, 15);
        assert_eq!(v.len(), 15);
        assert_eq!(v[0], -40.0);
        assert_eq!(v[14], 40.0);
    }

    #[test]
    fn test_linspace_uniform_step() {
        let v = linspace(10.0, 90.0, 8);
        for w in v.windows(2) {
            let step = w[1] - w[0];
            assert!((step - 80.0 / 7.0).abs() < 1e-12, "step={}", step);
        }
    }

    #[test]
    fn test_linspace_degenerate_counts() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 7.0, 1), vec![3.0]);
    }
}
