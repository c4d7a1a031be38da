//! Closed-form start-state value of the short corridor under a fixed policy

/// Value of the start cell when every action goes right with probability `p`.
///
/// Diverges towards `-inf` at both ends of `(0, 1)`.
pub fn true_start_value(p: f64) -> f64 {
    (2.0 * p - 4.0) / (p * (1.0 - p))
}

/// `num` evenly spaced points from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Best `(p, value)` on a grid of `samples` probabilities over `[0.01, 0.99]`.
pub fn optimal_p_right(samples: usize) -> Option<(f64, f64)> {
    linspace(0.01, 0.99, samples)
        .into_iter()
        .map(|p| (p, true_start_value(p)))
        .max_by(|a, b| a.1.total_cmp(&b.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert!((true_start_value(0.5) + 12.0).abs() < 1e-12);
        assert!((true_start_value(0.05) + 82.105).abs() < 1e-2);
        assert!((true_start_value(0.95) + 44.210).abs() < 1e-2);
    }

    #[test]
    fn test_linspace_edges() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(0.3, 1.0, 1), vec![0.3]);
        let points = linspace(0.0, 1.0, 5);
        assert_eq!(points, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_optimum_near_analytic_maximum() {
        let (p, value) = optimal_p_right(9_801).unwrap();
        assert!((p - 0.5858).abs() < 1e-3, "p = {p}");
        assert!((value + 11.657).abs() < 1e-2, "value = {value}");
        assert!(optimal_p_right(0).is_none());
    }
}
