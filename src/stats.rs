//! Statistics kernel
//!
//! Small, total numeric primitives shared by the scorers and the projector.
//! Empty inputs return `None` or `0.0` sentinels rather than failing.

/// Arithmetic mean, `None` for an empty slice
pub fn avg(xs: &[f64]) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    Some(xs.iter().sum::<f64>() / xs.len() as f64)
}

/// Population standard deviation, `0.0` for fewer than two values
pub fn standard_deviation(xs: &[f64]) -> f64 {
    if xs.len() < 2 {
        return 0.0;
    }
    let mean = xs.iter().sum::<f64>() / xs.len() as f64;
    let variance = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / xs.len() as f64;
    variance.sqrt()
}

/// Coefficient of variation in percent, `0.0` when the mean is not positive
pub fn coefficient_of_variation(xs: &[f64]) -> f64 {
    match avg(xs) {
        Some(mean) if mean > 0.0 => standard_deviation(xs) / mean * 100.0,
        _ => 0.0,
    }
}

/// Least-squares line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least-squares regression over `(x, y)` points.
///
/// Returns `None` for fewer than two points. When every `x` is equal the
/// slope is undefined, so a flat line at the mean of `y` is returned.
pub fn linear_regression(points: &[(f64, f64)]) -> Option<LinearFit> {
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let sum_x: f64 = points.iter().map(|(x, _)| x).sum();
    let sum_y: f64 = points.iter().map(|(_, y)| y).sum();
    let sum_xy: f64 = points.iter().map(|(x, y)| x * y).sum();
    let sum_xx: f64 = points.iter().map(|(x, _)| x * x).sum();

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator.abs() < f64::EPSILON {
        return Some(LinearFit {
            slope: 0.0,
            intercept: sum_y / n,
        });
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    Some(LinearFit { slope, intercept })
}

/// Round and clamp a raw score to the 0-100 integer scale
pub fn clamp_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

/// Linear interpolation of `x` between `(x0, y0)` and `(x1, y1)`
pub(crate) fn lerp(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
    if (x1 - x0).abs() < f64::EPSILON {
        return y0;
    }
    let t = ((x - x0) / (x1 - x0)).clamp(0.0, 1.0);
    y0 + (y1 - y0) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avg() {
        assert_eq!(avg(&[]), None);
        assert!((avg(&[1.0, 2.0, 3.0, 4.0]).unwrap() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_standard_deviation() {
        assert_eq!(standard_deviation(&[]), 0.0);
        assert_eq!(standard_deviation(&[42.0]), 0.0);
        // Population std dev of 2,4,4,4,5,5,7,9 is exactly 2
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((standard_deviation(&xs) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_coefficient_of_variation() {
        assert_eq!(coefficient_of_variation(&[]), 0.0);
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((coefficient_of_variation(&xs) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_regression_requires_two_points() {
        assert!(linear_regression(&[]).is_none());
        assert!(linear_regression(&[(1.0, 5.0)]).is_none());
    }

    #[test]
    fn test_regression_exact_line() {
        let points = [(0.0, 1.0), (1.0, 3.0), (2.0, 5.0), (3.0, 7.0)];
        let fit = linear_regression(&points).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-9);
        assert!((fit.intercept - 1.0).abs() < 1e-9);
        assert!((fit.predict(10.0) - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_regression_degenerate_x() {
        let points = [(3.0, 70.0), (3.0, 80.0), (3.0, 90.0)];
        let fit = linear_regression(&points).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert!((fit.predict(100.0) - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(-3.0), 0);
        assert_eq!(clamp_score(77.5), 78);
        assert_eq!(clamp_score(140.0), 100);
        assert_eq!(clamp_score(f64::NAN), 0);
    }

    #[test]
    fn test_lerp() {
        assert!((lerp(115.0, 110.0, 120.0, 100.0, 95.0) - 97.5).abs() < 1e-9);
        assert_eq!(lerp(200.0, 110.0, 120.0, 100.0, 95.0), 95.0);
    }
}
