use crate::core::RegressionKind;

/// Least-squares fit of one regression model.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionFit {
    pub kind: RegressionKind,
    /// Model coefficients, lowest order first:
    /// linear/log `a + b·t`, exp `a·e^(b·x)`, pow `a·x^b`, quad `a + b·x + c·x²`.
    pub coefficients: Vec<f64>,
    /// Residual standard error measured on the original `y` scale.
    pub residual_std_error: f64,
    pub r_squared: f64,
}

impl RegressionFit {
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        let c = &self.coefficients;
        match self.kind {
            RegressionKind::Linear => c[0] + c[1] * x,
            RegressionKind::Exp => c[0] * (c[1] * x).exp(),
            RegressionKind::Log => c[0] + c[1] * x.ln(),
            RegressionKind::Pow => c[0] * x.powf(c[1]),
            RegressionKind::Quad => c[0] + c[1] * x + c[2] * x * x,
        }
    }

    /// `steps + 1` evenly spaced samples over `[start, end]`.
    #[must_use]
    pub fn sample(&self, start: f64, end: f64, steps: usize) -> Vec<(f64, f64)> {
        let steps = steps.max(1);
        let step = (end - start) / steps as f64;
        (0..=steps)
            .map(|index| {
                let x = if index == steps {
                    end
                } else {
                    start + step * index as f64
                };
                (x, self.predict(x))
            })
            .filter(|(_, y)| y.is_finite())
            .collect()
    }
}

/// Fits `kind` to `points`. Points outside the model's domain (non-positive
/// `x` for log/pow, non-positive `y` for exp/pow) are skipped.
///
/// Returns `None` when too few usable points remain or the system is
/// degenerate (for example every `x` identical).
#[must_use]
pub fn fit(kind: RegressionKind, points: &[(f64, f64)]) -> Option<RegressionFit> {
    let usable: Vec<(f64, f64)> = points
        .iter()
        .copied()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .filter(|(x, y)| match kind {
            RegressionKind::Linear | RegressionKind::Quad => true,
            RegressionKind::Exp => *y > 0.0,
            RegressionKind::Log => *x > 0.0,
            RegressionKind::Pow => *x > 0.0 && *y > 0.0,
        })
        .collect();

    let coefficients = match kind {
        RegressionKind::Linear => {
            let (a, b) = linear_least_squares(usable.iter().copied())?;
            vec![a, b]
        }
        RegressionKind::Exp => {
            let (a, b) = linear_least_squares(usable.iter().map(|(x, y)| (*x, y.ln())))?;
            vec![a.exp(), b]
        }
        RegressionKind::Log => {
            let (a, b) = linear_least_squares(usable.iter().map(|(x, y)| (x.ln(), *y)))?;
            vec![a, b]
        }
        RegressionKind::Pow => {
            let (a, b) = linear_least_squares(usable.iter().map(|(x, y)| (x.ln(), y.ln())))?;
            vec![a.exp(), b]
        }
        RegressionKind::Quad => quadratic_least_squares(&usable)?.to_vec(),
    };

    let mut fit = RegressionFit {
        kind,
        coefficients,
        residual_std_error: 0.0,
        r_squared: 1.0,
    };

    let n = usable.len();
    let parameters = fit.coefficients.len();
    let mean = usable.iter().map(|(_, y)| y).sum::<f64>() / n as f64;
    let (residual, total) = usable.iter().fold((0.0, 0.0), |(residual, total), (x, y)| {
        let error = y - fit.predict(*x);
        (residual + error * error, total + (y - mean) * (y - mean))
    });
    if n > parameters {
        fit.residual_std_error = (residual / (n - parameters) as f64).sqrt();
    }
    if total > 0.0 {
        fit.r_squared = 1.0 - residual / total;
    }
    Some(fit)
}

/// Ordinary least squares for `y = a + b·x`.
fn linear_least_squares(points: impl Iterator<Item = (f64, f64)>) -> Option<(f64, f64)> {
    let mut n = 0.0;
    let (mut sum_x, mut sum_y, mut sum_xx, mut sum_xy) = (0.0, 0.0, 0.0, 0.0);
    for (x, y) in points {
        n += 1.0;
        sum_x += x;
        sum_y += y;
        sum_xx += x * x;
        sum_xy += x * y;
    }
    if n < 2.0 {
        return None;
    }
    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator.abs() <= f64::EPSILON * n * sum_xx.abs().max(1.0) {
        return None;
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    Some((intercept, slope))
}

/// Solves the 3x3 normal equations of `y = a + b·x + c·x²`.
fn quadratic_least_squares(points: &[(f64, f64)]) -> Option<[f64; 3]> {
    if points.len() < 3 {
        return None;
    }
    // Power sums Σx^k for k in 0..=4 and Σx^k·y for k in 0..=2.
    let mut s = [0.0_f64; 5];
    let mut t = [0.0_f64; 3];
    for (x, y) in points {
        let mut power = 1.0;
        for (k, slot) in s.iter_mut().enumerate() {
            *slot += power;
            if k < 3 {
                t[k] += power * y;
            }
            power *= x;
        }
    }
    let mut matrix = [
        [s[0], s[1], s[2], t[0]],
        [s[1], s[2], s[3], t[1]],
        [s[2], s[3], s[4], t[2]],
    ];

    for column in 0..3 {
        let pivot = (column..3).max_by(|a, b| {
            matrix[*a][column]
                .abs()
                .total_cmp(&matrix[*b][column].abs())
        })?;
        if matrix[pivot][column].abs() < 1e-12 {
            return None;
        }
        matrix.swap(column, pivot);
        for row in 0..3 {
            if row == column {
                continue;
            }
            let factor = matrix[row][column] / matrix[column][column];
            for k in column..4 {
                matrix[row][k] -= factor * matrix[column][k];
            }
        }
    }
    Some([
        matrix[0][3] / matrix[0][0],
        matrix[1][3] / matrix[1][1],
        matrix[2][3] / matrix[2][2],
    ])
}
