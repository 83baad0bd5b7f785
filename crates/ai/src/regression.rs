//! Ordinary least squares over a fixed-width feature matrix.
//!
//! The fit centres every column and the target, solves the normal equations
//! for the columns that actually vary, and recovers the intercept from the
//! means. Zero-variance columns (e.g. a scaled constant feature) get a
//! coefficient of exactly 0 and do not take part in the solve.
//!
//! Rank-deficient systems are normal here: two records span a single
//! direction, and daily stock drawdown moves in lockstep with the weekday.
//! The solve returns the minimum-norm least-squares solution in that case.

use serde::Serialize;

use crate::features::FEATURE_COUNT;
use crate::result::{AiError, AiResult};

/// Fitted linear model `y = intercept + Σ coefficients[i] * x[i]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearRegression {
    intercept: f64,
    coefficients: [f64; FEATURE_COUNT],
    r_squared: f64,
    n_observations: usize,
}

impl LinearRegression {
    pub fn fit(x: &[[f64; FEATURE_COUNT]], y: &[f64]) -> AiResult<Self> {
        if x.len() != y.len() {
            return Err(AiError::numeric(format!(
                "shape mismatch: {} feature rows vs {} targets",
                x.len(),
                y.len()
            )));
        }
        if x.is_empty() {
            return Err(AiError::data("cannot fit regression on zero observations"));
        }
        if x.iter().flatten().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(AiError::numeric("regression input contains non-finite values"));
        }

        let n = x.len() as f64;
        let mut x_mean = [0.0; FEATURE_COUNT];
        for row in x {
            for (m, v) in x_mean.iter_mut().zip(row) {
                *m += v / n;
            }
        }
        let y_mean = y.iter().sum::<f64>() / n;

        // Centered sums of squares decide which columns carry information.
        let mut ss = [0.0; FEATURE_COUNT];
        for row in x {
            for col in 0..FEATURE_COUNT {
                let d = row[col] - x_mean[col];
                ss[col] += d * d;
            }
        }
        let active: Vec<usize> = (0..FEATURE_COUNT)
            .filter(|&col| ss[col] > VARIANCE_EPS * n)
            .collect();

        let mut coefficients = [0.0; FEATURE_COUNT];
        if !active.is_empty() {
            let k = active.len();
            let mut a = vec![vec![0.0; k]; k];
            let mut b = vec![0.0; k];
            for (row, &target) in x.iter().zip(y) {
                let yc = target - y_mean;
                for (i, &ci) in active.iter().enumerate() {
                    let xi = row[ci] - x_mean[ci];
                    b[i] += xi * yc;
                    for (j, &cj) in active.iter().enumerate() {
                        a[i][j] += xi * (row[cj] - x_mean[cj]);
                    }
                }
            }

            let solution = solve_min_norm(a, &b);
            for (&col, beta) in active.iter().zip(solution) {
                coefficients[col] = beta;
            }
        }

        let intercept = y_mean
            - coefficients
                .iter()
                .zip(&x_mean)
                .map(|(c, m)| c * m)
                .sum::<f64>();

        let mut model = Self {
            intercept,
            coefficients,
            r_squared: 1.0,
            n_observations: x.len(),
        };

        let ss_tot: f64 = y.iter().map(|v| (v - y_mean).powi(2)).sum();
        let ss_res: f64 = x
            .iter()
            .zip(y)
            .map(|(row, v)| (v - model.predict(row)).powi(2))
            .sum();
        model.r_squared = if ss_tot > 1e-10 { 1.0 - ss_res / ss_tot } else { 1.0 };

        if !model.intercept.is_finite() || model.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(AiError::numeric("fit produced non-finite parameters"));
        }

        Ok(model)
    }

    pub fn predict(&self, row: &[f64; FEATURE_COUNT]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(c, v)| c * v)
                .sum::<f64>()
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn coefficients(&self) -> &[f64; FEATURE_COUNT] {
        &self.coefficients
    }

    /// Coefficient of determination on the training data (1.0 for a constant target).
    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }

    pub fn n_observations(&self) -> usize {
        self.n_observations
    }
}

const VARIANCE_EPS: f64 = 1e-12;
/// Eigenvalues below this fraction of the largest one count as null directions.
const RANK_RTOL: f64 = 1e-10;
const MAX_SWEEPS: usize = 64;

/// Minimum-norm solution of the symmetric positive semi-definite system `a x = b`.
///
/// `a` is diagonalised with cyclic Jacobi rotations and inverted only along
/// eigen-directions whose eigenvalue clears `RANK_RTOL`; the null space
/// contributes nothing.
fn solve_min_norm(mut a: Vec<Vec<f64>>, b: &[f64]) -> Vec<f64> {
    let k = b.len();
    let mut v: Vec<Vec<f64>> = (0..k)
        .map(|i| (0..k).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect();

    for _ in 0..MAX_SWEEPS {
        let off: f64 = (0..k)
            .flat_map(|i| ((i + 1)..k).map(move |j| (i, j)))
            .map(|(i, j)| a[i][j].abs())
            .sum();
        let diag: f64 = (0..k).map(|i| a[i][i].abs()).sum();
        if off <= f64::EPSILON * diag || off == 0.0 {
            break;
        }

        for p in 0..k {
            for q in (p + 1)..k {
                let apq = a[p][q];
                if apq == 0.0 {
                    continue;
                }
                let theta = (a[q][q] - a[p][p]) / (2.0 * apq);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for r in 0..k {
                    let (arp, arq) = (a[r][p], a[r][q]);
                    a[r][p] = c * arp - s * arq;
                    a[r][q] = s * arp + c * arq;
                }
                for r in 0..k {
                    let (apr, aqr) = (a[p][r], a[q][r]);
                    a[p][r] = c * apr - s * aqr;
                    a[q][r] = s * apr + c * aqr;
                }
                for row in v.iter_mut() {
                    let (vp, vq) = (row[p], row[q]);
                    row[p] = c * vp - s * vq;
                    row[q] = s * vp + c * vq;
                }
            }
        }
    }

    let largest = (0..k).map(|i| a[i][i]).fold(0.0, f64::max);
    let mut x = vec![0.0; k];
    if largest <= 0.0 {
        return x;
    }
    for e in 0..k {
        let lambda = a[e][e];
        if lambda <= RANK_RTOL * largest {
            continue;
        }
        let proj = (0..k).map(|r| v[r][e] * b[r]).sum::<f64>() / lambda;
        for (xr, row) in x.iter_mut().zip(&v) {
            *xr += proj * row[e];
        }
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn recovers_exact_linear_relationship() {
        // y = 4 + 2*x0 - 3*x1 + 0.5*x2
        let x: Vec<[f64; 3]> = vec![
            [1.0, 0.0, 10.0],
            [2.0, 1.0, 4.0],
            [3.0, 5.0, 8.0],
            [4.0, 2.0, 0.0],
            [5.0, 3.0, 6.0],
        ];
        let y: Vec<f64> = x
            .iter()
            .map(|r| 4.0 + 2.0 * r[0] - 3.0 * r[1] + 0.5 * r[2])
            .collect();

        let model = LinearRegression::fit(&x, &y).unwrap();
        assert_close(model.intercept(), 4.0);
        assert_close(model.coefficients()[0], 2.0);
        assert_close(model.coefficients()[1], -3.0);
        assert_close(model.coefficients()[2], 0.5);
        assert_close(model.r_squared(), 1.0);
        assert_eq!(model.n_observations(), 5);
    }

    #[test]
    fn constant_columns_get_zero_coefficients() {
        let x = vec![[0.0, 1.0, 0.0], [0.0, 2.0, 0.0], [0.0, 3.0, 0.0]];
        let y = vec![2.0, 4.0, 6.0];

        let model = LinearRegression::fit(&x, &y).unwrap();
        assert_eq!(model.coefficients()[0], 0.0);
        assert_eq!(model.coefficients()[2], 0.0);
        assert_close(model.coefficients()[1], 2.0);
        assert_close(model.intercept(), 0.0);
    }

    #[test]
    fn single_observation_is_a_constant_predictor() {
        let model = LinearRegression::fit(&[[0.0, 0.0, 0.0]], &[7.0]).unwrap();
        assert_eq!(model.coefficients(), &[0.0, 0.0, 0.0]);
        assert_eq!(model.intercept(), 7.0);
        assert_eq!(model.predict(&[3.0, -2.0, 100.0]), 7.0);
    }

    #[test]
    fn least_squares_on_noisy_data_minimises_residuals() {
        let x = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [3.0, 0.0, 0.0]];
        let y = vec![1.0, 3.0, 2.0, 5.0];

        let model = LinearRegression::fit(&x, &y).unwrap();
        // Closed form for simple regression: slope = 1.1, intercept = 1.1.
        assert_close(model.coefficients()[0], 1.1);
        assert_close(model.intercept(), 1.1);
        assert!(model.r_squared() > 0.0 && model.r_squared() < 1.0);
    }

    #[test]
    fn perfectly_collinear_columns_share_weight_with_minimum_norm() {
        // x1 = 2 * x0, so only b0 + 2 * b1 = 1 is identified; the minimum-norm
        // pick is (0.2, 0.4).
        let x = vec![[1.0, 2.0, 0.0], [2.0, 4.0, 0.0], [3.0, 6.0, 0.0]];
        let y = vec![1.0, 2.0, 3.0];

        let model = LinearRegression::fit(&x, &y).unwrap();
        assert_close(model.coefficients()[0], 0.2);
        assert_close(model.coefficients()[1], 0.4);
        assert_eq!(model.coefficients()[2], 0.0);
        assert_close(model.intercept(), 0.0);
        assert_close(model.r_squared(), 1.0);
        assert_close(model.predict(&[4.0, 8.0, 0.0]), 4.0);
    }

    #[test]
    fn two_points_in_three_dimensions_fit_exactly() {
        let x = vec![[-1.0, -1.0, 1.0], [1.0, 1.0, -1.0]];
        let y = vec![10.0, 20.0];

        let model = LinearRegression::fit(&x, &y).unwrap();
        let third = 5.0 / 3.0;
        assert_close(model.coefficients()[0], third);
        assert_close(model.coefficients()[1], third);
        assert_close(model.coefficients()[2], -third);
        assert_close(model.predict(&x[0]), 10.0);
        assert_close(model.predict(&x[1]), 20.0);
    }

    #[test]
    fn min_norm_solve_matches_direct_solution_when_full_rank() {
        let a = vec![vec![4.0, 1.0, 0.0], vec![1.0, 3.0, 1.0], vec![0.0, 1.0, 2.0]];
        let expected = [1.0, -2.0, 0.5];
        let b: Vec<f64> = a
            .iter()
            .map(|row| row.iter().zip(&expected).map(|(a, e)| a * e).sum())
            .collect();

        let x = solve_min_norm(a, &b);
        for (got, want) in x.iter().zip(expected) {
            assert_close(*got, want);
        }
    }

    #[test]
    fn shape_mismatch_and_bad_values_are_reported() {
        assert!(matches!(
            LinearRegression::fit(&[[0.0; 3]], &[1.0, 2.0]),
            Err(AiError::NumericFit(_))
        ));
        assert!(matches!(
            LinearRegression::fit(&[[0.0, f64::INFINITY, 0.0]], &[1.0]),
            Err(AiError::NumericFit(_))
        ));
        assert!(matches!(LinearRegression::fit(&[], &[]), Err(AiError::Data(_))));
    }
}
