//! Per-column standardisation (zero mean, unit variance).

use serde::Serialize;

use crate::features::FEATURE_COUNT;
use crate::result::{AiError, AiResult};

/// Fitted scaler: per-column mean and scale captured at training time.
///
/// Uses the population standard deviation. A column whose values are all
/// identical gets `scale = 1.0`, so its transform is identity-minus-mean: every
/// training value maps to exactly 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandardScaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    pub fn fit(rows: &[[f64; FEATURE_COUNT]]) -> AiResult<Self> {
        if rows.is_empty() {
            return Err(AiError::data("cannot fit scaler on an empty feature matrix"));
        }
        if rows.iter().flatten().any(|v| !v.is_finite()) {
            return Err(AiError::numeric("feature matrix contains non-finite values"));
        }

        let n = rows.len() as f64;
        let mut mean = [0.0; FEATURE_COUNT];
        let mut scale = [1.0; FEATURE_COUNT];

        for col in 0..FEATURE_COUNT {
            let m = rows.iter().map(|r| r[col]).sum::<f64>() / n;
            let var = rows
                .iter()
                .map(|r| {
                    let d = r[col] - m;
                    d * d
                })
                .sum::<f64>()
                / n;
            let std = var.sqrt();

            mean[col] = m;
            if !is_degenerate(std, m) {
                scale[col] = std;
            }
        }

        Ok(Self { mean, scale })
    }

    /// Apply the training-time transform. Never re-fits.
    pub fn transform(&self, row: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut out = [0.0; FEATURE_COUNT];
        for col in 0..FEATURE_COUNT {
            out[col] = (row[col] - self.mean[col]) / self.scale[col];
        }
        out
    }

    pub fn transform_all(&self, rows: &[[f64; FEATURE_COUNT]]) -> Vec<[f64; FEATURE_COUNT]> {
        rows.iter().map(|r| self.transform(r)).collect()
    }

    pub fn mean(&self) -> &[f64; FEATURE_COUNT] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64; FEATURE_COUNT] {
        &self.scale
    }
}

// Relative to the column magnitude so rounding noise in the mean of a
// constant column is not mistaken for spread.
fn is_degenerate(std: f64, mean: f64) -> bool {
    std <= 1e-10 * mean.abs().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standardises_each_column_independently() {
        let rows = [[1.0, 0.0, 10.0], [3.0, 2.0, 30.0]];
        let scaler = StandardScaler::fit(&rows).unwrap();

        assert_eq!(scaler.mean(), &[2.0, 1.0, 20.0]);
        assert_eq!(scaler.scale(), &[1.0, 1.0, 10.0]);

        let t = scaler.transform_all(&rows);
        assert_eq!(t[0], [-1.0, -1.0, -1.0]);
        assert_eq!(t[1], [1.0, 1.0, 1.0]);
    }

    #[test]
    fn constant_column_becomes_identity_minus_mean() {
        let rows = [[5.0, 1.0, 100.0], [5.0, 3.0, 100.0], [5.0, 5.0, 100.0]];
        let scaler = StandardScaler::fit(&rows).unwrap();

        assert_eq!(scaler.scale()[0], 1.0);
        assert_eq!(scaler.scale()[2], 1.0);
        for row in scaler.transform_all(&rows) {
            assert_eq!(row[0], 0.0);
            assert_eq!(row[2], 0.0);
        }

        // Unseen values shift by the training mean only.
        let t = scaler.transform(&[7.0, 3.0, 90.0]);
        assert_eq!(t[0], 2.0);
        assert_eq!(t[2], -10.0);
    }

    #[test]
    fn uses_training_statistics_for_new_rows() {
        let scaler = StandardScaler::fit(&[[2.0, 0.0, 0.0], [4.0, 0.0, 0.0]]).unwrap();
        let before = scaler.clone();
        let _ = scaler.transform(&[100.0, 6.0, 1e9]);
        assert_eq!(scaler, before);
        assert_eq!(scaler.transform(&[6.0, 0.0, 0.0])[0], 3.0);
    }

    #[test]
    fn rejects_empty_and_non_finite_input() {
        assert!(matches!(StandardScaler::fit(&[]), Err(AiError::Data(_))));
        assert!(matches!(
            StandardScaler::fit(&[[f64::NAN, 0.0, 0.0]]),
            Err(AiError::NumericFit(_))
        ));
    }
}
