//! Demand forecast model.
//!
//! Lifecycle: a [`ForecastModel`] starts untrained. Each successful
//! [`ForecastModel::train`] fits a fresh scaler + regression from the full
//! supplied history and replaces whatever was there before. Failed training
//! leaves the previous state untouched.
//!
//! Concurrency: the fitted parameters live in an immutable [`FittedForecast`]
//! behind `RwLock<Option<Arc<_>>>`. Training fits off-lock and swaps the `Arc`
//! in under the write lock; prediction clones the `Arc` under the read lock.
//! A concurrent reader therefore sees either the old or the new model, never a
//! mix of both.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::features::{FeatureVector, HistoricalUsageRecord, build_training_set};
use crate::regression::LinearRegression;
use crate::result::{AiError, AiResult};
use crate::scaler::StandardScaler;

/// Confirmation message returned by a successful `train`.
pub const TRAINED_MESSAGE: &str = "Model trained successfully";

/// Immutable snapshot of a fitted model: training-time scaler plus regression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FittedForecast {
    scaler: StandardScaler,
    regression: LinearRegression,
}

impl FittedForecast {
    /// Fit a new model from historical usage. Pure: nothing is shared or mutated.
    pub fn fit(records: &[HistoricalUsageRecord]) -> AiResult<Self> {
        let set = build_training_set(records)?;
        let rows = set.rows();

        let scaler = StandardScaler::fit(&rows)?;
        let scaled = scaler.transform_all(&rows);
        let regression = LinearRegression::fit(&scaled, &set.targets)?;

        Ok(Self { scaler, regression })
    }

    /// Raw (unclamped) regression output for `features`.
    pub fn predict_raw(&self, features: &FeatureVector) -> f64 {
        let scaled = self.scaler.transform(&features.to_row());
        self.regression.predict(&scaled)
    }

    /// Predicted demand, clamped at 0 and truncated toward zero.
    pub fn predict(&self, features: &FeatureVector) -> AiResult<u64> {
        clamp_demand(self.predict_raw(features))
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn regression(&self) -> &LinearRegression {
        &self.regression
    }
}

/// Convert a raw regression output into a non-negative whole demand.
///
/// Negative values clamp to 0; positive values are truncated (so 4.9 -> 4);
/// values beyond `u64::MAX` saturate.
pub fn clamp_demand(raw: f64) -> AiResult<u64> {
    if !raw.is_finite() {
        return Err(AiError::numeric(format!("prediction is not finite ({raw})")));
    }
    if raw <= 0.0 {
        return Ok(0);
    }
    Ok(raw.trunc() as u64)
}

#[derive(Debug, Clone)]
struct TrainedState {
    fitted: FittedForecast,
    trained_at: DateTime<Utc>,
}

/// Outcome of a successful training call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    pub message: String,
    pub observations: usize,
    pub r_squared: f64,
    pub trained_at: DateTime<Utc>,
}

/// Per-feature regression coefficients (in scaled feature space).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCoefficients {
    pub month: f64,
    pub day_of_week: f64,
    pub current_stock: f64,
}

/// Read-only description of the model's current state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSummary {
    pub trained: bool,
    pub observations: Option<usize>,
    pub intercept: Option<f64>,
    pub coefficients: Option<FeatureCoefficients>,
    pub r_squared: Option<f64>,
    pub trained_at: Option<DateTime<Utc>>,
}

/// Process-lifetime demand forecast model.
#[derive(Debug, Default)]
pub struct ForecastModel {
    state: RwLock<Option<Arc<TrainedState>>>,
}

impl ForecastModel {
    /// Create an untrained model.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_trained(&self) -> bool {
        self.snapshot().is_some()
    }

    /// Fit a fresh model from `records` and swap it in.
    ///
    /// On error the previously trained (or untrained) state is preserved.
    pub fn train(&self, records: &[HistoricalUsageRecord]) -> AiResult<TrainingReport> {
        let fitted = match FittedForecast::fit(records) {
            Ok(f) => f,
            Err(e) => {
                warn!(records = records.len(), error = %e, "forecast training rejected");
                return Err(e);
            }
        };

        let state = Arc::new(TrainedState {
            fitted,
            trained_at: Utc::now(),
        });
        let report = TrainingReport {
            message: TRAINED_MESSAGE.to_string(),
            observations: state.fitted.regression.n_observations(),
            r_squared: state.fitted.regression.r_squared(),
            trained_at: state.trained_at,
        };

        *self.state.write().unwrap_or_else(PoisonError::into_inner) = Some(state);

        info!(
            observations = report.observations,
            r_squared = report.r_squared,
            "forecast model trained"
        );
        Ok(report)
    }

    /// Predict demand for `features` using the currently trained parameters.
    pub fn predict(&self, features: &FeatureVector) -> AiResult<u64> {
        let state = self.snapshot().ok_or(AiError::ModelNotTrained)?;
        let demand = state.fitted.predict(features)?;
        debug!(
            month = features.month(),
            day_of_week = features.day_of_week(),
            current_stock = features.current_stock(),
            demand,
            "forecast prediction"
        );
        Ok(demand)
    }

    /// Clone of the fitted parameters, if trained.
    pub fn fitted(&self) -> Option<FittedForecast> {
        self.snapshot().map(|s| s.fitted.clone())
    }

    pub fn summary(&self) -> ModelSummary {
        match self.snapshot() {
            None => ModelSummary {
                trained: false,
                observations: None,
                intercept: None,
                coefficients: None,
                r_squared: None,
                trained_at: None,
            },
            Some(state) => {
                let reg = &state.fitted.regression;
                let [month, day_of_week, current_stock] = *reg.coefficients();
                ModelSummary {
                    trained: true,
                    observations: Some(reg.n_observations()),
                    intercept: Some(reg.intercept()),
                    coefficients: Some(FeatureCoefficients {
                        month,
                        day_of_week,
                        current_stock,
                    }),
                    r_squared: Some(reg.r_squared()),
                    trained_at: Some(state.trained_at),
                }
            }
        }
    }

    fn snapshot(&self) -> Option<Arc<TrainedState>> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
