//! `meditrack-ai`
//!
//! **Responsibility:** the inventory-analytics subsystem.
//!
//! - Demand forecasting: feature builder, fitted scaler, OLS regression, and a
//!   process-lifetime [`ForecastModel`].
//! - Expiry alerts over a catalog snapshot.
//! - Reorder recommendations from aggregate usage history.
//!
//! Everything here is synchronous and IO-free. Inputs are supplied wholesale by
//! the caller on every call; only the forecast model retains state.

pub mod expiry;
pub mod features;
pub mod forecast;
pub mod recommendation;
pub mod regression;
pub mod result;
pub mod scaler;
pub mod snapshot;

pub use expiry::{AlertLevel, ExpiryAlert, evaluate_expiry};
pub use features::{FeatureVector, HistoricalUsageRecord, TrainingSet, build_training_set};
pub use forecast::{FittedForecast, ForecastModel, ModelSummary, TrainingReport};
pub use recommendation::{Priority, StockRecommendation, UsageEntry, recommend_stock};
pub use result::{AiError, AiResult};
pub use snapshot::MedicineSnapshot;
