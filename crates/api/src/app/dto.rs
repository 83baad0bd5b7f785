use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use meditrack_ai::{
    AiResult, ExpiryAlert, FeatureVector, HistoricalUsageRecord, MedicineSnapshot,
    StockRecommendation, TrainingReport, UsageEntry,
};
use meditrack_core::weekday_index;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct TrainRequest {
    #[serde(default)]
    pub historical_data: Vec<HistoricalUsageRecord>,
}

/// Prediction input. Omitted calendar fields default to the invocation date;
/// omitted stock defaults to 0.
#[derive(Debug, Default, Deserialize)]
pub struct PredictRequest {
    pub month: Option<u32>,
    pub day_of_week: Option<u32>,
    pub current_stock: Option<u64>,
}

impl PredictRequest {
    pub fn into_features(self, today: NaiveDate) -> AiResult<FeatureVector> {
        FeatureVector::new(
            self.month.unwrap_or_else(|| today.month()),
            self.day_of_week
                .unwrap_or_else(|| u32::from(weekday_index(today))),
            self.current_stock.unwrap_or(0),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ExpiryAlertsRequest {
    #[serde(default)]
    pub medicines: Vec<MedicineSnapshot>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StockRecommendationsRequest {
    #[serde(default)]
    pub medicines: Vec<MedicineSnapshot>,
    #[serde(default)]
    pub usage_history: Vec<UsageEntry>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct TrainResponse {
    pub status: &'static str,
    pub message: String,
    pub observations: usize,
    pub r_squared: f64,
}

impl From<TrainingReport> for TrainResponse {
    fn from(report: TrainingReport) -> Self {
        Self {
            status: "success",
            message: report.message,
            observations: report.observations,
            r_squared: report.r_squared,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub predicted_demand: u64,
}

#[derive(Debug, Serialize)]
pub struct ExpiryAlertsResponse {
    pub alerts: Vec<ExpiryAlert>,
}

#[derive(Debug, Serialize)]
pub struct StockRecommendationsResponse {
    pub recommendations: Vec<StockRecommendation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_request_defaults_to_invocation_date() {
        // 2024-02-15 was a Thursday.
        let today = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        let fv = PredictRequest::default().into_features(today).unwrap();
        assert_eq!((fv.month(), fv.day_of_week(), fv.current_stock()), (2, 3, 0));

        let explicit = PredictRequest {
            month: Some(11),
            day_of_week: Some(6),
            current_stock: Some(42),
        };
        let fv = explicit.into_features(today).unwrap();
        assert_eq!((fv.month(), fv.day_of_week(), fv.current_stock()), (11, 6, 42));
    }

    #[test]
    fn predict_request_rejects_out_of_range_calendar_values() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        let bad = PredictRequest {
            month: Some(13),
            ..PredictRequest::default()
        };
        assert!(bad.into_features(today).is_err());
    }
}
