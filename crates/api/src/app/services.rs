use std::sync::Arc;

use chrono::{Local, NaiveDate};

use meditrack_ai::{
    AiError, AiResult, ExpiryAlert, FeatureVector, ForecastModel, HistoricalUsageRecord,
    MedicineSnapshot, ModelSummary, StockRecommendation, TrainingReport, UsageEntry,
    evaluate_expiry, recommend_stock,
};

/// Process-wide analytics services shared by every handler.
///
/// Owns the single [`ForecastModel`]; the expiry and recommendation engines are
/// stateless and called directly.
#[derive(Debug, Default)]
pub struct AppServices {
    forecast: Arc<ForecastModel>,
}

pub fn build_services() -> AppServices {
    AppServices::default()
}

impl AppServices {
    pub fn forecast(&self) -> &Arc<ForecastModel> {
        &self.forecast
    }

    /// Train on a blocking worker so a large history does not stall the runtime.
    pub async fn train(&self, records: Vec<HistoricalUsageRecord>) -> AiResult<TrainingReport> {
        let model = self.forecast.clone();
        tokio::task::spawn_blocking(move || model.train(&records))
            .await
            .map_err(|e| AiError::numeric(format!("training task failed: {e}")))?
    }

    pub fn predict(&self, features: &FeatureVector) -> AiResult<u64> {
        self.forecast.predict(features)
    }

    pub fn model_summary(&self) -> ModelSummary {
        self.forecast.summary()
    }

    pub fn expiry_alerts(&self, medicines: &[MedicineSnapshot]) -> AiResult<Vec<ExpiryAlert>> {
        evaluate_expiry(medicines, today())
    }

    pub fn stock_recommendations(
        &self,
        medicines: &[MedicineSnapshot],
        usage_history: &[UsageEntry],
    ) -> Vec<StockRecommendation> {
        recommend_stock(medicines, usage_history)
    }
}

/// Invocation date in the server's local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
