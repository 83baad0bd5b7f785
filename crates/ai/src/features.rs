//! Feature builder: turns raw usage history into regression inputs.
//!
//! Each historical record contributes one row `[month, day_of_week, current_stock]`
//! and one target (`demand`). Rows and targets stay in input order, one-to-one.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use meditrack_core::{DomainError, parse_calendar_date, weekday_index};

use crate::result::{AiError, AiResult};

/// Number of columns in a feature row.
pub const FEATURE_COUNT: usize = 3;

/// Column names, in row order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = ["month", "day_of_week", "current_stock"];

/// One observed day of usage for one medicine, as supplied by the caller.
///
/// Fields are optional on the wire; absence is reported as a data error by
/// [`build_training_set`] rather than at deserialization time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalUsageRecord {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub current_stock: Option<i64>,
    #[serde(default)]
    pub demand: Option<i64>,
}

impl HistoricalUsageRecord {
    pub fn new(date: impl Into<String>, current_stock: i64, demand: i64) -> Self {
        Self {
            date: Some(date.into()),
            current_stock: Some(current_stock),
            demand: Some(demand),
        }
    }
}

/// Fixed-shape regression input: calendar month, weekday (Monday = 0), stock on hand.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FeatureVector {
    month: u8,
    day_of_week: u8,
    current_stock: u64,
}

impl FeatureVector {
    /// Build a feature vector, rejecting out-of-range calendar components.
    pub fn new(month: u32, day_of_week: u32, current_stock: u64) -> AiResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(AiError::data(format!("month must be in 1..=12, got {month}")));
        }
        if day_of_week > 6 {
            return Err(AiError::data(format!(
                "day_of_week must be in 0..=6 (Monday = 0), got {day_of_week}"
            )));
        }
        Ok(Self {
            month: month as u8,
            day_of_week: day_of_week as u8,
            current_stock,
        })
    }

    /// Derive the calendar components from `date`.
    pub fn from_date(date: NaiveDate, current_stock: u64) -> Self {
        Self {
            month: date.month() as u8,
            day_of_week: weekday_index(date),
            current_stock,
        }
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day_of_week(&self) -> u8 {
        self.day_of_week
    }

    pub fn current_stock(&self) -> u64 {
        self.current_stock
    }

    pub fn to_row(&self) -> [f64; FEATURE_COUNT] {
        [
            f64::from(self.month),
            f64::from(self.day_of_week),
            self.current_stock as f64,
        ]
    }
}

/// Parallel feature rows and demand targets.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
    pub features: Vec<FeatureVector>,
    pub targets: Vec<f64>,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn rows(&self) -> Vec<[f64; FEATURE_COUNT]> {
        self.features.iter().map(FeatureVector::to_row).collect()
    }
}

/// Build the training set. Any malformed record rejects the whole batch.
pub fn build_training_set(records: &[HistoricalUsageRecord]) -> AiResult<TrainingSet> {
    if records.is_empty() {
        return Err(AiError::data("historical data is empty"));
    }

    let mut features = Vec::with_capacity(records.len());
    let mut targets = Vec::with_capacity(records.len());

    for (idx, record) in records.iter().enumerate() {
        let (feature, demand) =
            extract(record).map_err(|e| AiError::data(format!("record {idx}: {e}")))?;
        features.push(feature);
        targets.push(demand as f64);
    }

    Ok(TrainingSet { features, targets })
}

fn extract(record: &HistoricalUsageRecord) -> Result<(FeatureVector, u64), DomainError> {
    let raw_date = record.date.as_deref().ok_or(DomainError::missing("date"))?;
    let current_stock = record
        .current_stock
        .ok_or(DomainError::missing("current_stock"))?;
    let demand = record.demand.ok_or(DomainError::missing("demand"))?;

    let current_stock = u64::try_from(current_stock).map_err(|_| {
        DomainError::validation(format!("current_stock must be non-negative, got {current_stock}"))
    })?;
    let demand = u64::try_from(demand).map_err(|_| {
        DomainError::validation(format!("demand must be non-negative, got {demand}"))
    })?;

    let date = parse_calendar_date(raw_date)?;
    Ok((FeatureVector::from_date(date, current_stock), demand))
}
