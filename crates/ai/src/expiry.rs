//! Expiry alert evaluator.
//!
//! Classifies catalog items by days remaining until expiry:
//! - `days <= 7` (including already expired): critical
//! - `7 < days <= 30`: warning
//! - otherwise no alert
//!
//! A missing or unparsable expiry date aborts the whole evaluation; no partial
//! alert list is returned.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use meditrack_core::{DomainError, MedicineId, days_between, parse_calendar_date};

use crate::result::{AiError, AiResult};
use crate::snapshot::MedicineSnapshot;

/// Items expiring within this many days raise an alert.
pub const ALERT_WINDOW_DAYS: i64 = 30;

/// Items expiring within this many days (or already expired) are critical.
pub const CRITICAL_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Warning,
    Critical,
}

impl AlertLevel {
    /// Severity for an item expiring in `days_until_expiry` days, if it warrants an alert.
    pub fn classify(days_until_expiry: i64) -> Option<Self> {
        if days_until_expiry > ALERT_WINDOW_DAYS {
            None
        } else if days_until_expiry <= CRITICAL_WINDOW_DAYS {
            Some(AlertLevel::Critical)
        } else {
            Some(AlertLevel::Warning)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryAlert {
    pub medicine_id: Option<MedicineId>,
    pub medicine_name: Option<String>,
    /// The caller's `expiryDate`, echoed as supplied.
    pub expiry_date: String,
    /// Negative once the item has expired.
    pub days_until_expiry: i64,
    pub alert_level: AlertLevel,
    pub stock: u64,
}

/// Evaluate `medicines` against `today`, preserving input order.
pub fn evaluate_expiry(
    medicines: &[MedicineSnapshot],
    today: NaiveDate,
) -> AiResult<Vec<ExpiryAlert>> {
    let mut alerts = Vec::new();

    for (idx, medicine) in medicines.iter().enumerate() {
        let (raw, expiry_date) = expiry_date_of(medicine).map_err(|e| {
            AiError::data(format!("medicine {} ({}): {e}", idx, describe(medicine)))
        })?;

        let days_until_expiry = days_between(today, expiry_date);
        if let Some(alert_level) = AlertLevel::classify(days_until_expiry) {
            alerts.push(ExpiryAlert {
                medicine_id: medicine.id.clone(),
                medicine_name: medicine.name.clone(),
                expiry_date: raw.to_string(),
                days_until_expiry,
                alert_level,
                stock: medicine.current_stock,
            });
        }
    }

    Ok(alerts)
}

fn expiry_date_of(medicine: &MedicineSnapshot) -> Result<(&str, NaiveDate), DomainError> {
    let raw = medicine
        .expiry_date
        .as_deref()
        .ok_or(DomainError::missing("expiryDate"))?;
    Ok((raw, parse_calendar_date(raw)?))
}

fn describe(medicine: &MedicineSnapshot) -> String {
    match (&medicine.id, &medicine.name) {
        (Some(id), _) => format!("id {id}"),
        (None, Some(name)) => format!("name {name}"),
        (None, None) => "unidentified".to_string(),
    }
}
