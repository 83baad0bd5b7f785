//! Stock recommendation engine.
//!
//! One average daily usage is computed over the whole supplied history and
//! applied to every medicine in the batch. History is not scoped per medicine.
//!
//! ```text
//! recommended = max(min_stock_level * 2, round(avg_daily_usage * 30))   // history present
//! recommended = min_stock_level * 2                                     // history empty
//! ```
//!
//! A recommendation is emitted only when `current_stock < recommended`.

use serde::{Deserialize, Serialize};

use meditrack_core::MedicineId;

use crate::snapshot::MedicineSnapshot;

/// Days of supply the recommended stock should cover.
pub const SUPPLY_DAYS: f64 = 30.0;

/// Multiplier applied to the minimum stock level as a floor.
pub const MIN_STOCK_MULTIPLIER: u64 = 2;

/// One usage observation. A missing quantity counts as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEntry {
    #[serde(default)]
    pub quantity: Option<i64>,
}

impl UsageEntry {
    pub fn new(quantity: i64) -> Self {
        Self {
            quantity: Some(quantity),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRecommendation {
    pub medicine_id: Option<MedicineId>,
    pub medicine_name: Option<String>,
    pub current_stock: u64,
    pub recommended_stock: u64,
    pub reorder_quantity: u64,
    pub priority: Priority,
}

/// Arithmetic mean of `quantity` over the whole history, or `None` if empty.
pub fn average_daily_usage(usage_history: &[UsageEntry]) -> Option<f64> {
    if usage_history.is_empty() {
        return None;
    }
    let total: f64 = usage_history
        .iter()
        .map(|u| u.quantity.unwrap_or(0) as f64)
        .sum();
    Some(total / usage_history.len() as f64)
}

/// Target stock level for a medicine with the given minimum, given the batch-wide average.
pub fn recommended_stock(min_stock_level: u64, average_daily_usage: Option<f64>) -> u64 {
    let floor = min_stock_level.saturating_mul(MIN_STOCK_MULTIPLIER);
    match average_daily_usage {
        // Negative averages (net returns) round to a negative supply and lose to the floor.
        Some(avg) => floor.max(supply_for(avg)),
        None => floor,
    }
}

fn supply_for(avg: f64) -> u64 {
    let supply = (avg * SUPPLY_DAYS).round();
    if supply.is_finite() && supply > 0.0 {
        supply as u64
    } else {
        0
    }
}

/// Produce reorder guidance for every under-stocked medicine, preserving input order.
pub fn recommend_stock(
    medicines: &[MedicineSnapshot],
    usage_history: &[UsageEntry],
) -> Vec<StockRecommendation> {
    let avg = average_daily_usage(usage_history);

    medicines
        .iter()
        .filter_map(|m| {
            let recommended = recommended_stock(m.min_stock_level, avg);
            if m.current_stock >= recommended {
                return None;
            }
            let priority = if m.current_stock < m.min_stock_level {
                Priority::High
            } else {
                Priority::Medium
            };
            Some(StockRecommendation {
                medicine_id: m.id.clone(),
                medicine_name: m.name.clone(),
                current_stock: m.current_stock,
                recommended_stock: recommended,
                reorder_quantity: recommended - m.current_stock,
                priority,
            })
        })
        .collect()
}
