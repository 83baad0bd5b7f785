use serde::{Deserialize, Serialize};

use meditrack_core::MedicineId;

/// Point-in-time view of one catalog entry, supplied by the caller per request.
///
/// The catalog itself is owned by the surrounding application; these snapshots
/// are never retained. Wire names follow the catalog's camelCase JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineSnapshot {
    #[serde(default, alias = "_id")]
    pub id: Option<MedicineId>,
    #[serde(default)]
    pub name: Option<String>,
    /// Raw expiry date; parsed only by the expiry evaluator.
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub current_stock: u64,
    #[serde(default)]
    pub min_stock_level: u64,
}

impl MedicineSnapshot {
    pub fn new(id: impl Into<MedicineId>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_expiry_date(mut self, expiry_date: impl Into<String>) -> Self {
        self.expiry_date = Some(expiry_date.into());
        self
    }

    pub fn with_stock(mut self, current_stock: u64, min_stock_level: u64) -> Self {
        self.current_stock = current_stock;
        self.min_stock_level = min_stock_level;
        self
    }
}
