//! Strongly-typed identifiers used across the domain.

use serde::{Deserialize, Serialize};

/// Identifier of a medicine in the caller's catalog.
///
/// The catalog lives in the surrounding web application, so the identifier is
/// opaque here (document-store object ids, SKUs, ...) and carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MedicineId(String);

impl MedicineId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for MedicineId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for MedicineId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for MedicineId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<MedicineId> for String {
    fn from(value: MedicineId) -> Self {
        value.0
    }
}
