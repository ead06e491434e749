//! Leave ledgers.
//!
//! Both the company-wide bulk ledger and the per-employee ledger are sparse
//! maps from a [`PayMonth`] key to a leave count. Keys are normalized on
//! the way in, so `"06-2024"` and `"6-2024"` address the same entry.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::lenient::parse_decimal;
use super::PayMonth;

/// Largest leave count a ledger entry can hold.
pub const MAX_LEAVE_DAYS: Decimal = Decimal::from_parts(366, 0, 0, false, 0);

/// A sparse month-year → leave-count map.
///
/// # Examples
///
/// ```
/// use payroll_engine::models::{LeaveLedger, PayMonth};
/// use rust_decimal::Decimal;
///
/// let june = PayMonth::new(6, 2024).unwrap();
/// let mut ledger = LeaveLedger::default();
/// assert_eq!(ledger.get(june), Decimal::ZERO);
///
/// ledger.set(june, Decimal::new(15, 1));
/// assert_eq!(ledger.get(june), Decimal::new(15, 1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LeaveLedger(BTreeMap<String, Decimal>);

impl LeaveLedger {
    /// Returns the leave count recorded for `month`, or zero.
    pub fn get(&self, month: PayMonth) -> Decimal {
        self.0
            .get(&month.to_string())
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Sets the leave count for `month`, overwriting any previous value.
    ///
    /// Counts are clamped to `0..=MAX_LEAVE_DAYS`.
    pub fn set(&mut self, month: PayMonth, leaves: Decimal) {
        self.0
            .insert(month.to_string(), leaves.clamp(Decimal::ZERO, MAX_LEAVE_DAYS));
    }

    /// Number of months with an entry.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the ledger has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(key, value)| (key.as_str(), *value))
    }
}

impl<'de> Deserialize<'de> for LeaveLedger {
    /// Reads a stored ledger, normalizing keys and dropping entries whose
    /// key or value cannot be interpreted.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?;
        let mut ledger = LeaveLedger::default();
        for (key, value) in raw.unwrap_or_default() {
            let Ok(month) = key.parse::<PayMonth>() else {
                continue;
            };
            if let Some(leaves) = parse_decimal(&value).filter(|v| *v >= Decimal::ZERO) {
                ledger.set(month, leaves);
            }
        }
        Ok(ledger)
    }
}
