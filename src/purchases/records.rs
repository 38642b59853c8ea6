//! Purchase Records

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::{Timestamp, civil::Date};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier assigned to a purchase when it is appended to the ledger.
///
/// Ids are monotonically increasing and never reused. Gaps are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseId(u64);

impl PurchaseId {
    /// Creates an id from its numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        PurchaseId(value)
    }

    /// The numeric value of this id.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl Display for PurchaseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// Purchase Record
///
/// A committed ledger entry. Records are immutable once appended; a
/// correction is a new record, never an update in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    /// Ledger-assigned identifier.
    pub id: PurchaseId,

    /// Product identity key: trimmed, case-sensitive.
    pub product_name: String,

    /// Price paid, exact decimal stored to two decimal places.
    pub price: Decimal,

    /// Calendar date of the purchase.
    pub purchase_date: Date,

    /// Insertion time, assigned by the store.
    pub created_at: Timestamp,
}
