//! Purchases Data

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::purchases::errors::InvalidRange;

/// Raw purchase submission, as captured from a form or API client.
///
/// All fields are strings so that validation can parse them itself and
/// report every violated field together instead of failing field by field
/// at deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseDraft {
    /// Product name as typed.
    pub product_name: String,

    /// Price as typed, e.g. `"1250.00"`.
    pub price: String,

    /// Purchase date as an ISO calendar date string, e.g. `"2024-01-31"`.
    pub purchase_date: String,
}

/// A draft that passed validation: trimmed name, parsed price and date.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPurchase {
    /// Trimmed product name.
    pub product_name: String,

    /// Parsed price, exact decimal, strictly positive.
    pub price: Decimal,

    /// Parsed purchase date, not in the future.
    pub purchase_date: Date,
}

/// Inclusive calendar-date filter over ledger queries.
///
/// Either bound may be omitted, leaving that side unbounded. A range is
/// valid by construction: [`DateRange::new`] rejects out-of-order bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    start: Option<Date>,
    end: Option<Date>,
}

impl DateRange {
    /// Creates a range from optional inclusive bounds.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRange`] when both bounds are given and the start is
    /// after the end.
    pub fn new(start: Option<Date>, end: Option<Date>) -> Result<Self, InvalidRange> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(InvalidRange { start, end });
            }
        }

        Ok(DateRange { start, end })
    }

    /// The range with no bounds; matches every record.
    #[must_use]
    pub const fn unbounded() -> Self {
        DateRange {
            start: None,
            end: None,
        }
    }

    /// Whether the given date falls within the range.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }

    /// Inclusive lower bound, if any.
    #[must_use]
    pub const fn start(&self) -> Option<Date> {
        self.start
    }

    /// Inclusive upper bound, if any.
    #[must_use]
    pub const fn end(&self) -> Option<Date> {
        self.end
    }
}

/// Most frequently purchased product within a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    /// Winning product name.
    pub product_name: String,

    /// Number of matching purchases of that product.
    pub count: u64,
}

/// Period spend summary.
///
/// Carries the exact total alongside the number of contributing records, so
/// a caller never needs a second query to reconcile a displayed count with a
/// displayed sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bilan {
    /// Exact decimal sum of matching prices.
    pub total: Decimal,

    /// Number of records contributing to the total.
    pub count: u64,
}
