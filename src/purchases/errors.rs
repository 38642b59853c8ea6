//! Purchase ledger errors.

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::civil::Date;
use serde::Serialize;
use thiserror::Error;

/// Field of a purchase draft that failed validation.
///
/// Serializes to the wire field name, so transports can attach each error to
/// its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PurchaseField {
    /// The `productName` input.
    ProductName,

    /// The `price` input.
    Price,

    /// The `purchaseDate` input.
    PurchaseDate,
}

impl Display for PurchaseField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            PurchaseField::ProductName => "product name",
            PurchaseField::Price => "price",
            PurchaseField::PurchaseDate => "purchase date",
        };

        f.write_str(name)
    }
}

/// Why a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The field was empty or all-whitespace.
    #[error("is required")]
    Required,

    /// The value could not be parsed as a finite decimal number.
    #[error("must be a number")]
    NotANumber,

    /// The parsed value was zero or negative.
    #[error("must be greater than zero")]
    NonPositive,

    /// The value could not be parsed as an ISO calendar date.
    #[error("must be a calendar date")]
    NotADate,

    /// The date is later than the day the record would be created.
    #[error("must not be in the future")]
    InFuture,
}

/// Every rule violation found in one submitted draft, keyed by field.
///
/// Rules are evaluated independently, so a draft with an empty name and a
/// negative price reports both problems in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<(PurchaseField, ValidationError)>,
}

impl ValidationErrors {
    pub(crate) fn push(&mut self, field: PurchaseField, error: ValidationError) {
        self.errors.push((field, error));
    }

    /// Whether any rule was violated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of violations recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// All violations, in the order the fields were checked.
    pub fn iter(&self) -> impl Iterator<Item = (PurchaseField, ValidationError)> + '_ {
        self.errors.iter().copied()
    }

    /// Violations recorded against one field.
    pub fn for_field(&self, field: PurchaseField) -> impl Iterator<Item = ValidationError> + '_ {
        self.errors
            .iter()
            .filter(move |(f, _)| *f == field)
            .map(|(_, error)| *error)
    }

    /// One human-readable message per violation, paired with its field.
    #[must_use]
    pub fn messages(&self) -> Vec<(PurchaseField, String)> {
        self.errors
            .iter()
            .map(|(field, error)| (*field, format!("{field} {error}")))
            .collect()
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, (field, error)) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }

            write!(f, "{field} {error}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A query range whose start date is after its end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("start date {start} is after end date {end}")]
pub struct InvalidRange {
    /// Requested inclusive start.
    pub start: Date,

    /// Requested inclusive end.
    pub end: Date,
}

/// Errors raised by a ledger store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing storage could not be reached.
    ///
    /// Transient: callers should retry with backoff rather than drop the
    /// write. A failed append is never partially applied.
    #[error("storage unavailable")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors returned by the ledger service seam.
#[derive(Debug, Error)]
pub enum LedgerServiceError {
    /// The submitted draft violated one or more validation rules.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// A query range had its bounds out of order.
    #[error(transparent)]
    InvalidRange(#[from] InvalidRange),

    /// The ledger store could not serve the call.
    #[error(transparent)]
    Store(#[from] StoreError),
}
