//! Purchase draft validation.

use jiff::civil::Date;
use rust_decimal::Decimal;

use crate::purchases::{
    data::{PurchaseDraft, ValidatedPurchase},
    errors::{PurchaseField, ValidationError, ValidationErrors},
};

/// Checks a draft against every admission rule and normalizes it on success.
///
/// Rules are evaluated independently, never short-circuited, so the caller
/// sees every violated field at once. `today` is the calendar date the
/// record would be created on; purchases dated after it are rejected, not
/// clamped. No precision coercion happens here: the price is kept exactly
/// as parsed.
///
/// # Errors
///
/// Returns [`ValidationErrors`] listing each violated field.
pub fn validate(
    draft: &PurchaseDraft,
    today: Date,
) -> Result<ValidatedPurchase, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let product_name = draft.product_name.trim();

    if product_name.is_empty() {
        errors.push(PurchaseField::ProductName, ValidationError::Required);
    }

    let price = check_price(&draft.price, &mut errors);
    let purchase_date = check_date(&draft.purchase_date, today, &mut errors);

    match (price, purchase_date) {
        (Some(price), Some(purchase_date)) if errors.is_empty() => Ok(ValidatedPurchase {
            product_name: product_name.to_owned(),
            price,
            purchase_date,
        }),
        _ => Err(errors),
    }
}

fn check_price(raw: &str, errors: &mut ValidationErrors) -> Option<Decimal> {
    let raw = raw.trim();

    if raw.is_empty() {
        errors.push(PurchaseField::Price, ValidationError::Required);
        return None;
    }

    let Ok(price) = raw.parse::<Decimal>() else {
        errors.push(PurchaseField::Price, ValidationError::NotANumber);
        return None;
    };

    if price <= Decimal::ZERO {
        errors.push(PurchaseField::Price, ValidationError::NonPositive);
        return None;
    }

    Some(price)
}

fn check_date(raw: &str, today: Date, errors: &mut ValidationErrors) -> Option<Date> {
    let raw = raw.trim();

    if raw.is_empty() {
        errors.push(PurchaseField::PurchaseDate, ValidationError::Required);
        return None;
    }

    let Ok(date) = raw.parse::<Date>() else {
        errors.push(PurchaseField::PurchaseDate, ValidationError::NotADate);
        return None;
    };

    if date > today {
        errors.push(PurchaseField::PurchaseDate, ValidationError::InFuture);
        return None;
    }

    Some(date)
}
