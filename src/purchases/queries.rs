//! Period-scoped queries over ledger records.
//!
//! The query engine is pure: every operation takes a snapshot of the ledger
//! and a [`DateRange`] and touches nothing else. Products are an implicit
//! entity, aggregated per call by grouping records on their name.

use jiff::civil::Date;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

use crate::purchases::{
    data::{Bilan, DateRange, TopProduct},
    records::PurchaseRecord,
};

/// Records within the range, most recent purchase date first.
///
/// Same-day records are ordered by id descending, so the latest-inserted
/// record of a day comes first. An empty match is an empty list, not an
/// error.
#[must_use]
pub fn list_by_range(records: &[PurchaseRecord], range: DateRange) -> Vec<PurchaseRecord> {
    let mut matching: Vec<PurchaseRecord> = records
        .iter()
        .filter(|record| range.contains(record.purchase_date))
        .cloned()
        .collect();

    matching.sort_by(|a, b| {
        b.purchase_date
            .cmp(&a.purchase_date)
            .then_with(|| b.id.cmp(&a.id))
    });

    matching
}

struct ProductStats {
    count: u64,
    latest: Date,
}

/// The most frequently purchased product within the range.
///
/// Ties on count go to the product whose most recent in-range purchase is
/// latest; a remaining tie goes to the lexicographically smallest name, so
/// the winner is deterministic. Returns `None` when nothing matches.
#[must_use]
pub fn top_product(records: &[PurchaseRecord], range: DateRange) -> Option<TopProduct> {
    let mut stats: FxHashMap<&str, ProductStats> = FxHashMap::default();

    for record in records
        .iter()
        .filter(|record| range.contains(record.purchase_date))
    {
        stats
            .entry(record.product_name.as_str())
            .and_modify(|entry| {
                entry.count += 1;
                entry.latest = entry.latest.max(record.purchase_date);
            })
            .or_insert(ProductStats {
                count: 1,
                latest: record.purchase_date,
            });
    }

    stats
        .into_iter()
        .max_by(|(name_a, a), (name_b, b)| {
            a.count
                .cmp(&b.count)
                .then_with(|| a.latest.cmp(&b.latest))
                // Reversed so the lexicographically smallest name wins the max.
                .then_with(|| name_b.cmp(name_a))
        })
        .map(|(name, entry)| TopProduct {
            product_name: name.to_owned(),
            count: entry.count,
        })
}

/// Exact spend total and contributing record count for the range.
///
/// Both values come from a single pass over one snapshot, so a displayed
/// count can never drift from a displayed sum. An empty match yields a zero
/// total, not an error.
#[must_use]
pub fn bilan(records: &[PurchaseRecord], range: DateRange) -> Bilan {
    records
        .iter()
        .filter(|record| range.contains(record.purchase_date))
        .fold(
            Bilan {
                total: Decimal::ZERO,
                count: 0,
            },
            |acc, record| Bilan {
                total: acc.total + record.price,
                count: acc.count + 1,
            },
        )
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, civil::date};
    use testresult::TestResult;

    use crate::purchases::records::PurchaseId;

    use super::*;

    fn record(id: u64, product_name: &str, price: &str, purchase_date: Date) -> PurchaseRecord {
        PurchaseRecord {
            id: PurchaseId::new(id),
            product_name: product_name.to_string(),
            price: price.parse().expect("test price must parse"),
            purchase_date,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn groceries() -> Vec<PurchaseRecord> {
        vec![
            record(1, "Milk", "1.50", date(2024, 1, 1)),
            record(2, "Rice", "3.00", date(2024, 1, 2)),
            record(3, "Milk", "1.50", date(2024, 1, 3)),
        ]
    }

    #[test]
    fn list_orders_most_recent_first() {
        let listed = list_by_range(&groceries(), DateRange::unbounded());

        let ids: Vec<u64> = listed.iter().map(|r| r.id.value()).collect();

        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn list_breaks_same_day_ties_by_id_descending() {
        let records = vec![
            record(1, "Milk", "1.50", date(2024, 1, 1)),
            record(2, "Rice", "3.00", date(2024, 1, 1)),
            record(3, "Pasta", "2.00", date(2024, 1, 1)),
        ];

        let listed = list_by_range(&records, DateRange::unbounded());

        let ids: Vec<u64> = listed.iter().map(|r| r.id.value()).collect();

        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn list_filters_by_inclusive_bounds() -> TestResult {
        let range = DateRange::new(Some(date(2024, 1, 2)), Some(date(2024, 1, 3)))?;

        let listed = list_by_range(&groceries(), range);

        let ids: Vec<u64> = listed.iter().map(|r| r.id.value()).collect();

        assert_eq!(ids, vec![3, 2]);

        Ok(())
    }

    #[test]
    fn list_with_no_matches_is_empty_not_an_error() -> TestResult {
        let range = DateRange::new(Some(date(2025, 1, 1)), Some(date(2025, 12, 31)))?;

        assert!(list_by_range(&groceries(), range).is_empty());

        Ok(())
    }

    #[test]
    fn top_product_counts_occurrences() {
        let top = top_product(&groceries(), DateRange::unbounded());

        assert_eq!(
            top,
            Some(TopProduct {
                product_name: "Milk".to_string(),
                count: 2,
            })
        );
    }

    #[test]
    fn top_product_tie_goes_to_most_recent_purchase() {
        let records = vec![
            record(1, "Milk", "1.50", date(2024, 1, 1)),
            record(2, "Rice", "3.00", date(2024, 1, 5)),
        ];

        let top = top_product(&records, DateRange::unbounded());

        assert_eq!(
            top,
            Some(TopProduct {
                product_name: "Rice".to_string(),
                count: 1,
            })
        );
    }

    #[test]
    fn top_product_full_tie_goes_to_smallest_name() {
        // Equal counts, same purchase date: lexicographic order decides.
        let records = vec![
            record(1, "Rice", "3.00", date(2024, 1, 1)),
            record(2, "Milk", "1.50", date(2024, 1, 1)),
        ];

        let top = top_product(&records, DateRange::unbounded());

        assert_eq!(
            top,
            Some(TopProduct {
                product_name: "Milk".to_string(),
                count: 1,
            })
        );
    }

    #[test]
    fn top_product_recency_only_counts_in_range_purchases() -> TestResult {
        // Milk's most recent purchase overall is outside the range; within
        // the range Rice is the more recent of the two.
        let records = vec![
            record(1, "Milk", "1.50", date(2024, 1, 1)),
            record(2, "Rice", "3.00", date(2024, 1, 2)),
            record(3, "Milk", "1.50", date(2024, 2, 1)),
        ];

        let range = DateRange::new(Some(date(2024, 1, 1)), Some(date(2024, 1, 31)))?;

        let top = top_product(&records, range);

        assert_eq!(
            top,
            Some(TopProduct {
                product_name: "Rice".to_string(),
                count: 1,
            })
        );

        Ok(())
    }

    #[test]
    fn top_product_grouping_is_case_sensitive() {
        let records = vec![
            record(1, "milk", "1.50", date(2024, 1, 1)),
            record(2, "Milk", "1.50", date(2024, 1, 1)),
            record(3, "milk", "1.50", date(2024, 1, 2)),
        ];

        let top = top_product(&records, DateRange::unbounded());

        assert_eq!(
            top,
            Some(TopProduct {
                product_name: "milk".to_string(),
                count: 2,
            })
        );
    }

    #[test]
    fn top_product_of_nothing_is_none() {
        assert_eq!(top_product(&[], DateRange::unbounded()), None);
    }

    #[test]
    fn bilan_sums_exactly_and_counts() -> TestResult {
        let range = DateRange::new(Some(date(2024, 1, 1)), Some(date(2024, 1, 3)))?;

        let summary = bilan(&groceries(), range);

        assert_eq!(summary.total, "6.00".parse()?);
        assert_eq!(summary.count, 3);

        Ok(())
    }

    #[test]
    fn bilan_has_no_floating_point_drift() -> TestResult {
        let records = vec![
            record(1, "Gum", "0.10", date(2024, 1, 1)),
            record(2, "Gum", "0.10", date(2024, 1, 1)),
            record(3, "Gum", "0.10", date(2024, 1, 1)),
        ];

        let summary = bilan(&records, DateRange::unbounded());

        assert_eq!(summary.total, "0.30".parse()?);

        Ok(())
    }

    #[test]
    fn bilan_of_nothing_is_zero_not_an_error() -> TestResult {
        let range = DateRange::new(Some(date(2025, 1, 1)), Some(date(2025, 12, 31)))?;

        let summary = bilan(&groceries(), range);

        assert_eq!(summary.total, Decimal::ZERO);
        assert_eq!(summary.count, 0);

        Ok(())
    }
}
