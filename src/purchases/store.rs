//! Ledger store.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::RoundingStrategy;
use tokio::sync::RwLock;
use tracing::debug;

use crate::purchases::{
    data::ValidatedPurchase,
    errors::StoreError,
    records::{PurchaseId, PurchaseRecord},
};

/// Decimal places kept for stored prices.
const PRICE_SCALE: u32 = 2;

/// Append-mostly source of truth for purchase records.
///
/// `append` must be atomic: a record is either fully visible to subsequent
/// reads or not visible at all, and concurrent appends must neither lose
/// records nor assign duplicate ids. Records never disappear once committed.
#[automock]
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Appends a validated purchase, assigning its id and creation time and
    /// quantizing the price to storage precision.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when the backing storage cannot
    /// be reached; the write is not partially applied.
    async fn append(&self, purchase: ValidatedPurchase) -> Result<PurchaseRecord, StoreError>;

    /// Every committed record, ordered by purchase date then id ascending.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when the backing storage cannot
    /// be reached.
    async fn list_all(&self) -> Result<Vec<PurchaseRecord>, StoreError>;
}

#[derive(Debug, Default)]
struct LedgerState {
    last_id: u64,
    records: Vec<PurchaseRecord>,
}

/// In-memory [`LedgerStore`].
///
/// Id assignment and the insert happen under one write lock, so appends
/// serialize while reads share the lock. Cloning shares the underlying
/// ledger.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedgerStore {
    state: Arc<RwLock<LedgerState>>,
}

impl MemoryLedgerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    #[tracing::instrument(
        name = "purchases.store.append",
        skip(self, purchase),
        fields(product_name = %purchase.product_name)
    )]
    async fn append(&self, purchase: ValidatedPurchase) -> Result<PurchaseRecord, StoreError> {
        let mut state = self.state.write().await;

        state.last_id += 1;
        let id = PurchaseId::new(state.last_id);

        let record = PurchaseRecord {
            id,
            product_name: purchase.product_name,
            price: purchase
                .price
                .round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero),
            purchase_date: purchase.purchase_date,
            created_at: Timestamp::now(),
        };

        state.records.push(record.clone());

        debug!(id = id.value(), "appended purchase");

        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<PurchaseRecord>, StoreError> {
        let state = self.state.read().await;

        let mut records = state.records.clone();

        records.sort_by(|a, b| {
            a.purchase_date
                .cmp(&b.purchase_date)
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(records)
    }
}
