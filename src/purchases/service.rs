//! Purchase ledger service.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use async_trait::async_trait;
use jiff::{Zoned, civil::Date};
use mockall::automock;
use tracing::debug;

use crate::purchases::{
    data::{Bilan, DateRange, PurchaseDraft, TopProduct},
    errors::LedgerServiceError,
    queries,
    records::PurchaseRecord,
    store::LedgerStore,
    validate::validate,
};

/// The request/response seam external callers see.
///
/// Transport layers and UIs talk to the ledger exclusively through this
/// trait; validation, storage, and querying stay behind it. Calls carry no
/// implicit ordering between each other: a query issued after an awaited
/// `record_purchase` observes its record, a concurrent one may not.
#[automock]
#[async_trait]
pub trait LedgerService: Send + Sync {
    /// Validates and commits one purchase.
    ///
    /// # Errors
    ///
    /// Returns the per-field [`ValidationErrors`](crate::purchases::errors::ValidationErrors)
    /// for a rejected draft, or the store failure for an unreachable backend.
    async fn record_purchase(
        &self,
        draft: PurchaseDraft,
    ) -> Result<PurchaseRecord, LedgerServiceError>;

    /// Purchase history for the period, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRange`](crate::purchases::errors::InvalidRange) for
    /// out-of-order bounds, or the store failure for an unreachable backend.
    async fn history(
        &self,
        start: Option<Date>,
        end: Option<Date>,
    ) -> Result<Vec<PurchaseRecord>, LedgerServiceError>;

    /// Most frequently purchased product in the period, if any records match.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRange`](crate::purchases::errors::InvalidRange) for
    /// out-of-order bounds, or the store failure for an unreachable backend.
    async fn top_product(
        &self,
        start: Option<Date>,
        end: Option<Date>,
    ) -> Result<Option<TopProduct>, LedgerServiceError>;

    /// Exact spend total and record count for the period, from one read.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRange`](crate::purchases::errors::InvalidRange) for
    /// out-of-order bounds, or the store failure for an unreachable backend.
    async fn bilan(
        &self,
        start: Option<Date>,
        end: Option<Date>,
    ) -> Result<Bilan, LedgerServiceError>;
}

/// [`LedgerService`] over a [`LedgerStore`] backend.
#[derive(Clone)]
pub struct PurchaseLedgerService {
    store: Arc<dyn LedgerStore>,
}

impl PurchaseLedgerService {
    /// Creates a service over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Validates the bounds, then takes one ledger snapshot for the queries.
    /// The range check runs before the store is touched.
    async fn snapshot(
        &self,
        start: Option<Date>,
        end: Option<Date>,
    ) -> Result<(Vec<PurchaseRecord>, DateRange), LedgerServiceError> {
        let range = DateRange::new(start, end)?;
        let records = self.store.list_all().await?;

        Ok((records, range))
    }
}

impl Debug for PurchaseLedgerService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PurchaseLedgerService").finish_non_exhaustive()
    }
}

#[async_trait]
impl LedgerService for PurchaseLedgerService {
    #[tracing::instrument(name = "purchases.service.record_purchase", skip(self, draft), err)]
    async fn record_purchase(
        &self,
        draft: PurchaseDraft,
    ) -> Result<PurchaseRecord, LedgerServiceError> {
        let today = Zoned::now().date();
        let validated = validate(&draft, today)?;

        let record = self.store.append(validated).await?;

        debug!(id = record.id.value(), "recorded purchase");

        Ok(record)
    }

    async fn history(
        &self,
        start: Option<Date>,
        end: Option<Date>,
    ) -> Result<Vec<PurchaseRecord>, LedgerServiceError> {
        let (records, range) = self.snapshot(start, end).await?;

        Ok(queries::list_by_range(&records, range))
    }

    async fn top_product(
        &self,
        start: Option<Date>,
        end: Option<Date>,
    ) -> Result<Option<TopProduct>, LedgerServiceError> {
        let (records, range) = self.snapshot(start, end).await?;

        Ok(queries::top_product(&records, range))
    }

    async fn bilan(
        &self,
        start: Option<Date>,
        end: Option<Date>,
    ) -> Result<Bilan, LedgerServiceError> {
        let (records, range) = self.snapshot(start, end).await?;

        Ok(queries::bilan(&records, range))
    }
}
