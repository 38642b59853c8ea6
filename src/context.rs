//! App Context

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::purchases::{
    service::{LedgerService, PurchaseLedgerService},
    store::{LedgerStore, MemoryLedgerStore},
};

/// Application composition root.
///
/// External collaborators receive the ledger service seam from here and see
/// nothing behind it.
#[derive(Clone)]
pub struct AppContext {
    /// The purchase ledger seam.
    pub purchases: Arc<dyn LedgerService>,
}

impl AppContext {
    /// Builds a context backed by the in-memory ledger store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryLedgerStore::new()))
    }

    /// Builds a context over a caller-supplied store backend.
    #[must_use]
    pub fn with_store(store: Arc<dyn LedgerStore>) -> Self {
        Self {
            purchases: Arc::new(PurchaseLedgerService::new(store)),
        }
    }
}

impl Debug for AppContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}
