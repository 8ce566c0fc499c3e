//! Shared application state.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::draft::session::DraftSession;
use crate::preview::assembler::CachedCompanySource;
use crate::store::{HttpLetterStore, LetterStore, StoreConfig};

pub struct AppState {
    pub store: Arc<dyn LetterStore>,
    pub companies: CachedCompanySource,
    pub drafts: RwLock<HashMap<Uuid, DraftSession>>,
}

impl AppState {
    pub fn new(config: StoreConfig) -> Self {
        let store: Arc<dyn LetterStore> = Arc::new(HttpLetterStore::new(config));
        Self::with_store(store)
    }

    /// Build state around any store implementation. Tests use this with an
    /// in-memory mock store.
    pub fn with_store(store: Arc<dyn LetterStore>) -> Self {
        let companies = CachedCompanySource::new(store.clone());

        AppState {
            store,
            companies,
            drafts: RwLock::new(HashMap::new()),
        }
    }
}
