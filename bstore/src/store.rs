//! State store trait, backend configuration, and in-memory backend.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use bcommon::BoxFuture;

use crate::error::StoreError;
use crate::filesystem::FilesystemStateStore;
use crate::types::SessionRecord;

pub trait StateStore: Send + Sync {
    fn load<'a>(&'a self) -> BoxFuture<'a, Result<Option<SessionRecord>, StoreError>>;

    fn save<'a>(&'a self, record: SessionRecord) -> BoxFuture<'a, Result<(), StoreError>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Filesystem { root: PathBuf },
    InMemory,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::Filesystem {
            root: default_store_root(),
        }
    }
}

pub fn default_store_root() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("banter")
}

pub fn create_state_store(config: StoreConfig) -> Result<Arc<dyn StateStore>, StoreError> {
    match config {
        StoreConfig::Filesystem { root } => Ok(Arc::new(FilesystemStateStore::new(root)?)),
        StoreConfig::InMemory => Ok(Arc::new(InMemoryStateStore::new())),
    }
}

pub fn create_default_state_store() -> Result<Arc<dyn StateStore>, StoreError> {
    create_state_store(StoreConfig::default())
}

#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    record: Mutex<Option<SessionRecord>>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for InMemoryStateStore {
    fn load<'a>(&'a self) -> BoxFuture<'a, Result<Option<SessionRecord>, StoreError>> {
        Box::pin(async move {
            let record = self
                .record
                .lock()
                .map_err(|_| StoreError::storage("state store lock poisoned"))?;

            Ok(record.clone())
        })
    }

    fn save<'a>(&'a self, record: SessionRecord) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            let mut slot = self
                .record
                .lock()
                .map_err(|_| StoreError::storage("state store lock poisoned"))?;

            *slot = Some(record);
            Ok(())
        })
    }
}
