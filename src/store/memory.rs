use crate::{
    common::{self, key},
    error::StoreError,
    gearbox, read,
    store::ItemStore,
    write,
};

use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{
    Mutex, MutexGuard,
    atomic::{AtomicBool, Ordering},
};

/// Records returned per page unless configured otherwise.
const DEFAULT_PAGE_SIZE: usize = 100;

/// In-process store with the same conditional semantics as the table.
///
/// Records are kept in insertion order and scanned in pages, so the
/// continuation logic of [`ItemStore::scan_all`] runs exactly as it does
/// against DynamoDB.
#[derive(Debug)]
pub struct MemoryStore {
    records: Mutex<IndexMap<key::Keys, common::Record>>,
    page_size: usize,
    unavailable: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store returning at most `page_size` records per scan page.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            records: Mutex::new(IndexMap::new()),
            page_size: page_size.max(1),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Store holding the sample catalog: three categories and five gearboxes.
    pub fn seeded() -> Result<Self, StoreError> {
        let store = Self::new();
        for record in gearbox::sample_catalog()? {
            store.insert(record);
        }
        Ok(store)
    }

    /// Store a record unconditionally, replacing any record under its keys.
    ///
    /// Records without string `PK`/`SK` attributes are ignored.
    pub fn insert(&self, record: common::Record) {
        if let Some(keys) = key::Keys::of_record(&record) {
            self.lock().insert(keys, record);
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store holds no record.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Stored record under `keys`, if any.
    pub fn get(&self, keys: &key::Keys) -> Option<common::Record> {
        self.lock().get(keys).cloned()
    }

    /// Make every subsequent operation fail with a storage error, or recover.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn lock(&self) -> MutexGuard<'_, IndexMap<key::Keys, common::Record>> {
        // a panic while holding the lock leaves the map itself consistent
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StoreError::storage("store unavailable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn scan_page(
        &self,
        exclusive_start_key: Option<common::Record>,
    ) -> Result<read::common::ReadPage, StoreError> {
        self.check_available()?;
        let records = self.lock();
        let start = match exclusive_start_key.as_ref().and_then(key::Keys::of_record) {
            Some(keys) => records.get_index_of(&keys).map_or(records.len(), |index| index + 1),
            None => 0,
        };
        let end = (start + self.page_size).min(records.len());
        let items: Vec<_> = records
            .values()
            .skip(start)
            .take(end.saturating_sub(start))
            .cloned()
            .collect();
        let last_evaluated_key = if end < records.len() {
            records
                .get_index(end - 1)
                .map(|(keys, _)| common::Record::from(keys.clone()))
        } else {
            None
        };
        Ok(read::common::ReadPage {
            items,
            last_evaluated_key,
        })
    }

    async fn create(&self, record: common::Record) -> Result<(), StoreError> {
        self.check_available()?;
        let keys = key::Keys::of_record(&record)
            .ok_or_else(|| StoreError::storage("record is missing its key attributes"))?;
        let mut records = self.lock();
        if records.contains_key(&keys) {
            return Err(StoreError::AlreadyExists);
        }
        records.insert(keys, record);
        Ok(())
    }

    async fn update(
        &self,
        keys: &key::Keys,
        assignments: write::update_item::Assignments,
    ) -> Result<(), StoreError> {
        self.check_available()?;
        let mut records = self.lock();
        let record = records.get_mut(keys).ok_or(StoreError::NotFound)?;
        record.extend(assignments.0);
        Ok(())
    }

    async fn delete(&self, keys: &key::Keys) -> Result<(), StoreError> {
        self.check_available()?;
        self.lock()
            .shift_remove(keys)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}
