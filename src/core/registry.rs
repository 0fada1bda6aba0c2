//! The in-memory, ordered store of uploaded file records.

use super::{CoreError, FileId, FileRecord, SearchEngine, SearchFilter};
use std::collections::HashSet;

/// Holds the canonical list of `FileRecord`s, most recent batch first.
///
/// All mutation goes through `add_batch` and `remove`; everything else is a
/// read. The id set mirrors `records` exactly.
#[derive(Debug, Default, Clone)]
pub struct FileRegistry {
    records: Vec<FileRecord>,
    ids: HashSet<FileId>,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends a batch, keeping the batch's own order.
    ///
    /// Fails without inserting anything if `check_batch` refuses it.
    pub fn add_batch(&mut self, batch: Vec<FileRecord>) -> Result<(), CoreError> {
        self.check_batch(&batch)?;

        tracing::info!("Adding batch of {} records to the registry", batch.len());
        self.ids.extend(batch.iter().map(|r| r.id.clone()));
        let mut merged = batch;
        merged.append(&mut self.records);
        self.records = merged;
        Ok(())
    }

    /// Verifies that `add_batch` would accept `batch`, without touching the store.
    ///
    /// Refuses any id that is already registered or appears twice within the
    /// batch. Such a collision means id generation is broken, so it is logged
    /// as an error.
    pub fn check_batch(&self, batch: &[FileRecord]) -> Result<(), CoreError> {
        let mut incoming = HashSet::with_capacity(batch.len());
        for record in batch {
            if self.contains(&record.id) || !incoming.insert(&record.id) {
                tracing::error!(
                    "Refusing batch of {} records: duplicate id {}",
                    batch.len(),
                    record.id
                );
                return Err(CoreError::DuplicateId(record.id.clone()));
            }
        }
        Ok(())
    }

    /// Removes the record with the given id. Absent ids are a no-op.
    pub fn remove(&mut self, id: &str) -> Option<FileRecord> {
        let position = self.records.iter().position(|r| r.id.as_str() == id)?;
        let removed = self.records.remove(position);
        self.ids.remove(&removed.id);
        tracing::info!("Removed '{}' ({}) from the registry", removed.name, removed.id);
        Some(removed)
    }

    /// Case-insensitive substring search over name and mime type.
    ///
    /// A blank query returns the full ordered list.
    pub fn search(&self, query: &str) -> Vec<FileRecord> {
        SearchEngine::filter_records(&self.records, &SearchFilter::query(query))
    }

    /// Applies a full filter (query plus optional kind).
    pub fn filter(&self, filter: &SearchFilter) -> Vec<FileRecord> {
        SearchEngine::filter_records(&self.records, filter)
    }

    /// The full ordered view.
    pub fn files(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&FileRecord> {
        self.records.iter().find(|r| r.id.as_str() == id)
    }

    pub fn contains(&self, id: &FileId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_helpers::{capture_logs, record};

    fn ids(records: &[FileRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_batches_are_prepended_as_a_group() {
        let mut registry = FileRegistry::new();
        registry
            .add_batch(vec![record("a", "a.txt", "text/plain"), record("b", "b.txt", "text/plain")])
            .unwrap();
        registry
            .add_batch(vec![record("c", "c.txt", "text/plain"), record("d", "d.txt", "text/plain")])
            .unwrap();

        assert_eq!(ids(registry.files()), vec!["c", "d", "a", "b"]);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_empty_batch_is_accepted() {
        let mut registry = FileRegistry::new();
        registry.add_batch(Vec::new()).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duplicate_against_registry_is_rejected_atomically() {
        let mut registry = FileRegistry::new();
        registry
            .add_batch(vec![record("a", "a.txt", "text/plain")])
            .unwrap();

        let mut result = Ok(());
        let logs = capture_logs(|| {
            result = registry.add_batch(vec![
                record("x", "x.txt", "text/plain"),
                record("a", "again.txt", "text/plain"),
            ]);
        });

        let err = result.unwrap_err();
        assert!(matches!(err, CoreError::DuplicateId(ref id) if id.as_str() == "a"));
        assert_eq!(ids(registry.files()), vec!["a"]);
        assert!(!registry.contains(&FileId::from("x")));
        assert!(logs.contains("ERROR"));
        assert!(logs.contains("duplicate id a"));
    }

    #[test]
    fn test_check_batch_leaves_the_store_untouched() {
        let mut registry = FileRegistry::new();
        registry
            .add_batch(vec![record("a", "a.txt", "text/plain")])
            .unwrap();

        assert!(registry
            .check_batch(&[record("b", "b.txt", "text/plain")])
            .is_ok());
        assert!(matches!(
            registry.check_batch(&[record("a", "a.txt", "text/plain")]),
            Err(CoreError::DuplicateId(_))
        ));
        assert_eq!(ids(registry.files()), vec!["a"]);
        assert!(!registry.contains(&FileId::from("b")));
    }

    #[test]
    fn test_duplicate_within_batch_is_rejected() {
        let mut registry = FileRegistry::new();
        let err = registry
            .add_batch(vec![record("a", "a.txt", "text/plain"), record("a", "b.txt", "text/plain")])
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateId(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut registry = FileRegistry::new();
        registry
            .add_batch(vec![record("a", "a.txt", "text/plain"), record("b", "b.txt", "text/plain")])
            .unwrap();

        let removed = registry.remove("a").unwrap();
        assert_eq!(removed.name, "a.txt");
        let snapshot = registry.files().to_vec();

        assert!(registry.remove("a").is_none());
        assert_eq!(registry.files(), snapshot.as_slice());
        assert!(registry.remove("never-existed").is_none());
    }

    #[test]
    fn test_removed_id_can_not_be_found_but_others_can() {
        let mut registry = FileRegistry::new();
        registry
            .add_batch(vec![record("a", "a.txt", "text/plain"), record("b", "b.txt", "text/plain")])
            .unwrap();
        registry.remove("a");
        assert!(registry.get("a").is_none());
        assert!(!registry.contains(&FileId::from("a")));
        assert_eq!(registry.get("b").map(|r| r.name.as_str()), Some("b.txt"));
    }

    #[test]
    fn test_end_to_end_search_and_delete() {
        let mut registry = FileRegistry::new();
        registry
            .add_batch(vec![
                record("a", "report.pdf", "application/pdf"),
                record("b", "photo.png", "image/png"),
            ])
            .unwrap();

        assert_eq!(ids(&registry.search("photo")), vec!["b"]);
        registry.remove("b");
        assert!(registry.search("photo").is_empty());
        assert_eq!(ids(&registry.search("")), vec!["a"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut registry = FileRegistry::new();
        registry
            .add_batch(vec![
                record("a", "report.pdf", "application/pdf"),
                record("b", "scan.PDF", "application/pdf"),
                record("c", "photo.png", "image/png"),
            ])
            .unwrap();
        assert_eq!(registry.search("PDF"), registry.search("pdf"));
        assert_eq!(ids(&registry.search("pdf")), vec!["a", "b"]);
    }
}
