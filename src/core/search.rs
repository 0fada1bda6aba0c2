//! Provides logic for filtering and searching lists of `FileRecord`s.

use super::FileRecord;
use crate::utils::file_detection::FileKind;
use rayon::prelude::*;

/// Criteria applied to the registry to derive the visible list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    /// Raw text from the search box. Blank means "no text filter".
    pub query: String,
    /// Restricts the view to one kind of file (the sidebar folders).
    pub kind: Option<FileKind>,
}

impl SearchFilter {
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            kind: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() && self.kind.is_none()
    }
}

/// A utility struct for searching and filtering record lists.
///
/// This struct is stateless and provides methods as associated functions.
pub struct SearchEngine;

impl SearchEngine {
    /// Filters a slice of records, keeping their relative order.
    ///
    /// Computed fresh on every call; there is no index to keep in sync.
    pub fn filter_records(records: &[FileRecord], filter: &SearchFilter) -> Vec<FileRecord> {
        if filter.is_empty() {
            return records.to_vec();
        }

        // Lowercase once instead of per record.
        let needle = filter.query.to_lowercase();
        let filter = SearchFilter {
            query: needle,
            kind: filter.kind,
        };

        records
            .par_iter()
            .filter(|record| Self::matches_prepared(record, &filter))
            .cloned()
            .collect()
    }

    fn matches_prepared(record: &FileRecord, filter: &SearchFilter) -> bool {
        if let Some(kind) = filter.kind {
            if !kind.covers(record.kind()) {
                return false;
            }
        }

        if filter.query.trim().is_empty() {
            return true;
        }

        Self::matches_search_query(record, &filter.query)
    }

    /// Case-insensitive substring match on name or mime type. `query` must
    /// already be lowercase.
    fn matches_search_query(record: &FileRecord, query: &str) -> bool {
        record.name.to_lowercase().contains(query) || record.mime_type.to_lowercase().contains(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, mime: &str) -> FileRecord {
        FileRecord::new(name, mime, 100).with_id(id)
    }

    fn create_test_records() -> Vec<FileRecord> {
        vec![
            record("1", "report.pdf", "application/pdf"),
            record("2", "photo.png", "image/png"),
            record("3", "Holiday.JPG", "image/jpeg"),
            record("4", "notes.txt", "text/plain"),
            record("5", "clip.mp4", "video/mp4"),
            record("6", "budget.xlsx", "application/vnd.ms-excel"),
        ]
    }

    fn ids(records: &[FileRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let records = create_test_records();
        let result = SearchEngine::filter_records(&records, &SearchFilter::default());
        assert_eq!(result, records);
    }

    #[test]
    fn test_whitespace_query_is_no_filter() {
        let records = create_test_records();
        let result = SearchEngine::filter_records(&records, &SearchFilter::query("   \t"));
        assert_eq!(result.len(), records.len());
    }

    #[test]
    fn test_filter_by_name_case_insensitive() {
        let records = create_test_records();
        let upper = SearchEngine::filter_records(&records, &SearchFilter::query("HOLIDAY"));
        let lower = SearchEngine::filter_records(&records, &SearchFilter::query("holiday"));
        assert_eq!(ids(&upper), vec!["3"]);
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_filter_matches_mime_type() {
        let records = create_test_records();
        let result = SearchEngine::filter_records(&records, &SearchFilter::query("image/"));
        assert_eq!(ids(&result), vec!["2", "3"]);

        let pdf = SearchEngine::filter_records(&records, &SearchFilter::query("PDF"));
        assert_eq!(ids(&pdf), vec!["1"]);
    }

    #[test]
    fn test_filter_by_kind() {
        let records = create_test_records();
        let filter = SearchFilter {
            query: String::new(),
            kind: Some(FileKind::Image),
        };
        let result = SearchEngine::filter_records(&records, &filter);
        assert_eq!(ids(&result), vec!["2", "3"]);
    }

    #[test]
    fn test_filter_by_kind_and_query() {
        let records = create_test_records();
        let filter = SearchFilter {
            query: "png".to_string(),
            kind: Some(FileKind::Image),
        };
        let result = SearchEngine::filter_records(&records, &filter);
        assert_eq!(ids(&result), vec!["2"]);
    }

    #[test]
    fn test_documents_kind_covers_text_and_spreadsheets() {
        let records = create_test_records();
        let filter = SearchFilter {
            query: String::new(),
            kind: Some(FileKind::Text),
        };
        let result = SearchEngine::filter_records(&records, &filter);
        assert_eq!(ids(&result), vec!["1", "4", "6"]);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let records = create_test_records();
        let result = SearchEngine::filter_records(&records, &SearchFilter::query("zzz"));
        assert!(result.is_empty());
    }
}
