//! Property tests for the file registry's ordering, removal and search rules.

use proptest::prelude::*;
use sharecloudly::core::{FileRecord, FileRegistry};

const NAMES: &[&str] = &[
    "report.pdf",
    "Photo.PNG",
    "notes.txt",
    "clip.mp4",
    "Budget.xlsx",
    "song.mp3",
    "README",
];
const MIMES: &[&str] = &[
    "application/pdf",
    "image/png",
    "text/plain",
    "video/mp4",
    "application/vnd.ms-excel",
    "audio/mpeg",
    "",
];

fn arb_record() -> impl Strategy<Value = FileRecord> {
    (0..NAMES.len(), 0..MIMES.len(), any::<u32>()).prop_map(|(n, m, size)| {
        FileRecord::new(NAMES[n], MIMES[m], u64::from(size))
    })
}

fn arb_batches() -> impl Strategy<Value = Vec<Vec<FileRecord>>> {
    prop::collection::vec(prop::collection::vec(arb_record(), 0..6), 0..6)
}

fn arb_query() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        "[a-zA-Z./]{1,4}",
        Just("PDF".to_string()),
        Just("image/".to_string()),
    ]
}

fn registry_from(batches: &[Vec<FileRecord>]) -> FileRegistry {
    let mut registry = FileRegistry::new();
    for batch in batches {
        registry.add_batch(batch.clone()).unwrap();
    }
    registry
}

proptest! {
    #[test]
    fn size_is_sum_of_batches_and_latest_batch_comes_first(batches in arb_batches()) {
        let registry = registry_from(&batches);

        let total: usize = batches.iter().map(Vec::len).sum();
        prop_assert_eq!(registry.len(), total);

        let expected: Vec<_> = batches.iter().rev().flatten().map(|r| r.id.clone()).collect();
        let actual: Vec<_> = registry.files().iter().map(|r| r.id.clone()).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn removing_twice_equals_removing_once(batches in arb_batches(), pick in any::<prop::sample::Index>()) {
        let mut registry = registry_from(&batches);
        prop_assume!(!registry.is_empty());
        let id = registry.files()[pick.index(registry.len())].id.to_string();

        prop_assert!(registry.remove(&id).is_some());
        let after_first = registry.files().to_vec();
        prop_assert!(registry.remove(&id).is_none());
        prop_assert_eq!(registry.files(), after_first.as_slice());
    }

    #[test]
    fn blank_query_returns_full_view(batches in arb_batches(), blanks in "[ \t]{0,3}") {
        let registry = registry_from(&batches);
        prop_assert_eq!(registry.search(&blanks), registry.files().to_vec());
    }

    #[test]
    fn search_ignores_case(batches in arb_batches(), query in arb_query()) {
        let registry = registry_from(&batches);
        prop_assert_eq!(
            registry.search(&query.to_uppercase()),
            registry.search(&query.to_lowercase())
        );
    }

    #[test]
    fn search_results_are_an_ordered_subset_that_match(batches in arb_batches(), query in arb_query()) {
        let registry = registry_from(&batches);
        let results = registry.search(&query);

        // Ordered subset: walking the full view finds every result in turn.
        let mut full = registry.files().iter();
        for result in &results {
            prop_assert!(full.any(|r| r == result));
        }

        if !query.trim().is_empty() {
            let needle = query.to_lowercase();
            for result in &results {
                prop_assert!(
                    result.name.to_lowercase().contains(&needle)
                        || result.mime_type.to_lowercase().contains(&needle)
                );
            }
        }
    }
}
