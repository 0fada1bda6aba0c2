//! This module is responsible for mutating the application state by applying filters.
//!
//! It takes the `AppState` and recomputes `filtered_files` from the registry,
//! the search query and the kind filter.

use crate::app::state::AppState;
use crate::core::SearchFilter;

/// Applies all current filters to the registry to generate the visible list.
pub fn apply_filters(state: &mut AppState) {
    let filter = SearchFilter {
        query: state.search_query.clone(),
        kind: state.kind_filter,
    };
    state.filtered_files = state.registry.filter(&filter);
}
