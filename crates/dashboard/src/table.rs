use std::collections::HashMap;

use models::{Record, RecordPatch};
use tracing::{debug, warn};

use crate::client::{RecordUpdater, RecordsClient};
use crate::columns::{natural_cmp, Column, SortDirection, SortKey};
use crate::errors::{ClientError, EditError};
use crate::filters::{matches_global, normalize_query, ColumnFilter};
use crate::pagination::Pagination;

/// Rows plus the view state of the prices table.
///
/// Rows are kept in load order; views are derived on demand as
/// filtered → sorted → paginated.
#[derive(Clone, Debug, Default)]
pub struct RecordsTable {
    rows: Vec<Record>,
    sorting: Vec<SortKey>,
    filters: HashMap<Column, ColumnFilter>,
    global_filter: String,
    pagination: Pagination,
}

impl RecordsTable {
    pub fn new(rows: Vec<Record>) -> Self {
        Self { rows, ..Self::default() }
    }

    /// Fetch the rows once through the list endpoint.
    pub async fn load(client: &RecordsClient) -> Result<Self, ClientError> {
        Ok(Self::new(client.list().await?))
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn row(&self, id: &str) -> Option<&Record> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Replace the rows, keeping sorting and filters.
    pub fn set_rows(&mut self, rows: Vec<Record>) {
        self.rows = rows;
        self.clamp_page();
    }

    // ---- sorting ----

    pub fn sorting(&self) -> &[SortKey] {
        &self.sorting
    }

    pub fn set_sorting(&mut self, sorting: Vec<SortKey>) {
        self.sorting = sorting;
    }

    /// Cycle `column` through ascending → descending → unsorted.
    ///
    /// With `multi` the other sort keys are kept and a new column is appended.
    pub fn toggle_sort(&mut self, column: Column, multi: bool) {
        let current = self.sorting.iter().position(|k| k.column == column);
        let next = match current.map(|i| self.sorting[i].direction) {
            None => Some(SortKey::asc(column)),
            Some(SortDirection::Asc) => Some(SortKey::desc(column)),
            Some(SortDirection::Desc) => None,
        };
        if !multi {
            self.sorting = next.into_iter().collect();
            return;
        }
        match (current, next) {
            (Some(i), Some(key)) => self.sorting[i] = key,
            (Some(i), None) => {
                self.sorting.remove(i);
            }
            (None, Some(key)) => self.sorting.push(key),
            (None, None) => {}
        }
    }

    // ---- filters ----

    pub fn global_filter(&self) -> &str {
        &self.global_filter
    }

    pub fn set_global_filter(&mut self, text: impl Into<String>) {
        self.global_filter = text.into();
        self.pagination.page_index = 0;
    }

    pub fn filter(&self, column: Column) -> Option<&ColumnFilter> {
        self.filters.get(&column)
    }

    /// `None` removes the column's filter.
    pub fn set_filter(&mut self, column: Column, filter: Option<ColumnFilter>) {
        match filter {
            Some(f) => {
                self.filters.insert(column, f);
            }
            None => {
                self.filters.remove(&column);
            }
        }
        self.pagination.page_index = 0;
    }

    pub fn clear_filter(&mut self, column: Column) {
        self.set_filter(column, None);
    }

    /// Add or remove `value` in the column's multi-select; an emptied selection removes the filter.
    pub fn toggle_filter_value(&mut self, column: Column, value: &str) {
        let mut selected = match self.filters.get(&column) {
            Some(ColumnFilter::OneOf(values)) => values.clone(),
            _ => Vec::new(),
        };
        if let Some(i) = selected.iter().position(|v| v == value) {
            selected.remove(i);
        } else {
            selected.push(value.to_string());
        }
        let next = if selected.is_empty() { None } else { Some(ColumnFilter::OneOf(selected)) };
        self.set_filter(column, next);
    }

    /// Values currently selected in the column's multi-select.
    pub fn selected_values(&self, column: Column) -> &[String] {
        match self.filters.get(&column) {
            Some(ColumnFilter::OneOf(values)) => values,
            _ => &[],
        }
    }

    /// Clear the global filter and every column filter.
    pub fn reset_filters(&mut self) {
        self.global_filter.clear();
        self.filters.clear();
        self.pagination.page_index = 0;
    }

    fn passes(&self, r: &Record, query: &str, skip: Option<Column>) -> bool {
        matches_global(r, query)
            && self
                .filters
                .iter()
                .filter(|(c, _)| Some(**c) != skip)
                .all(|(c, f)| f.matches(*c, r))
    }

    // ---- row models ----

    /// Rows passing the global filter and all column filters, in load order.
    pub fn filtered_rows(&self) -> Vec<&Record> {
        let query = normalize_query(&self.global_filter);
        self.rows.iter().filter(|r| self.passes(r, &query, None)).collect()
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered_rows().len()
    }

    /// Filtered rows ordered by the sort keys; ties keep load order.
    pub fn sorted_rows(&self) -> Vec<&Record> {
        let mut rows = self.filtered_rows();
        if !self.sorting.is_empty() {
            rows.sort_by(|a, b| {
                self.sorting
                    .iter()
                    .map(|k| k.compare(a, b))
                    .find(|o| o.is_ne())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        rows
    }

    /// Rows of the current page.
    pub fn page_rows(&self) -> Vec<&Record> {
        let rows = self.sorted_rows();
        let range = self.pagination.range(rows.len());
        rows[range].to_vec()
    }

    /// Distinct values of `column` among rows passing every other filter, in natural order.
    pub fn facets(&self, column: Column) -> Vec<String> {
        let query = normalize_query(&self.global_filter);
        let mut values: Vec<String> = Vec::new();
        for r in self.rows.iter().filter(|r| self.passes(r, &query, Some(column))) {
            let v = column.display(r);
            if !values.contains(&v) {
                values.push(v);
            }
        }
        values.sort_by(|a, b| natural_cmp(a, b));
        values
    }

    // ---- pagination ----

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn set_page_size(&mut self, size: usize) {
        self.pagination = Pagination { page_index: 0, page_size: size }.normalize();
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count(self.filtered_count())
    }

    pub fn can_previous_page(&self) -> bool {
        self.pagination.can_previous()
    }

    pub fn can_next_page(&self) -> bool {
        self.pagination.can_next(self.filtered_count())
    }

    pub fn previous_page(&mut self) {
        if self.can_previous_page() {
            self.pagination.page_index -= 1;
        }
    }

    pub fn next_page(&mut self) {
        if self.can_next_page() {
            self.pagination.page_index += 1;
        }
    }

    pub fn set_page_index(&mut self, index: usize) {
        self.pagination.page_index = index;
        self.clamp_page();
    }

    fn clamp_page(&mut self) {
        let last = self.page_count().saturating_sub(1);
        if self.pagination.page_index > last {
            self.pagination.page_index = last;
        }
    }

    // ---- edits ----

    /// Apply `patch` to the local row, returning the row as it was.
    pub fn apply_local(&mut self, id: &str, patch: &RecordPatch) -> Option<Record> {
        let row = self.rows.iter_mut().find(|r| r.id == id)?;
        let previous = row.clone();
        row.apply(patch);
        Some(previous)
    }

    /// Put back a row captured by [`apply_local`](Self::apply_local), or take the server's copy.
    pub fn replace_row(&mut self, record: Record) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.id == record.id) {
            *row = record;
        }
    }

    /// Optimistically apply `patch`, send it, then reconcile with the
    /// server's record or roll the row back on failure.
    pub async fn commit_patch(
        &mut self,
        id: &str,
        patch: RecordPatch,
        updater: &dyn RecordUpdater,
    ) -> Result<Record, EditError> {
        let previous = self
            .apply_local(id, &patch)
            .ok_or_else(|| EditError::UnknownRow(id.to_string()))?;
        match updater.patch(id, &patch).await {
            Ok(saved) => {
                debug!(record_id = %id, "patch saved");
                self.replace_row(saved.clone());
                Ok(saved)
            }
            Err(e) => {
                warn!(record_id = %id, error = %e, "patch failed; rolling back");
                self.replace_row(previous);
                Err(EditError::Save(e))
            }
        }
    }
}
