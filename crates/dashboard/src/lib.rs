//! Headless model of the prices table.
//! - `table`: rows plus sorting, column/global filters and pagination state.
//! - `cells`: editable price and availability cells with optimistic update.
//! - `client`: HTTP access to the records endpoints.

pub mod errors;
pub mod columns;
pub mod filters;
pub mod pagination;
pub mod table;
pub mod cells;
pub mod client;

pub use client::{RecordUpdater, RecordsClient};
pub use columns::{Column, SortDirection, SortKey};
pub use filters::{ColumnFilter, PriceFilter};
pub use table::RecordsTable;
