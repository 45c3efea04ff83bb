//! Service layer for the records store.
//! - `storage`: reusable JSON-file-backed persistence.
//! - `records`: the store abstraction used by HTTP handlers.
//! - `file`: the file-backed implementation of that abstraction.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod records;
pub mod file;
#[cfg(test)]
pub mod test_support;
