//! Storage abstractions for service layer
//!
//! Contains reusable file-backed stores and helpers to avoid duplication
//! across services that persist small documents as JSON.

pub mod json_list_store;
