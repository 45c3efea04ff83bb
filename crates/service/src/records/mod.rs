use async_trait::async_trait;
use models::{Record, RecordPatch};
use serde_json::Value;

use crate::errors::ServiceError;

/// Trait abstraction for the records store (list + partial update).
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// The stored rows exactly as persisted, in store order.
    async fn list(&self) -> Result<Vec<Value>, ServiceError>;
    /// Merge `patch` into the record with `id`, persist, return the merged record.
    async fn patch(&self, id: &str, patch: RecordPatch) -> Result<Record, ServiceError>;
}
