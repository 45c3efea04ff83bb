use std::path::{Path, PathBuf};
use std::sync::Arc;

use models::{Record, RecordPatch};
use serde_json::{Map, Value};
use tracing::info;

use crate::errors::ServiceError;
use crate::records::RecordStore;
use crate::storage::json_list_store::JsonListStore;

/// File storage: the records document persisted as a JSON array.
///
/// Rows are kept as raw JSON objects. A patch rewrites only the `price` and
/// `on_sale` keys of its target row; every other key and row is written back
/// as it was read.
pub struct FileRecordStore {
    store: JsonListStore<Value>,
}

fn row_id(row: &Value) -> Option<&str> {
    row.get("id").and_then(Value::as_str)
}

fn find_row<'a>(rows: &'a mut [Value], id: &str) -> Result<&'a mut Map<String, Value>, ServiceError> {
    rows.iter_mut()
        .find(|r| row_id(r) == Some(id))
        .and_then(Value::as_object_mut)
        .ok_or_else(|| ServiceError::not_found("record", id))
}

fn to_record(id: &str, row: &Map<String, Value>) -> Result<Record, ServiceError> {
    serde_json::from_value(Value::Object(row.clone()))
        .map_err(|e| ServiceError::Storage(format!("record {id} is malformed: {e}")))
}

fn merge(row: &mut Map<String, Value>, patch: &RecordPatch) -> Result<(), ServiceError> {
    if let Some(price) = patch.price {
        row.insert("price".into(), serde_json::to_value(price).map_err(ServiceError::storage)?);
    }
    if let Some(on_sale) = patch.on_sale {
        row.insert("on_sale".into(), Value::String(on_sale.as_str().into()));
    }
    Ok(())
}

impl FileRecordStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self { store: JsonListStore::new(path) })
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    pub async fn list(&self) -> Result<Vec<Value>, ServiceError> {
        self.store.load().await
    }

    /// Shallow-merge a validated patch into the record with `id`.
    ///
    /// An unknown id, or a target row that is not a valid record, fails
    /// before anything is written. An empty patch writes nothing.
    pub async fn patch(&self, id: &str, patch: RecordPatch) -> Result<Record, ServiceError> {
        if patch.is_empty() {
            let mut rows = self.store.load().await?;
            return to_record(id, find_row(&mut rows, id)?);
        }

        let updated = self
            .store
            .update(|rows| {
                let row = find_row(rows, id)?;
                merge(row, &patch)?;
                to_record(id, row)
            })
            .await?;
        info!(
            record_id = %id,
            price = %updated.price,
            on_sale = %updated.on_sale,
            "record patched"
        );
        Ok(updated)
    }
}

#[async_trait::async_trait]
impl RecordStore for FileRecordStore {
    async fn list(&self) -> Result<Vec<Value>, ServiceError> { self.list().await }
    async fn patch(&self, id: &str, patch: RecordPatch) -> Result<Record, ServiceError> { self.patch(id, patch).await }
}
