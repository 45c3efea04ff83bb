use std::{ffi::OsString, path::{Path, PathBuf}};
use tokio::{fs, sync::Mutex};
use tracing::debug;

use crate::errors::ServiceError;

/// Generic JSON file-backed ordered list store.
///
/// The file holds a JSON array of `T`, pretty-printed with a trailing newline.
/// Every read goes to disk so edits made outside the process are picked up.
/// Writes replace the file through a sibling temp file and a rename, and
/// [`JsonListStore::update`] holds a process-wide lock across its
/// read-modify-write.
pub struct JsonListStore<T> {
    file_path: PathBuf,
    write_lock: Mutex<()>,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> JsonListStore<T>
where
    T: serde::Serialize + serde::de::DeserializeOwned,
{
    /// Bind the store to a path. The file is not created; records are seeded out of band.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into(), write_lock: Mutex::new(()), _marker: std::marker::PhantomData }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Read and parse the whole document.
    pub async fn load(&self) -> Result<Vec<T>, ServiceError> {
        let bytes = fs::read(&self.file_path).await.map_err(|e| {
            ServiceError::Storage(format!("read {}: {e}", self.file_path.display()))
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            ServiceError::Storage(format!("parse {}: {e}", self.file_path.display()))
        })
    }

    /// Serialize and replace the whole document.
    pub async fn save(&self, items: &[T]) -> Result<(), ServiceError> {
        let mut data = serde_json::to_vec_pretty(items).map_err(ServiceError::storage)?;
        data.push(b'\n');

        let tmp = self.temp_path();
        fs::write(&tmp, &data).await.map_err(|e| {
            ServiceError::Storage(format!("write {}: {e}", tmp.display()))
        })?;
        if let Err(e) = fs::rename(&tmp, &self.file_path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(ServiceError::Storage(format!("replace {}: {e}", self.file_path.display())));
        }
        debug!(store = %self.file_path.display(), bytes = data.len(), "store written");
        Ok(())
    }

    /// Load, mutate and persist under the write lock.
    ///
    /// When `f` fails nothing is written.
    pub async fn update<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, ServiceError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;
        let out = f(&mut items)?;
        self.save(&items).await?;
        Ok(out)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .file_path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("store.json"));
        name.push(".tmp");
        self.file_path.with_file_name(name)
    }
}
