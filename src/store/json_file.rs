//! Vehicle store backed by a single JSON document on disk.
//!
//! The whole collection is read at the start of every operation and
//! rewritten in full after every mutation. Mutations are serialized
//! through one async mutex held across the load-mutate-write cycle, so
//! two concurrent requests inside this process can't clobber each other.
//! Other processes writing the same file are not coordinated with.

use log::{debug, error, info};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::Mutex;

use crate::config::StorageConfig;
use crate::model::{Collection, Vehicle, VehicleFields, VehicleId};
use crate::store::error::{StoreError, StoreResult};
use crate::store::traits::VehicleStore;

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    pretty: bool,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: true,
            write_lock: Mutex::new(()),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.file).with_pretty(config.pretty)
    }

    /// Pretty-print the file on rewrite (the default) or write it compact
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Read and parse the backing file.
    ///
    /// A missing or blank file is an empty collection. Anything else
    /// that can't be read or parsed, or that repeats an id, is `Unavailable`.
    pub async fn load(&self) -> StoreResult<Collection> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist yet, starting empty", self.path.display());
                return Ok(Collection::default());
            }
            Err(e) => {
                error!("failed to read {}: {}", self.path.display(), e);
                return Err(self.unavailable(e));
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            debug!("{} is empty, starting empty", self.path.display());
            return Ok(Collection::default());
        }

        let collection: Collection = serde_json::from_slice(&bytes).map_err(|e| {
            error!("failed to parse {}: {}", self.path.display(), e);
            self.unavailable(e)
        })?;

        if let Some(id) = collection.duplicate_id() {
            error!("{} holds vehicle id {} more than once", self.path.display(), id);
            return Err(self.unavailable(format!("duplicate vehicle id {}", id)));
        }
        Ok(collection)
    }

    /// Serialize the collection and atomically replace the backing file
    async fn flush(&self, collection: &Collection) -> StoreResult<()> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(collection)
        } else {
            serde_json::to_vec(collection)
        }
        .map_err(|e| self.persistence(e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.persistence(e))?;
        }

        let tmp = self.tmp_path();
        if let Err(e) = tokio::fs::write(&tmp, &bytes).await {
            return Err(self.persistence(e));
        }
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(self.persistence(e));
        }
        Ok(())
    }

    /// Run one load-mutate-write cycle under the write lock.
    ///
    /// Nothing is written when `op` fails, and the caller only sees the
    /// result of `op` once the flush has succeeded.
    async fn mutate<T, F>(&self, op: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Collection) -> StoreResult<T>,
    {
        let _guard = self.write_lock.lock().await;
        let mut collection = self.load().await?;
        let result = op(&mut collection)?;
        if let Err(e) = self.flush(&collection).await {
            error!("{}", e);
            return Err(e);
        }
        Ok(result)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("db.json"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn unavailable(&self, reason: impl ToString) -> StoreError {
        StoreError::Unavailable {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    fn persistence(&self, reason: impl ToString) -> StoreError {
        StoreError::Persistence {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl VehicleStore for JsonFileStore {
    async fn list(&self) -> StoreResult<Vec<Vehicle>> {
        Ok(self.load().await?.vehiculos)
    }

    async fn get(&self, id: VehicleId) -> StoreResult<Vehicle> {
        self.load()
            .await?
            .find(id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, fields: VehicleFields) -> StoreResult<Vehicle> {
        let vehicle = self
            .mutate(|collection| collection.insert(fields).ok_or(StoreError::IdsExhausted))
            .await?;
        info!("created vehicle {}", vehicle.id);
        Ok(vehicle)
    }

    async fn update(&self, id: VehicleId, fields: VehicleFields) -> StoreResult<Vehicle> {
        let vehicle = self
            .mutate(|collection| {
                let vehicle = collection.find_mut(id).ok_or(StoreError::NotFound(id))?;
                vehicle.merge(fields);
                Ok(vehicle.clone())
            })
            .await?;
        info!("updated vehicle {}", id);
        Ok(vehicle)
    }

    async fn delete(&self, id: VehicleId) -> StoreResult<()> {
        self.mutate(|collection| {
            collection
                .remove(id)
                .map(|_| ())
                .ok_or(StoreError::NotFound(id))
        })
        .await?;
        info!("deleted vehicle {}", id);
        Ok(())
    }
}
