use crate::model::{Vehicle, VehicleFields, VehicleId};
use crate::store::error::StoreResult;

/// Query and mutation primitives over the vehicle collection
#[async_trait::async_trait]
pub trait VehicleStore: Send + Sync {
    /// All records in insertion order
    async fn list(&self) -> StoreResult<Vec<Vehicle>>;
    /// First record whose id matches
    async fn get(&self, id: VehicleId) -> StoreResult<Vehicle>;
    /// Append a record under a freshly assigned id and persist it
    async fn create(&self, fields: VehicleFields) -> StoreResult<Vehicle>;
    /// Shallow-merge `fields` into an existing record and persist it
    async fn update(&self, id: VehicleId, fields: VehicleFields) -> StoreResult<Vehicle>;
    /// Remove a record, keeping the order of the remaining ones
    async fn delete(&self, id: VehicleId) -> StoreResult<()>;
}
