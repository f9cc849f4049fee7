use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::model::{Vehicle, VehicleFields, VehicleId};

/// Top-level document of the backing file.
///
/// Only `vehiculos` is managed here; any sibling keys found in the file are
/// carried through untouched so a rewrite never drops them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub vehiculos: Vec<Vehicle>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Collection {
    pub fn len(&self) -> usize {
        self.vehiculos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehiculos.is_empty()
    }

    /// One past the highest id in use, so ids stay unique when deletions leave gaps.
    /// `None` when the highest id is already `u64::MAX`.
    pub fn next_id(&self) -> Option<VehicleId> {
        match self.vehiculos.iter().map(|v| v.id).max() {
            Some(max) => max.next(),
            None => Some(VehicleId::FIRST),
        }
    }

    /// First id that appears on more than one record, if any
    pub fn duplicate_id(&self) -> Option<VehicleId> {
        let mut seen = HashSet::with_capacity(self.vehiculos.len());
        self.vehiculos
            .iter()
            .map(|v| v.id)
            .find(|id| !seen.insert(*id))
    }

    pub fn find(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehiculos.iter().find(|v| v.id == id)
    }

    pub fn find_mut(&mut self, id: VehicleId) -> Option<&mut Vehicle> {
        self.vehiculos.iter_mut().find(|v| v.id == id)
    }

    pub fn position(&self, id: VehicleId) -> Option<usize> {
        self.vehiculos.iter().position(|v| v.id == id)
    }

    /// Append a new record under the next free id and return a copy of it.
    /// Nothing is appended when no id is left.
    pub fn insert(&mut self, fields: VehicleFields) -> Option<Vehicle> {
        let vehicle = Vehicle::new(self.next_id()?, fields);
        self.vehiculos.push(vehicle.clone());
        Some(vehicle)
    }

    pub fn remove(&mut self, id: VehicleId) -> Option<Vehicle> {
        self.position(id).map(|index| self.vehiculos.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> VehicleFields {
        serde_json::from_value(value).unwrap()
    }

    fn next_id(collection: &Collection) -> u64 {
        collection.next_id().unwrap().get()
    }

    #[test]
    fn test_next_id_uses_max_not_last() {
        let mut collection = Collection::default();
        assert_eq!(collection.next_id(), Some(VehicleId::FIRST));

        collection.insert(fields(json!({"marca": "Toyota"})));
        collection.insert(fields(json!({"marca": "Honda"})));
        collection.insert(fields(json!({"marca": "Ford"})));
        assert_eq!(next_id(&collection), 4);

        // A gap in the middle does not pull the next id back
        collection.remove(VehicleId::new(2).unwrap());
        assert_eq!(next_id(&collection), 4);
        assert_ne!(next_id(&collection) as usize, collection.len() + 1);

        // Out-of-order ids from a hand-edited file
        let collection: Collection = serde_json::from_value(json!({
            "vehiculos": [{"id": 7, "marca": "A"}, {"id": 2, "marca": "B"}]
        }))
        .unwrap();
        assert_eq!(next_id(&collection), 8);
    }

    #[test]
    fn test_insert_refuses_when_ids_are_exhausted() {
        let mut collection: Collection = serde_json::from_value(json!({
            "vehiculos": [{"id": u64::MAX, "marca": "A"}]
        }))
        .unwrap();

        assert_eq!(collection.next_id(), None);
        assert!(collection.insert(fields(json!({"marca": "B"}))).is_none());
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.duplicate_id(), None);
    }

    #[test]
    fn test_duplicate_id_detection() {
        let collection: Collection = serde_json::from_value(json!({
            "vehiculos": [{"id": 1}, {"id": 3}, {"id": 2}, {"id": 3}]
        }))
        .unwrap();
        assert_eq!(collection.duplicate_id(), VehicleId::new(3));

        let mut collection = Collection::default();
        collection.insert(fields(json!({"marca": "a"})));
        collection.insert(fields(json!({"marca": "b"})));
        assert_eq!(collection.duplicate_id(), None);
    }

    #[test]
    fn test_zero_id_is_rejected() {
        let result = serde_json::from_value::<Collection>(json!({
            "vehiculos": [{"id": 0, "marca": "Toyota"}]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut collection = Collection::default();
        for marca in ["a", "b", "c", "d"] {
            collection.insert(fields(json!({ "marca": marca })));
        }

        let removed = collection.remove(VehicleId::new(2).unwrap()).unwrap();
        assert_eq!(removed.field("marca"), Some(&json!("b")));
        assert!(collection.remove(VehicleId::new(2).unwrap()).is_none());

        let ids: Vec<u64> = collection.vehiculos.iter().map(|v| v.id.get()).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn test_sibling_keys_survive_roundtrip() {
        let raw = json!({
            "vehiculos": [{"id": 1, "marca": "Toyota"}],
            "conductores": [{"nombre": "Ana"}]
        });
        let collection: Collection = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(serde_json::to_value(&collection).unwrap(), raw);
    }

    #[test]
    fn test_missing_vehiculos_key_is_empty() {
        let collection: Collection = serde_json::from_value(json!({})).unwrap();
        assert!(collection.is_empty());
        assert_eq!(
            serde_json::to_value(&collection).unwrap(),
            json!({"vehiculos": []})
        );
    }

    #[test]
    fn test_record_without_id_is_rejected() {
        let result = serde_json::from_value::<Collection>(json!({
            "vehiculos": [{"marca": "Toyota"}]
        }));
        assert!(result.is_err());
    }
}
