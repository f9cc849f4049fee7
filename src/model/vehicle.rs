use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Key reserved for the store-assigned identifier
pub const ID_FIELD: &str = "id";

/// Positive integer identifier, assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct VehicleId(u64);

impl VehicleId {
    pub const FIRST: VehicleId = VehicleId(1);

    pub fn new(value: u64) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// `None` once the id space is exhausted
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for VehicleId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u64::deserialize(deserializer)?;
        VehicleId::new(value)
            .ok_or_else(|| serde::de::Error::custom("vehicle id must be a positive integer"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid vehicle id '{0}'")]
pub struct InvalidVehicleId(pub String);

impl FromStr for VehicleId {
    type Err = InvalidVehicleId;

    /// Only plain base-10 digits are accepted; signs, whitespace and
    /// fractional parts are rejected rather than coerced.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidVehicleId(s.to_string()));
        }
        s.parse::<u64>()
            .ok()
            .and_then(VehicleId::new)
            .ok_or_else(|| InvalidVehicleId(s.to_string()))
    }
}

/// Caller-supplied attributes of a vehicle (brand, model, ...).
///
/// The store never interprets these values. The reserved `id` key is
/// dropped on construction so callers can neither choose nor overwrite
/// an identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VehicleFields(Map<String, Value>);

impl VehicleFields {
    pub fn new(mut fields: Map<String, Value>) -> Self {
        fields.remove(ID_FIELD);
        Self(fields)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl<'de> Deserialize<'de> for VehicleFields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Map::<String, Value>::deserialize(deserializer).map(VehicleFields::new)
    }
}

/// One record of the collection, serialized flat as `{ "id": .., ...fields }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Vehicle {
    pub fn new(id: VehicleId, fields: VehicleFields) -> Self {
        Self {
            id,
            fields: fields.into_inner(),
        }
    }

    /// Shallow merge: new keys are added, existing keys overwritten,
    /// everything else is kept as is.
    pub fn merge(&mut self, fields: VehicleFields) {
        for (key, value) in fields.into_inner() {
            self.fields.insert(key, value);
        }
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}
