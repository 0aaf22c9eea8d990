//! Travel record and its identifier.

use std::fmt;
use std::str::FromStr;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::StorageError;

/// Field name under which the identifier is exposed over HTTP.
pub const ID_FIELD: &str = "id";

/// Field name under which the identifier is stored in the collection.
pub const STORAGE_ID_FIELD: &str = "_id";

/// Unique travel identifier, a 12-byte ObjectId written as 24 hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TravelId(ObjectId);

impl TravelId {
    /// Generate a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Parse a caller-supplied identifier.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidId` if `raw` is not 24 hex characters.
    pub fn parse(raw: &str) -> Result<Self, StorageError> {
        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|_| StorageError::InvalidId(raw.to_string()))
    }

    /// The underlying `ObjectId`.
    #[must_use]
    pub const fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for TravelId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for TravelId {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TravelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for TravelId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for TravelId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A single travel record.
///
/// Apart from `id`, every field is free-form and persisted verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Travel {
    /// Identifier, assigned by the storage layer on insert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TravelId>,

    /// Domain fields (name, destination, dates, ...).
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Travel {
    /// Build a record from a client payload.
    ///
    /// Any `id` or `_id` key in the payload is discarded; identifiers only come
    /// from the storage layer.
    #[must_use]
    pub fn from_fields(mut fields: Map<String, Value>) -> Self {
        fields.remove(ID_FIELD);
        fields.remove(STORAGE_ID_FIELD);
        Self { id: None, fields }
    }

    /// Attach an identifier to this record.
    #[must_use]
    pub fn with_id(mut self, id: TravelId) -> Self {
        self.id = Some(id);
        self
    }

    /// Get a domain field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Returns true if `field` names the record identifier.
#[must_use]
pub fn is_id_field(field: &str) -> bool {
    field == ID_FIELD || field == STORAGE_ID_FIELD
}

/// Check that `field` names a single top-level field a record update may set.
///
/// Dotted paths and `$`-prefixed names are refused so every backend stores
/// the field under exactly the name given.
///
/// # Errors
///
/// Returns `StorageError::ImmutableField` for the identifier and
/// `StorageError::InvalidField` for empty, dotted or `$`-prefixed names.
pub fn check_field_name(field: &str) -> Result<(), StorageError> {
    if is_id_field(field) {
        return Err(StorageError::ImmutableField(field.to_string()));
    }
    if field.is_empty() || field.starts_with('$') || field.contains('.') {
        return Err(StorageError::InvalidField(field.to_string()));
    }
    Ok(())
}

/// Check that `value` can be stored, walking nested arrays and objects.
///
/// Integers must fit a signed 64-bit integer.
///
/// # Errors
///
/// Returns `StorageError::UnsupportedValue` for the first integer out of range.
pub fn check_value(value: &Value) -> Result<(), StorageError> {
    match value {
        Value::Number(n) if n.is_u64() && n.as_i64().is_none() => Err(
            StorageError::UnsupportedValue(format!("integer {n} exceeds the signed 64-bit range")),
        ),
        Value::Array(items) => items.iter().try_for_each(check_value),
        Value::Object(fields) => fields.values().try_for_each(check_value),
        _ => Ok(()),
    }
}

/// Ordered sequence of travels as returned by a full scan.
pub type Travels = Vec<Travel>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_valid_id() {
        let id = TravelId::parse("65f0a1b2c3d4e5f6a7b8c9d0").unwrap();
        assert_eq!(id.to_string(), "65f0a1b2c3d4e5f6a7b8c9d0");
    }

    #[test]
    fn test_parse_invalid_id() {
        for raw in ["", "123", "65f0a1b2c3d4e5f6a7b8c9dz", "65f0a1b2c3d4e5f6a7b8c9d0ff"] {
            let err = TravelId::parse(raw).unwrap_err();
            assert!(matches!(err, StorageError::InvalidId(ref s) if s == raw));
        }
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = TravelId::generate();
        let b = TravelId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_from_fields_discards_client_ids() {
        let payload = json!({
            "id": "65f0a1b2c3d4e5f6a7b8c9d0",
            "_id": "whatever",
            "destination": "Lima"
        });
        let Value::Object(map) = payload else {
            unreachable!()
        };

        let travel = Travel::from_fields(map);
        assert!(travel.id.is_none());
        assert_eq!(travel.fields.len(), 1);
        assert_eq!(travel.field("destination"), Some(&json!("Lima")));
    }

    #[test]
    fn test_serialize_flattens_fields() {
        let id = TravelId::parse("65f0a1b2c3d4e5f6a7b8c9d0").unwrap();
        let mut fields = Map::new();
        fields.insert("destination".to_string(), json!("Cusco"));
        let travel = Travel::from_fields(fields).with_id(id);

        let value = serde_json::to_value(&travel).unwrap();
        assert_eq!(
            value,
            json!({"id": "65f0a1b2c3d4e5f6a7b8c9d0", "destination": "Cusco"})
        );

        let back: Travel = serde_json::from_value(value).unwrap();
        assert_eq!(back, travel);
    }

    #[test]
    fn test_is_id_field() {
        assert!(is_id_field("id"));
        assert!(is_id_field("_id"));
        assert!(!is_id_field("destination"));
    }

    #[test]
    fn test_check_field_name() {
        assert!(check_field_name("destination").is_ok());
        assert!(check_field_name("start date").is_ok());
        assert!(matches!(
            check_field_name("id"),
            Err(StorageError::ImmutableField(_))
        ));
        for field in ["", "dates.from", "$set", "$"] {
            assert!(matches!(
                check_field_name(field),
                Err(StorageError::InvalidField(ref s)) if s == field
            ));
        }
    }

    #[test]
    fn test_check_value_integer_range() {
        assert!(check_value(&json!(i64::MAX)).is_ok());
        assert!(check_value(&json!(i64::MIN)).is_ok());
        assert!(check_value(&json!(1.5e300)).is_ok());
        assert!(check_value(&json!({"stops": ["Lima", 3], "budget": {"usd": 1200}})).is_ok());

        for value in [
            json!(u64::MAX),
            json!([1, u64::MAX]),
            json!({"budget": {"cents": u64::MAX}}),
        ] {
            assert!(matches!(
                check_value(&value),
                Err(StorageError::UnsupportedValue(_))
            ));
        }
    }
}
