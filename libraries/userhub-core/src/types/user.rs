/// User domain type
use serde::{Deserialize, Deserializer, Serialize};

/// Store-assigned user identifier
pub type UserId = i64;

/// User record, as exposed by the API and stored by the persistence layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct User {
    /// Unique user identifier, assigned on creation
    pub id: UserId,

    /// Display name
    pub name: String,
}

impl User {
    /// Build a user record from its parts
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Creation payload
///
/// Carries only the name so a caller can never choose the identifier.
/// A missing or `null` name decodes as an empty string and unknown fields
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name for the new user
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl CreateUser {
    /// Create a payload for the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_serializes_as_id_and_name() {
        let json = serde_json::to_value(User::new(1, "test")).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "name": "test"}));
    }

    #[test]
    fn create_payload_ignores_client_supplied_id() {
        let payload: CreateUser = serde_json::from_str(r#"{"id": 99, "name": "test"}"#).unwrap();
        assert_eq!(payload, CreateUser::new("test"));
    }

    #[test]
    fn create_payload_defaults_missing_name_to_empty() {
        let payload: CreateUser = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.name, "");
    }

    #[test]
    fn create_payload_treats_null_name_as_empty() {
        let payload: CreateUser = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(payload.name, "");
    }

    #[test]
    fn create_payload_rejects_non_string_name() {
        assert!(serde_json::from_str::<CreateUser>(r#"{"name": 5}"#).is_err());
    }
}
