// Payloads exchanged with the API.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Body of a resolve call. `meta` is free text the server keeps for audit.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RfidRequest<'a> {
    pub rfid: &'a str,
    pub meta: &'a str,
}

/// Opaque identifier of a user, as handed out by the resolve call.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Backends disagree on whether ids are strings or integers; both end up as
// the same opaque string.
impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => UserId(s),
            Raw::Number(n) => UserId(n.to_string()),
        })
    }
}

/// Answer to a resolve call.
///
/// `user_id` is `None` when the RFID is unknown to the server. That is a
/// normal answer, not an error.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RfidLookup {
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub request_id: String,
}

/// A user as returned by the API: arbitrary JSON fields, of which only
/// `username` is relied upon.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct UserRecord(Map<String, Value>);

impl UserRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The `username` field as display text. Strings are returned verbatim;
    /// other JSON values in their compact JSON form.
    pub fn username(&self) -> Result<String, ApiError> {
        match self.get("username") {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Ok(other.to_string()),
            None => Err(ApiError::MissingField("username")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(value: Value) -> UserRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn lookup_with_string_id() {
        let lookup: RfidLookup =
            serde_json::from_value(json!({"user_id": "u42", "request_id": "req-124"})).unwrap();
        assert_eq!(lookup.user_id, Some(UserId::new("u42")));
        assert_eq!(lookup.request_id, "req-124");
    }

    #[test]
    fn lookup_with_null_id() {
        let lookup: RfidLookup =
            serde_json::from_value(json!({"user_id": null, "request_id": "req-123"})).unwrap();
        assert_eq!(lookup.user_id, None);
    }

    #[test]
    fn lookup_without_id_key() {
        let lookup: RfidLookup = serde_json::from_value(json!({"request_id": "req-9"})).unwrap();
        assert_eq!(lookup.user_id, None);
    }

    #[test]
    fn numeric_id_becomes_decimal_string() {
        let lookup: RfidLookup =
            serde_json::from_value(json!({"user_id": 42, "request_id": "r"})).unwrap();
        assert_eq!(lookup.user_id.unwrap().as_str(), "42");
    }

    #[test]
    fn lookup_requires_request_id() {
        let parsed = serde_json::from_value::<RfidLookup>(json!({"user_id": "u1"}));
        assert!(parsed.is_err());
    }

    #[test]
    fn request_serializes_both_fields() {
        let body = serde_json::to_value(RfidRequest {
            rfid: "A1B2C3",
            meta: "Some Meta String",
        })
        .unwrap();
        assert_eq!(body, json!({"rfid": "A1B2C3", "meta": "Some Meta String"}));
    }

    #[test]
    fn username_is_verbatim() {
        let user = record(json!({"username": "  alice ", "id": "u42"}));
        assert_eq!(user.username().unwrap(), "  alice ");
    }

    #[test]
    fn non_string_username_is_rendered_as_json() {
        assert_eq!(record(json!({"username": 7})).username().unwrap(), "7");
    }

    #[test]
    fn missing_username_is_an_error() {
        let err = record(json!({"email": "a@b.c"})).username().unwrap_err();
        assert!(matches!(err, ApiError::MissingField("username")));
    }
}
