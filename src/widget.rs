//! Payloads produced by the Telegram Login Widget.
//!
//! [`UserPayload`] is what the callback forwards: an opaque JSON value that
//! goes out unchanged. [`TelegramWidgetData`]
//! is the documented shape of that object, handy for building payloads in
//! code; it is never used to filter or rewrite what the widget sends.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Fields Telegram sends as integers in redirect mode.
const INTEGER_FIELDS: [&str; 2] = ["id", "auth_date"];

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("invalid payload JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("empty query string")]
    EmptyQuery,
}

/// Opaque identity data handed over by the widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserPayload(Value);

impl UserPayload {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// # Errors
    /// Returns an error if `value` cannot be represented as JSON.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, PayloadError> {
        Ok(Self(serde_json::to_value(value)?))
    }

    /// # Errors
    /// Returns an error if `raw` is not valid JSON.
    pub fn from_json_str(raw: &str) -> Result<Self, PayloadError> {
        Ok(Self(serde_json::from_str(raw)?))
    }

    /// Build a payload from the query string Telegram appends to
    /// `data-auth-url` in redirect mode, e.g.
    /// `id=123&first_name=Jo&auth_date=1700000000&hash=abc`.
    ///
    /// A leading `?` is ignored. `id` and `auth_date` become integers when
    /// they parse as such; everything else stays a string. A repeated key
    /// keeps its last value.
    ///
    /// # Errors
    /// Returns an error if the query string has no parameters.
    pub fn from_query(query: &str) -> Result<Self, PayloadError> {
        let query = query.trim().trim_start_matches('?');

        let mut object = Map::new();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            if key.is_empty() {
                continue;
            }
            let value = if INTEGER_FIELDS.contains(&&*key) {
                value
                    .parse::<i64>()
                    .map_or_else(|_| Value::String(value.to_string()), Value::from)
            } else {
                Value::String(value.into_owned())
            };
            object.insert(key.into_owned(), value);
        }

        if object.is_empty() {
            return Err(PayloadError::EmptyQuery);
        }

        Ok(Self(Value::Object(object)))
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// # Errors
    /// Returns an error if the payload cannot be serialized.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }
}

impl From<Value> for UserPayload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl TryFrom<&TelegramWidgetData> for UserPayload {
    type Error = PayloadError;

    fn try_from(data: &TelegramWidgetData) -> Result<Self, Self::Error> {
        Self::from_serialize(data)
    }
}

/// User object as documented for the Telegram Login Widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramWidgetData {
    pub id: i64,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub auth_date: i64,
    pub hash: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_str_keeps_value_verbatim() {
        let payload =
            UserPayload::from_json_str(r#"{"id":123,"first_name":"Jo","extra":{"a":[1,2]}}"#)
                .unwrap();
        assert_eq!(
            payload.as_value(),
            &json!({"id": 123, "first_name": "Jo", "extra": {"a": [1, 2]}})
        );
    }

    #[test]
    fn test_from_json_str_accepts_non_object() {
        let payload = UserPayload::from_json_str("[1, \"two\", null]").unwrap();
        assert_eq!(payload.to_json().unwrap(), r#"[1,"two",null]"#);
    }

    #[test]
    fn test_from_json_str_invalid() {
        let err = UserPayload::from_json_str("{id:123}").unwrap_err();
        assert!(matches!(err, PayloadError::Json(_)));
        assert!(err.to_string().starts_with("invalid payload JSON"));
    }

    #[test]
    fn test_to_json_preserves_key_order() {
        let payload = UserPayload::from_json_str(r#"{"z":1,"a":2,"m":3}"#).unwrap();
        assert_eq!(payload.to_json().unwrap(), r#"{"z":1,"a":2,"m":3}"#);
    }

    #[test]
    fn test_from_query() {
        let payload = UserPayload::from_query(
            "?id=123&first_name=Jo&username=jo_doe&auth_date=1700000000&hash=deadbeef",
        )
        .unwrap();
        assert_eq!(
            payload.to_json().unwrap(),
            r#"{"id":123,"first_name":"Jo","username":"jo_doe","auth_date":1700000000,"hash":"deadbeef"}"#
        );
    }

    #[test]
    fn test_from_query_decodes_percent_and_plus() {
        let payload =
            UserPayload::from_query("first_name=Jo+Ann&photo_url=https%3A%2F%2Ft.me%2Fi%2F1.jpg")
                .unwrap();
        assert_eq!(
            payload.as_value(),
            &json!({"first_name": "Jo Ann", "photo_url": "https://t.me/i/1.jpg"})
        );
    }

    #[test]
    fn test_from_query_non_numeric_id_stays_string() {
        let payload = UserPayload::from_query("id=abc").unwrap();
        assert_eq!(payload.as_value(), &json!({"id": "abc"}));
    }

    #[test]
    fn test_from_query_repeated_key_keeps_last() {
        let payload = UserPayload::from_query("first_name=A&first_name=B").unwrap();
        assert_eq!(payload.as_value(), &json!({"first_name": "B"}));
    }

    #[test]
    fn test_from_query_empty() {
        assert!(matches!(
            UserPayload::from_query(""),
            Err(PayloadError::EmptyQuery)
        ));
        assert!(matches!(
            UserPayload::from_query("?"),
            Err(PayloadError::EmptyQuery)
        ));
        assert!(matches!(
            UserPayload::from_query("=orphan"),
            Err(PayloadError::EmptyQuery)
        ));
    }

    #[test]
    fn test_widget_data_into_payload_skips_missing_fields() {
        let data = TelegramWidgetData {
            id: 123,
            first_name: "Jo".to_string(),
            last_name: None,
            username: Some("jo_doe".to_string()),
            photo_url: None,
            auth_date: 1_700_000_000,
            hash: "deadbeef".to_string(),
        };
        let payload = UserPayload::try_from(&data).unwrap();
        assert_eq!(
            payload.to_json().unwrap(),
            r#"{"id":123,"first_name":"Jo","username":"jo_doe","auth_date":1700000000,"hash":"deadbeef"}"#
        );
        assert_eq!(
            payload.as_value(),
            &json!({
                "id": 123,
                "first_name": "Jo",
                "username": "jo_doe",
                "auth_date": 1_700_000_000,
                "hash": "deadbeef"
            })
        );
    }

    #[test]
    fn test_widget_data_payload_matches_serde() {
        let data = TelegramWidgetData {
            id: 42,
            first_name: "Ada".to_string(),
            last_name: Some("Lovelace".to_string()),
            username: Some("ada".to_string()),
            photo_url: Some("https://t.me/i/userpic/320/ada.jpg".to_string()),
            auth_date: 1,
            hash: "h".to_string(),
        };
        let payload = UserPayload::try_from(&data).unwrap();
        assert_eq!(payload.into_value(), serde_json::to_value(&data).unwrap());
    }

    #[test]
    fn test_widget_data_deserialize_minimal() {
        let data: TelegramWidgetData = serde_json::from_value(json!({
            "id": 7,
            "first_name": "Jo",
            "auth_date": 1,
            "hash": "h"
        }))
        .unwrap();
        assert_eq!(data.id, 7);
        assert_eq!(data.last_name, None);
        assert_eq!(data.photo_url, None);
    }

    #[test]
    fn test_from_serialize() {
        let payload = UserPayload::from_serialize(&json!({"id": 1})).unwrap();
        assert_eq!(payload.into_value(), json!({"id": 1}));
    }
}
