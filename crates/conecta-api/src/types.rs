//! Wire types for the authentication endpoints

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Response of the token issuance endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RefreshedToken {
    pub access: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CredentialsBody<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RefreshBody<'a> {
    pub refresh: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: Option<String>,
}

/// Profile returned for a bearer token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub username: Option<String>,
    /// Only an explicit boolean `true` enables simplified mode.
    #[serde(
        rename = "modo_simplificado",
        default,
        deserialize_with = "deserialize_strict_true"
    )]
    pub simplified_mode: bool,
}

fn deserialize_strict_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(matches!(value, Some(serde_json::Value::Bool(true))))
}

/// New account request for the registration endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
    #[serde(rename = "fecha_nacimiento", serialize_with = "serialize_date")]
    pub birth_date: NaiveDate,
}

fn serialize_date<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_simplified_mode() {
        let profile: Profile =
            serde_json::from_str(r#"{"username": "ana", "modo_simplificado": true}"#).unwrap();
        assert!(profile.simplified_mode);
        assert_eq!(profile.username.as_deref(), Some("ana"));

        // Anything but a boolean true is off
        let profile: Profile = serde_json::from_str(r#"{"modo_simplificado": "true"}"#).unwrap();
        assert!(!profile.simplified_mode);

        let profile: Profile = serde_json::from_str(r#"{"modo_simplificado": null}"#).unwrap();
        assert!(!profile.simplified_mode);

        let profile: Profile = serde_json::from_str("{}").unwrap();
        assert!(!profile.simplified_mode);
    }

    #[test]
    fn test_registration_body() {
        let registration = Registration {
            username: "ana".to_string(),
            password: "secret".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1950, 1, 1).unwrap(),
        };

        let json = serde_json::to_value(&registration).unwrap();
        assert_eq!(json["fecha_nacimiento"], "1950-01-01");
        assert_eq!(json["username"], "ana");
    }
}
