use chrono;
use serde::Deserialize;
use serde::Serialize;

use crate::{impl_from_str_for_enum, impl_to_string_for_enum};

/// A customer record as stored in the `clients` table and shipped over the
/// wire. Wire names are camelCase, column names are snake_case.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    // Store-assigned; incoming bodies may omit it or carry a placeholder.
    #[serde(default)]
    pub client_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub client_type: Option<String>,
    pub registration_date: Option<chrono::DateTime<chrono::Utc>>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ClientType {
    Individual,
    Corporate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ClientStatus {
    New,
    Active,
    Inactive,
}

impl_from_str_for_enum!(ClientType, Individual, Corporate);
impl_to_string_for_enum!(ClientType, Individual, Corporate);
impl_from_str_for_enum!(ClientStatus, New, Active, Inactive);
impl_to_string_for_enum!(ClientStatus, New, Active, Inactive);

impl ClientType {
    pub const VALUES: [ClientType; 2] = [ClientType::Individual, ClientType::Corporate];
}

impl ClientStatus {
    pub const VALUES: [ClientStatus; 3] =
        [ClientStatus::New, ClientStatus::Active, ClientStatus::Inactive];
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn client_serializes_with_camel_case_names() {
        let client = Client {
            client_id: 7,
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            company_name: Some("Acme".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(&client).unwrap();
        assert_eq!(value["clientId"], 7);
        assert_eq!(value["firstName"], "Jane");
        assert_eq!(value["lastName"], "Doe");
        assert_eq!(value["companyName"], "Acme");
        assert_eq!(value["registrationDate"], serde_json::Value::Null);
    }

    #[test]
    fn client_deserializes_without_an_id() {
        let body = r#"{"firstName":"Jane","lastName":"Doe","email":"jane@doe.dev"}"#;
        let client: Client = serde_json::from_str(body).unwrap();

        assert_eq!(client.client_id, 0);
        assert_eq!(client.first_name, "Jane");
        assert_eq!(client.email.as_deref(), Some("jane@doe.dev"));
        assert_eq!(client.phone, None);
    }

    #[test]
    fn enum_values_round_trip_through_strings() {
        for client_type in ClientType::VALUES {
            let parsed = ClientType::from_str(&client_type.to_string()).unwrap();
            assert_eq!(parsed, client_type);
        }
        for status in ClientStatus::VALUES {
            let parsed = ClientStatus::from_str(&status.to_string()).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn enum_parsing_is_case_insensitive() {
        assert_eq!(
            ClientType::from_str("corporate").unwrap(),
            ClientType::Corporate
        );
        assert!(ClientStatus::from_str("Archived").is_err());
    }
}
