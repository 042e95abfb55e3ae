//! Customer records.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::{Email, RecordId};

/// A signed-up customer as stored in `customers.json`.
///
/// Key order on disk follows field order here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Generated at signup.
    pub id: RecordId,
    #[serde(default, deserialize_with = "text_field")]
    pub name: String,
    /// Unique across the collection.
    pub email: Email,
    #[serde(default, deserialize_with = "text_field")]
    pub phone: String,
    #[serde(default, deserialize_with = "text_field")]
    pub street: String,
    #[serde(default, deserialize_with = "text_field")]
    pub city: String,
    #[serde(default, deserialize_with = "text_field")]
    pub state: String,
    #[serde(default, deserialize_with = "text_field")]
    pub pincode: String,
    /// Date of birth as entered; not interpreted.
    #[serde(default, deserialize_with = "text_field")]
    pub dob: String,
    /// Set once at signup. Always written with millisecond precision.
    #[serde(serialize_with = "millis_timestamp")]
    pub signup_date: DateTime<Utc>,
}

/// Signup payload.
///
/// `password` is accepted so signup forms can post it, but it is never
/// stored or returned.
#[derive(Clone, Deserialize)]
pub struct NewCustomer {
    #[serde(deserialize_with = "text_field")]
    pub name: String,
    #[serde(deserialize_with = "text_field")]
    pub email: String,
    #[serde(default, deserialize_with = "text_field")]
    pub phone: String,
    #[serde(default, deserialize_with = "text_field")]
    pub street: String,
    #[serde(default, deserialize_with = "text_field")]
    pub city: String,
    #[serde(default, deserialize_with = "text_field")]
    pub state: String,
    #[serde(default, deserialize_with = "text_field")]
    pub pincode: String,
    #[serde(default, deserialize_with = "text_field")]
    pub dob: String,
    #[serde(default)]
    pub password: Option<String>,
}

impl std::fmt::Debug for NewCustomer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewCustomer")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("street", &self.street)
            .field("city", &self.city)
            .field("state", &self.state)
            .field("pincode", &self.pincode)
            .field("dob", &self.dob)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl NewCustomer {
    /// Build the stored record from this payload.
    ///
    /// The password is dropped here.
    #[must_use]
    pub fn into_customer(self, id: RecordId, email: Email, signup_date: DateTime<Utc>) -> Customer {
        Customer {
            id,
            name: self.name,
            email,
            phone: self.phone,
            street: self.street,
            city: self.city,
            state: self.state,
            pincode: self.pincode,
            dob: self.dob,
            signup_date,
        }
    }
}

fn millis_timestamp<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Accept strings as-is and render numbers or booleans as text.
///
/// Signup forms frequently post `pincode` or `phone` as numbers.
fn text_field<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a text value, found {other}"
        ))),
    }
}
