//! Customer signup service.
//!
//! Stored customers are handled as raw JSON objects. Only `email` is read
//! from them, so records written by older versions (extra keys, other date
//! formats, missing fields) survive every signup untouched.

use serde_json::Value;
use tiffin_core::{Collection, Customer, Email, NewCustomer, RecordId};

use super::{ServiceError, timestamp};
use crate::store::JsonStore;

/// Signup and listing of customers.
pub struct CustomerService<'a> {
    store: &'a JsonStore,
}

impl<'a> CustomerService<'a> {
    /// Create a customer service.
    #[must_use]
    pub const fn new(store: &'a JsonStore) -> Self {
        Self { store }
    }

    /// Register a new customer.
    ///
    /// The duplicate check and the append happen in one locked cycle, so two
    /// concurrent signups with the same email cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidEmail` if the email cannot be parsed.
    /// Returns `ServiceError::DuplicateEmail` if the email is already
    /// registered; nothing is written in that case.
    /// Returns `ServiceError::Store` if the collection cannot be loaded or saved.
    pub async fn sign_up(&self, new: NewCustomer) -> Result<Customer, ServiceError> {
        let email = Email::parse(&new.email)?;

        let customer = self
            .store
            .update(Collection::Customers, |customers: &mut Vec<Value>| {
                if customers.iter().any(|record| has_email(record, &email)) {
                    return Err(ServiceError::DuplicateEmail);
                }
                let customer = new.into_customer(RecordId::generate(), email, timestamp());
                customers.push(serde_json::to_value(&customer)?);
                Ok(customer)
            })
            .await?;

        tracing::info!(customer_id = %customer.id, "Customer signed up");
        Ok(customer)
    }

    /// Every customer, in signup order, exactly as stored.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Store` if the collection cannot be loaded.
    pub async fn get_all(&self) -> Result<Vec<Value>, ServiceError> {
        Ok(self.store.load(Collection::Customers).await?)
    }
}

fn has_email(record: &Value, email: &Email) -> bool {
    record.get("email").and_then(Value::as_str) == Some(email.as_str())
}
