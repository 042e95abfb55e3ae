//! Menu service.
//!
//! Menu items are opaque JSON objects owned by the admin; the service never
//! looks inside them.

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tiffin_core::Collection;

use super::ServiceError;
use crate::store::JsonStore;

/// Read and replace the menu collection.
pub struct MenuService<'a> {
    store: &'a JsonStore,
    admin_password: &'a SecretString,
}

impl<'a> MenuService<'a> {
    /// Create a menu service.
    #[must_use]
    pub const fn new(store: &'a JsonStore, admin_password: &'a SecretString) -> Self {
        Self {
            store,
            admin_password,
        }
    }

    /// Every menu item, verbatim.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Store` if the menu cannot be loaded.
    pub async fn get_all(&self) -> Result<Vec<Value>, ServiceError> {
        Ok(self.store.load(Collection::Menu).await?)
    }

    /// Overwrite the whole menu with `menu`.
    ///
    /// The password is checked before `menu` is looked at.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Unauthorized` if `supplied_password` does not
    /// match exactly; the stored menu is not touched in that case.
    /// Returns `ServiceError::InvalidMenu` if `menu` is not an array.
    /// Returns `ServiceError::Store` if the write fails.
    pub async fn replace_all(
        &self,
        menu: Value,
        supplied_password: &str,
    ) -> Result<(), ServiceError> {
        if !constant_time_compare(self.admin_password.expose_secret(), supplied_password) {
            tracing::warn!("Menu update rejected: wrong admin password");
            return Err(ServiceError::Unauthorized);
        }
        let Value::Array(menu) = menu else {
            return Err(ServiceError::InvalidMenu);
        };

        self.store.save(Collection::Menu, &menu).await?;
        tracing::info!(items = menu.len(), "Menu replaced");
        Ok(())
    }
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}
