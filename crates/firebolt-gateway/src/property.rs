//! Property accessor.
//!
//! Getters and setters are ordinary calls named by convention:
//! `<module>.<property>` with `{}` params, and `<module>.set<Property>` with
//! `{"value": v}`. Nothing is cached; every get is a round trip.

use crate::client::{decode_result, RpcClient};
use crate::domain::error::{FireboltError, FireboltResult};
use crate::domain::methods::{method_name, setter_name};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

/// Property access for one module
#[derive(Clone)]
pub struct PropertyAccessor {
    client: Arc<RpcClient>,
    module: String,
}

impl PropertyAccessor {
    pub fn new(client: Arc<RpcClient>, module: impl Into<String>) -> Self {
        Self {
            client,
            module: module.into(),
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    /// Read a property
    pub async fn get(&self, property: &str) -> FireboltResult<Value> {
        let method = method_name(&self.module, property);
        self.client.call(&method, json!({}), None).await
    }

    /// Read a property and decode it
    pub async fn get_as<T: DeserializeOwned>(&self, property: &str) -> FireboltResult<T> {
        let method = method_name(&self.module, property);
        let value = self.client.call(&method, json!({}), None).await?;
        decode_result(&method, value)
    }

    /// Write a property.
    ///
    /// Success carries no payload; whatever the platform returns is ignored.
    pub async fn set(&self, property: &str, value: Value) -> FireboltResult<()> {
        let method = setter_name(&self.module, property);
        self.client
            .call(&method, json!({ "value": value }), None)
            .await
            .map(|_| ())
    }

    /// Encode and write a property
    pub async fn set_as<T: Serialize + ?Sized>(
        &self,
        property: &str,
        value: &T,
    ) -> FireboltResult<()> {
        let value = serde_json::to_value(value).map_err(|e| {
            warn!(module = %self.module, property = property, error = %e, "Cannot encode value");
            FireboltError::InvalidParams
        })?;
        self.set(property, value).await
    }
}
