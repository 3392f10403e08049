//! Property management endpoints.

use serde::Serialize;

use crate::error::Result;
use crate::types::{MessageResponse, NewProperty, Property, PropertyUpdate};
use crate::LimpiarClient;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyCreationRequest<'a> {
    property_id: &'a str,
    property_manager_id: &'a str,
}

impl LimpiarClient {
    pub async fn list_properties(&self) -> Result<Vec<Property>> {
        self.get_json("/properties").await
    }

    pub async fn get_property(&self, id: &str) -> Result<Property> {
        self.get_json(&format!("/properties/{id}")).await
    }

    /// Create a property. It stays `pending` until
    /// [`verify_property_creation`](Self::verify_property_creation) confirms it.
    pub async fn create_property(&self, property: &NewProperty) -> Result<Property> {
        self.post_json("/properties", property).await
    }

    pub async fn update_property(&self, id: &str, update: &PropertyUpdate) -> Result<Property> {
        self.put_json(&format!("/properties/{id}"), update).await
    }

    pub async fn delete_property(&self, id: &str) -> Result<MessageResponse> {
        self.delete_json(&format!("/properties/{id}")).await
    }

    /// Admin confirmation that moves a pending property to `verified`.
    pub async fn verify_property_creation(
        &self,
        property_id: &str,
        property_manager_id: &str,
    ) -> Result<MessageResponse> {
        self.post_json(
            "/properties/verify-creation",
            &VerifyCreationRequest {
                property_id,
                property_manager_id,
            },
        )
        .await
    }
}
