//! Contacts resource operations.

use reqwest::Method;
use serde_json::json;

use crate::client::HighLevelClient;
use crate::error::{HighLevelError, Result};

use super::types::{
    Contact, ContactResponse, ContactsResponse, CreateContactRequest, ListContactsQuery,
    UpdateContactRequest, UpsertContactRequest,
};

/// Operations on the Contacts resource.
///
/// Obtained from [`HighLevelClient::contacts`]; borrows the client, so it is
/// free to create per call.
#[derive(Debug, Clone, Copy)]
pub struct ContactsService<'a> {
    client: &'a HighLevelClient,
}

impl<'a> ContactsService<'a> {
    pub(crate) fn new(client: &'a HighLevelClient) -> Self {
        Self { client }
    }

    /// Create a contact. Requires the `contacts.write` scope.
    pub async fn create(&self, request: &CreateContactRequest) -> Result<Contact> {
        if request.location_id.is_empty() {
            return Err(HighLevelError::config("locationId is required"));
        }

        let body = serde_json::to_value(request)?;
        let response: Option<ContactResponse> = self
            .client
            .request_json(Method::POST, "/contacts/", Some(body))
            .await?;
        Self::contact_from(response)
    }

    /// Fetch a contact by id. Requires the `contacts.readonly` scope.
    pub async fn get(&self, contact_id: &str) -> Result<Contact> {
        if contact_id.is_empty() {
            return Err(HighLevelError::config("contactId is required"));
        }

        let response: Option<ContactResponse> = self
            .client
            .request_json(Method::GET, &format!("/contacts/{}", contact_id), None)
            .await?;
        Self::contact_from(response)
    }

    /// Update an existing contact. Requires the `contacts.write` scope.
    pub async fn update(
        &self,
        contact_id: &str,
        request: &UpdateContactRequest,
    ) -> Result<Contact> {
        if contact_id.is_empty() {
            return Err(HighLevelError::config("contactId is required"));
        }

        let body = serde_json::to_value(request)?;
        let response: Option<ContactResponse> = self
            .client
            .request_json(Method::PUT, &format!("/contacts/{}", contact_id), Some(body))
            .await?;
        Self::contact_from(response)
    }

    /// Delete a contact. Requires the `contacts.write` scope.
    pub async fn delete(&self, contact_id: &str) -> Result<()> {
        if contact_id.is_empty() {
            return Err(HighLevelError::config("contactId is required"));
        }

        self.client
            .request_no_content(Method::DELETE, &format!("/contacts/{}", contact_id), None)
            .await
    }

    /// Create or update a contact based on the location's duplicate
    /// detection settings. Requires the `contacts.write` scope.
    pub async fn upsert(&self, request: &UpsertContactRequest) -> Result<Contact> {
        if request.location_id.is_empty() {
            return Err(HighLevelError::config("locationId is required"));
        }

        let body = serde_json::to_value(request)?;
        let response: Option<ContactResponse> = self
            .client
            .request_json(Method::POST, "/contacts/upsert", Some(body))
            .await?;
        Self::contact_from(response)
    }

    /// List contacts with optional filters. Requires the `contacts.readonly`
    /// scope.
    pub async fn list(&self, query: &ListContactsQuery) -> Result<ContactsResponse> {
        let query_string = query.to_query_string();
        let path = if query_string.is_empty() {
            "/contacts/".to_string()
        } else {
            format!("/contacts/?{}", query_string)
        };

        let response: Option<ContactsResponse> =
            self.client.request_json(Method::GET, &path, None).await?;
        Ok(response.unwrap_or_default())
    }

    /// List the contacts attached to a business. Requires the
    /// `contacts.readonly` scope.
    pub async fn by_business_id(&self, business_id: &str) -> Result<ContactsResponse> {
        if business_id.is_empty() {
            return Err(HighLevelError::config("businessId is required"));
        }

        let response: Option<ContactsResponse> = self
            .client
            .request_json(
                Method::GET,
                &format!("/contacts/business/{}", business_id),
                None,
            )
            .await?;
        Ok(response.unwrap_or_default())
    }

    /// Add tags to a contact. Requires the `contacts.write` scope.
    pub async fn add_tags(&self, contact_id: &str, tags: &[String]) -> Result<()> {
        Self::check_tag_args(contact_id, tags)?;

        self.client
            .request_no_content(
                Method::POST,
                &format!("/contacts/{}/tags", contact_id),
                Some(json!({ "tags": tags })),
            )
            .await
    }

    /// Remove tags from a contact. Requires the `contacts.write` scope.
    pub async fn remove_tags(&self, contact_id: &str, tags: &[String]) -> Result<()> {
        Self::check_tag_args(contact_id, tags)?;

        self.client
            .request_no_content(
                Method::DELETE,
                &format!("/contacts/{}/tags", contact_id),
                Some(json!({ "tags": tags })),
            )
            .await
    }

    fn check_tag_args(contact_id: &str, tags: &[String]) -> Result<()> {
        if contact_id.is_empty() {
            return Err(HighLevelError::config("contactId is required"));
        }
        if tags.is_empty() {
            return Err(HighLevelError::config("at least one tag is required"));
        }
        Ok(())
    }

    fn contact_from(response: Option<ContactResponse>) -> Result<Contact> {
        response
            .and_then(|envelope| envelope.contact)
            .ok_or_else(|| HighLevelError::protocol("response did not contain a contact"))
    }
}
