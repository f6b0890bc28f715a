//! Contact API request/response types.
//!
//! Field names and shapes mirror the wire format of the Contacts endpoints;
//! empty optional fields are omitted from serialized JSON.

#![allow(missing_docs)] // DTO fields are self-documenting

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// A contact record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub contact_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_added: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_updated: Option<DateTime<Utc>>,
    #[serde(rename = "customField", skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution_source: Option<AttributionSource>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_emails: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_phones: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dnd: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dnd_settings: Option<DndSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inbound_dnd_settings: Option<DndSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_agency_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub followers: Vec<String>,
}

/// A custom field value on a contact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomField {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(rename = "field_value", skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

/// Marketing attribution recorded for a contact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AttributionSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fbclid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gclid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msclkid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dclid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fbc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fbp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_analytics_id: Option<String>,
}

/// Per-channel do-not-disturb settings. Channel keys are capitalized on the
/// wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DndSettings {
    #[serde(rename = "Call", skip_serializing_if = "Option::is_none")]
    pub call: Option<DndSetting>,
    #[serde(rename = "SMS", skip_serializing_if = "Option::is_none")]
    pub sms: Option<DndSetting>,
    #[serde(rename = "Email", skip_serializing_if = "Option::is_none")]
    pub email: Option<DndSetting>,
    #[serde(rename = "WhatsApp", skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<DndSetting>,
    #[serde(rename = "GMB", skip_serializing_if = "Option::is_none")]
    pub gmb: Option<DndSetting>,
    #[serde(rename = "FB", skip_serializing_if = "Option::is_none")]
    pub fb: Option<DndSetting>,
}

/// A single channel's do-not-disturb state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DndSetting {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Body of `POST /contacts/`. `location_id` is required and always
/// serialized.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    pub location_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(rename = "customField", skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution_source: Option<AttributionSource>,
}

/// Body of `PUT /contacts/{id}`. Only the provided fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(rename = "customField", skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution_source: Option<AttributionSource>,
}

/// Body of `POST /contacts/upsert`. Duplicate detection is driven by the
/// location's settings; `location_id` is required and always serialized.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertContactRequest {
    pub location_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(rename = "customField", skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution_source: Option<AttributionSource>,
}

/// Filters for `GET /contacts/`. Zero values are left out of the query
/// string entirely.
#[derive(Debug, Clone, Default)]
pub struct ListContactsQuery {
    /// Location to list contacts for.
    pub location_id: Option<String>,
    /// Free-text search.
    pub query: Option<String>,
    /// Page size.
    pub limit: Option<u32>,
    /// Records to skip.
    pub skip: Option<u32>,
    /// Cursor: `dateAdded` timestamp to start after.
    pub start_after: Option<String>,
    /// Cursor: contact id to start after.
    pub start_after_id: Option<String>,
}

impl ListContactsQuery {
    /// Encode the set filters as a query string, without the leading `?`.
    /// Returns an empty string when no filter is set.
    pub fn to_query_string(&self) -> String {
        let mut pairs = form_urlencoded::Serializer::new(String::new());

        if let Some(location_id) = &self.location_id {
            pairs.append_pair("locationId", location_id);
        }
        if let Some(query) = &self.query {
            pairs.append_pair("query", query);
        }
        if let Some(limit) = self.limit.filter(|n| *n > 0) {
            pairs.append_pair("limit", &limit.to_string());
        }
        if let Some(skip) = self.skip.filter(|n| *n > 0) {
            pairs.append_pair("skip", &skip.to_string());
        }
        if let Some(start_after) = &self.start_after {
            pairs.append_pair("startAfter", start_after);
        }
        if let Some(start_after_id) = &self.start_after_id {
            pairs.append_pair("startAfterId", start_after_id);
        }

        pairs.finish()
    }
}

/// Envelope of the single-contact endpoints: `{"contact": {...}}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactResponse {
    pub contact: Option<Contact>,
}

/// Envelope of the listing endpoints:
/// `{"contacts": [...], "total": n, "count": n}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactsResponse {
    pub contacts: Vec<Contact>,
    pub total: u64,
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_create_request_omits_empty_fields() {
        let request = CreateContactRequest {
            location_id: "loc1".to_string(),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"locationId": "loc1"})
        );
    }

    #[test]
    fn test_create_request_serializes_set_fields() {
        let request = CreateContactRequest {
            location_id: "loc1".to_string(),
            first_name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            tags: vec!["vip".to_string()],
            custom_fields: vec![CustomField {
                key: Some("plan".to_string()),
                value: Some(json!("pro")),
                ..Default::default()
            }],
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "locationId": "loc1",
                "firstName": "Ada",
                "email": "ada@example.com",
                "tags": ["vip"],
                "customField": [{"key": "plan", "field_value": "pro"}]
            })
        );
    }

    #[test]
    fn test_update_request_never_sends_location() {
        let request = UpdateContactRequest {
            first_name: Some("Grace".to_string()),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"firstName": "Grace"})
        );
    }

    #[test]
    fn test_contact_deserializes_wire_shape() {
        let contact: Contact = serde_json::from_value(json!({
            "id": "ocQHyuzHvysMo5N5VsXc",
            "locationId": "loc1",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "type": "lead",
            "tags": ["vip", "imported"],
            "dateAdded": "2021-07-02T05:18:26.704Z",
            "customField": [{"id": "f1", "field_value": 42}],
            "dndSettings": {"SMS": {"status": "active"}},
            "conversationAgencyId": "agency-1"
        }))
        .unwrap();

        assert_eq!(contact.id.as_deref(), Some("ocQHyuzHvysMo5N5VsXc"));
        assert_eq!(contact.contact_type.as_deref(), Some("lead"));
        assert_eq!(contact.tags, vec!["vip", "imported"]);
        assert!(contact.date_added.is_some());
        assert_eq!(contact.custom_fields[0].value, Some(json!(42)));
        let dnd = contact.dnd_settings.unwrap();
        assert_eq!(dnd.sms.unwrap().status.as_deref(), Some("active"));
        assert_eq!(contact.conversation_agency_id.as_deref(), Some("agency-1"));
    }

    #[test]
    fn test_contact_serialization_skips_unset_fields() {
        let contact = Contact {
            id: Some("c1".to_string()),
            ..Default::default()
        };

        assert_eq!(serde_json::to_value(&contact).unwrap(), json!({"id": "c1"}));
    }

    #[test]
    fn test_dnd_settings_wire_casing() {
        let settings = DndSettings {
            whatsapp: Some(DndSetting {
                status: Some("inactive".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&settings).unwrap(),
            json!({"WhatsApp": {"status": "inactive"}})
        );
    }

    #[test]
    fn test_query_string_empty_when_unset() {
        assert_eq!(ListContactsQuery::default().to_query_string(), "");
    }

    #[test]
    fn test_query_string_encodes_set_filters() {
        let query = ListContactsQuery {
            location_id: Some("loc1".to_string()),
            query: Some("ada lovelace".to_string()),
            limit: Some(20),
            start_after_id: Some("c42".to_string()),
            ..Default::default()
        };

        assert_eq!(
            query.to_query_string(),
            "locationId=loc1&query=ada+lovelace&limit=20&startAfterId=c42"
        );
    }

    #[test]
    fn test_query_string_skips_zero_paging() {
        let query = ListContactsQuery {
            limit: Some(0),
            skip: Some(0),
            ..Default::default()
        };

        assert_eq!(query.to_query_string(), "");
    }

    #[test]
    fn test_contacts_response_defaults() {
        let page: ContactsResponse = serde_json::from_value(json!({
            "contacts": [{"id": "c1"}]
        }))
        .unwrap();

        assert_eq!(page.contacts.len(), 1);
        assert_eq!(page.total, 0);
        assert_eq!(page.count, 0);
    }
}
