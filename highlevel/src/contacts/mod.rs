//! Contacts resource: CRUD, upsert, listing, and tag management.
//!
//! All operations go through the client's authenticated request executor and
//! therefore participate in the automatic 401 refresh-and-retry.
//!
//! ## Example
//!
//! ```rust,ignore
//! let contact = client
//!     .contacts()
//!     .create(&CreateContactRequest {
//!         location_id: "loc1".to_string(),
//!         first_name: Some("Ada".to_string()),
//!         email: Some("ada@example.com".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//! ```

mod service;
mod types;

pub use service::ContactsService;
pub use types::{
    AttributionSource, Contact, ContactResponse, ContactsResponse, CreateContactRequest,
    CustomField, DndSetting, DndSettings, ListContactsQuery, UpdateContactRequest,
    UpsertContactRequest,
};
