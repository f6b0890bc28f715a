//! # highlevel
//!
//! Rust SDK for the [HighLevel](https://www.gohighlevel.com/) CRM API with
//! OAuth 2.0 token management.
//!
//! - **Typed Contacts API**: create, get, update, delete, upsert, list,
//!   business lookup, and tag management
//! - **OAuth 2.0 grants**: `authorization_code` and `refresh_token` against
//!   the token endpoint
//! - **Automatic healing**: a request rejected with 401 triggers one token
//!   refresh and one retry, then surfaces whatever happened
//! - **Refresh notifications**: a callback receives every automatically
//!   rotated token triple so it can be persisted
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use highlevel::{ClientConfig, CreateContactRequest, HighLevelClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), highlevel::HighLevelError> {
//!     let client = HighLevelClient::new(
//!         ClientConfig::new()
//!             .with_credentials("client-id", "client-secret")
//!             .with_access_token("stored-access-token")
//!             .with_refresh_token("stored-refresh-token")
//!             .with_refresh_callback(|access, refresh, expires_in| {
//!                 // persist the rotated tokens
//!             }),
//!     );
//!
//!     let contact = client
//!         .contacts()
//!         .create(&CreateContactRequest {
//!             location_id: "your-location-id".to_string(),
//!             first_name: Some("Ada".to_string()),
//!             email: Some("ada@example.com".to_string()),
//!             ..Default::default()
//!         })
//!         .await?;
//!
//!     println!("created contact {:?}", contact.id);
//!     Ok(())
//! }
//! ```
//!
//! ## Token lifecycle
//!
//! Tokens live in the client instance behind a reader/writer lock; a refresh
//! replaces the whole access/refresh/expiry triple atomically. Manual
//! management ([`HighLevelClient::set_tokens`],
//! [`HighLevelClient::authorize_with_refresh_token`]) never invokes the
//! refresh callback — only the automatic 401 heal does. Concurrent requests
//! that each hit a 401 each perform their own refresh; coalescing is left to
//! the caller.

pub mod client;
pub mod contacts;
pub mod error;
mod oauth;
mod request;

pub use client::HighLevelClient;
pub use contacts::{
    AttributionSource, Contact, ContactResponse, ContactsResponse, ContactsService,
    CreateContactRequest, CustomField, DndSetting, DndSettings, ListContactsQuery,
    UpdateContactRequest, UpsertContactRequest,
};
pub use error::{HighLevelError, Result};
pub use highlevel_core::{
    ClientConfig, RefreshCallback, TokenResponse, TokenState, DEFAULT_BASE_URL, DEFAULT_TIMEOUT,
};
