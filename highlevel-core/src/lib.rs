//! # highlevel-core
//!
//! Foundation types for the `highlevel` SDK:
//!
//! - **Config**: [`ClientConfig`] builder for credentials, URLs, transport,
//!   and refresh behavior
//! - **Tokens**: [`TokenState`] triple, [`TokenResponse`] wire type, and the
//!   [`RefreshCallback`] notification hook
//!
//! The HTTP client, request execution, and resource services live in the
//! `highlevel` crate; this crate stays free of request logic so the types can
//! be reused without pulling in a runtime.

pub mod config;
pub mod token;

pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use token::{RefreshCallback, TokenResponse, TokenState};
