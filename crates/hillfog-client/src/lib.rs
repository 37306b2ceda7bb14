//! Async client for the Hillfog legacy action backend
//!
//! Wraps the `/<module>/<operation>.action` endpoints behind a typed facade:
//!
//! - [`envelope`]: response envelope unwrapping and HTTP status classification
//! - [`transport`]: the request model and the reqwest-backed [`HttpTransport`]
//! - [`adapter`]: [`HillfogClient`] and the per-entity [`EntityApi`]
//! - [`auth`] / [`session`]: login, logout and profile persistence
//!
//! # Quick Start
//!
//! ```no_run
//! use hillfog_client::{ClientConfig, HillfogClient, MemorySessionStore};
//! use hillfog_core::QueryParams;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HillfogClient::new(ClientConfig::new("http://localhost:8088"))?;
//!
//!     let store = Arc::new(MemorySessionStore::new());
//!     client.auth(store).login("admin", "password").await?;
//!
//!     let page = client.kpis().list(&QueryParams::new().search("revenue")).await?;
//!     for kpi in &page.items {
//!         println!("{} {:?}", kpi.id, kpi.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod auth;
pub mod config;
pub mod envelope;
pub mod error;
pub mod session;
pub mod transport;

pub use adapter::{action_path, Encoding, EntityApi, HillfogClient, MeasureDataApi};
pub use auth::AuthApi;
pub use config::{ClientConfig, ConfigError};
pub use envelope::{classify, normalize, Normalized};
pub use error::{ApiError, ApiErrorKind, ApiResult, SessionError};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore, USER_INFO_KEY};
pub use transport::{ApiRequest, HttpTransport, Method, RawResponse, RequestBody, Transport};
