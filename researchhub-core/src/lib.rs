#![deny(clippy::all, clippy::pedantic, clippy::nursery)]

//! Client core for the `ResearchHub` research management backend.
//!
//! The crate owns the authenticated session: the persisted bearer credential,
//! the profile resolved from it, and the route guard that decides which
//! screens an account may open. The HTTP endpoints of the backend are exposed
//! through [`api::ApiClient`].
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use researchhub_core::api::ApiClient;
//! use researchhub_core::logger::default_logger;
//! use researchhub_core::storage::{FileCredentialStorage, StoragePaths};
//! use researchhub_core::{ClientConfig, SessionStore};
//!
//! # async fn run() -> Result<(), researchhub_core::ResearchHubError> {
//! let storage = Arc::new(FileCredentialStorage::new(StoragePaths::new("/tmp/hub"))?);
//! let resolver = ApiClient::new(ClientConfig::default());
//! let store = SessionStore::open(storage, resolver.clone(), default_logger());
//! let api = resolver.with_credential_source(Arc::new(store.reader()));
//!
//! store.login(&api, "ana@lab.rs", "secret").await?;
//! let projects = api.list_projects().await?;
//! println!("{} projects", projects.data.len());
//! # Ok(())
//! # }
//! ```

mod config;
pub use config::{ClientConfig, DEFAULT_BASE_URL};

mod credential;
pub use credential::Credential;

mod error;
pub use error::ResearchHubError;

mod role;
pub use role::Role;

pub mod api;

pub mod logger;

pub mod models;

pub mod routes;

pub mod session;
pub use session::{ProfileResolution, ProfileResolver, Session, SessionReader, SessionStore};

pub mod storage;

// private modules
mod http_request;
