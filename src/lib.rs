//! Hoopla API client library.
//!
//! A Rust library for the Hoopla hypermedia REST API. Server resources are
//! typed objects whose fields round-trip to JSON and whose related
//! collections and actions are discovered through the `links` each resource
//! carries, never through hard-coded URL templates.
//!
//! # Quick Start
//!
//! ```no_run
//! use hoopla::{HasOwner, HooplaClient, Save};
//!
//! #[tokio::main]
//! async fn main() -> hoopla::Result<()> {
//!     // Authenticate with client credentials from the environment
//!     let client = HooplaClient::from_env().await?;
//!
//!     // Every lookup starts at the API root
//!     let root = client.connect().await?;
//!
//!     // Record a value for an external owner
//!     if let Some(metric) = root.find_metric_by_name("Deals Closed").await? {
//!         let mut value = metric.new_value()?;
//!         value.set_value(3.5);
//!         value.set_owner("widgets");
//!         value.save().await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Each resource kind declares its API attribute names with [`Resource`]
//! and, when writable, its media type with [`Writable`]. The operations are
//! traits implemented for every qualifying kind:
//!
//! - [`Reload`] - Re-read a resource from its `href`
//! - [`Save`] - Create (POST) or update (PUT) a resource
//! - [`Delete`] - Delete a resource
//! - [`Related`] - Follow a link relation to a collection
//!
//! All requests go through the [`Session`] trait; [`HooplaClient`] is the
//! reqwest-backed implementation.
//!
//! # Configuration
//!
//! [`HooplaClient::from_env`] reads:
//!
//! - `HOOPLA_CLIENT_ID` (required) - OAuth2 client id
//! - `HOOPLA_CLIENT_SECRET` (required) - OAuth2 client secret
//! - `HOOPLA_API_URL` (optional) - API root (defaults to `https://api.hoopla.net/`)

mod attributes;
mod client;
mod error;
mod models;
mod owner;
mod resource;
mod session;
mod traits;

pub mod cli;
pub mod output;

#[cfg(feature = "test-server")]
pub mod mock_server;

#[cfg(test)]
mod testing;

// Re-export core types
pub use attributes::{AttributeStore, RelationTable, LINKS};
pub use client::HooplaClient;
pub use error::{HooplaError, HttpFailure, Result};
pub use resource::{LocalAttrs, ResourceCore, CREATION_URL, HREF};
pub use session::{HttpResponse, Session};

// Re-export traits
pub use traits::{Delete, HasOwner, Related, Reload, Resource, Save, Writable};

// Re-export models
pub use models::{
    Connection, Metric, MetricValue, Newsflash, NewsflashEvent, Team, User, METRIC_NAME,
};
pub use owner::{Owner, OwnerRef, GENERIC_URN_PREFIX};
