//! API client capability for pipaw.
//!
//! The entity model never talks to the network itself. It is handed an
//! [`ApiClient`] implementation and calls the handful of endpoints it needs:
//! - [`ApiClient`] — the transport capability (media, user, feed, comments)
//! - [`ClientError`] — errors a transport may surface
//! - [`ClientConfig`] — base URL, emulated device, response cache settings
//! - [`UserDevice`] — device tables used to build the user-agent string
//! - [`CachedClient`] — TTL memoization of single-record lookups
//! - [`mock::ScriptedClient`] — in-memory client replaying scripted responses

mod api;
mod cache;
mod config;
mod device;
mod error;
pub mod mock;

pub use api::ApiClient;
pub use cache::{CachedClient, TimedEntry};
pub use config::{CacheConfig, ClientConfig};
pub use device::{AppVersion, PhoneResolution, UserDevice, devices, versions};
pub use error::{ClientError, ClientResult};
pub use pipaw_types::{Pk, RankToken};
