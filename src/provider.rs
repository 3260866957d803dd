//! Provider-facing configuration.
//!
//! `endpoints` exposes the serde-loadable [`ProviderEndpoints`] (temporary-credential, authorize,
//! and token-credential URLs). `context` binds those endpoints to the consumer credentials, an
//! optional callback, and a temporary-token store as a validated [`CredentialContext`].

pub mod context;
pub mod endpoints;

pub use context::*;
pub use endpoints::*;
