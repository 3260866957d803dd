//! Auth-domain keys, tokens, secrets, credential pairs, and the reusable signing context.

pub mod credential;
pub mod id;
pub mod secret;
pub mod signing;

pub use credential::*;
pub use id::*;
pub use secret::*;
pub use signing::*;
