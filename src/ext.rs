//! Extension points for signing resource requests with token credentials.
//!
//! [`RequestSignerExt`] attaches an `Authorization` header to an outbound request, and
//! [`execute_signed`] signs plus sends one through any
//! [`OAuthHttpClient`](crate::http::OAuthHttpClient).

pub mod request_signer;

pub use request_signer::*;
