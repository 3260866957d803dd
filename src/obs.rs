//! Optional observability helpers for consumer flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oauth1_consumer.flow` with the `flow`
//!   (protocol step) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `oauth1_consumer_flow_total` counter for every
//!   attempt/success/failure, labeled by `flow` + `outcome`.
//!
//! Span fields never carry tokens or secrets.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Protocol steps observed by the consumer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Temporary-credential request issued by `begin`.
	TemporaryCredentials,
	/// Token-credential exchange issued by `authorised`.
	TokenCredentials,
	/// Resource request signed with token credentials.
	SignedRequest,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::TemporaryCredentials => "temporary_credentials",
			FlowKind::TokenCredentials => "token_credentials",
			FlowKind::SignedRequest => "signed_request",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a consumer operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
