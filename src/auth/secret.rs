//! Secret wrappers that keep consumer and token secrets out of logs.

// self
use crate::_prelude::*;

macro_rules! def_secret {
	($name:ident, $doc:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(String);
		impl $name {
			/// Wraps a new secret string.
			pub fn new(value: impl Into<String>) -> Self {
				Self(value.into())
			}

			/// Returns the inner secret. Callers must avoid logging this string.
			pub fn expose(&self) -> &str {
				&self.0
			}

			/// Whether the provider (or caller) supplied an empty secret.
			pub fn is_empty(&self) -> bool {
				self.0.is_empty()
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				self.expose()
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.debug_tuple(stringify!($name)).field(&"<redacted>").finish()
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str("<redacted>")
			}
		}
	};
}

def_secret! { ConsumerSecret, "Client-shared secret paired with a consumer key." }
def_secret! { TokenSecret, "Shared secret paired with a temporary or access token." }
