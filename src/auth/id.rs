//! Strongly typed keys, tokens, and verifiers exchanged during the OAuth 1.0a handshake.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new value after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				validate_view($kind, view)?;

				Ok(Self(view.to_owned()))
			}

			/// Returns the raw protocol value.
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				validate_view($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

/// Error returned when key, token, or verifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The value was empty.
	#[error("{kind} cannot be empty.")]
	Empty {
		/// Kind of value (consumer key, temporary token, access token, verifier).
		kind: &'static str,
	},
	/// The value contains control characters that cannot travel in a header.
	#[error("{kind} contains control characters.")]
	ContainsControl {
		/// Kind of value (consumer key, temporary token, access token, verifier).
		kind: &'static str,
	},
}

def_id! { ConsumerKey, "Identifier portion of the client credentials.", "ConsumerKey" }
def_id! { TemporaryToken, "Temporary credential identifier issued by the provider.", "TemporaryToken" }
def_id! { AccessToken, "Token credential identifier issued by the provider.", "AccessToken" }
def_id! { Verifier, "Verification code returned to the callback after authorization.", "Verifier" }

fn validate_view(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if view.chars().any(char::is_control) {
		return Err(IdentifierError::ContainsControl { kind });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn empty_and_control_values_are_rejected() {
		assert_eq!(Verifier::new(""), Err(IdentifierError::Empty { kind: "Verifier" }));
		assert_eq!(
			TemporaryToken::new("tok\r\n123"),
			Err(IdentifierError::ContainsControl { kind: "TemporaryToken" })
		);

		let key = ConsumerKey::new("ck").expect("Consumer key fixture should be valid.");

		assert_eq!(key.as_str(), "ck");
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let token: AccessToken =
			serde_json::from_str("\"atok\"").expect("Access token should deserialize successfully.");

		assert_eq!(token.as_ref(), "atok");
		assert!(serde_json::from_str::<AccessToken>("\"\"").is_err());
	}

	#[test]
	fn borrow_supports_fast_lookup() {
		let map: HashMap<TemporaryToken, u8> = HashMap::from_iter([(
			TemporaryToken::new("tok123").expect("Temporary token used for lookup should be valid."),
			7_u8,
		)]);

		assert_eq!(map.get("tok123"), Some(&7));
	}
}
