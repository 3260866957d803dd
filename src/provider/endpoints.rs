//! Service-provider endpoint set and resource-owner redirect construction.

// self
use crate::{_prelude::*, error::ConfigError, signature::percent_encode};

/// Endpoint set declared by a service provider.
///
/// The struct is serde-friendly so deployments can keep it in their config files:
///
/// ```json
/// {
///   "temporary_credentials": "https://api.example.com/oauth/request_token",
///   "authorize": "https://api.example.com/oauth/authorize",
///   "token_credentials": "https://api.example.com/oauth/access_token"
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Temporary credential request endpoint (a.k.a. request token URL).
	pub temporary_credentials: Url,
	/// Resource owner authorization endpoint; when absent callers build their own redirect.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub authorize: Option<Url>,
	/// Token credential request endpoint (a.k.a. access token URL).
	pub token_credentials: Url,
}
impl ProviderEndpoints {
	/// Parses the endpoints from strings.
	pub fn parse(
		temporary_credentials: &str,
		authorize: Option<&str>,
		token_credentials: &str,
	) -> Result<Self, ConfigError> {
		Ok(Self {
			temporary_credentials: parse_endpoint("temporary_credentials", temporary_credentials)?,
			authorize: authorize.map(|url| parse_endpoint("authorize", url)).transpose()?,
			token_credentials: parse_endpoint("token_credentials", token_credentials)?,
		})
	}

	/// Builds the resource-owner redirect for `temporary_token`, if an authorize endpoint is set.
	pub fn authorize_url(&self, temporary_token: &str) -> Option<Url> {
		self.authorize.as_ref().map(|base| {
			let mut url = base.clone();
			let pair = format!("oauth_token={}", percent_encode(temporary_token));
			let query = match url.query() {
				Some(existing) if !existing.is_empty() => format!("{existing}&{pair}"),
				_ => pair,
			};

			url.set_query(Some(&query));

			url
		})
	}

	pub(crate) fn validate(&self) -> Result<(), ConfigError> {
		validate_scheme("temporary_credentials", &self.temporary_credentials)?;
		validate_scheme("token_credentials", &self.token_credentials)?;

		if let Some(authorize) = &self.authorize {
			validate_scheme("authorize", authorize)?;
		}

		Ok(())
	}
}

pub(crate) fn parse_endpoint(endpoint: &'static str, value: &str) -> Result<Url, ConfigError> {
	Url::parse(value).map_err(|source| ConfigError::InvalidEndpoint { endpoint, source })
}

pub(crate) fn validate_scheme(endpoint: &'static str, url: &Url) -> Result<(), ConfigError> {
	match url.scheme() {
		"http" | "https" => Ok(()),
		_ => Err(ConfigError::UnsupportedScheme { endpoint, url: url.to_string() }),
	}
}
