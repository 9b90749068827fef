//! Caller-supplied authentication options and their defaults.
//!
//! Hosts hand options over as loosely typed JSON. [`AuthOptions::from_value`] resolves
//! them into a typed struct before any provider call, reporting malformed fields with
//! their JSON path.

// crates.io
use serde_json::Value;
// self
use crate::{_prelude::*, auth::Scopes, error::ConfigError};

/// Credential flow requested by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Value")]
pub enum CredentialType {
	/// OAuth 2.0 access token (default).
	#[default]
	AccessToken,
	/// OpenID Connect identity token bound to an audience.
	IdToken,
}
impl CredentialType {
	/// Returns a stable label suitable for logs.
	pub const fn as_str(self) -> &'static str {
		match self {
			CredentialType::AccessToken => "accessToken",
			CredentialType::IdToken => "idToken",
		}
	}
}
impl From<Value> for CredentialType {
	fn from(value: Value) -> Self {
		// Anything but the exact `idToken` string selects the access-token flow.
		match value.as_str() {
			Some("idToken") => Self::IdToken,
			_ => Self::AccessToken,
		}
	}
}
impl Display for CredentialType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Options accepted by [`Authenticator::authenticate`](crate::flows::Authenticator::authenticate).
///
/// Every field is optional; defaults are resolved by the accessors rather than at parse
/// time so the struct round-trips exactly what the host sent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthOptions {
	/// Requested credential flow.
	#[serde(default, rename = "type")]
	pub kind: CredentialType,
	/// Requested scopes; defaults to [`DEFAULT_SCOPE`](crate::auth::DEFAULT_SCOPE).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub scopes: Option<Scopes>,
	/// Audience for the identity-token flow.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub aud: Option<String>,
	/// Target URL for the identity-token flow; fallback audience when `aud` is absent.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
}
impl AuthOptions {
	/// Options selecting the access-token flow with default scopes.
	pub fn access_token() -> Self {
		Self::default()
	}

	/// Options selecting the identity-token flow against `url`.
	pub fn id_token(url: impl Into<String>) -> Self {
		Self { kind: CredentialType::IdToken, url: Some(url.into()), ..Default::default() }
	}

	/// Overrides the requested scopes.
	pub fn with_scopes(mut self, scopes: impl Into<Scopes>) -> Self {
		self.scopes = Some(scopes.into());

		self
	}

	/// Sets an explicit identity-token audience.
	pub fn with_audience(mut self, aud: impl Into<String>) -> Self {
		self.aud = Some(aud.into());

		self
	}

	/// Parses host options; a missing or `null` value yields the defaults.
	pub fn from_value(value: Option<&Value>) -> Result<Self, ConfigError> {
		match value {
			None | Some(Value::Null) => Ok(Self::default()),
			Some(value) => Ok(serde_path_to_error::deserialize(value)?),
		}
	}

	/// Scopes to construct the provider client with.
	pub fn resolved_scopes(&self) -> Scopes {
		self.scopes.clone().unwrap_or_default()
	}

	/// Target URL, ignoring empty strings.
	pub fn target_url(&self) -> Option<&str> {
		non_empty(self.url.as_deref())
	}

	/// Effective identity-token audience: `aud` when set, otherwise the target URL.
	pub fn audience(&self) -> Option<&str> {
		non_empty(self.aud.as_deref()).or_else(|| self.target_url())
	}
}

fn non_empty(value: Option<&str>) -> Option<&str> {
	value.filter(|value| !value.is_empty())
}
