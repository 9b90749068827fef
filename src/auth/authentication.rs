//! Result of one acquisition attempt, plus the expiry and header helpers the host relies on.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Header carrying the bearer token.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Terminal outcome of an authentication attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthStatus {
	/// A token was obtained.
	Granted,
	/// No token was obtained; `error` says why.
	Refused,
}
impl AuthStatus {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			AuthStatus::Granted => "granted",
			AuthStatus::Refused => "refused",
		}
	}
}
impl Display for AuthStatus {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Immutable acquisition result handed to the host.
///
/// A fresh value is produced by every
/// [`Authenticator::authenticate`](crate::flows::Authenticator::authenticate) call. The host
/// keeps the latest one and passes it back into [`is_authenticated`](Self::is_authenticated)
/// and [`as_http_headers`](Self::as_http_headers). `granted` values carry a token and
/// possibly an expiry; `refused` values carry an error message. A `granted` value without
/// `expire` never expires.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authentication {
	/// Outcome of the attempt.
	pub status: AuthStatus,
	/// Bearer token; present on `granted`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token: Option<TokenSecret>,
	/// Expiry in milliseconds since the Unix epoch, when known.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub expire: Option<i64>,
	/// Human-readable refusal reason; present on `refused`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}
impl Authentication {
	/// Builds a `granted` result.
	pub fn granted(token: impl Into<TokenSecret>, expire: Option<i64>) -> Self {
		Self { status: AuthStatus::Granted, token: Some(token.into()), expire, error: None }
	}

	/// Builds a `refused` result carrying `error`.
	pub fn refused(error: impl Into<String>) -> Self {
		Self { status: AuthStatus::Refused, token: None, expire: None, error: Some(error.into()) }
	}

	/// Returns true for `granted` results.
	pub fn is_granted(&self) -> bool {
		matches!(self.status, AuthStatus::Granted)
	}

	/// Returns the token unless it is missing or empty.
	pub fn live_token(&self) -> Option<&TokenSecret> {
		self.token.as_ref().filter(|token| !token.is_empty())
	}

	/// Expiry as an instant, when present and representable.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		self.expire.and_then(from_unix_millis)
	}

	/// Checks the result against the current clock.
	pub fn is_authenticated(&self) -> bool {
		self.is_authenticated_at(now_millis())
	}

	/// Returns true when a token is present and `expire` is absent or later than `now_ms`.
	///
	/// The status is not consulted; a stray token on any result counts.
	pub fn is_authenticated_at(&self, now_ms: i64) -> bool {
		self.live_token().is_some() && self.expire.is_none_or(|expire| expire > now_ms)
	}

	/// Projects a `granted` result into an `Authorization: Bearer` header.
	///
	/// Returns an empty map for `refused` results, even when a token is present.
	pub fn as_http_headers(&self) -> BTreeMap<String, String> {
		let mut headers = BTreeMap::new();

		if let (true, Some(token)) = (self.is_granted(), self.live_token()) {
			headers.insert(AUTHORIZATION_HEADER.into(), token.bearer());
		}

		headers
	}
}

/// Milliseconds since the Unix epoch for `instant`.
pub fn unix_millis(instant: OffsetDateTime) -> i64 {
	i64::try_from(instant.unix_timestamp_nanos() / 1_000_000).unwrap_or(i64::MAX)
}

/// Milliseconds since the Unix epoch for the current UTC instant.
pub fn now_millis() -> i64 {
	unix_millis(OffsetDateTime::now_utc())
}

fn from_unix_millis(ms: i64) -> Option<OffsetDateTime> {
	OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000).ok()
}
