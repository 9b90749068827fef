//! Identity-provider client contracts consumed by the authenticator flows.
//!
//! The flows never talk to Google directly. They construct an [`AuthClient`] through an
//! [`AuthClientFactory`] once per call and drive it through at most two suspending calls.
//! The crate ships a metadata-server implementation (see [`crate::http`]) and tests plug in
//! recording doubles implementing the same traits.

// self
use crate::{_prelude::*, auth::{Scopes, TokenSecret}, error::ProviderError};

/// Boxed future returned by provider client calls.
pub type ProviderFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, ProviderError>> + 'a + Send>>;

/// Builds provider clients configured with the requested scopes.
///
/// Construction is synchronous and infallible; transport failures surface from the
/// client calls instead.
pub trait AuthClientFactory
where
	Self: 'static + Send + Sync,
{
	/// Client produced by the factory.
	type Client: AuthClient;

	/// Constructs a client whose only configuration is `scopes`.
	fn create(&self, scopes: &Scopes) -> Self::Client;
}

/// Provider client able to mint access tokens and audience-bound identity clients.
pub trait AuthClient
where
	Self: Send + Sync,
{
	/// Identity-token client returned by [`get_id_token_client`](Self::get_id_token_client).
	type IdClient: IdTokenClient;

	/// Fetches an access token; `Ok(None)` means the provider answered without one.
	fn get_access_token(&self) -> ProviderFuture<'_, Option<String>>;

	/// Returns a client that authenticates requests with identity tokens for `audience`.
	fn get_id_token_client<'a>(&'a self, audience: &'a str) -> ProviderFuture<'a, Self::IdClient>;
}

/// Client that attaches an identity token to every request it sends.
///
/// [`credentials`](Self::credentials) is only populated as a side effect of a
/// successful [`fetch`](Self::fetch).
pub trait IdTokenClient
where
	Self: Send + Sync,
{
	/// Performs an authenticated `GET` against `url`.
	fn fetch<'a>(&'a self, url: &'a str) -> ProviderFuture<'a, FetchResponse>;

	/// Snapshot of the credential state left behind by the last fetch.
	fn credentials(&self) -> IdTokenCredentials;
}

/// Outcome of an authenticated fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchResponse {
	/// True for 2xx statuses.
	pub ok: bool,
	/// HTTP status code.
	pub status: u16,
	/// Reason phrase reported for the status.
	pub status_text: String,
}
impl FetchResponse {
	/// Builds a response, deriving `ok` from the status code.
	pub fn new(status: u16, status_text: impl Into<String>) -> Self {
		Self { ok: (200..300).contains(&status), status, status_text: status_text.into() }
	}
}

/// Identity-token credential state held by an [`IdTokenClient`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdTokenCredentials {
	/// Identity token, once one has been obtained.
	pub id_token: Option<TokenSecret>,
	/// Provider-supplied expiry in milliseconds since the Unix epoch.
	pub expiry_date: Option<i64>,
}
