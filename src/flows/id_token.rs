//! Identity-token flow.
//!
//! The provider only fills in identity credentials after an authenticated request has
//! gone through to the target audience, so the flow requests an identity client, fetches
//! the target URL with it, and then reads the token and its expiry from the client's
//! credential state. The expiry is whatever the provider reports; it may be absent.

// self
use crate::{
	_prelude::*,
	auth::{Authentication, Scopes},
	error::ProviderError,
	flows::{Authenticator, common},
	obs::FlowKind,
	options::AuthOptions,
	provider::{AuthClient, AuthClientFactory, IdTokenClient, IdTokenCredentials},
};

impl<F> Authenticator<F>
where
	F: ?Sized + AuthClientFactory,
{
	/// Fetches an identity token for `options.aud` (or `options.url`), validated by an
	/// authenticated fetch of `options.url`.
	///
	/// Without a non-empty `url` the flow refuses before touching the provider.
	pub async fn id_token(&self, scopes: &Scopes, options: &AuthOptions) -> Authentication {
		common::settle(FlowKind::IdToken, "id_token", &self.metrics, async move {
			let url = options.target_url().ok_or(Error::MissingParameter)?;
			let audience = options.audience().unwrap_or(url);
			let client = self.factory.create(scopes);
			let id_client = client.get_id_token_client(audience).await?;
			let response = id_client.fetch(url).await?;

			if !response.ok {
				return Err(ProviderError::message(response.status_text).into());
			}

			let IdTokenCredentials { id_token, expiry_date } = id_client.credentials();
			let token = id_token.filter(|token| !token.is_empty()).ok_or(Error::NoToken)?;

			Ok::<_, Error>(Authentication::granted(token, expiry_date))
		})
		.await
	}
}
