//! Access-token flow.
//!
//! One call to [`AuthClient::get_access_token`]; no retry. The expiry is a fixed policy of
//! [`ACCESS_TOKEN_LIFETIME`] from the moment the token arrives, not a value read from
//! the provider.

// self
use crate::{
	_prelude::*,
	auth::{self, Authentication, Scopes},
	flows::{Authenticator, common},
	obs::FlowKind,
	provider::{AuthClient, AuthClientFactory},
};

/// Lifetime assumed for every access token.
pub const ACCESS_TOKEN_LIFETIME: Duration = Duration::hours(1);

impl<F> Authenticator<F>
where
	F: ?Sized + AuthClientFactory,
{
	/// Fetches a bearer access token for `scopes`.
	pub async fn access_token(&self, scopes: &Scopes) -> Authentication {
		common::settle(FlowKind::AccessToken, "access_token", &self.metrics, async move {
			let client = self.factory.create(scopes);
			let token = client
				.get_access_token()
				.await?
				.filter(|token| !token.is_empty())
				.ok_or(Error::NoToken)?;
			let expire = auth::unix_millis(OffsetDateTime::now_utc() + ACCESS_TOKEN_LIFETIME);

			Ok::<_, Error>(Authentication::granted(token, Some(expire)))
		})
		.await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn lifetime_is_one_hour() {
		assert_eq!(ACCESS_TOKEN_LIFETIME.whole_milliseconds(), 3_600_000);
	}
}
