//! Host-framework plugin contract.
//!
//! Hosts hold an authenticator behind [`HostAuthenticator`] and speak loosely typed JSON
//! to it. `authenticate` is the only entry point with I/O; the other two are pure
//! functions over the last [`Authentication`] the host kept.
//!
//! [`Authenticator`] also has an inherent, typed `authenticate`; call the trait method as
//! `HostAuthenticator::authenticate(&authenticator, options)` to get the JSON entry point.

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	auth::Authentication,
	flows::{Authenticator, common},
	obs::FlowKind,
	options::{AuthOptions, CredentialType},
	provider::AuthClientFactory,
};

/// Boxed future returned by [`HostAuthenticator::authenticate`].
pub type AuthenticateFuture<'a> = Pin<Box<dyn Future<Output = Authentication> + 'a + Send>>;

/// Authenticator surface exposed to the host framework.
pub trait HostAuthenticator
where
	Self: Send + Sync,
{
	/// Performs one acquisition attempt with host-supplied options.
	///
	/// Never fails; malformed options produce a `refused` result like any other failure.
	fn authenticate<'a>(&'a self, options: Option<&'a Value>) -> AuthenticateFuture<'a>;

	/// Returns true when the last result still carries a token that has not expired.
	///
	/// `options` and `action` are accepted for host conformance and ignored.
	fn is_authenticated(
		&self,
		authentication: Option<&Authentication>,
		_options: Option<&Value>,
		_action: Option<&Value>,
	) -> bool {
		authentication.is_some_and(Authentication::is_authenticated)
	}

	/// Projects the last result into request headers; empty unless it was granted.
	fn as_http_headers(&self, authentication: Option<&Authentication>) -> BTreeMap<String, String> {
		authentication.map(Authentication::as_http_headers).unwrap_or_default()
	}
}
impl<F> HostAuthenticator for Authenticator<F>
where
	F: ?Sized + AuthClientFactory,
{
	fn authenticate<'a>(&'a self, options: Option<&'a Value>) -> AuthenticateFuture<'a> {
		Box::pin(async move {
			match AuthOptions::from_value(options) {
				Ok(options) => Authenticator::authenticate(self, Some(options)).await,
				Err(err) => {
					let kind = options
						.and_then(|value| value.get("type"))
						.map(|kind| FlowKind::from(CredentialType::from(kind.clone())))
						.unwrap_or(FlowKind::AccessToken);

					common::settle(kind, "options", &self.metrics, async move {
						Err::<Authentication, _>(Error::from(err))
					})
					.await
				},
			}
		})
	}
}

impl From<CredentialType> for FlowKind {
	fn from(kind: CredentialType) -> Self {
		match kind {
			CredentialType::AccessToken => FlowKind::AccessToken,
			CredentialType::IdToken => FlowKind::IdToken,
		}
	}
}
