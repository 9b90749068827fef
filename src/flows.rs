//! Credential-flow dispatcher and the two acquisition flows it routes to.

pub mod access_token;
pub(crate) mod common;
pub mod id_token;

mod metrics;

pub use access_token::ACCESS_TOKEN_LIFETIME;
pub use metrics::{FlowCounts, FlowMetrics};

// self
use crate::{
	_prelude::*,
	auth::Authentication,
	options::{AuthOptions, CredentialType},
	provider::AuthClientFactory,
};
#[cfg(feature = "reqwest")] use crate::http::MetadataAuthFactory;

#[cfg(feature = "reqwest")]
/// Authenticator backed by the GCE metadata server.
pub type MetadataAuthenticator = Authenticator<MetadataAuthFactory>;

/// Obtains Google credentials for a host framework.
///
/// Every [`authenticate`](Self::authenticate) call resolves the options, builds one
/// provider client through the factory, and runs either the access-token or the
/// identity-token flow. Nothing is cached between calls and nothing is retried; a
/// failure yields a single `refused` result and the host decides what to do next.
pub struct Authenticator<F>
where
	F: ?Sized + AuthClientFactory,
{
	/// Factory producing one provider client per call.
	pub factory: Arc<F>,
	/// In-process counters for attempts and outcomes.
	pub metrics: Arc<FlowMetrics>,
}
impl<F> Authenticator<F>
where
	F: ?Sized + AuthClientFactory,
{
	/// Creates an authenticator over the provided client factory.
	pub fn new(factory: impl Into<Arc<F>>) -> Self {
		Self { factory: factory.into(), metrics: Default::default() }
	}

	/// Runs one acquisition attempt. Missing options fall back to the defaults.
	///
	/// Never fails: every error is folded into a `refused` [`Authentication`].
	pub async fn authenticate(&self, options: Option<AuthOptions>) -> Authentication {
		let options = options.unwrap_or_default();
		let scopes = options.resolved_scopes();

		match options.kind {
			CredentialType::AccessToken => self.access_token(&scopes).await,
			CredentialType::IdToken => self.id_token(&scopes, &options).await,
		}
	}
}
#[cfg(feature = "reqwest")]
impl Authenticator<MetadataAuthFactory> {
	/// Creates an authenticator that talks to the metadata server named by the environment.
	///
	/// See [`MetadataServerConfig::from_env`](crate::http::MetadataServerConfig::from_env).
	pub fn metadata_server() -> Result<Self> {
		Ok(Self::new(MetadataAuthFactory::from_env()?))
	}
}
impl<F> Clone for Authenticator<F>
where
	F: ?Sized + AuthClientFactory,
{
	fn clone(&self) -> Self {
		Self { factory: Arc::clone(&self.factory), metrics: Arc::clone(&self.metrics) }
	}
}
impl<F> Debug for Authenticator<F>
where
	F: ?Sized + AuthClientFactory,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Authenticator").field("metrics", &self.metrics).finish()
	}
}
