//! Provider client backed by the GCE metadata server.
//!
//! Workloads on Compute Engine, Cloud Run, GKE, and Cloud Functions can mint tokens for
//! their attached service account by asking the metadata server:
//!
//! - `GET …/service-accounts/default/token?scopes=a,b` answers with an access token;
//! - `GET …/service-accounts/default/identity?audience=AUD&format=full` answers with a
//!   signed identity token whose `exp` claim provides the expiry.
//!
//! Every request carries `Metadata-Flavor: Google`. Point
//! [`MetadataServerConfig`] elsewhere (or set `GCE_METADATA_HOST`) to use an emulator.

// std
use std::env;
// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use reqwest::{Response, StatusCode};
// self
use crate::{
	_prelude::*,
	auth::{Scopes, TokenSecret},
	error::{ConfigError, ProviderError},
	provider::{
		AuthClient, AuthClientFactory, FetchResponse, IdTokenClient, IdTokenCredentials,
		ProviderFuture,
	},
};

/// Environment variable overriding the metadata server host.
pub const METADATA_HOST_ENV: &str = "GCE_METADATA_HOST";
/// Metadata server host used when the environment does not name one.
pub const DEFAULT_METADATA_HOST: &str = "metadata.google.internal";

const METADATA_FLAVOR_HEADER: &str = "Metadata-Flavor";
const METADATA_FLAVOR: &str = "Google";
const SERVICE_ACCOUNT_PATH: &str = "computeMetadata/v1/instance/service-accounts/default/";

/// Location of the metadata server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataServerConfig {
	/// Base URL every metadata path is resolved against.
	pub base_url: Url,
}
impl MetadataServerConfig {
	/// Uses an explicit base URL.
	pub fn new(base_url: Url) -> Self {
		Self { base_url }
	}

	/// Builds a config for a bare `host[:port]`, as Google client libraries accept it.
	pub fn from_host(host: &str) -> Result<Self, ConfigError> {
		Url::parse(&format!("http://{host}/"))
			.map(Self::new)
			.map_err(|source| ConfigError::InvalidMetadataUrl { source })
	}

	/// Reads `GCE_METADATA_HOST`, falling back to `metadata.google.internal`.
	pub fn from_env() -> Result<Self, ConfigError> {
		let host = env::var(METADATA_HOST_ENV).ok().filter(|host| !host.trim().is_empty());

		Self::from_host(host.as_deref().map(str::trim).unwrap_or(DEFAULT_METADATA_HOST))
	}

	fn endpoint(&self, leaf: &str) -> Result<Url, ConfigError> {
		self.base_url
			.join(SERVICE_ACCOUNT_PATH)
			.and_then(|base| base.join(leaf))
			.map_err(|source| ConfigError::InvalidMetadataUrl { source })
	}
}

/// Builds [`MetadataAuthClient`]s that share one reqwest connection pool.
#[derive(Clone, Debug)]
pub struct MetadataAuthFactory {
	http_client: ReqwestClient,
	config: Arc<MetadataServerConfig>,
}
impl MetadataAuthFactory {
	/// Creates a factory with a default reqwest client.
	pub fn new(config: MetadataServerConfig) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().build().map_err(ConfigError::http_client_build)?;

		Ok(Self::with_client(client, config))
	}

	/// Wraps an existing reqwest client.
	pub fn with_client(client: ReqwestClient, config: MetadataServerConfig) -> Self {
		Self { http_client: client, config: Arc::new(config) }
	}

	/// Creates a factory for the metadata server named by the environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::new(MetadataServerConfig::from_env()?)
	}

	/// Metadata server location used by every client.
	pub fn config(&self) -> &MetadataServerConfig {
		&self.config
	}
}
impl AuthClientFactory for MetadataAuthFactory {
	type Client = MetadataAuthClient;

	fn create(&self, scopes: &Scopes) -> Self::Client {
		MetadataAuthClient {
			http_client: self.http_client.clone(),
			config: Arc::clone(&self.config),
			scopes: scopes.clone(),
		}
	}
}

/// Metadata-server client bound to one set of scopes.
#[derive(Clone, Debug)]
pub struct MetadataAuthClient {
	http_client: ReqwestClient,
	config: Arc<MetadataServerConfig>,
	scopes: Scopes,
}
impl MetadataAuthClient {
	/// Scopes requested with every access token.
	pub fn scopes(&self) -> &Scopes {
		&self.scopes
	}

	async fn request_access_token(&self) -> Result<Option<String>, ProviderError> {
		let mut url = self.config.endpoint("token").map_err(ProviderError::from_error)?;

		url.query_pairs_mut().append_pair("scopes", &self.scopes.join(','));

		let response = metadata_get(&self.http_client, url, "token").await?;
		let body = response.bytes().await?;
		let token: MetadataAccessToken =
			serde_path_to_error::deserialize(&mut serde_json::Deserializer::from_slice(&body))
				.map_err(ProviderError::from_error)?;

		Ok(token.access_token.filter(|token| !token.is_empty()))
	}
}
impl AuthClient for MetadataAuthClient {
	type IdClient = MetadataIdTokenClient;

	fn get_access_token(&self) -> ProviderFuture<'_, Option<String>> {
		Box::pin(self.request_access_token())
	}

	fn get_id_token_client<'a>(&'a self, audience: &'a str) -> ProviderFuture<'a, Self::IdClient> {
		let client = MetadataIdTokenClient {
			http_client: self.http_client.clone(),
			config: Arc::clone(&self.config),
			audience: audience.to_owned(),
			credentials: Default::default(),
		};

		Box::pin(async move { Ok(client) })
	}
}

/// Identity-token client for one audience.
///
/// Each [`fetch`](IdTokenClient::fetch) mints an identity token, records it (and its `exp`
/// claim) as the client's credentials, and sends the request with it as a bearer token.
#[derive(Debug)]
pub struct MetadataIdTokenClient {
	http_client: ReqwestClient,
	config: Arc<MetadataServerConfig>,
	audience: String,
	credentials: Mutex<IdTokenCredentials>,
}
impl MetadataIdTokenClient {
	/// Audience every identity token is minted for.
	pub fn audience(&self) -> &str {
		&self.audience
	}

	async fn request_id_token(&self) -> Result<TokenSecret, ProviderError> {
		let mut url = self.config.endpoint("identity").map_err(ProviderError::from_error)?;

		url.query_pairs_mut().append_pair("audience", &self.audience).append_pair("format", "full");

		let response = metadata_get(&self.http_client, url, "identity").await?;
		let token = response.text().await?.trim().to_owned();

		if token.is_empty() {
			return Err(ProviderError::message("Metadata server returned an empty identity token."));
		}

		let token = TokenSecret::new(token);

		*self.credentials.lock() = IdTokenCredentials {
			expiry_date: jwt_expiry_millis(token.expose()),
			id_token: Some(token.clone()),
		};

		Ok(token)
	}

	async fn authorized_get(&self, url: &str) -> Result<FetchResponse, ProviderError> {
		let token = self.request_id_token().await?;
		let response = self.http_client.get(url).bearer_auth(token.expose()).send().await?;
		let status = response.status();

		Ok(FetchResponse::new(status.as_u16(), status.canonical_reason().unwrap_or_default()))
	}
}
impl IdTokenClient for MetadataIdTokenClient {
	fn fetch<'a>(&'a self, url: &'a str) -> ProviderFuture<'a, FetchResponse> {
		Box::pin(self.authorized_get(url))
	}

	fn credentials(&self) -> IdTokenCredentials {
		self.credentials.lock().clone()
	}
}

#[derive(Deserialize)]
struct MetadataAccessToken {
	#[serde(default)]
	access_token: Option<String>,
}

#[derive(Deserialize)]
struct IdTokenClaims {
	exp: Option<i64>,
}

async fn metadata_get(
	client: &ReqwestClient,
	url: Url,
	endpoint: &'static str,
) -> Result<Response, ProviderError> {
	let response = client.get(url).header(METADATA_FLAVOR_HEADER, METADATA_FLAVOR).send().await?;
	let status = response.status();

	if status.is_success() {
		Ok(response)
	} else {
		Err(status_error(endpoint, status))
	}
}

fn status_error(endpoint: &'static str, status: StatusCode) -> ProviderError {
	ProviderError::message(format!(
		"Metadata server {endpoint} request failed with status {status}."
	))
}

/// Reads the `exp` claim of a JWT as milliseconds since the Unix epoch.
///
/// The signature is not checked; the metadata server is the trusted issuer here.
fn jwt_expiry_millis(token: &str) -> Option<i64> {
	let payload = token.split('.').nth(1)?;
	let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
	let claims: IdTokenClaims = serde_json::from_slice(&bytes).ok()?;

	claims.exp?.checked_mul(1_000)
}
