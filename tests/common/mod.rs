//! Recording provider double shared by the flow integration tests.

#![allow(dead_code)]

// std
use std::{io, sync::Arc};
// crates.io
use parking_lot::Mutex;
// self
use gcp_authenticator::{
	auth::{Scopes, TokenSecret},
	error::ProviderError,
	flows::Authenticator,
	provider::{
		AuthClient, AuthClientFactory, FetchResponse, IdTokenClient, IdTokenCredentials,
		ProviderFuture,
	},
};

/// Calls observed by the double.
#[derive(Clone, Debug, Default)]
pub struct Calls {
	pub constructed: Vec<Scopes>,
	pub access_token: usize,
	pub audiences: Vec<String>,
	pub fetched: Vec<String>,
}

/// Scripted provider answers.
#[derive(Clone, Debug)]
struct Script {
	access_token: Result<Option<String>, String>,
	id_client: Result<(), String>,
	fetch: Result<FetchResponse, String>,
	credentials: IdTokenCredentials,
}

/// Provider double that answers from a script and records every call.
pub struct MockAuthFactory {
	script: Script,
	calls: Arc<Mutex<Calls>>,
}
impl MockAuthFactory {
	pub fn new() -> Self {
		Self {
			script: Script {
				access_token: Ok(Some("t0k3n".into())),
				id_client: Ok(()),
				fetch: Ok(FetchResponse::new(200, "OK")),
				credentials: IdTokenCredentials::default(),
			},
			calls: Default::default(),
		}
	}

	pub fn access_token(mut self, token: Option<&str>) -> Self {
		self.script.access_token = Ok(token.map(str::to_owned));

		self
	}

	pub fn access_token_error(mut self, message: &str) -> Self {
		self.script.access_token = Err(message.into());

		self
	}

	pub fn id_client_error(mut self, message: &str) -> Self {
		self.script.id_client = Err(message.into());

		self
	}

	pub fn fetch_response(mut self, response: FetchResponse) -> Self {
		self.script.fetch = Ok(response);

		self
	}

	pub fn fetch_error(mut self, message: &str) -> Self {
		self.script.fetch = Err(message.into());

		self
	}

	pub fn id_credentials(mut self, id_token: Option<&str>, expiry_date: Option<i64>) -> Self {
		self.script.credentials =
			IdTokenCredentials { id_token: id_token.map(TokenSecret::from), expiry_date };

		self
	}

	pub fn calls(&self) -> Calls {
		self.calls.lock().clone()
	}

	pub fn into_authenticator(self) -> (Authenticator<MockAuthFactory>, Arc<MockAuthFactory>) {
		let factory = Arc::new(self);

		(Authenticator::new(Arc::clone(&factory)), factory)
	}
}
impl AuthClientFactory for MockAuthFactory {
	type Client = MockClient;

	fn create(&self, scopes: &Scopes) -> Self::Client {
		self.calls.lock().constructed.push(scopes.clone());

		MockClient { script: self.script.clone(), calls: Arc::clone(&self.calls) }
	}
}

pub struct MockClient {
	script: Script,
	calls: Arc<Mutex<Calls>>,
}
impl AuthClient for MockClient {
	type IdClient = MockIdClient;

	fn get_access_token(&self) -> ProviderFuture<'_, Option<String>> {
		self.calls.lock().access_token += 1;

		let reply = self.script.access_token.clone().map_err(rejected);

		Box::pin(async move { reply })
	}

	fn get_id_token_client<'a>(&'a self, audience: &'a str) -> ProviderFuture<'a, Self::IdClient> {
		self.calls.lock().audiences.push(audience.to_owned());

		let reply = self.script.id_client.clone().map_err(rejected).map(|()| MockIdClient {
			script: self.script.clone(),
			calls: Arc::clone(&self.calls),
			credentials: Default::default(),
		});

		Box::pin(async move { reply })
	}
}

pub struct MockIdClient {
	script: Script,
	calls: Arc<Mutex<Calls>>,
	credentials: Mutex<IdTokenCredentials>,
}
impl IdTokenClient for MockIdClient {
	fn fetch<'a>(&'a self, url: &'a str) -> ProviderFuture<'a, FetchResponse> {
		self.calls.lock().fetched.push(url.to_owned());

		let reply = self.script.fetch.clone().map_err(rejected);

		// Credentials only appear once a request has gone through.
		if reply.is_ok() {
			*self.credentials.lock() = self.script.credentials.clone();
		}

		Box::pin(async move { reply })
	}

	fn credentials(&self) -> IdTokenCredentials {
		self.credentials.lock().clone()
	}
}

fn rejected(message: String) -> ProviderError {
	ProviderError::from_error(io::Error::other(message))
}
