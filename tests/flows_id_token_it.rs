mod common;

// self
use common::MockAuthFactory;
use gcp_authenticator::{
	auth::{AuthStatus, Authentication, Scopes},
	flows::FlowCounts,
	obs::FlowKind,
	options::{AuthOptions, CredentialType},
	provider::FetchResponse,
};

const EXPIRY: i64 = 1_900_000_000_000;

#[tokio::test]
async fn id_token_is_granted_with_provider_expiry() {
	let (authenticator, factory) = MockAuthFactory::new()
		.id_credentials(Some("t0k3n"), Some(EXPIRY))
		.into_authenticator();
	let options = AuthOptions::id_token("https://iap-url.com").with_audience("iap-client-id");
	let auth = authenticator.authenticate(Some(options)).await;

	assert_eq!(auth, Authentication::granted("t0k3n", Some(EXPIRY)));

	let calls = factory.calls();

	assert_eq!(calls.audiences, vec!["iap-client-id".to_owned()]);
	assert_eq!(calls.fetched, vec!["https://iap-url.com".to_owned()]);
	assert_eq!(calls.constructed, vec![Scopes::default()]);
	assert_eq!(calls.access_token, 0);
	assert_eq!(
		authenticator.metrics.flow(FlowKind::IdToken),
		FlowCounts { attempts: 1, granted: 1, refused: 0 }
	);
	assert_eq!(authenticator.metrics.flow(FlowKind::AccessToken), FlowCounts::default());
}

#[tokio::test]
async fn audience_defaults_to_url() {
	let (authenticator, factory) = MockAuthFactory::new()
		.id_credentials(Some("t0k3n"), Some(EXPIRY))
		.into_authenticator();
	let auth = authenticator
		.authenticate(Some(AuthOptions::id_token("https://cloud-run-1234-uc.a.run.app")))
		.await;

	assert_eq!(auth.status, AuthStatus::Granted);
	assert_eq!(factory.calls().audiences, vec!["https://cloud-run-1234-uc.a.run.app".to_owned()]);
}

#[tokio::test]
async fn missing_url_is_refused_without_provider_calls() {
	for options in [
		AuthOptions { kind: CredentialType::IdToken, ..Default::default() },
		AuthOptions::id_token(""),
		AuthOptions { url: None, ..AuthOptions::id_token("x").with_audience("iap-client-id") },
	] {
		let (authenticator, factory) = MockAuthFactory::new().into_authenticator();
		let auth = authenticator.authenticate(Some(options)).await;

		assert_eq!(auth, Authentication::refused("No url was specified for the ID token"));

		let calls = factory.calls();

		assert!(calls.constructed.is_empty(), "No provider client may be constructed.");
		assert!(calls.audiences.is_empty());
		assert!(calls.fetched.is_empty());
	}
}

#[tokio::test]
async fn empty_credentials_are_refused() {
	let (authenticator, factory) = MockAuthFactory::new().into_authenticator();
	let auth = authenticator.authenticate(Some(AuthOptions::id_token("https://iap-url.com"))).await;

	assert_eq!(auth, Authentication::refused("Google Auth returned no token"));
	assert_eq!(factory.calls().fetched.len(), 1);
}

#[tokio::test]
async fn failed_fetch_status_is_refused_with_status_text() {
	let (authenticator, _factory) = MockAuthFactory::new()
		.fetch_response(FetchResponse::new(404, "Unknown url"))
		.id_credentials(Some("t0k3n"), Some(EXPIRY))
		.into_authenticator();
	let auth = authenticator.authenticate(Some(AuthOptions::id_token("https://iap-url.com"))).await;

	assert_eq!(auth, Authentication::refused("Google Auth returned an error: Unknown url"));
	assert!(auth.as_http_headers().is_empty());
}

#[tokio::test]
async fn provider_rejections_are_refused() {
	let (authenticator, factory) =
		MockAuthFactory::new().id_client_error("No credentials").into_authenticator();
	let auth = authenticator.authenticate(Some(AuthOptions::id_token("https://iap-url.com"))).await;

	assert_eq!(auth, Authentication::refused("Google Auth returned an error: No credentials"));
	assert!(factory.calls().fetched.is_empty());

	let (authenticator, _factory) =
		MockAuthFactory::new().fetch_error("socket hang up").into_authenticator();
	let auth = authenticator.authenticate(Some(AuthOptions::id_token("https://iap-url.com"))).await;

	assert_eq!(auth, Authentication::refused("Google Auth returned an error: socket hang up"));
}

#[tokio::test]
async fn missing_provider_expiry_is_omitted() {
	let (authenticator, _factory) =
		MockAuthFactory::new().id_credentials(Some("t0k3n"), None).into_authenticator();
	let auth = authenticator.authenticate(Some(AuthOptions::id_token("https://iap-url.com"))).await;

	assert_eq!(auth, Authentication::granted("t0k3n", None));
	assert!(auth.is_authenticated());
	assert_eq!(
		auth.as_http_headers().get("Authorization").map(String::as_str),
		Some("Bearer t0k3n")
	);
}
