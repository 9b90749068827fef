//! Authenticator error taxonomy shared across flows, options, and provider clients.
//!
//! Errors never leave [`Authenticator::authenticate`](crate::flows::Authenticator::authenticate);
//! each flow converts them into a refused [`Authentication`](crate::auth::Authentication)
//! whose message is the error's `Display` text, so the wording below is part of the
//! public contract.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical authenticator error.
#[derive(Debug, ThisError)]
pub enum Error {
	/// The identity-token flow was requested without a usable URL.
	#[error("No url was specified for the ID token")]
	MissingParameter,
	/// The provider call succeeded but yielded no credential.
	#[error("Google Auth returned no token")]
	NoToken,
	/// The provider call failed or answered with a non-success status.
	#[error("Google Auth returned an error: {0}")]
	Provider(#[from] ProviderError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

/// Failure reported by an identity-provider client.
///
/// `Display` is the bare message text; [`Error::Provider`] adds the public prefix.
#[derive(Debug, ThisError)]
pub enum ProviderError {
	/// The provider raised a real error value.
	#[error("{0}")]
	Source(BoxError),
	/// The provider failed with something that is not an error value; kept as its string form.
	#[error("{0}")]
	Message(String),
}
impl ProviderError {
	/// Wraps an error raised by the provider.
	pub fn from_error(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Source(Box::new(src))
	}

	/// Stringifies an arbitrary failure value.
	pub fn message(value: impl Display) -> Self {
		Self::Message(value.to_string())
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ProviderError {
	fn from(e: ReqwestError) -> Self {
		Self::from_error(e)
	}
}

/// Configuration and validation failures raised locally.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Host-supplied options could not be parsed.
	#[error("Authentication options are invalid at `{path}`: {message}.")]
	InvalidOptions {
		/// JSON path of the offending field.
		path: String,
		/// Parser message.
		message: String,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Metadata server base URL cannot be used to build request URLs.
	#[error("Metadata server URL is invalid.")]
	InvalidMetadataUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<serde_path_to_error::Error<serde_json::Error>> for ConfigError {
	fn from(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
		Self::InvalidOptions { path: e.path().to_string(), message: e.into_inner().to_string() }
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::io;
	// self
	use super::*;

	#[test]
	fn refusal_messages_match_public_wording() {
		assert_eq!(Error::MissingParameter.to_string(), "No url was specified for the ID token");
		assert_eq!(Error::NoToken.to_string(), "Google Auth returned no token");
		assert_eq!(
			Error::from(ProviderError::message("Forbidden")).to_string(),
			"Google Auth returned an error: Forbidden"
		);
	}

	#[test]
	fn provider_error_uses_source_message_text() {
		let err =
			ProviderError::from_error(io::Error::new(io::ErrorKind::PermissionDenied, "Forbidden"));

		assert_eq!(err.to_string(), "Forbidden");
		assert_eq!(Error::from(err).to_string(), "Google Auth returned an error: Forbidden");
	}

	#[test]
	fn non_error_values_are_stringified() {
		assert_eq!(ProviderError::message(503).to_string(), "503");
	}
}
