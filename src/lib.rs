//! Google Cloud authenticator adapter: fetch an OAuth 2.0 access token or an OpenID Connect
//! identity token and expose it to a host data-integration framework as a bearer header.
//!
//! The host drives three entry points (see [`plugin::HostAuthenticator`]):
//!
//! - `authenticate` picks the access-token or identity-token flow and always yields an
//!   [`auth::Authentication`] (`granted` or `refused`), never an error.
//! - `is_authenticated` checks whether a previous result still carries a live token.
//! - `as_http_headers` projects a granted result into an `Authorization` header.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod flows;
#[cfg(feature = "reqwest")] pub mod http;
pub mod obs;
pub mod options;
pub mod plugin;
pub mod provider;

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use serde_json;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
