//! Requested scopes, passed to the provider exactly as the host supplied them.

// std
use std::slice;
// self
use crate::_prelude::*;

/// Scope requested when the host does not name any.
pub const DEFAULT_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// One scope string or an ordered list of scopes.
///
/// Unlike a normalized scope set, order and duplicates are preserved: the provider
/// client receives the value unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scopes {
	/// A single scope string.
	Single(String),
	/// An ordered sequence of scopes.
	Many(Vec<String>),
}
impl Scopes {
	/// Number of scopes carried by the value.
	pub fn len(&self) -> usize {
		match self {
			Self::Single(_) => 1,
			Self::Many(scopes) => scopes.len(),
		}
	}

	/// Returns true for an empty sequence.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Iterator over the scopes in the order they were supplied.
	pub fn iter(&self) -> slice::Iter<'_, String> {
		match self {
			Self::Single(scope) => slice::from_ref(scope).iter(),
			Self::Many(scopes) => scopes.iter(),
		}
	}

	/// Joins the scopes with the given delimiter.
	pub fn join(&self, delimiter: char) -> String {
		let mut buf = String::new();

		for (idx, value) in self.iter().enumerate() {
			if idx > 0 {
				buf.push(delimiter);
			}

			buf.push_str(value);
		}

		buf
	}
}
impl Default for Scopes {
	fn default() -> Self {
		Self::Single(DEFAULT_SCOPE.into())
	}
}
impl Display for Scopes {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.join(' '))
	}
}
impl From<&str> for Scopes {
	fn from(value: &str) -> Self {
		Self::Single(value.to_owned())
	}
}
impl From<String> for Scopes {
	fn from(value: String) -> Self {
		Self::Single(value)
	}
}
impl From<Vec<String>> for Scopes {
	fn from(value: Vec<String>) -> Self {
		Self::Many(value)
	}
}
impl<const N: usize> From<[&str; N]> for Scopes {
	fn from(value: [&str; N]) -> Self {
		Self::Many(value.iter().map(|scope| (*scope).to_owned()).collect())
	}
}
impl<'a> IntoIterator for &'a Scopes {
	type IntoIter = slice::Iter<'a, String>;
	type Item = &'a String;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
