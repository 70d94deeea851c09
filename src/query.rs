//! Query endpoint descriptor consumed by the harvester.
//!
//! The descriptor is the explicit configuration object constructed once at startup and
//! passed into [`Harvester`](crate::harvest::Harvester), replacing process-wide constants
//! so tests can target alternate endpoints and secrets in isolation.

// self
use crate::{_prelude::*, auth::SharedSecret};

/// Describes the query endpoint plus the inputs every request signature covers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryDescriptor {
	/// Fully qualified endpoint URL receiving batch submissions.
	pub endpoint: Url,
	/// Logical request path covered by the signature.
	///
	/// The server signs what it observes as the request path, so this defaults to the
	/// path component of `endpoint` and only needs overriding when a proxy rewrites it.
	pub signing_path: String,
	/// Shared secret mixed into every request signature.
	pub secret: SharedSecret,
}
impl QueryDescriptor {
	/// Starts building a descriptor targeting the provided endpoint.
	pub fn builder(endpoint: Url) -> QueryDescriptorBuilder {
		QueryDescriptorBuilder::new(endpoint)
	}
}

/// Builder for [`QueryDescriptor`] values.
#[derive(Debug)]
pub struct QueryDescriptorBuilder {
	/// Endpoint URL the descriptor is being built for.
	pub endpoint: Url,
	/// Optional signing path override.
	pub signing_path: Option<String>,
	/// Shared secret token (required).
	pub secret: Option<SharedSecret>,
}
impl QueryDescriptorBuilder {
	/// Creates a new builder seeded with the provided endpoint.
	pub fn new(endpoint: Url) -> Self {
		Self { endpoint, signing_path: None, secret: None }
	}

	/// Overrides the signing path derived from the endpoint URL.
	pub fn signing_path(mut self, path: impl Into<String>) -> Self {
		self.signing_path = Some(path.into());

		self
	}

	/// Sets the shared secret token.
	pub fn secret(mut self, secret: impl Into<String>) -> Self {
		self.secret = Some(SharedSecret::new(secret));

		self
	}

	/// Validates the collected values and produces the descriptor.
	pub fn build(self) -> Result<QueryDescriptor, QueryDescriptorError> {
		let secret = self.secret.ok_or(QueryDescriptorError::MissingSecret)?;

		if secret.is_empty() {
			return Err(QueryDescriptorError::EmptySecret);
		}

		let signing_path =
			self.signing_path.unwrap_or_else(|| self.endpoint.path().to_owned());

		if signing_path.is_empty() {
			return Err(QueryDescriptorError::EmptySigningPath);
		}

		Ok(QueryDescriptor { endpoint: self.endpoint, signing_path, secret })
	}
}

/// Errors raised while constructing or validating descriptors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum QueryDescriptorError {
	/// Shared secret is mandatory for every request signature.
	#[error("Missing shared secret token.")]
	MissingSecret,
	/// Shared secret must hold at least one character.
	#[error("Shared secret token cannot be empty.")]
	EmptySecret,
	/// Signing path must hold at least one character.
	#[error("Signing path cannot be empty.")]
	EmptySigningPath,
}
