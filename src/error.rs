//! Harvester-level error types shared across fetching, pacing, and configuration.

// self
use crate::_prelude::*;

/// Harvester-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical harvester error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Query endpoint rejected the request signature or credentials.
	///
	/// Indicates a credential problem rather than a connectivity one; the run aborts
	/// without attempting further batches.
	#[error("Query endpoint rejected the credentials: {reason}.")]
	Unauthorized {
		/// Response body returned alongside the rejection, logged verbatim.
		reason: String,
	},
	/// Query endpoint answered with a non-success status outside the handled set.
	#[error("Query endpoint returned an unexpected status {status}.")]
	UnexpectedStatus {
		/// HTTP status code returned by the endpoint.
		status: u16,
		/// Response body returned alongside the status, when any.
		message: String,
	},
	/// Rate-limit retries hit the configured ceiling without a successful response.
	#[error("Rate-limit retries were exhausted after {attempts} attempts.")]
	RetriesExhausted {
		/// Total attempts issued for the batch, the initial one included.
		attempts: u32,
	},
	/// Query endpoint responded with malformed JSON that could not be parsed.
	#[error("Query endpoint returned malformed JSON.")]
	ResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}

/// Configuration and validation failures raised by the harvester.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Query descriptor validation failed.
	#[error(transparent)]
	Descriptor(#[from] crate::query::QueryDescriptorError),
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the query endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the query endpoint.")]
	Io(#[from] std::io::Error),
	/// Batch payload could not be encoded as JSON.
	#[error("Batch payload could not be encoded as JSON.")]
	PayloadEncode {
		/// Serialization failure for the outbound body.
		#[source]
		source: serde_json::Error,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
