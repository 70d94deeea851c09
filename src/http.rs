//! Transport primitives for signed batch queries.
//!
//! The module exposes [`QueryTransport`] as the harvester's only dependency on an HTTP
//! stack. Implementations receive a fully signed query and return the raw status plus
//! body; classification of the reply (success, rate limit, auth rejection) stays in the
//! harvester so every transport behaves identically. The default reqwest-backed
//! implementation lives behind the `reqwest` feature.

// std
use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::CONTENT_TYPE;
// self
use crate::{
	_prelude::*,
	auth::{RequestSignature, SerialNumber},
	error::TransportError,
	report::DeviceRecord,
};

/// Boxed future returned by [`QueryTransport::submit`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<QueryReply, TransportError>> + 'a + Send>>;

/// HTTP-stack contract for submitting one signed batch query.
pub trait QueryTransport
where
	Self: Send + Sync,
{
	/// Submits the query and resolves with the raw endpoint reply.
	///
	/// Implementations must not retry or reinterpret statuses; the harvester owns the
	/// retry and failure policy.
	fn submit<'a>(&'a self, query: &'a SignedQuery<'a>) -> TransportFuture<'a>;
}

/// One fully signed batch request, valid for a single attempt.
///
/// The timestamp and signature are recomputed for every attempt, so a retry never reuses
/// the values of the attempt it replaces.
#[derive(Debug)]
pub struct SignedQuery<'a> {
	/// Endpoint URL the request targets.
	pub endpoint: &'a Url,
	/// Epoch milliseconds in decimal string form, sent as the `timestamp` header.
	pub timestamp: String,
	/// Digest over path, secret, and timestamp, sent as the `signature` header.
	pub signature: RequestSignature,
	/// Batch of serial numbers carried in the request payload.
	pub serials: &'a [SerialNumber],
}
impl SignedQuery<'_> {
	/// Renders the JSON body carried by the request.
	pub fn payload(&self) -> Result<Vec<u8>, TransportError> {
		serde_json::to_vec(&QueryPayload { sn_list: self.serials })
			.map_err(|source| TransportError::PayloadEncode { source })
	}
}

/// Raw endpoint reply prior to classification.
#[derive(Clone, Debug)]
pub struct QueryReply {
	/// HTTP status code returned by the endpoint.
	pub status: u16,
	/// Raw response body.
	pub body: Vec<u8>,
}

/// Response envelope returned by the query endpoint on success.
#[derive(Debug, Deserialize)]
pub struct QueryEnvelope {
	/// Opaque device records, in server-returned order.
	pub data: Vec<DeviceRecord>,
}

#[derive(Serialize)]
struct QueryPayload<'a> {
	sn_list: &'a [SerialNumber],
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl QueryTransport for ReqwestTransport {
	fn submit<'a>(&'a self, query: &'a SignedQuery<'a>) -> TransportFuture<'a> {
		Box::pin(async move {
			let body = query.payload()?;
			let response = self
				.0
				.post(query.endpoint.clone())
				.header(CONTENT_TYPE, "application/json")
				.header("timestamp", query.timestamp.as_str())
				.header("signature", query.signature.as_str())
				.body(body)
				.send()
				.await
				.map_err(TransportError::from)?;
			let status = response.status().as_u16();
			let body = response.bytes().await.map_err(TransportError::from)?.to_vec();

			Ok(QueryReply { status, body })
		})
	}
}
