//! Request signature computation for the query endpoint.
//!
//! The endpoint authenticates each request with an MD5 digest over the request path, the
//! shared secret, and the timestamp. The scheme is an unkeyed digest over guessable fields,
//! so it proves wire compatibility rather than cryptographic integrity; a server wanting
//! real authenticity needs a keyed MAC with a shared key. The format is preserved here
//! because the endpoint requires it.

// crates.io
use md5::{Digest, Md5};
// self
use crate::_prelude::*;

/// Hex-rendered request signature attached to an outbound batch query.
///
/// Computed fresh for every attempt, retries included, because the timestamp input
/// changes per attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestSignature(String);
impl RequestSignature {
	/// Computes the signature over `path + secret + timestamp`.
	///
	/// The digest covers the byte concatenation of the three inputs, with the timestamp in
	/// its decimal string form, and renders as 32 lowercase hexadecimal characters.
	/// Deterministic: identical inputs always produce identical output.
	pub fn compute(path: &str, secret: &str, timestamp_millis: i64) -> Self {
		let mut hasher = Md5::new();

		hasher.update(path.as_bytes());
		hasher.update(secret.as_bytes());
		hasher.update(timestamp_millis.to_string().as_bytes());

		Self(render_hex(hasher.finalize().as_slice()))
	}

	/// Returns the signature as a hex string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Display for RequestSignature {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Current wall-clock time as epoch milliseconds, the timestamp format the endpoint expects.
pub fn current_timestamp_millis() -> i64 {
	(OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

fn render_hex(digest: &[u8]) -> String {
	const HEX: &[u8; 16] = b"0123456789abcdef";

	let mut rendered = String::with_capacity(digest.len() * 2);

	for &byte in digest {
		rendered.push(HEX[usize::from(byte >> 4)] as char);
		rendered.push(HEX[usize::from(byte & 0x0f)] as char);
	}

	rendered
}
