//! Single-batch fetching with failure classification and bounded rate-limit retries.
//!
//! Every attempt recomputes the timestamp and signature before submitting, so a retry
//! never reuses the request identity of the attempt it replaces. Rate-limit rejections
//! (429) are retried locally with a doubling, capped cooldown until the policy's budget
//! runs out; authentication rejections (401) and any other non-success status abort the
//! fetch, and with it the whole run, immediately.

// self
use crate::{
	_prelude::*,
	auth::{self, RequestSignature, SerialNumber},
	batch::Batch,
	harvest::Harvester,
	http::{QueryEnvelope, QueryReply, QueryTransport, SignedQuery},
	obs::{self, HarvestStage, StageOutcome, StageSpan},
	report::DeviceRecord,
};

impl<T> Harvester<T>
where
	T: ?Sized + QueryTransport,
{
	/// Fetches one batch of device records, retrying rate-limit rejections.
	pub async fn fetch_batch(&self, batch: &Batch<SerialNumber>) -> Result<Vec<DeviceRecord>> {
		const STAGE: HarvestStage = HarvestStage::Fetch;

		let span = StageSpan::new(STAGE, "fetch_batch");

		obs::record_stage_outcome(STAGE, StageOutcome::Attempt);

		let result = span.instrument(self.fetch_batch_with_retries(batch)).await;

		match &result {
			Ok(_) => obs::record_stage_outcome(STAGE, StageOutcome::Success),
			Err(_) => obs::record_stage_outcome(STAGE, StageOutcome::Failure),
		}

		result
	}

	async fn fetch_batch_with_retries(
		&self,
		batch: &Batch<SerialNumber>,
	) -> Result<Vec<DeviceRecord>> {
		let mut attempt = 0_u32;

		loop {
			attempt += 1;

			let timestamp = auth::current_timestamp_millis();
			let signature = RequestSignature::compute(
				&self.descriptor.signing_path,
				self.descriptor.secret.expose(),
				timestamp,
			);
			let query = SignedQuery {
				endpoint: &self.descriptor.endpoint,
				timestamp: timestamp.to_string(),
				signature,
				serials: batch.as_slice(),
			};
			let reply = self.transport.submit(&query).await?;

			match reply.status {
				200..=299 => return parse_records(&reply),
				429 => {
					if attempt > self.policy.max_retries {
						return Err(Error::RetriesExhausted { attempts: attempt });
					}

					let wait = self.policy.cooldown_for(attempt);

					#[cfg(feature = "tracing")]
					tracing::warn!(
						attempt,
						wait_ms = wait.as_millis() as u64,
						"Query endpoint rate limited the batch; cooling down before retrying."
					);

					tokio::time::sleep(wait).await;
				},
				401 => {
					let reason = String::from_utf8_lossy(&reply.body).into_owned();

					#[cfg(feature = "tracing")]
					tracing::error!(%reason, "Query endpoint rejected the request signature.");

					return Err(Error::Unauthorized { reason });
				},
				status =>
					return Err(Error::UnexpectedStatus {
						status,
						message: String::from_utf8_lossy(&reply.body).into_owned(),
					}),
			}
		}
	}
}

fn parse_records(reply: &QueryReply) -> Result<Vec<DeviceRecord>> {
	let mut deserializer = serde_json::Deserializer::from_slice(&reply.body);
	let envelope: QueryEnvelope = serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::ResponseParse { source, status: Some(reply.status) })?;

	Ok(envelope.data)
}
