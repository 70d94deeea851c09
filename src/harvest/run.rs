//! End-to-end orchestration: generate, batch, fetch with pacing, aggregate.

// self
use crate::{
	_prelude::*,
	auth::SerialNumber,
	batch::Batch,
	harvest::{Harvester, Pacer},
	http::QueryTransport,
	obs::{self, HarvestStage, StageOutcome, StageSpan},
	report::AggregateReport,
};

impl<T> Harvester<T>
where
	T: ?Sized + QueryTransport,
{
	/// Runs the whole harvest and assembles the aggregate report.
	///
	/// Batches are dispatched strictly sequentially, paced against the policy's minimum
	/// interval. The first terminal fetch error aborts the run: no further batches are
	/// attempted and no partial report is produced.
	///
	/// Every suspension point is a cooperative await, so dropping the returned future
	/// cancels the run cleanly; callers wanting a deadline can wrap it in
	/// `tokio::time::timeout`.
	pub async fn run(&self) -> Result<AggregateReport> {
		const STAGE: HarvestStage = HarvestStage::Harvest;

		let span = StageSpan::new(STAGE, "run");

		obs::record_stage_outcome(STAGE, StageOutcome::Attempt);

		let result = span.instrument(self.harvest()).await;

		match &result {
			Ok(_) => obs::record_stage_outcome(STAGE, StageOutcome::Success),
			Err(_) => obs::record_stage_outcome(STAGE, StageOutcome::Failure),
		}

		result
	}

	async fn harvest(&self) -> Result<AggregateReport> {
		let serials = SerialNumber::sequence(self.policy.population);

		#[cfg(feature = "tracing")]
		tracing::info!(count = serials.len(), "Generated serial number population.");

		let batches = Batch::split(serials, self.policy.batch_size);
		let total = batches.len();
		let pacer = Pacer::new(self.policy.min_interval);
		let mut records = Vec::with_capacity(self.policy.population);

		for (index, batch) in batches.iter().enumerate() {
			#[cfg(feature = "tracing")]
			tracing::info!(batch = index + 1, total, devices = batch.len(), "Fetching batch.");

			let fetched = pacer.paced(index + 1 == total, || self.fetch_batch(batch)).await?;

			records.extend(fetched);
		}

		Ok(AggregateReport::assemble(records))
	}
}
