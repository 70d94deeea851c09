//! High-level harvest orchestration built on the transport seam.

pub mod pace;

mod fetch;
mod run;

pub use pace::*;

// self
use crate::{_prelude::*, http::QueryTransport, query::QueryDescriptor};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Harvester specialized for the crate's default reqwest transport stack.
pub type ReqwestHarvester = Harvester<ReqwestTransport>;

/// Coordinates the end-to-end harvest against a single query descriptor.
///
/// The harvester owns the transport, the endpoint descriptor, and the policy tunables so
/// the fetch and run implementations can focus on classification, retry, and pacing
/// logic. Dispatch is strictly sequential: the pacing model assumes one in-flight
/// request at a time, and whether the server tolerates concurrent submissions is
/// unverified.
#[derive(Clone)]
pub struct Harvester<T>
where
	T: ?Sized + QueryTransport,
{
	/// Transport used for every outbound batch submission.
	pub transport: Arc<T>,
	/// Descriptor identifying the endpoint and signing inputs.
	pub descriptor: QueryDescriptor,
	/// Tunables governing batching, pacing, and retries.
	pub policy: HarvestPolicy,
}
impl<T> Harvester<T>
where
	T: ?Sized + QueryTransport,
{
	/// Creates a harvester that reuses the caller-provided transport.
	pub fn with_transport(descriptor: QueryDescriptor, transport: impl Into<Arc<T>>) -> Self {
		Self { transport: transport.into(), descriptor, policy: HarvestPolicy::default() }
	}

	/// Replaces the policy tunables.
	pub fn with_policy(mut self, policy: HarvestPolicy) -> Self {
		self.policy = policy;

		self
	}
}
#[cfg(feature = "reqwest")]
impl Harvester<ReqwestTransport> {
	/// Creates a new harvester for the provided descriptor.
	///
	/// The harvester provisions its own reqwest-backed transport so callers do not need
	/// to pass HTTP handles explicitly. Use [`Harvester::with_policy`] to override the
	/// default tunables.
	pub fn new(descriptor: QueryDescriptor) -> Self {
		Self::with_transport(descriptor, ReqwestTransport::default())
	}
}
impl<T> Debug for Harvester<T>
where
	T: ?Sized + QueryTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Harvester")
			.field("descriptor", &self.descriptor)
			.field("policy", &self.policy)
			.finish()
	}
}

/// Tunables governing population size, batching, pacing, and the retry budget.
///
/// Defaults match the stock endpoint limits: 500 devices, batches of 10, one request per
/// second, a 2-second rate-limit cooldown. The retry budget keeps throttling recovery
/// bounded: after `max_retries` rate-limit rejections the batch fails with
/// [`Error::RetriesExhausted`](crate::error::Error::RetriesExhausted) instead of
/// retrying forever.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarvestPolicy {
	/// Device population size generated at the start of a run.
	pub population: usize,
	/// Maximum serial numbers per batch.
	pub batch_size: NonZeroUsize,
	/// Minimum interval between the starts of two consecutive batch dispatches.
	pub min_interval: Duration,
	/// Cooldown applied before the first rate-limit retry; doubles per retry.
	pub cooldown: Duration,
	/// Maximum rate-limit retries per batch, on top of the initial attempt.
	pub max_retries: u32,
	/// Upper bound the doubling cooldown never exceeds.
	pub backoff_cap: Duration,
}
impl HarvestPolicy {
	const DEFAULT_BACKOFF_CAP: Duration = Duration::from_secs(30);
	const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(10).unwrap();
	const DEFAULT_COOLDOWN: Duration = Duration::from_millis(2_000);
	const DEFAULT_MAX_RETRIES: u32 = 5;
	const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(1_000);
	const DEFAULT_POPULATION: usize = 500;

	/// Overrides the population size.
	pub fn with_population(mut self, population: usize) -> Self {
		self.population = population;

		self
	}

	/// Overrides the maximum batch size.
	pub fn with_batch_size(mut self, batch_size: NonZeroUsize) -> Self {
		self.batch_size = batch_size;

		self
	}

	/// Overrides the minimum inter-dispatch interval.
	pub fn with_min_interval(mut self, min_interval: Duration) -> Self {
		self.min_interval = min_interval;

		self
	}

	/// Overrides the base rate-limit cooldown.
	pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
		self.cooldown = cooldown;

		self
	}

	/// Overrides the rate-limit retry budget.
	pub fn with_max_retries(mut self, max_retries: u32) -> Self {
		self.max_retries = max_retries;

		self
	}

	/// Overrides the backoff upper bound.
	pub fn with_backoff_cap(mut self, backoff_cap: Duration) -> Self {
		self.backoff_cap = backoff_cap;

		self
	}

	/// Returns the cooldown applied before the given 1-based retry.
	///
	/// The base cooldown doubles per retry and never exceeds the configured cap.
	pub fn cooldown_for(&self, retry: u32) -> Duration {
		let exponent = retry.saturating_sub(1).min(16);
		let scaled = self.cooldown.saturating_mul(1_u32 << exponent);

		scaled.min(self.backoff_cap)
	}
}
impl Default for HarvestPolicy {
	fn default() -> Self {
		Self {
			population: Self::DEFAULT_POPULATION,
			batch_size: Self::DEFAULT_BATCH_SIZE,
			min_interval: Self::DEFAULT_MIN_INTERVAL,
			cooldown: Self::DEFAULT_COOLDOWN,
			max_retries: Self::DEFAULT_MAX_RETRIES,
			backoff_cap: Self::DEFAULT_BACKOFF_CAP,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn cooldown_doubles_per_retry_up_to_the_cap() {
		let policy = HarvestPolicy::default();

		assert_eq!(policy.cooldown_for(1), Duration::from_secs(2));
		assert_eq!(policy.cooldown_for(2), Duration::from_secs(4));
		assert_eq!(policy.cooldown_for(3), Duration::from_secs(8));
		assert_eq!(policy.cooldown_for(4), Duration::from_secs(16));
		assert_eq!(policy.cooldown_for(5), Duration::from_secs(30));
		assert_eq!(policy.cooldown_for(40), Duration::from_secs(30));
	}

	#[test]
	fn default_policy_matches_the_stock_endpoint_limits() {
		let policy = HarvestPolicy::default();

		assert_eq!(policy.population, 500);
		assert_eq!(policy.batch_size.get(), 10);
		assert_eq!(policy.min_interval, Duration::from_millis(1_000));
		assert_eq!(policy.cooldown, Duration::from_millis(2_000));
	}
}
