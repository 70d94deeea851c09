//! Minimum inter-dispatch interval enforcement for the orchestration loop.

// crates.io
use tokio::time::{Instant, sleep};
// self
use crate::_prelude::*;

/// Enforces a minimum interval between the starts of consecutive operations.
///
/// The pacer wraps whole batch-fetch attempts at the orchestration level, internal
/// retries included; a rate-limit cooldown inside a fetch is separate and additional.
#[derive(Clone, Copy, Debug)]
pub struct Pacer {
	min_interval: Duration,
}
impl Pacer {
	/// Creates a pacer for the provided minimum interval.
	pub fn new(min_interval: Duration) -> Self {
		Self { min_interval }
	}

	/// Runs `operation`, then sleeps out the remainder of the minimum interval.
	///
	/// The interval is measured from just before the operation starts to just after it
	/// completes, whatever its outcome. No suspension occurs when the operation already
	/// consumed the interval, and none after the final operation in the driving
	/// sequence, so the gap between the start times of two consecutive non-final
	/// operations is never less than the minimum interval.
	pub async fn paced<F, Fut, O>(&self, is_final: bool, operation: F) -> O
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = O>,
	{
		let started = Instant::now();
		let output = operation().await;

		if !is_final {
			let remaining = self.min_interval.saturating_sub(started.elapsed());

			if !remaining.is_zero() {
				sleep(remaining).await;
			}
		}

		output
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const MIN_INTERVAL: Duration = Duration::from_millis(1_000);

	#[tokio::test(start_paused = true)]
	async fn paced_tops_up_fast_operations_to_the_minimum_interval() {
		let pacer = Pacer::new(MIN_INTERVAL);
		let started = Instant::now();

		pacer.paced(false, || sleep(Duration::from_millis(200))).await;

		assert_eq!(started.elapsed(), MIN_INTERVAL);
	}

	#[tokio::test(start_paused = true)]
	async fn paced_adds_no_wait_to_slow_operations() {
		let pacer = Pacer::new(MIN_INTERVAL);
		let started = Instant::now();

		pacer.paced(false, || sleep(Duration::from_millis(1_500))).await;

		assert_eq!(started.elapsed(), Duration::from_millis(1_500));
	}

	#[tokio::test(start_paused = true)]
	async fn paced_never_sleeps_after_the_final_operation() {
		let pacer = Pacer::new(MIN_INTERVAL);
		let started = Instant::now();

		pacer.paced(true, || sleep(Duration::from_millis(200))).await;

		assert_eq!(started.elapsed(), Duration::from_millis(200));
	}

	#[tokio::test(start_paused = true)]
	async fn paced_returns_the_operation_output() {
		let pacer = Pacer::new(MIN_INTERVAL);
		let value = pacer.paced(false, || async { 7 }).await;

		assert_eq!(value, 7);
	}
}
