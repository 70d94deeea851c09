//! Contiguous, order-preserving partitioning of the device population.

// std
use std::ops::Deref;
// self
use crate::_prelude::*;

/// Ordered, non-empty group of items dispatched in one query request.
///
/// Batches partition their source sequence contiguously and exhaustively: concatenating
/// every batch produced by [`Batch::split`], in order, reproduces the input with no gaps,
/// duplicates, or reordering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Batch<T>(Vec<T>);
impl<T> Batch<T> {
	/// Splits `items` into ordered batches of at most `max_size` elements.
	///
	/// Every batch is non-empty and only the last one may be smaller than `max_size`.
	/// An empty input yields zero batches rather than one empty batch.
	pub fn split(items: Vec<T>, max_size: NonZeroUsize) -> Vec<Self> {
		let max = max_size.get();
		let mut batches = Vec::with_capacity(items.len().div_ceil(max));
		let mut remaining = items.into_iter();

		loop {
			let chunk = remaining.by_ref().take(max).collect::<Vec<_>>();

			if chunk.is_empty() {
				break;
			}

			batches.push(Self(chunk));
		}

		batches
	}

	/// Returns the batch contents as a slice.
	pub fn as_slice(&self) -> &[T] {
		&self.0
	}

	/// Consumes the batch and returns its contents.
	pub fn into_inner(self) -> Vec<T> {
		self.0
	}
}
impl<T> Deref for Batch<T> {
	type Target = [T];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl<T> IntoIterator for Batch<T> {
	type IntoIter = std::vec::IntoIter<T>;
	type Item = T;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn max(value: usize) -> NonZeroUsize {
		NonZeroUsize::new(value).expect("Batch size fixture should be non-zero.")
	}

	#[test]
	fn split_produces_bounded_batches_with_smaller_tail() {
		let batches = Batch::split((0..25).collect(), max(10));

		assert_eq!(batches.len(), 3);
		assert_eq!(batches.iter().map(|batch| batch.len()).collect::<Vec<_>>(), [10, 10, 5]);
	}

	#[test]
	fn split_concatenation_reproduces_the_input() {
		for (count, size) in [(0_u32, 1), (1, 1), (7, 3), (24, 8), (25, 10), (500, 10)] {
			let items = (0..count).collect::<Vec<_>>();
			let batches = Batch::split(items.clone(), max(size));

			assert_eq!(batches.len(), (count as usize).div_ceil(size));
			assert!(batches.iter().all(|batch| batch.len() <= size && !batch.is_empty()));

			let rejoined =
				batches.into_iter().flat_map(Batch::into_inner).collect::<Vec<_>>();

			assert_eq!(rejoined, items);
		}
	}

	#[test]
	fn split_of_exact_multiple_has_no_short_tail() {
		let batches = Batch::split((0..20).collect::<Vec<u32>>(), max(10));

		assert_eq!(batches.len(), 2);
		assert!(batches.iter().all(|batch| batch.len() == 10));
	}

	#[test]
	fn split_of_empty_input_yields_no_batches() {
		assert!(Batch::split(Vec::<u32>::new(), max(10)).is_empty());
	}
}
