//! Report delivery contract for consumers of finished harvests.

// self
use crate::report::AggregateReport;

/// Describes how to hand a finished [`AggregateReport`] to an external consumer.
///
/// The trait is intentionally generic over the error type so implementers can integrate
/// with any display or persistence stack while keeping `device-harvester` free of those
/// dependencies.
pub trait ReportSinkExt<Error>
where
	Self: Send + Sync,
{
	/// Consumes the finished report for display or persistence.
	fn deliver(&self, report: &AggregateReport) -> Result<(), Error>;
}
