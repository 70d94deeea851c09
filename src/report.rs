//! Terminal harvest artifacts: opaque device records and the aggregate report.

// self
use crate::_prelude::*;

/// Opaque unit of result data for one device, returned by the query endpoint.
///
/// The internal shape is server defined; the harvester passes records through without
/// inspecting any field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceRecord(serde_json::Value);
impl DeviceRecord {
	/// Wraps a server-returned JSON value.
	pub fn new(value: serde_json::Value) -> Self {
		Self(value)
	}

	/// Returns the underlying JSON value.
	pub fn as_value(&self) -> &serde_json::Value {
		&self.0
	}

	/// Consumes the record and returns the underlying JSON value.
	pub fn into_value(self) -> serde_json::Value {
		self.0
	}
}
impl From<serde_json::Value> for DeviceRecord {
	fn from(value: serde_json::Value) -> Self {
		Self(value)
	}
}

/// Final aggregate assembled after every batch completed successfully.
///
/// Records appear in batch-dispatch order, then intra-batch order, which matches the
/// order the population was generated in. Immutable once assembled.
#[derive(Clone, Debug, Serialize)]
pub struct AggregateReport {
	/// Total count of accumulated device records.
	pub total_devices: usize,
	/// Instant the report was assembled.
	#[serde(with = "time::serde::rfc3339")]
	pub generated_at: OffsetDateTime,
	/// Ordered concatenation of all device records across all batches.
	pub devices: Vec<DeviceRecord>,
}
impl AggregateReport {
	/// Assembles the report from the accumulated records, stamping the current time.
	pub fn assemble(devices: Vec<DeviceRecord>) -> Self {
		Self { total_devices: devices.len(), generated_at: OffsetDateTime::now_utc(), devices }
	}

	/// Returns the condensed view used for console reporting.
	pub fn summary(&self) -> ReportSummary<'_> {
		ReportSummary {
			total: self.total_devices,
			first_device: self.devices.first(),
			last_device: self.devices.last(),
		}
	}
}

/// Condensed report view: total plus the first and last record.
#[derive(Clone, Debug, Serialize)]
pub struct ReportSummary<'a> {
	/// Total count of accumulated device records.
	pub total: usize,
	/// First record in the aggregate, when any.
	pub first_device: Option<&'a DeviceRecord>,
	/// Last record in the aggregate, when any.
	pub last_device: Option<&'a DeviceRecord>,
}
