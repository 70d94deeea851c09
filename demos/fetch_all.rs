//! Demonstrates a full harvest against a mock query endpoint, delivering the final
//! aggregate to a console report sink.

// std
use std::{num::NonZeroUsize, time::Duration};
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use device_harvester::{
	ext::ReportSinkExt,
	harvest::{HarvestPolicy, Harvester},
	query::QueryDescriptor,
	report::AggregateReport,
};

struct ConsoleSink;
impl ReportSinkExt<color_eyre::Report> for ConsoleSink {
	fn deliver(&self, report: &AggregateReport) -> Result<()> {
		println!("Successfully fetched data for {} devices.", report.total_devices);
		println!("Final report summary:");
		println!("{}", serde_json::to_string_pretty(&report.summary())?);

		Ok(())
	}
}

fn device_body(range: std::ops::Range<usize>) -> String {
	let records = range
		.map(|index| serde_json::json!({ "sn": format!("SN-{index:03}"), "status": "online" }))
		.collect::<Vec<_>>();

	serde_json::json!({ "data": records }).to_string()
}

fn batch_body(range: std::ops::Range<usize>) -> String {
	let serials = range.map(|index| format!("SN-{index:03}")).collect::<Vec<_>>();

	serde_json::json!({ "sn_list": serials }).to_string()
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let first = server
		.mock_async(|when, then| {
			when.method(POST).path("/device/real/query").body(batch_body(0..10));
			then.status(200)
				.header("content-type", "application/json")
				.body(device_body(0..10));
		})
		.await;
	let second = server
		.mock_async(|when, then| {
			when.method(POST).path("/device/real/query").body(batch_body(10..12));
			then.status(200)
				.header("content-type", "application/json")
				.body(device_body(10..12));
		})
		.await;
	let descriptor = QueryDescriptor::builder(Url::parse(&server.url("/device/real/query"))?)
		.secret("demo-token")
		.build()?;
	let policy = HarvestPolicy::default()
		.with_population(12)
		.with_batch_size(NonZeroUsize::new(10).expect("Demo batch size should be non-zero."))
		.with_min_interval(Duration::from_millis(100));
	let harvester = Harvester::new(descriptor).with_policy(policy);
	let report = harvester.run().await?;

	ConsoleSink.deliver(&report)?;

	first.assert_async().await;
	second.assert_async().await;

	Ok(())
}
