// std
use std::{num::NonZeroUsize, time::Duration};
// crates.io
use httpmock::prelude::*;
// self
use device_harvester::{
	error::Error,
	harvest::{HarvestPolicy, Harvester},
	query::QueryDescriptor,
	url::Url,
};

const SECRET: &str = "test-token";

fn build_descriptor(server: &MockServer) -> QueryDescriptor {
	QueryDescriptor::builder(
		Url::parse(&server.url("/device/real/query"))
			.expect("Mock endpoint URL should parse successfully."),
	)
	.secret(SECRET)
	.build()
	.expect("Query descriptor should build successfully.")
}

fn build_policy(population: usize) -> HarvestPolicy {
	HarvestPolicy::default()
		.with_population(population)
		.with_batch_size(NonZeroUsize::new(10).expect("Batch size fixture should be non-zero."))
		.with_min_interval(Duration::ZERO)
}

fn batch_body(range: std::ops::Range<usize>) -> String {
	let serials = range.map(|index| format!("SN-{index:03}")).collect::<Vec<_>>();

	serde_json::json!({ "sn_list": serials }).to_string()
}

fn device_body(range: std::ops::Range<usize>) -> String {
	let records = range
		.map(|index| serde_json::json!({ "sn": format!("SN-{index:03}"), "status": "online" }))
		.collect::<Vec<_>>();

	serde_json::json!({ "data": records }).to_string()
}

#[tokio::test]
async fn harvest_aggregates_batches_in_population_order() {
	let server = MockServer::start_async().await;
	let first = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/device/real/query")
				.header_exists("timestamp")
				.header_exists("signature")
				.header("content-type", "application/json")
				.body(batch_body(0..10));
			then.status(200)
				.header("content-type", "application/json")
				.body(device_body(0..10));
		})
		.await;
	let second = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/device/real/query")
				.header_exists("timestamp")
				.header_exists("signature")
				.body(batch_body(10..12));
			then.status(200)
				.header("content-type", "application/json")
				.body(device_body(10..12));
		})
		.await;
	let harvester = Harvester::new(build_descriptor(&server)).with_policy(build_policy(12));
	let report = harvester.run().await.expect("Harvest run should succeed.");

	assert_eq!(report.total_devices, 12);

	let serials = report
		.devices
		.iter()
		.map(|record| {
			record.as_value()["sn"]
				.as_str()
				.expect("Every record fixture should carry a serial number.")
				.to_owned()
		})
		.collect::<Vec<_>>();
	let expected = (0..12).map(|index| format!("SN-{index:03}")).collect::<Vec<_>>();

	assert_eq!(serials, expected);

	first.assert_async().await;
	second.assert_async().await;
}

#[tokio::test]
async fn unauthorized_aborts_the_run_before_later_batches() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/device/real/query");
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"error\":\"invalid signature\"}");
		})
		.await;
	let harvester = Harvester::new(build_descriptor(&server)).with_policy(build_policy(12));
	let err = harvester.run().await.expect_err("Unauthorized responses should abort the run.");

	match &err {
		Error::Unauthorized { reason } => assert!(reason.contains("invalid signature")),
		other => panic!("Expected an authentication error, got: {other:?}."),
	}

	// The population spans two batches; the abort must prevent the second dispatch.
	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn unexpected_status_aborts_the_run() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/device/real/query");
			then.status(500).body("internal error");
		})
		.await;
	let harvester = Harvester::new(build_descriptor(&server)).with_policy(build_policy(12));
	let err = harvester.run().await.expect_err("Server failures should abort the run.");

	assert!(matches!(err, Error::UnexpectedStatus { status: 500, .. }));

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn malformed_success_body_surfaces_a_parse_error() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/device/real/query");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"items\":[]}");
		})
		.await;
	let harvester = Harvester::new(build_descriptor(&server)).with_policy(build_policy(3));
	let err = harvester.run().await.expect_err("Malformed envelopes should surface an error.");

	assert!(matches!(err, Error::ResponseParse { status: Some(200), .. }));

	mock.assert_async().await;
}
