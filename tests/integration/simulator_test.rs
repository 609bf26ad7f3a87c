//! Integration tests for the DaslSimulate client

use crate::common::{Behaviour, FakeService};
use dasl_trading::config::RunConfig;
use dasl_trading::pipeline::{self, PipelineError};
use dasl_trading::report::{ReportError, HEADER};
use dasl_trading::simulator::{DaslClient, Simulator, SimulatorConfig, SimulatorError};
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

fn client_for(url: &str, timeout: Duration) -> DaslClient {
    DaslClient::with_config(SimulatorConfig {
        url: url.to_string(),
        timeout: Some(timeout),
    })
    .unwrap()
}

fn run_config(dir: &std::path::Path) -> RunConfig {
    RunConfig {
        output: dir.join("results.csv"),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_request_wire_format() {
    let service = FakeService::start(Behaviour::Simulate).await;
    let client = client_for(&service.url, Duration::from_secs(10));
    let request = pipeline::build_request(&RunConfig::default()).unwrap();

    let response = client.simulate(&request).await.unwrap();
    assert_eq!(response.len(), request.history.len());

    let captured = service.requests();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].content_type.as_deref(), Some("application/json"));

    let body = &captured[0].body;
    assert!(body["code"].as_str().unwrap().contains("ruleset"));
    assert_eq!(body["history"]["sampleTime"], "1.00:00:00");

    let first = &body["history"]["events"][0];
    assert_eq!(first["timeStamp"], "2019-09-02T00:00:00");
    let names: Vec<&str> = first["values"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["price", "balance"]);
    assert_eq!(first["values"][0]["dataType"], "numeric");
    assert_eq!(first["values"][0]["Value"], "1.2302");
    assert_eq!(first["values"][1]["values"][0], 10_000.0);

    let second = &body["history"]["events"][1];
    assert_eq!(second["values"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_full_run_writes_report() {
    let service = FakeService::start(Behaviour::Simulate).await;
    let client = client_for(&service.url, Duration::from_secs(10));
    let dir = tempfile::tempdir().unwrap();
    let config = run_config(dir.path());

    let summary = pipeline::run(&client, &config).await.unwrap();

    let text = std::fs::read_to_string(&config.output).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next().unwrap(), HEADER.join(","));
    assert_eq!(lines.clone().count(), summary.response_states);

    // First state: sterling and both averages unknown
    assert_eq!(
        lines.next().unwrap(),
        "2019-09-02T00:00:00,1.2302,buy,0.0,0.0,0.0,open,10000.0"
    );
    // Ninth state: everything known, average9 is a triangle
    let ninth = lines.nth(7).unwrap();
    assert!(ninth.ends_with(",buy,100.0,1.25,1.24,open,10008.0"), "{}", ninth);
}

#[tokio::test]
async fn test_report_is_identical_across_runs() {
    let service = FakeService::start(Behaviour::Simulate).await;
    let client = client_for(&service.url, Duration::from_secs(10));
    let dir = tempfile::tempdir().unwrap();
    let config = run_config(dir.path());

    assert_ok!(pipeline::run(&client, &config).await);
    let first = std::fs::read(&config.output).unwrap();
    assert_ok!(pipeline::run(&client, &config).await);
    let second = std::fs::read(&config.output).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_missing_new_balance_aborts_run() {
    let service = FakeService::start(Behaviour::DropNewBalance).await;
    let client = client_for(&service.url, Duration::from_secs(10));
    let dir = tempfile::tempdir().unwrap();
    let config = run_config(dir.path());

    let err = pipeline::run(&client, &config).await.unwrap_err();

    match err {
        PipelineError::Report(ReportError::MissingValue { name, .. }) => {
            assert_eq!(name, "newbalance")
        }
        other => panic!("expected missing newbalance, got {:?}", other),
    }
    assert!(!config.output.exists());
}

#[tokio::test]
async fn test_server_error_status() {
    let service = FakeService::start(Behaviour::ServerError).await;
    let client = client_for(&service.url, Duration::from_secs(10));
    let request = pipeline::build_request(&RunConfig::default()).unwrap();

    match client.simulate(&request).await {
        Err(SimulatorError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "An error has occurred.");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_plain_text_success_is_decode_error() {
    let service = FakeService::start(Behaviour::PlainText).await;
    let client = client_for(&service.url, Duration::from_secs(10));
    let request = pipeline::build_request(&RunConfig::default()).unwrap();

    let result = client.simulate(&request).await;
    assert!(matches!(result, Err(SimulatorError::Decode(_))));
}

#[tokio::test]
async fn test_timeout() {
    let service = FakeService::start(Behaviour::Hang).await;
    let client = client_for(&service.url, Duration::from_millis(200));
    let request = pipeline::build_request(&RunConfig::default()).unwrap();

    match client.simulate(&request).await {
        Err(SimulatorError::Http(e)) => assert!(e.is_timeout()),
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_refused() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = format!("http://{}/api/Linter/DaslSimulate", addr);
    let client = client_for(&url, Duration::from_secs(5));
    let request = pipeline::build_request(&RunConfig::default()).unwrap();

    let err = assert_err!(client.simulate(&request).await);
    assert!(matches!(err, SimulatorError::Http(_)));
}
