use serde_json::json;
use softball_proxy::{
    config::Settings,
    error::ProxyError,
    ncaa::{categories::StatCategory, client::NcaaClient, normalize::format_stats},
};
use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use strum::IntoEnumIterator;
use wiremock::{matchers::method, Mock, MockServer, Request, ResponseTemplate};

fn client_for(server: &MockServer, interval_ms: u64) -> NcaaClient {
    NcaaClient::new(&Settings {
        ncaa_api_base_url: server.uri(),
        min_request_interval_ms: interval_ms,
        ..Settings::default()
    })
    .unwrap()
}

#[tokio::test]
async fn back_to_back_calls_are_spaced_by_the_minimum_interval() {
    let server = MockServer::start().await;
    let arrivals = Arc::new(Mutex::new(Vec::<Instant>::new()));
    let recorder = arrivals.clone();
    Mock::given(method("GET"))
        .respond_with(move |_: &Request| {
            recorder.lock().unwrap().push(Instant::now());
            ResponseTemplate::new(200).set_body_json(json!({ "data": [] }))
        })
        .mount(&server)
        .await;
    let client = client_for(&server, 1000);

    client.fetch_stats(StatCategory::Batting).await.unwrap();
    client.fetch_stats(StatCategory::Era).await.unwrap();

    let arrivals = arrivals.lock().unwrap();
    assert_eq!(arrivals.len(), 2);
    assert!(arrivals[1] - arrivals[0] >= Duration::from_millis(950));
}

#[tokio::test]
async fn failed_calls_also_count_for_the_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let client = client_for(&server, 300);

    let start = Instant::now();
    assert!(matches!(
        client.fetch_rankings().await,
        Err(ProxyError::Upstream(_))
    ));
    assert!(client.fetch_rankings().await.is_err());
    assert!(start.elapsed() >= Duration::from_millis(300));
}

#[tokio::test]
async fn upstream_errors_name_the_status_and_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let client = client_for(&server, 0);

    match client.fetch_rankings().await {
        Err(ProxyError::Upstream(message)) => {
            assert!(message.contains("503"), "{message}");
            assert!(message.contains("/rankings/softball/d1"), "{message}");
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_upstream_is_an_upstream_error() {
    // Nothing listens on port 9 of localhost.
    let client = NcaaClient::new(&Settings {
        ncaa_api_base_url: "http://127.0.0.1:9".to_string(),
        min_request_interval_ms: 0,
        ..Settings::default()
    })
    .unwrap();

    assert!(matches!(
        client.fetch_stats(StatCategory::Hits).await,
        Err(ProxyError::Upstream(_))
    ));
}

#[tokio::test]
async fn undecodable_payload_is_an_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;
    let client = client_for(&server, 0);

    assert!(matches!(
        client.fetch_stats(StatCategory::Obp).await,
        Err(ProxyError::Upstream(_))
    ));
}

#[tokio::test]
async fn every_category_yields_at_most_fifty_ranked_leaders() {
    let server = MockServer::start().await;
    let rows = (0..75)
        .map(|i| json!({ "Name": format!("Player {i}"), "Value": 100 - i }))
        .collect::<Vec<_>>();
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": rows })))
        .mount(&server)
        .await;
    let client = client_for(&server, 0);

    for category in StatCategory::iter() {
        let payload = client.fetch_stats(category).await.unwrap();
        let stats = format_stats(&payload, category);
        assert_eq!(stats.leaders.len(), 50, "{category}");
        assert!(stats.leaders.iter().all(|l| l.rank >= 1));
    }
}
