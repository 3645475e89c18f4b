//! End-to-end: mock backend → normalizer → emitter / HTTP router.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use scanner_core::backends::mock::MockScanner;
use scanner_core::emit::write_json;
use scanner_core::frontends::provider_embed::EmbedFrontend;
use scanner_core::normalize::scan_once;
use scanner_core::presentation::{render_table, signal_percentage};
use scanner_core::structs::{
    Band, NetworkRecord, RawBand, RawChannel, RawNetwork, Security, SecurityCapability, REDACTED_SSID,
};
use scanner_core::web_server::{router, AppState};
use std::sync::Arc;
use tower::ServiceExt;

fn raw(ssid: Option<&str>, rssi: i32, caps: &[SecurityCapability], channel: Option<(u32, RawBand)>) -> RawNetwork {
    let mut network = RawNetwork {
        ssid: ssid.map(str::to_string),
        rssi,
        capabilities: Vec::new(),
        channel: channel.map(|(number, band)| RawChannel { number, band }),
    };
    for cap in caps {
        network.add_capability(*cap);
    }
    network
}

#[tokio::test]
async fn cli_pipeline_writes_pretty_json() {
    let scanner = MockScanner::with_networks(vec![
        raw(Some("HomeNet"), -52, &[SecurityCapability::Wpa2Personal], Some((36, RawBand::Band5GHz))),
        raw(None, -80, &[], None),
    ]);

    let records = scan_once(&scanner, None).await.unwrap();
    let mut out = Vec::new();
    write_json(&mut out, &records).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.ends_with("]\n"));
    let parsed: Vec<NetworkRecord> = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, records);

    assert_eq!(parsed[0].security, Security::Wpa2Personal);
    assert_eq!(parsed[0].band, Band::Band5GHz);
    assert_eq!(parsed[1].ssid, REDACTED_SSID);
    assert_eq!(parsed[1].security, Security::Open);
    assert_eq!(parsed[1].channel, 0);
    assert_eq!(parsed[1].band, Band::Unknown);
}

#[tokio::test]
async fn failed_scan_produces_no_output() {
    let scanner = MockScanner::failing("Operation not permitted");
    let err = scan_once(&scanner, None).await.unwrap_err();
    assert_eq!(err.to_string(), "scan failed: Operation not permitted");
}

#[tokio::test]
async fn table_and_http_agree() {
    let scanner = Arc::new(MockScanner::new());
    let records = scan_once(scanner.as_ref(), None).await.unwrap();

    let app = router(Arc::new(AppState {
        scanner,
        frontend: Arc::new(EmbedFrontend::new()),
        scan_timeout: None,
        refresh_interval_secs: 30,
    }));
    let response = app
        .oneshot(Request::builder().uri("/api/scan").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let over_http: Vec<NetworkRecord> = serde_json::from_slice(&body).unwrap();
    assert_eq!(over_http, records);

    let table = render_table(&over_http, false);
    assert!(table.contains(&format!("Found {} networks.", records.len())));
    assert!(table.contains(REDACTED_SSID));
    for record in &records {
        assert!(table.contains(&format!("{}%", signal_percentage(record.signal_strength))));
    }
}
