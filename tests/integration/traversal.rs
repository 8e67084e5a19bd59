//! Bulk traversal and extra-paths integration tests

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use api_snapshot::dump::{
    download_extra, traverse_declared, Downloader, EndpointFilter, FeatureFlags,
};
use api_snapshot::Snapshot;

use crate::common::{document, get_document, http_client, test_token};
use crate::mocks::MockInstallerServer;

fn flags(zfcp: bool, dasd: bool) -> FeatureFlags {
    FeatureFlags {
        zfcp_supported: zfcp,
        dasd_supported: dasd,
    }
}

#[tokio::test]
async fn test_overlapping_documents_download_once() {
    let server = MockInstallerServer::start().await;
    server.mock_any_get().await;

    let documents = vec![
        get_document("network.json", &["/api/network/state", "/api/network/devices"]),
        get_document("manager.json", &["/api/manager/installer", "/api/network/state"]),
    ];

    let client = http_client(&server.uri());
    let downloader = Downloader::new(&client, test_token());
    let mut snapshot = Snapshot::new();
    let stats = traverse_declared(
        &documents,
        &EndpointFilter::new(flags(true, true)),
        &downloader,
        &mut snapshot,
    )
    .await;

    assert_eq!(
        server.get_paths().await,
        vec!["/api/network/state", "/api/network/devices", "/api/manager/installer"]
    );
    assert_eq!(stats.downloaded, 3);
    assert_eq!(server.get_count("/api/network/state").await, 1);
}

#[tokio::test]
async fn test_skip_and_localized_lists_are_not_requested() {
    let server = MockInstallerServer::start().await;
    server.mock_any_get().await;

    let documents = vec![get_document(
        "all.json",
        &[
            "/api/manager/logs/store",
            "/api/storage/product/volume_for",
            "/api/l10n/keymaps",
            "/api/software/products",
            "/api/manager/progress",
        ],
    )];

    let client = http_client(&server.uri());
    let downloader = Downloader::new(&client, test_token());
    let mut snapshot = Snapshot::new();
    let stats = traverse_declared(
        &documents,
        &EndpointFilter::new(flags(true, true)),
        &downloader,
        &mut snapshot,
    )
    .await;

    assert_eq!(server.get_paths().await, vec!["/api/manager/progress"]);
    assert_eq!(stats.skipped, 4);
    assert!(!snapshot.contains("/api/l10n/keymaps"));
}

#[tokio::test]
async fn test_zfcp_endpoints_follow_the_flag() {
    let documents = vec![get_document(
        "storage.json",
        &[
            "/api/storage/zfcp/controllers",
            "/api/storage/dasd/devices",
            "/api/storage/devices/system",
        ],
    )];

    for zfcp in [false, true] {
        let server = MockInstallerServer::start().await;
        server.mock_any_get().await;

        let client = http_client(&server.uri());
        let downloader = Downloader::new(&client, test_token());
        let mut snapshot = Snapshot::new();
        traverse_declared(
            &documents,
            &EndpointFilter::new(flags(zfcp, false)),
            &downloader,
            &mut snapshot,
        )
        .await;

        assert_eq!(server.get_count("/api/storage/zfcp/controllers").await, usize::from(zfcp));
        assert_eq!(server.get_count("/api/storage/dasd/devices").await, 0);
        assert_eq!(server.get_count("/api/storage/devices/system").await, 1);
    }
}

#[tokio::test]
async fn test_failures_do_not_stop_the_pass() {
    let server = MockInstallerServer::start().await;
    server.mock_get_status("/api/storage/devices/system", 500).await;
    server.mock_get_malformed_json("/api/storage/devices/staging").await;
    server.mock_get_text("/api/manager/logs/list", "y2log").await;
    server.mock_any_get().await;

    let documents = vec![get_document(
        "storage.json",
        &[
            "/api/storage/devices/system",
            "/api/storage/devices/staging",
            "/api/manager/logs/list",
            "/api/storage/devices/actions",
        ],
    )];

    let client = http_client(&server.uri());
    let downloader = Downloader::new(&client, test_token());
    let mut snapshot = Snapshot::new();
    let stats = traverse_declared(
        &documents,
        &EndpointFilter::new(flags(false, false)),
        &downloader,
        &mut snapshot,
    )
    .await;

    assert_eq!(stats.failed, 2);
    assert_eq!(stats.downloaded, 2);
    assert!(!snapshot.contains("/api/storage/devices/system"));
    assert!(!snapshot.contains("/api/storage/devices/staging"));
    assert_eq!(snapshot.get("/api/manager/logs/list"), Some(&Value::Null));
    assert_eq!(snapshot.get("/api/storage/devices/actions"), Some(&json!({})));
}

#[tokio::test]
async fn test_templates_needing_parameters_and_non_get_are_skipped() {
    let server = MockInstallerServer::start().await;
    server.mock_any_get().await;

    let documents = vec![document(
        "network.json",
        json!({
            "paths": {
                "/api/network/connections/{id}": { "get": {} },
                "/api/network/system/apply": { "post": {} },
                "/api/network/search": {
                    "get": { "parameters": [{ "name": "q", "in": "query", "required": true }] }
                },
                "/api/network/state": { "get": {} }
            }
        }),
    )];

    let client = http_client(&server.uri());
    let downloader = Downloader::new(&client, test_token());
    let mut snapshot = Snapshot::new();
    traverse_declared(
        &documents,
        &EndpointFilter::new(flags(true, true)),
        &downloader,
        &mut snapshot,
    )
    .await;

    assert_eq!(server.get_paths().await, vec!["/api/network/state"]);
}

#[tokio::test]
async fn test_trailing_slash_is_trimmed() {
    let server = MockInstallerServer::start().await;
    server.mock_any_get().await;

    let documents = vec![get_document("software.json", &["/api/software/config/"])];

    let client = http_client(&server.uri());
    let downloader = Downloader::new(&client, test_token());
    let mut snapshot = Snapshot::new();
    traverse_declared(
        &documents,
        &EndpointFilter::new(flags(true, true)),
        &downloader,
        &mut snapshot,
    )
    .await;

    assert_eq!(server.get_paths().await, vec!["/api/software/config"]);
    assert!(snapshot.contains("/api/software/config"));
    assert!(!snapshot.contains("/api/software/config/"));
}

#[tokio::test]
async fn test_extra_paths_are_downloaded_unconditionally() {
    let server = MockInstallerServer::start().await;
    server.mock_get_json("/api/storage/devices/dirty", json!(false)).await;
    server.mock_any_get().await;

    let client = http_client(&server.uri());
    let downloader = Downloader::new(&client, test_token());
    let mut snapshot = Snapshot::new();
    let stats = download_extra(
        &["/api/storage/devices/dirty", "/api/storage/proposal/settings/"],
        &downloader,
        &mut snapshot,
    )
    .await;

    assert_eq!(stats.downloaded, 2);
    assert_eq!(
        server.get_paths().await,
        vec!["/api/storage/devices/dirty", "/api/storage/proposal/settings"]
    );
    assert_eq!(snapshot.get("/api/storage/devices/dirty"), Some(&json!(false)));
}
