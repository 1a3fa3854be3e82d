mod support;

use nowo_box::protocol::session::DeviceType;
use nowo_box::{ChannelCatalog, NowoClient, NowoError, SourceFilter, discover_players};
use serde_json::json;

use support::mock_nowo::{MockNowo, TOKEN, abc_channels, stb};

#[tokio::test]
async fn authenticate_returns_token_and_devices() {
    let mut server = MockNowo::start().await;
    let mock = server
        .mock_session(json!([
            stb("stb-1", "Sala"),
            {"id": 42, "name": "Phone", "type": "MOBILE"},
        ]))
        .await;

    let session = server
        .client()
        .authenticate("user@example.com", "secret")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(session.token(), TOKEN);
    assert_eq!(session.devices().len(), 2);
    assert_eq!(session.devices()[0].kind, DeviceType::Stb);
    assert_eq!(session.devices()[1].id, "42");
}

#[tokio::test]
async fn authenticate_tolerates_incomplete_non_stb_devices() {
    let mut server = MockNowo::start().await;
    let _m = server
        .mock_session(json!([
            stb("stb-1", "Sala"),
            {"id": "p1", "name": null, "type": "MOBILE"},
            {"id": "p2", "type": "MOBILE"},
        ]))
        .await;

    let session = server
        .client()
        .authenticate("user@example.com", "secret")
        .await
        .unwrap();

    let stbs = nowo_box::device::stb_devices(&session);
    assert_eq!(session.devices().len(), 3);
    assert_eq!(stbs.len(), 1);
    assert_eq!(stbs[0].name, "Sala");
}

#[tokio::test]
async fn authenticate_rejected_credentials() {
    let mut server = MockNowo::start().await;
    let _m = server
        .mock_session_status(401, "{\"message\": \"invalid credentials\"}")
        .await;

    let err = server
        .client()
        .authenticate("user@example.com", "wrong")
        .await
        .unwrap_err();

    assert!(matches!(err, NowoError::Authentication { .. }), "{err:?}");
    assert!(err.to_string().contains("401"), "{err}");
    assert!(err.is_setup_error());
}

#[tokio::test]
async fn authenticate_malformed_body() {
    let mut server = MockNowo::start().await;
    let _m = server
        .mock_session_status(200, "{\"id\": \"tok\", \"properties\": {}}")
        .await;

    let err = server
        .client()
        .authenticate("user@example.com", "secret")
        .await
        .unwrap_err();
    assert!(matches!(err, NowoError::Authentication { .. }), "{err:?}");
}

#[tokio::test]
async fn authenticate_unreachable_endpoint() {
    let client = NowoClient::with_client(reqwest::Client::new(), "http://127.0.0.1:9");
    let err = client
        .authenticate("user@example.com", "secret")
        .await
        .unwrap_err();
    assert!(matches!(err, NowoError::Authentication { .. }), "{err:?}");
}

#[tokio::test]
async fn catalog_fetch_builds_source_list() {
    let mut server = MockNowo::start().await;
    let _m = server.mock_channels(abc_channels()).await;
    let _m = server.mock_favorites(json!([{"id": "c"}])).await;
    let client = server.client();

    let all = ChannelCatalog::fetch(&client, TOKEN, "Sala", &SourceFilter::default())
        .await
        .unwrap();
    assert_eq!(all.sources(), ["A", "C"]);
    assert_eq!(all.channels().len(), 3);

    let favorites = ChannelCatalog::fetch(&client, TOKEN, "Sala", &SourceFilter::new(true, vec![]))
        .await
        .unwrap();
    assert_eq!(favorites.sources(), ["C"]);
}

#[tokio::test]
async fn catalog_fetch_fails_when_favorites_fail() {
    let mut server = MockNowo::start().await;
    let _m = server.mock_channels(abc_channels()).await;
    let _m = server.mock_get_status("/api/history/v1/favorite", 500).await;

    let err = ChannelCatalog::fetch(&server.client(), TOKEN, "Sala", &SourceFilter::default())
        .await
        .unwrap_err();
    match err {
        NowoError::CatalogFetch { device, reason } => {
            assert_eq!(device, "Sala");
            assert!(reason.contains("500"), "{reason}");
        }
        other => panic!("expected CatalogFetch, got {other:?}"),
    }
}

#[tokio::test]
async fn catalog_fetch_rejects_non_json() {
    let mut server = MockNowo::start().await;
    let _m = server.mock_channels(json!("not a list")).await;
    let _m = server.mock_favorites(json!([])).await;

    let err = ChannelCatalog::fetch(&server.client(), TOKEN, "Sala", &SourceFilter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, NowoError::CatalogFetch { .. }), "{err:?}");
}

#[tokio::test]
async fn discover_players_builds_one_player_per_stb() {
    let mut server = MockNowo::start().await;
    let _m = server
        .mock_session(json!([
            stb("stb-1", "Sala"),
            {"id": "web-1", "name": "Browser", "type": "OTT"},
            stb("stb-2", "Quarto"),
        ]))
        .await;
    let _m = server.mock_channels(abc_channels()).await;
    let _m = server.mock_favorites(json!([])).await;

    let players = discover_players(&server.config()).await.unwrap();

    let names: Vec<&str> = players.iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["Sala", "Quarto"]);
    assert_eq!(players[0].unique_id(), "nowo.boxsala");
    assert_eq!(players[1].source_list(), ["A", "C"]);
}

#[tokio::test]
async fn discover_players_applies_config_filters() {
    let mut server = MockNowo::start().await;
    let _m = server.mock_session(json!([stb("stb-1", "Sala")])).await;
    let _m = server
        .mock_channels(json!([
            {"id": "1", "name": "RTP1", "enabled": true},
            {"id": "2", "name": "SIC", "enabled": true},
            {"id": "3", "name": "rtp2", "enabled": true},
        ]))
        .await;
    let _m = server.mock_favorites(json!([{"id": "3"}, {"id": "2"}])).await;

    let mut config = server.config();
    config.favorites = true;
    config.source_filters = vec!["RTP".into()];

    let players = discover_players(&config).await.unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].source_list(), ["rtp2"]);
}

#[tokio::test]
async fn failed_catalog_skips_device_without_failing_setup() {
    let mut server = MockNowo::start().await;
    let _m = server
        .mock_session(json!([stb("stb-1", "Sala"), stb("stb-2", "Quarto")]))
        .await;
    let _m = server.mock_get_status("/api/epg/v2/channel", 503).await;

    let players = discover_players(&server.config()).await.unwrap();
    assert!(players.is_empty());
}

#[tokio::test]
async fn discover_players_fails_on_authentication() {
    let mut server = MockNowo::start().await;
    let _m = server.mock_session_status(403, "").await;

    let err = discover_players(&server.config()).await.unwrap_err();
    assert!(matches!(err, NowoError::Authentication { .. }), "{err:?}");
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn discover_players_rejects_missing_credentials() {
    let server = MockNowo::start().await;
    let mut config = server.config();
    config.username = String::new();

    let err = discover_players(&config).await.unwrap_err();
    assert!(matches!(err, NowoError::ConfigError { .. }), "{err:?}");
}
