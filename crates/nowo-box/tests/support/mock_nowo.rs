#![allow(dead_code)]

use mockito::{Matcher, Mock, Server, ServerGuard};
use nowo_box::{NowoClient, NowoConfig};
use serde_json::{Value, json};

pub const TOKEN: &str = "test-token";
pub const BEARER: &str = "Bearer test-token";

/// Mock NOWO API backed by a local `mockito` server.
pub struct MockNowo {
    server: ServerGuard,
}

impl MockNowo {
    pub async fn start() -> Self {
        Self {
            server: Server::new_async().await,
        }
    }

    pub fn url(&self) -> String {
        self.server.url()
    }

    pub fn client(&self) -> NowoClient {
        NowoClient::with_client(reqwest::Client::new(), self.url())
    }

    pub fn config(&self) -> NowoConfig {
        let mut config = NowoConfig::new("user@example.com", "secret");
        config.api_url = self.url();
        config.timeouts.request_timeout_secs = 5;
        config
    }

    // ─── Session ────────────────────────────────────────────────────────

    pub async fn mock_session(&mut self, stbs: Value) -> Mock {
        self.server
            .mock("POST", "/api/v1/session")
            .match_body(Matcher::PartialJson(json!({
                "type": "OTT",
                "username": "user@example.com",
                "password": "secret",
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"id": TOKEN, "properties": {"stbs": stbs}}).to_string())
            .create_async()
            .await
    }

    pub async fn mock_session_status(&mut self, status: usize, body: &str) -> Mock {
        self.server
            .mock("POST", "/api/v1/session")
            .with_status(status)
            .with_body(body)
            .create_async()
            .await
    }

    // ─── Catalog ────────────────────────────────────────────────────────

    pub async fn mock_channels(&mut self, channels: Value) -> Mock {
        self.mock_get_json("/api/epg/v2/channel", &channels).await
    }

    pub async fn mock_favorites(&mut self, favorites: Value) -> Mock {
        self.mock_get_json("/api/history/v1/favorite", &favorites).await
    }

    pub async fn mock_get_status(&mut self, path: &str, status: usize) -> Mock {
        self.server
            .mock("GET", path)
            .with_status(status)
            .with_body("{\"error\": \"nope\"}")
            .create_async()
            .await
    }

    // ─── Playback ───────────────────────────────────────────────────────

    pub async fn mock_play(&mut self, device_id: &str, channel_id: &str, hits: usize) -> Mock {
        self.server
            .mock("POST", format!("/api/v1/swipe/action/{device_id}").as_str())
            .match_header("authorization", BEARER)
            .match_body(Matcher::Json(json!({
                "play": {"type": "CHANNEL", "id": channel_id, "bookmark": "0"}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{\"status\": \"ok\"}")
            .expect(hits)
            .create_async()
            .await
    }

    pub async fn mock_play_status(&mut self, device_id: &str, status: usize) -> Mock {
        self.server
            .mock("POST", format!("/api/v1/swipe/action/{device_id}").as_str())
            .with_status(status)
            .create_async()
            .await
    }

    // ─── Program guide ──────────────────────────────────────────────────

    pub async fn mock_schedule(&mut self, channel_id: &str, instant: &str, body: Value) -> Mock {
        let path =
            format!("/api/epg/v1/schedule/channel/{channel_id}/from/{instant}/until/{instant}");
        self.mock_get_json(&path, &body).await
    }

    async fn mock_get_json(&mut self, path: &str, body: &Value) -> Mock {
        self.server
            .mock("GET", path)
            .match_header("authorization", BEARER)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }
}

// ─── Fixtures ───────────────────────────────────────────────────────────

pub fn stb(id: &str, name: &str) -> Value {
    json!({"id": id, "name": name, "type": "STB"})
}

pub fn channel(id: &str, name: &str, enabled: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "enabled": enabled,
        "squareLogo": format!("https://img.example/{id}.png"),
    })
}

/// Channels `A` (enabled), `B` (disabled), `C` (enabled).
pub fn abc_channels() -> Value {
    json!([
        channel("a", "A", true),
        channel("b", "B", false),
        channel("c", "C", true),
    ])
}

pub fn schedule_body(start: &str, end: &str) -> Value {
    json!({
        "schedules": [{"published": {"start": start, "end": end}}],
        "programs": [{
            "title": "Friends",
            "episode": 4,
            "episodeTitle": "The One With the Thumb",
            "posterImage": "https://img.example/friends.jpg",
        }],
        "seasons": [{"season": 1}],
    })
}
