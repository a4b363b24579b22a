//! Shared test harness: spawns the service on a random port, optionally
//! pointed at a local stand-in for the RouteLLM API.

use axum::{Router, http::StatusCode, routing::post};
use generate_service::config::{GenerateConfig, HuggingFaceConfig, RouteLlmConfig};
use generate_service::startup::Application;
use service_core::config::Config as CoreConfig;
use std::time::Duration;

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application with the given configuration.
    pub async fn spawn(config: GenerateConfig) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept requests
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        TestApp { address, client }
    }

    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.address)
    }
}

/// Configuration pointing at `base_url`, with both credentials set.
///
/// Configs are built directly instead of mutating process environment so
/// tests with different credential states can run concurrently.
pub fn test_config(base_url: &str) -> GenerateConfig {
    GenerateConfig {
        common: CoreConfig { port: 0 },
        routellm: RouteLlmConfig {
            base_url: base_url.to_string(),
            api_key: Some("test-api-key".to_string()),
            text_model: Some("route-llm-test".to_string()),
        },
        huggingface: HuggingFaceConfig {
            api_url: "http://127.0.0.1:1/models/stable-diffusion-test".to_string(),
            api_key: Some("test-hf-key".to_string()),
        },
    }
}

/// Base URL no server listens on; requests against it only pass if the
/// handler never reaches the upstream call.
pub fn unroutable_base_url() -> String {
    "http://127.0.0.1:1".to_string()
}

/// Spawn a stand-in for the RouteLLM API that answers `/chat/completions`
/// with a fixed status and body, and return its base URL.
pub async fn spawn_upstream_stub(status: u16, body: String) -> String {
    let app = Router::new().route(
        "/chat/completions",
        post(move || {
            let body = body.clone();
            async move { (StatusCode::from_u16(status).unwrap(), body) }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind upstream stub");
    let addr = listener.local_addr().expect("Failed to read stub address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    format!("http://{}", addr)
}
