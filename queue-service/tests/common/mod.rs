#![allow(dead_code)]

use queue_service::config::{DatabaseConfig, GeminiConfig, ObservabilityConfig, QueueConfig};
use queue_service::startup::Application;
use secrecy::Secret;
use serde_json::{json, Value};
use service_core::config::Config;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_MODEL: &str = "gemini-test";
pub const TEST_API_KEY: &str = "test-api-key";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
    /// Stands in for the Gemini API.
    pub gemini: MockServer,
    _db_dir: TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let db_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let gemini = MockServer::start().await;

        let config = QueueConfig {
            common: Config {
                host: "127.0.0.1".to_string(),
                port: 0, // Random port
                environment: "test".to_string(),
            },
            database: DatabaseConfig {
                url: format!("sqlite://{}", db_dir.path().join("queue.db").display()),
                max_connections: 5,
                min_connections: 1,
            },
            gemini: GeminiConfig {
                api_base_url: gemini.uri(),
                model: TEST_MODEL.to_string(),
                api_key: Secret::new(TEST_API_KEY.to_string()),
                timeout_secs: 5,
            },
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
                otlp_endpoint: None,
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
            gemini,
            _db_dir: db_dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn patch_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .patch(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Create a record and return its id.
    pub async fn create(&self, kind: &str, body: Value) -> i64 {
        let response = self.post_json(&format!("/records/{}", kind), &body).await;
        assert_eq!(response.status().as_u16(), 201, "create {} failed", kind);
        let body: Value = response.json().await.expect("Failed to parse JSON");
        body["id"].as_i64().expect("id missing from create response")
    }

    pub async fn list(&self, kind: &str) -> Vec<Value> {
        let response = self.get(&format!("/records/{}", kind)).await;
        assert_eq!(response.status().as_u16(), 200);
        response.json().await.expect("Failed to parse JSON")
    }

    /// Answer every generateContent call with `text`.
    pub async fn mock_gemini_text(&self, text: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/models/{}:generateContent", TEST_MODEL)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
            })))
            .mount(&self.gemini)
            .await;
    }
}

pub fn patient() -> Value {
    json!({"name": "Ann", "issue": "fever", "appointmentDate": "2024-05-01"})
}

pub fn reservation() -> Value {
    json!({"name": "Bo", "partySize": 4, "reservationTime": "19:00"})
}

pub fn bank_customer() -> Value {
    json!({"name": "Cy", "service": "Loan"})
}
