use std::{
    io,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{Form, Json, Router, http::HeaderMap, routing::post};
use serde_json::{Value, json};
use spotistat::spotify::{ClientCredentials, CredentialSource};
use tokio::net::TcpListener;

const CLIENT_SECRET: &str = "very-secret-value";

// Collects formatted log output so tests can inspect it.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

async fn token(headers: HeaderMap, Form(form): Form<Vec<(String, String)>>) -> Json<Value> {
    assert!(
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("Basic "))
    );
    assert!(form.contains(&("grant_type".to_string(), "client_credentials".to_string())));
    Json(json!({ "access_token": "tok-123", "token_type": "Bearer", "expires_in": 3600 }))
}

async fn spawn_token_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route("/api/token", post(token));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api/token")
}

#[tokio::test]
async fn test_client_credentials_obtains_token() {
    let url = spawn_token_endpoint().await;
    let source =
        ClientCredentials::new(&url, "client-id", CLIENT_SECRET, Duration::from_secs(5)).unwrap();

    let credential = source.obtain().await.unwrap();

    assert_eq!(credential.token, "tok-123");
    assert!(credential.expires_at > chrono::Utc::now());
}

#[tokio::test]
async fn test_token_request_is_logged_without_secret() {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let url = spawn_token_endpoint().await;
    let source =
        ClientCredentials::new(&url, "client-id", CLIENT_SECRET, Duration::from_secs(5)).unwrap();
    source.obtain().await.unwrap();

    let output = logs.contents();
    let line = output
        .lines()
        .find(|l| l.contains("token request"))
        .expect("token request log line");
    assert!(line.contains("POST"));
    assert!(line.contains(&url));
    assert!(!output.contains(CLIENT_SECRET));
}
