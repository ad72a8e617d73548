//! Integration tests for the demo service.
//!
//! Each test boots the real server on an ephemeral localhost port and talks
//! to it over HTTP.

use std::net::SocketAddr;

use devops_demo::api::{bind, create_router, serve_with_shutdown, AppState};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A running server and the means to stop it.
struct TestServer {
    base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<devops_demo::Result<()>>,
}

impl TestServer {
    async fn start() -> Self {
        let listener = bind(SocketAddr::from(([127, 0, 0, 1], 0))).await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(serve_with_shutdown(
            listener,
            create_router(AppState::new()),
            async move {
                rx.await.ok();
            },
        ));

        Self {
            base_url: format!("http://{}", addr),
            shutdown: Some(tx),
            handle,
        }
    }

    async fn get(&self, path: &str) -> (StatusCode, String) {
        let response = reqwest::get(format!("{}{}", self.base_url, path))
            .await
            .unwrap();
        let status = response.status();
        (status, response.text().await.unwrap())
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            tx.send(()).ok();
        }
        self.handle.await.unwrap().unwrap();
    }
}

#[tokio::test]
async fn test_health_scenario() {
    let server = TestServer::start().await;

    let (status, body) = server.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    server.stop().await;
}

#[tokio::test]
async fn test_hello_with_name_scenario() {
    let server = TestServer::start().await;

    let (status, body) = server.get("/hello?name=Alice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Hello, Alice! Welcome to DevOps CI/CD Demo.");

    server.stop().await;
}

#[tokio::test]
async fn test_hello_without_name_scenario() {
    let server = TestServer::start().await;

    let (status, body) = server.get("/hello").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Hello, World! Welcome to DevOps CI/CD Demo.");

    let (_, body) = server.get("/hello?name=").await;
    assert_eq!(body, "Hello, World! Welcome to DevOps CI/CD Demo.");

    server.stop().await;
}

#[tokio::test]
async fn test_hello_with_repeated_name() {
    let server = TestServer::start().await;

    let (status, body) = server.get("/hello?name=a&name=b").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Hello, a,b! Welcome to DevOps CI/CD Demo.");

    server.stop().await;
}

#[tokio::test]
async fn test_version_scenario() {
    let server = TestServer::start().await;

    let (status, body) = server.get("/version").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "1.0.0");

    server.stop().await;
}

#[tokio::test]
async fn test_requests_are_idempotent() {
    let server = TestServer::start().await;

    for path in ["/health", "/hello?name=Alice", "/hello", "/version"] {
        let (_, first) = server.get(path).await;
        for _ in 0..3 {
            let (_, again) = server.get(path).await;
            assert_eq!(again, first, "{path} changed between requests");
        }
    }

    server.stop().await;
}

#[tokio::test]
async fn test_concurrent_requests() {
    let server = TestServer::start().await;
    let url = format!("{}/hello?name=Concurrent", server.base_url);

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let url = url.clone();
            tokio::spawn(async move { reqwest::get(url).await.unwrap().text().await.unwrap() })
        })
        .collect();

    for task in tasks {
        assert_eq!(
            task.await.unwrap(),
            "Hello, Concurrent! Welcome to DevOps CI/CD Demo."
        );
    }

    server.stop().await;
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let server = TestServer::start().await;

    let (status, _) = server.get("/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    server.stop().await;
}

#[tokio::test]
async fn test_post_is_method_not_allowed() {
    let server = TestServer::start().await;

    let response = reqwest::Client::new()
        .post(format!("{}/version", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    server.stop().await;
}
