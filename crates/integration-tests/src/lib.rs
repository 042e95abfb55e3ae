//! Integration tests for Tiffin.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tiffin-integration-tests
//! ```
//!
//! Each test starts its own server on an ephemeral port with a fresh data
//! directory, so tests run in parallel without sharing state.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::path::PathBuf;

use secrecy::SecretString;
use tempfile::TempDir;
use tiffin_server::config::ServerConfig;
use tiffin_server::routes;
use tiffin_server::state::AppState;

/// Admin password every test server is configured with.
pub const ADMIN_PASSWORD: &str = "integration-menu-key";

/// A running server and the directory it stores collections in.
///
/// The server task is aborted and the directory removed when this is dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    data_dir: PathBuf,
    _dir: TempDir,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a server on `127.0.0.1:0` with an empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temp directory or listener cannot be created.
    pub async fn start() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = dir.path().join("data");

        let config = ServerConfig {
            host: "127.0.0.1".parse().expect("valid loopback address"),
            port: 0,
            data_dir: data_dir.clone(),
            admin_password: SecretString::from(ADMIN_PASSWORD),
            allowed_origins: Vec::new(),
            sentry_dsn: None,
            sentry_environment: None,
        };

        let listener = tokio::net::TcpListener::bind(config.socket_addr())
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let app = routes::app(AppState::new(config));
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            client: reqwest::Client::new(),
            data_dir,
            _dir: dir,
            handle,
        }
    }

    /// Absolute URL for a path on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Directory holding the collection files.
    #[must_use]
    pub fn data_dir(&self) -> &std::path::Path {
        &self.data_dir
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
