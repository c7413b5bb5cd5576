//! Common test utilities - DiceTest harness for end-to-end testing

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use diceroll::dice::{DieSource, OsDieSource};
use diceroll::{Config, Server};
use reqwest::Client;
use tempfile::TempDir;
use tokio::task::JoinHandle;

/// Test harness that spawns a real diceroll server on a random port
pub struct DiceTest {
    pub addr: SocketAddr,
    pub client: Client,
    server: Arc<Server>,
    _handle: JoinHandle<()>,
    /// Static asset directory (cleaned up on drop)
    _static_dir: TempDir,
}

impl DiceTest {
    /// Start a server rolling with the OS random source
    pub async fn start() -> Result<Self> {
        Self::start_with_source(Arc::new(OsDieSource)).await
    }

    /// Start a server rolling with the given source
    pub async fn start_with_source(source: Arc<dyn DieSource>) -> Result<Self> {
        let static_dir = TempDir::new()?;
        std::fs::write(static_dir.path().join("app.css"), ".example { padding: 0; }")?;

        // Find a random available port
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        drop(listener);

        let config = Config {
            bind_addr: addr,
            static_dir: static_dir.path().to_path_buf(),
            ..Config::default()
        };

        let server = Arc::new(Server::with_source(config, source));
        let server_clone = server.clone();

        // Spawn the server in a background task
        let handle = tokio::spawn(async move {
            if let Err(e) = server_clone.run().await {
                eprintln!("Server error: {}", e);
            }
        });

        let client = Client::builder().timeout(Duration::from_secs(5)).build()?;

        // Poll until server is ready (max 2 seconds)
        let mut ready = false;
        for _ in 0..20 {
            tokio::time::sleep(Duration::from_millis(100)).await;
            if client
                .get(format!("http://{}/health", addr))
                .send()
                .await
                .is_ok()
            {
                ready = true;
                break;
            }
        }

        if !ready {
            panic!("Server failed to start within 2 seconds");
        }

        Ok(Self {
            addr,
            client,
            server,
            _handle: handle,
            _static_dir: static_dir,
        })
    }

    /// Get the base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .get(format!("{}{}", self.base_url(), path))
            .send()
            .await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(format!("{}{}", self.base_url(), path))
            .json(body)
            .send()
            .await?)
    }

    /// Submit the home page form and return the HTML fragment
    pub async fn roll_form(&self, dice: &str) -> Result<String> {
        Ok(self
            .client
            .post(format!("{}/roll", self.base_url()))
            .form(&[("dice", dice)])
            .send()
            .await?
            .text()
            .await?)
    }

    /// Roll through the JSON API
    pub async fn roll_json(&self, dice: &str) -> Result<serde_json::Value> {
        let resp = self
            .post("/api/roll", &serde_json::json!({ "dice": dice }))
            .await?;
        Ok(resp.json().await?)
    }
}

impl Drop for DiceTest {
    fn drop(&mut self) {
        self.server.shutdown();
    }
}
