#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

static SERVER: OnceLock<TestServer> = OnceLock::new();
static COUNTER: AtomicU32 = AtomicU32::new(0);

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/contact-api-rust");
        cmd.env("CONTACT_API_PORT", port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server can see DATABASE_URL from .env (loaded by the server)
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            port,
            base_url,
            child,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            match client.get(&url).send().await {
                Ok(resp) => {
                    // Consider server ready on any non-404 response
                    if resp.status() == StatusCode::OK
                        || resp.status() == StatusCode::SERVICE_UNAVAILABLE
                    {
                        return Ok(());
                    }
                }
                Err(_) => {}
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    // Use stable get_or_init and convert init errors into a panic with context.
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Database-backed tests need a reachable Postgres; skip them cleanly
/// when the environment has none configured.
pub fn database_configured() -> bool {
    if std::env::var("DATABASE_URL").is_ok() {
        return true;
    }
    eprintln!("skipping: DATABASE_URL not set");
    false
}

/// Unique suffix so concurrent test runs against a shared database
/// never collide on usernames.
pub fn unique(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}_{}_{}", prefix, nanos, n)
}

/// Register a fresh user and log in, returning (username, token)
pub async fn register_and_login(
    client: &reqwest::Client,
    base_url: &str,
    prefix: &str,
) -> Result<(String, String)> {
    let username = unique(prefix);

    let res = client
        .post(format!("{}/api/users", base_url))
        .json(&json!({
            "username": username,
            "password": "secret-password",
            "name": "Test User",
        }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "register failed: {}", res.status());

    let res = client
        .post(format!("{}/api/auth/login", base_url))
        .json(&json!({
            "username": username,
            "password": "secret-password",
        }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());

    let body: Value = res.json().await?;
    let token = body["data"]["token"]
        .as_str()
        .context("login response missing token")?
        .to_string();

    Ok((username, token))
}

/// Create a contact for the given token, returning its id
pub async fn create_contact(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    first_name: &str,
    last_name: &str,
    email: &str,
    phone: &str,
) -> Result<String> {
    let res = client
        .post(format!("{}/api/contacts", base_url))
        .header("X-API-TOKEN", token)
        .json(&json!({
            "firstName": first_name,
            "lastName": last_name,
            "email": email,
            "phone": phone,
        }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::OK,
        "contact create failed: {}",
        res.status()
    );

    let body: Value = res.json().await?;
    let id = body["data"]["id"]
        .as_str()
        .context("contact response missing id")?
        .to_string();
    Ok(id)
}
