// src/status/fetch.rs
// =============================================================================
// This module reads the mirror's operational status from its backend API.
//
// The mirror exposes four tiny JSON endpoints, each with a single field:
// - GET /api/size_limit        -> { "MaxResponseBodySize": 100 }
// - GET /api/whitelist/status  -> { "Whitelist": true }
// - GET /api/blacklist/status  -> { "Blacklist": false }
// - GET /api/version           -> { "Version": "1.2.3" }
//
// Policy: the four requests run CONCURRENTLY and are joined all-or-nothing.
// If any one of them fails (non-2xx or bad JSON), the whole status load
// fails as a single aggregate error - we never show a half-filled status.
//
// Rust concepts used:
// - async/await: For concurrent network I/O
// - futures::try_join!: Like Promise.all() - first error wins, otherwise
//   all four results come back together
// - serde field renaming: The API uses PascalCase field names
// =============================================================================

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

// A snapshot of the mirror's operational status
//
// This is read-only data owned by the backend - we fetch it once per
// invocation and render it, never mutate or persist it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    /// Largest response body the mirror will proxy, in megabytes
    pub max_response_body_size_mb: u64,
    /// Whether the mirror only serves an allow-list of repositories
    pub whitelist_enabled: bool,
    /// Whether the mirror refuses a deny-list of repositories
    pub blacklist_enabled: bool,
    /// Mirror software version string
    pub version: String,
}

// Per-endpoint response shapes
//
// Each endpoint returns an object with exactly one field we care about.
// serde's rename attribute maps the API's PascalCase names onto our fields.
#[derive(Debug, Deserialize)]
struct SizeLimitResponse {
    #[serde(rename = "MaxResponseBodySize")]
    max_response_body_size: u64,
}

#[derive(Debug, Deserialize)]
struct WhitelistResponse {
    #[serde(rename = "Whitelist")]
    whitelist: bool,
}

#[derive(Debug, Deserialize)]
struct BlacklistResponse {
    #[serde(rename = "Blacklist")]
    blacklist: bool,
}

#[derive(Debug, Deserialize)]
struct VersionResponse {
    #[serde(rename = "Version")]
    version: String,
}

#[derive(Debug, Deserialize)]
struct HealthcheckResponse {
    #[serde(rename = "Status")]
    status: String,
}

// Loads the full status snapshot from the mirror
//
// Parameters:
//   client: reqwest HTTP client (shared, connection-pooled)
//   base: the mirror base URL (e.g. "https://mirror.example")
//
// Returns: Ok(ServiceStatus) only if ALL four endpoints answered with
// valid JSON; the first failure aborts the whole load.
pub async fn load_status(client: &Client, base: &str) -> Result<ServiceStatus> {
    let base = base.trim_end_matches('/');

    // The URLs must outlive the futures borrowing them, so bind them
    // before the join instead of passing format! temporaries inline
    let size_url = format!("{}/api/size_limit", base);
    let whitelist_url = format!("{}/api/whitelist/status", base);
    let blacklist_url = format!("{}/api/blacklist/status", base);
    let version_url = format!("{}/api/version", base);

    // Kick off all four requests at once. try_join! polls them concurrently
    // and short-circuits on the first error - no partial results possible.
    let (size, whitelist, blacklist, version) = futures::try_join!(
        fetch_json::<SizeLimitResponse>(client, &size_url),
        fetch_json::<WhitelistResponse>(client, &whitelist_url),
        fetch_json::<BlacklistResponse>(client, &blacklist_url),
        fetch_json::<VersionResponse>(client, &version_url),
    )
    .context("Failed to load mirror status")?;

    Ok(ServiceStatus {
        max_response_body_size_mb: size.max_response_body_size,
        whitelist_enabled: whitelist.whitelist,
        blacklist_enabled: blacklist.blacklist,
        version: version.version,
    })
}

// Checks whether the mirror is alive at all
//
// The backend answers GET /api/healthcheck with { "Status": "OK" }.
// Returns Ok(()) when the mirror says OK, an error otherwise.
pub async fn healthcheck(client: &Client, base: &str) -> Result<()> {
    let base = base.trim_end_matches('/');
    let url = format!("{}/api/healthcheck", base);

    let response: HealthcheckResponse = fetch_json(client, &url).await?;

    if response.status == "OK" {
        Ok(())
    } else {
        Err(anyhow!("Mirror reported status '{}'", response.status))
    }
}

// Fetches a URL and deserializes the JSON body into T
//
// Any non-2xx status or unparseable body is an error - the callers above
// rely on that to make their all-or-nothing guarantees.
async fn fetch_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Request to {} failed", url))?;

    if !response.status().is_success() {
        return Err(anyhow!("{} returned HTTP {}", url, response.status()));
    }

    response
        .json::<T>()
        .await
        .with_context(|| format!("{} returned invalid JSON", url))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is try_join!?
//    - Runs several futures concurrently on the current task
//    - If all succeed, you get a tuple of all their outputs
//    - If ANY fails, you get that error immediately - like Promise.all()
//
// 2. What is DeserializeOwned?
//    - A serde trait bound meaning "can be deserialized without borrowing"
//    - Needed because the JSON body buffer is gone by the time we return
//
// 3. Why &Client instead of creating one per call?
//    - reqwest's Client holds a connection pool internally
//    - Reusing it means the four requests can share connections
//
// 4. What does .with_context() do?
//    - Wraps an error with a human-readable message
//    - The original error is preserved underneath for debugging
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::Arc;
    use std::thread;

    // Minimal HTTP/1.1 server for tests: serves a fixed (status, body) per
    // path from a background thread. Runs until the process exits.
    fn start_server(routes: Vec<(&'static str, u16, &'static str)>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes: Arc<HashMap<&str, (u16, &str)>> = Arc::new(
            routes.into_iter().map(|(p, s, b)| (p, (s, b))).collect(),
        );

        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                thread::spawn(move || handle(stream, &routes));
            }
        });

        format!("http://127.0.0.1:{}", port)
    }

    fn handle(mut stream: std::net::TcpStream, routes: &HashMap<&str, (u16, &str)>) {
        let mut buf = [0u8; 4096];
        let n = match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        let request = String::from_utf8_lossy(&buf[..n]).to_string();

        // Request line looks like "GET /api/version HTTP/1.1"
        let path = request
            .split_whitespace()
            .nth(1)
            .unwrap_or("/")
            .to_string();

        let (status, body) = routes.get(path.as_str()).copied().unwrap_or((404, "{}"));
        let reason = if status == 200 { "OK" } else { "Error" };
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reason,
            body.len(),
            body
        );
        let _ = stream.write_all(response.as_bytes());
    }

    fn healthy_routes() -> Vec<(&'static str, u16, &'static str)> {
        vec![
            ("/api/size_limit", 200, r#"{"MaxResponseBodySize":100}"#),
            ("/api/whitelist/status", 200, r#"{"Whitelist":true}"#),
            ("/api/blacklist/status", 200, r#"{"Blacklist":false}"#),
            ("/api/version", 200, r#"{"Version":"1.2.3"}"#),
            ("/api/healthcheck", 200, r#"{"Status":"OK"}"#),
        ]
    }

    #[tokio::test]
    async fn test_load_status_success() {
        let base = start_server(healthy_routes());
        let client = Client::new();

        let status = load_status(&client, &base).await.unwrap();
        assert_eq!(status.max_response_body_size_mb, 100);
        assert!(status.whitelist_enabled);
        assert!(!status.blacklist_enabled);
        assert_eq!(status.version, "1.2.3");
    }

    #[tokio::test]
    async fn test_load_status_fails_as_a_unit_on_500() {
        // One endpoint erroring must fail the WHOLE load, even though the
        // other three are fine
        let mut routes = healthy_routes();
        routes.retain(|(p, _, _)| *p != "/api/blacklist/status");
        routes.push(("/api/blacklist/status", 500, r#"{"error":"boom"}"#));

        let base = start_server(routes);
        let client = Client::new();

        let result = load_status(&client, &base).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_status_fails_on_bad_json() {
        let mut routes = healthy_routes();
        routes.retain(|(p, _, _)| *p != "/api/version");
        routes.push(("/api/version", 200, "not json at all"));

        let base = start_server(routes);
        let client = Client::new();

        let result = load_status(&client, &base).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_status_accepts_trailing_slash_base() {
        let base = start_server(healthy_routes());
        let client = Client::new();

        let status = load_status(&client, &format!("{}/", base)).await.unwrap();
        assert_eq!(status.version, "1.2.3");
    }

    #[tokio::test]
    async fn test_healthcheck_ok() {
        let base = start_server(healthy_routes());
        let client = Client::new();

        assert!(healthcheck(&client, &base).await.is_ok());
    }

    #[tokio::test]
    async fn test_healthcheck_unreachable_path() {
        let base = start_server(vec![]);
        let client = Client::new();

        // The server answers 404 for unknown paths
        assert!(healthcheck(&client, &base).await.is_err());
    }
}
