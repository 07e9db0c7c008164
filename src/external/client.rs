use std::time::{Duration, Instant};

use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

use crate::config::settings::HttpConfig;
use crate::error::{AppError, AppResult};

/// Build the HTTP client shared by all dispatchers.
///
/// One client is built at startup and handed to each provider, so every
/// dispatch reuses the same connection pool.
///
/// # Features
/// - **Timeouts**: connect timeout from `http.connect_timeout_seconds`; the
///   per-request timeout is applied in [`post_json`]
/// - **Compression**: gzip
/// - **Security**: Rustls for TLS (no OpenSSL dependency)
pub fn build_http_client(config: &HttpConfig) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        // Timeouts
        .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
        // Connection pooling
        .pool_max_idle_per_host(2)
        .pool_idle_timeout(Duration::from_secs(90))
        .gzip(true)
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| AppError::Configuration {
            key: "http".to_string(),
            source: anyhow::Error::new(e).context("Failed to build HTTP client"),
        })
}

/// A 2xx response with its body read as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
    pub duration_ms: u64,
}

/// POST `body` as JSON and read the response text.
///
/// Connection failures and timeouts map to `AppError::Transport`; any
/// non-2xx status maps to `AppError::HttpStatus` carrying the response text.
/// A request that cannot be built at all (an invalid header value from
/// configuration) is a `AppError::Configuration` and never leaves the host.
pub async fn post_json<T>(
    client: &reqwest::Client,
    provider: &'static str,
    url: &str,
    body: &T,
    headers: &[(&'static str, &str)],
    timeout: Duration,
) -> AppResult<RawResponse>
where
    T: Serialize + ?Sized,
{
    let start = Instant::now();

    let mut request = client
        .post(url)
        .timeout(timeout)
        .header(CONTENT_TYPE, "application/json")
        .json(body);

    for (name, value) in headers {
        request = request.header(*name, *value);
    }

    tracing::debug!(provider, url, "Sending request");

    let response = request.send().await.map_err(|source| {
        if source.is_builder() {
            AppError::Configuration {
                key: provider.to_string(),
                source: anyhow::Error::new(source).context("Failed to build request"),
            }
        } else {
            AppError::Transport { provider, source }
        }
    })?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|source| AppError::Transport { provider, source })?;
    let duration_ms = start.elapsed().as_millis() as u64;

    tracing::debug!(provider, status = status.as_u16(), duration_ms, "Received response");

    if !status.is_success() {
        return Err(AppError::HttpStatus {
            provider,
            status: status.as_u16(),
            body: text,
        });
    }

    Ok(RawResponse {
        status: status.as_u16(),
        body: text,
        duration_ms,
    })
}
