// HTTP GET with exponential backoff
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::{error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Total attempts made before giving up; never less than one.
    pub fn attempts(&self) -> u32 {
        self.max_retries.max(1)
    }

    /// Wait after failed attempt `attempt` (0-indexed): `base * 2^attempt`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Why a single attempt counted as failed.
#[derive(Debug, thiserror::Error)]
pub enum AttemptError {
    #[error("server error or rate limit: {0}")]
    Status(StatusCode),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed after {attempts} attempts, last error: {last}")]
    Exhausted {
        url: String,
        attempts: u32,
        #[source]
        last: AttemptError,
    },
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// GET `url`, retrying on 429, 5xx and transport failures.
///
/// Any other status is handed back unchanged; checking for success is the
/// caller's job.
pub async fn fetch_with_retry(
    client: &Client,
    url: &str,
    policy: RetryPolicy,
) -> Result<Response, FetchError> {
    let attempts = policy.attempts();
    let mut attempt = 0;

    loop {
        let failure = match client.get(url).send().await {
            Ok(response) if is_retryable(response.status()) => {
                AttemptError::Status(response.status())
            }
            Ok(response) => return Ok(response),
            Err(e) => AttemptError::Transport(e),
        };

        if attempt + 1 >= attempts {
            error!("Request to {} failed after {} attempts: {}", url, attempts, failure);
            return Err(FetchError::Exhausted {
                url: url.to_string(),
                attempts,
                last: failure,
            });
        }

        let delay = policy.delay_after(attempt);
        warn!(
            "Request to {} failed (attempt {}/{}): {}. Retrying in {:?}",
            url,
            attempt + 1,
            attempts,
            failure,
            delay
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
