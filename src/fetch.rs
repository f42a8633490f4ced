//! HTTP access with bounded retry.
//!
//! Every external fetch in the pipeline goes through one [`Fetcher`] so all
//! of them get the same resilience: a plain GET, non-2xx statuses counted
//! as failures, a fixed backoff between attempts, and a bounded attempt
//! budget. The loop is iterative with an attempt counter; exhaustion is
//! logged with the URL and cause and surfaced as a typed
//! [`FetchError::Exhausted`] that callers treat as "no data".
//!
//! # Retry Strategy
//!
//! - `max_retries` retries after the first attempt (default 3, so 4
//!   attempts total)
//! - fixed backoff between attempts (default 3 seconds)
//!
//! Both knobs come from [`WatchConfig`](crate::config::WatchConfig); tests
//! inject a millisecond backoff.

use crate::error::FetchError;
use reqwest::{Client, Response};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, instrument, warn};

/// A retrying HTTP GET client shared by the whole pipeline.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    max_retries: usize,
    backoff: Duration,
}

impl Fetcher {
    /// Build a fetcher with the given retry budget and fixed backoff.
    ///
    /// One underlying [`reqwest::Client`] is created here and reused for
    /// every request the fetcher makes.
    pub fn new(max_retries: usize, backoff: Duration) -> Self {
        Self {
            client: Client::new(),
            max_retries,
            backoff,
        }
    }

    /// GET a URL, retrying transient failures up to the configured budget.
    ///
    /// A non-2xx status is treated the same as a transport error. On
    /// success the response is returned unchanged; on exhaustion the final
    /// failure is logged and returned as [`FetchError::Exhausted`].
    #[instrument(level = "info", skip(self))]
    pub async fn get(&self, url: &str) -> Result<Response, FetchError> {
        let mut attempt = 0usize;
        loop {
            attempt += 1;
            match self.try_get(url).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    if attempt > self.max_retries {
                        error!(%url, attempts = attempt, error = %e, "Fetch exhausted its retry budget");
                        return Err(FetchError::Exhausted {
                            url: url.to_string(),
                            attempts: attempt,
                            source: e,
                        });
                    }
                    warn!(
                        %url,
                        attempt,
                        max_attempts = self.max_retries + 1,
                        delay = ?self.backoff,
                        error = %e,
                        "Fetch attempt failed; backing off"
                    );
                    sleep(self.backoff).await;
                }
            }
        }
    }

    async fn try_get(&self, url: &str) -> Result<Response, reqwest::Error> {
        let response = self.client.get(url).send().await?;
        response.error_for_status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_fetcher(max_retries: usize) -> Fetcher {
        Fetcher::new(max_retries, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn returns_response_on_first_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .expect(1)
            .mount(&server)
            .await;

        let response = fast_fetcher(3)
            .get(&format!("{}/ok", server.uri()))
            .await
            .unwrap();
        assert_eq!(response.text().await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn retries_through_transient_failures() {
        let server = MockServer::start().await;
        // Two 500s, then the mock expires and the success mock answers.
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(200).set_body_string("recovered"))
            .expect(1)
            .mount(&server)
            .await;

        let response = fast_fetcher(3)
            .get(&format!("{}/flaky", server.uri()))
            .await
            .unwrap();
        assert_eq!(response.text().await.unwrap(), "recovered");
    }

    #[tokio::test]
    async fn makes_exactly_budget_plus_one_attempts_then_reports_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/down"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&server)
            .await;

        let err = fast_fetcher(2)
            .get(&format!("{}/down", server.uri()))
            .await
            .unwrap_err();
        let FetchError::Exhausted { attempts, url, .. } = err;
        assert_eq!(attempts, 3);
        assert!(url.ends_with("/down"));
        // Mock expectations on drop verify no fourth attempt was made.
    }

    #[tokio::test]
    async fn zero_retries_means_a_single_attempt() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/once"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let err = fast_fetcher(0)
            .get(&format!("{}/once", server.uri()))
            .await
            .unwrap_err();
        let FetchError::Exhausted { attempts, .. } = err;
        assert_eq!(attempts, 1);
    }
}
