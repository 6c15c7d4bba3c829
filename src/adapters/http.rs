use crate::core::ReachabilityCheck;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::{redirect, Client};
use std::time::Duration;

/// HEAD request against the image host.
///
/// Redirects are not followed: a 3xx answer already proves the URL resolves.
pub struct HttpReachability {
    client: Client,
}

impl HttpReachability {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ReachabilityCheck for HttpReachability {
    async fn is_reachable(&self, url: &str) -> bool {
        let outcome = self
            .client
            .head(url)
            .send()
            .await
            .and_then(|response| response.error_for_status());

        match outcome {
            Ok(response) => {
                tracing::debug!("Image reachable ({}): {}", response.status(), url);
                true
            }
            Err(e) => {
                tracing::warn!("Skipping invalid image URL: {} → {}", url, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use httpmock::Method::HEAD;

    fn checker() -> HttpReachability {
        HttpReachability::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_success_status_is_reachable() {
        let server = MockServer::start();
        let head_mock = server.mock(|when, then| {
            when.method(HEAD).path("/shirt.png");
            then.status(200);
        });

        assert!(checker().is_reachable(&server.url("/shirt.png")).await);
        head_mock.assert();
    }

    #[tokio::test]
    async fn test_error_status_is_unreachable() {
        let server = MockServer::start();
        let head_mock = server.mock(|when, then| {
            when.method(HEAD).path("/gone.png");
            then.status(404);
        });

        assert!(!checker().is_reachable(&server.url("/gone.png")).await);
        head_mock.assert();
    }

    #[tokio::test]
    async fn test_redirect_is_not_followed() {
        let server = MockServer::start();
        let head_mock = server.mock(|when, then| {
            when.method(HEAD).path("/moved.png");
            then.status(301).header("Location", "/elsewhere.png");
        });

        assert!(checker().is_reachable(&server.url("/moved.png")).await);
        head_mock.assert_hits(1);
    }

    #[tokio::test]
    async fn test_timeout_is_unreachable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(HEAD).path("/slow.png");
            then.status(200).delay(Duration::from_secs(3));
        });

        let checker = HttpReachability::new(Duration::from_millis(200)).unwrap();
        assert!(!checker.is_reachable(&server.url("/slow.png")).await);
    }

    #[tokio::test]
    async fn test_malformed_url_is_unreachable() {
        assert!(!checker().is_reachable("").await);
        assert!(!checker().is_reachable("not a url").await);
    }
}
