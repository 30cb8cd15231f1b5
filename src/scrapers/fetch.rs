//! Page fetching.
//!
//! [`PageSource`] is the seam between the pipeline and the network: given a
//! city it returns that city's [`RawPage`] or an error. [`HttpPageSource`]
//! performs one GET per call against the configured encyclopedia; tests
//! substitute an in-memory source.
//!
//! # URL Pattern
//!
//! Spaces in the city name become underscores and the result is
//! percent-encoded and joined onto the base URL, so `"New York"` resolves
//! to `https://en.wikipedia.org/wiki/New_York`.

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::models::RawPage;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

/// Anything that can produce the raw page for a city.
pub trait PageSource {
    async fn fetch_page(&self, city: &str) -> Result<RawPage, ScrapeError>;
}

/// Fetches pages over HTTP. No retries: the first failure is returned.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
    base_url: Url,
}

impl HttpPageSource {
    /// Build a client from the configured base URL, timeout and user agent.
    pub fn new(config: &ScrapeConfig) -> Result<Self, ScrapeError> {
        let base_url = Url::parse(&config.base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(ScrapeError::Client)?;
        Ok(Self { client, base_url })
    }

    pub fn page_url(&self, city: &str) -> Result<Url, ScrapeError> {
        page_url(&self.base_url, city)
    }
}

/// Resolve the page URL for `city` against `base`.
pub fn page_url(base: &Url, city: &str) -> Result<Url, ScrapeError> {
    let slug = city.trim().replace(' ', "_");
    Ok(base.join(&urlencoding::encode(&slug))?)
}

impl PageSource for HttpPageSource {
    #[instrument(level = "info", skip(self))]
    async fn fetch_page(&self, city: &str) -> Result<RawPage, ScrapeError> {
        let url = self.page_url(city)?;
        let network = |source| ScrapeError::Network {
            city: city.to_string(),
            source,
        };

        debug!(%url, "Requesting climate page");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(network)?;
        let status = response.status();
        let html = response
            .error_for_status()
            .map_err(network)?
            .text()
            .await
            .map_err(network)?;

        info!(%url, %status, bytes = html.len(), "Fetched climate page");
        Ok(RawPage {
            city: city.to_string(),
            html,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://en.wikipedia.org/wiki/").unwrap()
    }

    #[test]
    fn test_page_url_simple_city() {
        let url = page_url(&base(), "London").unwrap();
        assert_eq!(url.as_str(), "https://en.wikipedia.org/wiki/London");
    }

    #[test]
    fn test_page_url_spaces_become_underscores() {
        let url = page_url(&base(), "New York").unwrap();
        assert_eq!(url.as_str(), "https://en.wikipedia.org/wiki/New_York");
    }

    #[test]
    fn test_page_url_encodes_reserved_characters() {
        let url = page_url(&base(), "São Paulo").unwrap();
        assert_eq!(url.as_str(), "https://en.wikipedia.org/wiki/S%C3%A3o_Paulo");

        let url = page_url(&base(), "Washington, D.C.").unwrap();
        assert_eq!(url.as_str(), "https://en.wikipedia.org/wiki/Washington%2C_D.C.");
    }

    #[tokio::test]
    async fn test_refused_connection_is_network_error() {
        let config = ScrapeConfig {
            base_url: "http://127.0.0.1:9/".into(),
            timeout_secs: 5,
            ..ScrapeConfig::default()
        };
        let source = HttpPageSource::new(&config).unwrap();

        let err = source.fetch_page("London").await.unwrap_err();
        match err {
            ScrapeError::Network { city, source } => {
                assert_eq!(city, "London");
                assert!(source.is_connect() || source.is_timeout());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_refused_connection_aborts_scrape() {
        let config = ScrapeConfig {
            base_url: "http://127.0.0.1:9/".into(),
            timeout_secs: 5,
            ..ScrapeConfig::default()
        };
        let source = HttpPageSource::new(&config).unwrap();
        let cities = vec!["London".to_string(), "Bristol".to_string()];

        let err = crate::scrapers::scrape_cities(&source, &cities, &config)
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Network { ref city, .. } if city == "London"));
    }

    #[test]
    fn test_http_source_rejects_bad_base_url() {
        let config = ScrapeConfig {
            base_url: "not a url".into(),
            ..ScrapeConfig::default()
        };
        assert!(matches!(HttpPageSource::new(&config), Err(ScrapeError::Url(_))));
    }
}
