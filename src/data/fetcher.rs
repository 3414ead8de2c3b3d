use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use tracing::trace;

use crate::error::{ChartError, ChartResult};

/// Source of raw CSV bodies for city endpoints.
///
/// Implementations resolve each request independently; dropping the returned
/// future cancels the request.
pub trait SeriesFetcher {
    fn fetch_text(&self, url: &str) -> impl Future<Output = ChartResult<String>>;
}

/// HTTP fetcher backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Builds a client. `timeout` of `None` waits on a request indefinitely.
    pub fn new(timeout: Option<Duration>) -> ChartResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ChartError::Config(format!("failed to build http client: {err}")))?;
        Ok(Self { client })
    }
}

impl SeriesFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> ChartResult<String> {
        trace!(url, "http get");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| network_error(url, &err))?;
        response.text().await.map_err(|err| network_error(url, &err))
    }
}

fn network_error(url: &str, err: &reqwest::Error) -> ChartError {
    ChartError::Network {
        url: url.to_owned(),
        message: err.to_string(),
    }
}

/// In-memory fetcher used by tests and offline hosts.
///
/// Unknown URLs fail with `ChartError::Network`.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    bodies: HashMap<String, Result<String, String>>,
}

impl StaticFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(url.into(), Ok(body.into()));
        self
    }

    #[must_use]
    pub fn with_failure(mut self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.bodies.insert(url.into(), Err(message.into()));
        self
    }
}

impl SeriesFetcher for StaticFetcher {
    async fn fetch_text(&self, url: &str) -> ChartResult<String> {
        match self.bodies.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(message)) => Err(ChartError::Network {
                url: url.to_owned(),
                message: message.clone(),
            }),
            None => Err(ChartError::Network {
                url: url.to_owned(),
                message: "no response registered".to_owned(),
            }),
        }
    }
}
