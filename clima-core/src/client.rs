use std::{sync::Arc, time::Duration};

use anyhow::Context;
use reqwest::Url;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

use crate::{
    config::Config,
    decode::{decode, error_message},
    error::{FetchError, TransportError},
    model::{WeatherQuery, WeatherResult},
    transport::{HttpTransport, Transport},
};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

const UNITS: &str = "metric";

/// Receives the outcome of a fetch. Exactly one method is called per fetch.
pub trait WeatherDelegate: Send + Sync {
    fn on_weather_updated(&self, result: WeatherResult);
    fn on_fetch_failed(&self, error: FetchError);
}

/// Client for the OpenWeather current-weather endpoint.
///
/// Holds no per-request state; clones share the same transport.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    transport: Arc<dyn Transport>,
    /// Base URL with `appid` and `units` already attached.
    endpoint: Url,
    timeout: Option<Duration>,
}

impl WeatherClient {
    pub fn new(base_url: Url, api_key: &str) -> Self {
        let mut endpoint = base_url;
        endpoint
            .query_pairs_mut()
            .append_pair("appid", api_key)
            .append_pair("units", UNITS);

        Self {
            transport: Arc::new(HttpTransport::new()),
            endpoint,
            timeout: None,
        }
    }

    /// Build a client from the stored configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.resolved_api_key()?;
        let base_url = config.base_url();
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid base_url in config: {base_url}"))?;

        Ok(Self::new(base_url, &api_key).with_timeout(config.timeout()))
    }

    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Arc::new(transport);
        self
    }

    /// Default deadline for [`fetch`](Self::fetch); `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full request URL for `query`, base parameters first.
    pub fn request_url(&self, query: &WeatherQuery) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            match query {
                WeatherQuery::City { name } => pairs.append_pair("q", name),
                WeatherQuery::Coordinates { latitude, longitude } => pairs
                    .append_pair("lat", &latitude.to_string())
                    .append_pair("lon", &longitude.to_string()),
            };
        }
        url
    }

    pub async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherResult, FetchError> {
        self.perform(query, self.timeout).await
    }

    /// Like [`fetch`](Self::fetch), failing with [`TransportError::Timeout`]
    /// if no response arrives within `deadline`.
    pub async fn fetch_with_deadline(
        &self,
        query: &WeatherQuery,
        deadline: Duration,
    ) -> Result<WeatherResult, FetchError> {
        self.perform(query, Some(deadline)).await
    }

    /// Fetch and report the outcome to `delegate`.
    pub async fn fetch_with_delegate<D>(&self, query: &WeatherQuery, delegate: &D)
    where
        D: WeatherDelegate + ?Sized,
    {
        match self.fetch(query).await {
            Ok(result) => delegate.on_weather_updated(result),
            Err(err) => delegate.on_fetch_failed(err),
        }
    }

    /// Run the fetch on the tokio runtime without blocking the caller.
    pub fn spawn_fetch<D>(&self, query: WeatherQuery, delegate: Arc<D>) -> JoinHandle<()>
    where
        D: WeatherDelegate + ?Sized + 'static,
    {
        let client = self.clone();
        tokio::spawn(async move { client.fetch_with_delegate(&query, delegate.as_ref()).await })
    }

    #[instrument(skip(self), level = "debug")]
    async fn perform(
        &self,
        query: &WeatherQuery,
        deadline: Option<Duration>,
    ) -> Result<WeatherResult, FetchError> {
        let url = self.request_url(query);
        debug!(host = url.host_str(), path = url.path(), "requesting current weather");

        let outcome = self.exchange(url, deadline).await;
        if let Err(err) = &outcome {
            warn!(error = ?err, "weather fetch failed");
        }
        outcome
    }

    async fn exchange(
        &self,
        url: Url,
        deadline: Option<Duration>,
    ) -> Result<WeatherResult, FetchError> {
        let request = self.transport.get(url);
        let response = match deadline {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .map_err(|_| TransportError::Timeout(limit))??,
            None => request.await?,
        };

        debug!(
            status = %response.status,
            bytes = response.body.len(),
            "weather response received"
        );

        if !response.status.is_success() {
            return Err(TransportError::Status {
                status: response.status,
                message: error_message(&response.body),
            }
            .into());
        }

        Ok(decode(&response.body)?)
    }
}
