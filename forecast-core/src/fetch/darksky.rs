use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;

use crate::{
    FetchError, Location, WeatherDocument, WeatherRequest, fetch::truncate_body,
};

use super::{Fetcher, Geocoder};

/// Pirate Weather serves the Dark Sky forecast and time-machine API.
const DEFAULT_BASE_URL: &str = "https://api.pirateweather.net/forecast";
const SERVICE: &str = "forecast API";

/// Client for Dark Sky style `/forecast/{key}/{lat},{lon}[,{time}]` endpoints.
#[derive(Debug)]
pub struct DarkSkyFetcher {
    api_key: String,
    base_url: String,
    http: Client,
    geocoder: Box<dyn Geocoder>,
}

impl DarkSkyFetcher {
    pub fn new(api_key: String, geocoder: Box<dyn Geocoder>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
            geocoder,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Forecast URL when `when` is `None`, time-machine URL otherwise.
    fn request_url(&self, location: &Location, when: Option<DateTime<Utc>>) -> String {
        let mut url = format!(
            "{}/{}/{},{}",
            self.base_url, self.api_key, location.latitude, location.longitude
        );
        if let Some(when) = when {
            url.push_str(&format!(",{}", when.timestamp()));
        }
        url
    }

    fn redact(&self, url: &str) -> String {
        url.replace(&self.api_key, "<api-key>")
    }

    async fn fetch_document(
        &self,
        location: &Location,
        when: Option<DateTime<Utc>>,
    ) -> Result<WeatherDocument, FetchError> {
        let url = self.request_url(location, when);
        log::debug!("GET {}", self.redact(&url));

        let res = self
            .http
            .get(&url)
            .query(&[("units", "us")])
            .send()
            .await
            .map_err(|e| FetchError::Request(e.without_url()))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| FetchError::Request(e.without_url()))?;

        if !status.is_success() {
            return Err(FetchError::Status {
                service: SERVICE,
                status,
                body: truncate_body(&body),
            });
        }

        WeatherDocument::from_json_str(&body)
            .map_err(|source| FetchError::Decode { service: SERVICE, source })
    }
}

#[async_trait]
impl Fetcher for DarkSkyFetcher {
    async fn fetch(&self, request: &WeatherRequest) -> Result<(Location, WeatherDocument), FetchError> {
        let location = self.geocoder.geocode(&request.address).await?;

        match request.when {
            None => log::info!("fetching forecast for {}", location.display_name),
            Some(when) => log::info!("fetching time-machine data for {} at {when}", location.display_name),
        }

        let doc = self.fetch_document(&location, request.when).await?;
        Ok((location, doc))
    }
}
