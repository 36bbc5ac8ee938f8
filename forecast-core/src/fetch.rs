use crate::{
    Config, FetchError, Location, WeatherDocument, WeatherRequest,
    fetch::{darksky::DarkSkyFetcher, nominatim::NominatimGeocoder},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod darksky;
pub mod nominatim;

/// Resolves a free-form address to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn geocode(&self, address: &str) -> Result<Location, FetchError>;
}

/// Retrieves one weather document for a request.
#[async_trait]
pub trait Fetcher: Send + Sync + Debug {
    async fn fetch(&self, request: &WeatherRequest) -> Result<(Location, WeatherDocument), FetchError>;
}

/// Construct the fetcher described by the config.
pub fn fetcher_from_config(config: &Config) -> Result<Box<dyn Fetcher>, FetchError> {
    let api_key = config.api_key().ok_or(FetchError::MissingApiKey)?;

    let mut geocoder = NominatimGeocoder::new()?;
    if let Some(url) = &config.geocoder_url {
        geocoder = geocoder.with_base_url(url.clone());
    }

    let mut fetcher = DarkSkyFetcher::new(api_key.to_owned(), Box::new(geocoder));
    if let Some(url) = &config.forecast_url {
        fetcher = fetcher.with_base_url(url.clone());
    }

    Ok(Box::new(fetcher))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetcher_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = fetcher_from_config(&cfg).unwrap_err();
        assert!(matches!(err, FetchError::MissingApiKey));
        assert!(err.to_string().contains("Hint: run `forecast configure`"));
    }

    #[test]
    fn fetcher_from_config_works_when_key_set() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            forecast_url: Some("http://localhost:9/forecast".into()),
            ..Config::default()
        };
        assert!(fetcher_from_config(&cfg).is_ok());
    }

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("not found"), "not found");
    }

    #[test]
    fn truncate_body_cuts_on_char_boundary() {
        let body = "é".repeat(300);
        let cut = truncate_body(&body);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }
}
