use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{FetchError, Location, fetch::truncate_body};

use super::Geocoder;

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";
const SERVICE: &str = "Nominatim";

/// OpenStreetMap search API. Requires an identifying User-Agent.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    base_url: String,
    http: Client,
}

impl NominatimGeocoder {
    pub fn new() -> Result<Self, FetchError> {
        let http = Client::builder()
            .user_agent(concat!("forecast-core/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            http,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
    display_name: String,
}

impl TryFrom<Place> for Location {
    type Error = FetchError;

    fn try_from(place: Place) -> Result<Self, Self::Error> {
        let parse = |s: &str| {
            s.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| FetchError::InvalidCoordinates(format!("{}, {}", place.lat, place.lon)))
        };

        let latitude = parse(&place.lat)?;
        let longitude = parse(&place.lon)?;
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(FetchError::InvalidCoordinates(format!("{latitude}, {longitude}")));
        }

        Ok(Location {
            latitude,
            longitude,
            display_name: place.display_name,
        })
    }
}

fn first_place(address: &str, body: &str) -> Result<Location, FetchError> {
    let places: Vec<Place> = serde_json::from_str(body)
        .map_err(|source| FetchError::Decode { service: SERVICE, source })?;

    places
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::AddressNotFound(address.to_string()))?
        .try_into()
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, address: &str) -> Result<Location, FetchError> {
        log::debug!("geocoding '{address}' via {}", self.base_url);

        let res = self
            .http
            .get(self.search_url())
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                service: SERVICE,
                status,
                body: truncate_body(&body),
            });
        }

        let location = first_place(address, &body)?;
        log::info!(
            "resolved '{address}' to {} ({:.4}, {:.4})",
            location.display_name,
            location.latitude,
            location.longitude
        );
        Ok(location)
    }
}
