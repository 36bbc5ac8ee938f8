use thiserror::Error;

use crate::model::BlockName;

/// Failures of the normalization pipeline.
///
/// A record that simply lacks the projected field is not an error; it is
/// skipped by [`SeriesBuilder`](crate::series::SeriesBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    /// The document has no entry for the requested block.
    #[error("weather document has no `{0}` block")]
    MissingBlock(BlockName),

    /// The block exists but its shape is not `{ "data": [ {..}, .. ] }`.
    #[error("malformed `{block}` block: {reason}")]
    MalformedDocument { block: BlockName, reason: String },

    /// A record has no `time` entry.
    #[error("observation record #{index} has no `time` field")]
    MissingTimeField { index: usize },

    /// Negative, or later than the year 9999.
    #[error("timestamp {0} is outside the supported range")]
    InvalidTimestamp(i64),

    #[error("unsupported block '{0}'. Supported blocks: minutely, hourly, daily.")]
    UnsupportedBlock(String),

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error(
        "unknown series '{0}'. Supported series: hourly-temperature, hourly-apparent-temperature, \
         daily-min-temperature, daily-max-temperature, daily-min-max."
    )]
    UnknownParameter(String),

    #[error("invalid UTC offset '{0}', expected e.g. +05:30, -08:00 or UTC")]
    InvalidOffset(String),
}

/// Failures of the network collaborators (geocoding and the weather API).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no weather API key configured.\nHint: run `forecast configure` and enter your API key.")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{service} request failed with status {status}: {body}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to decode {service} response: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("no location found for address '{0}'")]
    AddressNotFound(String),

    #[error("geocoder returned invalid coordinates: {0}")]
    InvalidCoordinates(String),
}
