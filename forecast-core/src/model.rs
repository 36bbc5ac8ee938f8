use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SeriesError;

#[derive(Debug, Clone)]
pub struct WeatherRequest {
    pub address: String,
    /// `None` asks for a forecast, `Some` for a time-machine lookup.
    pub when: Option<DateTime<Utc>>,
}

/// A geocoded address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

/// Sequence-valued blocks of a weather document.
///
/// `currently` holds a single record rather than a sequence and is not a
/// `BlockName`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockName {
    Minutely,
    Hourly,
    Daily,
}

impl BlockName {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockName::Minutely => "minutely",
            BlockName::Hourly => "hourly",
            BlockName::Daily => "daily",
        }
    }

    pub const fn all() -> &'static [BlockName] {
        &[BlockName::Minutely, BlockName::Hourly, BlockName::Daily]
    }
}

impl std::fmt::Display for BlockName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for BlockName {
    type Error = SeriesError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "minutely" => Ok(BlockName::Minutely),
            "hourly" => Ok(BlockName::Hourly),
            "daily" => Ok(BlockName::Daily),
            _ => Err(SeriesError::UnsupportedBlock(value.to_string())),
        }
    }
}

/// Well-known numeric fields reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Temperature,
    ApparentTemperature,
    TemperatureMin,
    TemperatureMax,
    DewPoint,
    Humidity,
    Pressure,
    WindSpeed,
    WindGust,
    WindBearing,
    CloudCover,
    UvIndex,
    Visibility,
    Ozone,
    PrecipIntensity,
    PrecipProbability,
}

impl Field {
    /// Key used in the provider's JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Temperature => "temperature",
            Field::ApparentTemperature => "apparentTemperature",
            Field::TemperatureMin => "temperatureMin",
            Field::TemperatureMax => "temperatureMax",
            Field::DewPoint => "dewPoint",
            Field::Humidity => "humidity",
            Field::Pressure => "pressure",
            Field::WindSpeed => "windSpeed",
            Field::WindGust => "windGust",
            Field::WindBearing => "windBearing",
            Field::CloudCover => "cloudCover",
            Field::UvIndex => "uvIndex",
            Field::Visibility => "visibility",
            Field::Ozone => "ozone",
            Field::PrecipIntensity => "precipIntensity",
            Field::PrecipProbability => "precipProbability",
        }
    }

    pub const fn all() -> &'static [Field] {
        &[
            Field::Temperature,
            Field::ApparentTemperature,
            Field::TemperatureMin,
            Field::TemperatureMax,
            Field::DewPoint,
            Field::Humidity,
            Field::Pressure,
            Field::WindSpeed,
            Field::WindGust,
            Field::WindBearing,
            Field::CloudCover,
            Field::UvIndex,
            Field::Visibility,
            Field::Ozone,
            Field::PrecipIntensity,
            Field::PrecipProbability,
        ]
    }

    /// Whether values of this field are temperatures (and so unit-convertible).
    pub fn is_temperature(&self) -> bool {
        matches!(
            self,
            Field::Temperature
                | Field::ApparentTemperature
                | Field::TemperatureMin
                | Field::TemperatureMax
                | Field::DewPoint
        )
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Field {
    type Error = SeriesError;

    /// Accepts the provider key exactly or case-insensitively.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Field::all()
            .iter()
            .copied()
            .find(|field| field.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| SeriesError::UnknownField(value.to_string()))
    }
}

/// One timestamped set of weather fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationRecord {
    time: Option<i64>,
    values: BTreeMap<String, f64>,
    text: BTreeMap<String, String>,
}

impl ObservationRecord {
    pub fn new(time: i64) -> Self {
        Self {
            time: Some(time),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, field: impl Into<String>, value: f64) -> Self {
        self.values.insert(field.into(), value);
        self
    }

    /// Build a record from one element of a block's `data` array.
    ///
    /// Arrays, objects, booleans and nulls inside the record are dropped.
    pub(crate) fn from_json(value: &Value) -> Result<Self, String> {
        let object = value
            .as_object()
            .ok_or_else(|| format!("expected an object, found {}", json_kind(value)))?;

        let mut record = Self::default();
        for (key, value) in object {
            if key == "time" {
                record.time = Some(integral_seconds(value).ok_or_else(|| {
                    format!("`time` must be integer seconds, found {value}")
                })?);
                continue;
            }

            match value {
                Value::Number(n) => {
                    if let Some(n) = n.as_f64() {
                        record.values.insert(key.clone(), n);
                    }
                }
                Value::String(s) => {
                    record.text.insert(key.clone(), s.clone());
                }
                _ => {}
            }
        }

        Ok(record)
    }

    pub fn time(&self) -> Option<i64> {
        self.time
    }

    /// Numeric value of `field`, or `None` when the record does not carry it.
    pub fn get(&self, field: &str) -> Option<f64> {
        self.values.get(field).copied()
    }

    pub fn value(&self, field: Field) -> Option<f64> {
        self.get(field.as_str())
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.text.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }
}

fn integral_seconds(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Root object of one provider response.
///
/// Only the scalar metadata is typed. Blocks stay raw JSON until
/// [`extract`](crate::extract::extract) validates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherDocument {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone: Option<String>,
    /// Provider's local UTC offset, in hours.
    pub offset: Option<f64>,
    pub flags: Option<Value>,

    #[serde(flatten)]
    pub(crate) blocks: Map<String, Value>,
}

impl WeatherDocument {
    pub fn from_json_str(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn has_block(&self, block: BlockName) -> bool {
        self.blocks.contains_key(block.as_str())
    }

    /// Human-readable `summary` of a block, if the provider sent one.
    pub fn block_summary(&self, block: BlockName) -> Option<&str> {
        self.blocks
            .get(block.as_str())
            .and_then(|b| b.get("summary"))
            .and_then(Value::as_str)
    }

    /// The single `currently` record. `None` when absent or not a record.
    pub fn currently(&self) -> Option<ObservationRecord> {
        self.blocks
            .get("currently")
            .and_then(|value| ObservationRecord::from_json(value).ok())
    }
}
