//! Named projections of well-known temperature fields.

use crate::{
    error::SeriesError,
    extract::extract,
    model::{BlockName, Field, WeatherDocument},
    series::{SeriesBuilder, TimeSeries},
};

/// The single-series accessors, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    HourlyTemperature,
    HourlyApparentTemperature,
    DailyMinTemperature,
    DailyMaxTemperature,
}

impl Parameter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Parameter::HourlyTemperature => "hourly-temperature",
            Parameter::HourlyApparentTemperature => "hourly-apparent-temperature",
            Parameter::DailyMinTemperature => "daily-min-temperature",
            Parameter::DailyMaxTemperature => "daily-max-temperature",
        }
    }

    pub const fn all() -> &'static [Parameter] {
        &[
            Parameter::HourlyTemperature,
            Parameter::HourlyApparentTemperature,
            Parameter::DailyMinTemperature,
            Parameter::DailyMaxTemperature,
        ]
    }

    pub fn block(&self) -> BlockName {
        match self {
            Parameter::HourlyTemperature | Parameter::HourlyApparentTemperature => {
                BlockName::Hourly
            }
            Parameter::DailyMinTemperature | Parameter::DailyMaxTemperature => BlockName::Daily,
        }
    }

    pub fn field(&self) -> Field {
        match self {
            Parameter::HourlyTemperature => Field::Temperature,
            Parameter::HourlyApparentTemperature => Field::ApparentTemperature,
            Parameter::DailyMinTemperature => Field::TemperatureMin,
            Parameter::DailyMaxTemperature => Field::TemperatureMax,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Parameter::HourlyTemperature => "Hourly temperature",
            Parameter::HourlyApparentTemperature => "Hourly apparent temperature",
            Parameter::DailyMinTemperature => "Daily minimum temperature",
            Parameter::DailyMaxTemperature => "Daily maximum temperature",
        }
    }

    pub fn series(
        &self,
        doc: &WeatherDocument,
        builder: &SeriesBuilder,
    ) -> Result<TimeSeries, SeriesError> {
        project(doc, builder, self.block(), self.field().as_str(), self.label())
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Parameter {
    type Error = SeriesError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();
        Parameter::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == lower)
            .ok_or_else(|| SeriesError::UnknownParameter(value.to_string()))
    }
}

/// Extract `block` and project `field` across it.
pub fn project(
    doc: &WeatherDocument,
    builder: &SeriesBuilder,
    block: BlockName,
    field: &str,
    label: &str,
) -> Result<TimeSeries, SeriesError> {
    let records = extract(doc, block)?;
    builder.build(&records, field, label)
}

pub fn hourly_temperature(
    doc: &WeatherDocument,
    builder: &SeriesBuilder,
) -> Result<TimeSeries, SeriesError> {
    Parameter::HourlyTemperature.series(doc, builder)
}

pub fn hourly_apparent_temperature(
    doc: &WeatherDocument,
    builder: &SeriesBuilder,
) -> Result<TimeSeries, SeriesError> {
    Parameter::HourlyApparentTemperature.series(doc, builder)
}

pub fn daily_min_temperature(
    doc: &WeatherDocument,
    builder: &SeriesBuilder,
) -> Result<TimeSeries, SeriesError> {
    Parameter::DailyMinTemperature.series(doc, builder)
}

pub fn daily_max_temperature(
    doc: &WeatherDocument,
    builder: &SeriesBuilder,
) -> Result<TimeSeries, SeriesError> {
    Parameter::DailyMaxTemperature.series(doc, builder)
}

/// `(min, max)`, both projected from a single extraction of `daily`.
pub fn daily_min_max_temperature(
    doc: &WeatherDocument,
    builder: &SeriesBuilder,
) -> Result<(TimeSeries, TimeSeries), SeriesError> {
    let records = extract(doc, BlockName::Daily)?;

    let min = Parameter::DailyMinTemperature;
    let max = Parameter::DailyMaxTemperature;

    Ok((
        builder.build(&records, min.field().as_str(), min.label())?,
        builder.build(&records, max.field().as_str(), max.label())?,
    ))
}
