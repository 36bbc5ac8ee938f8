//! End-to-end tests of the document -> series pipeline.

use forecast_core::{
    BlockName, SeriesBuilder, SeriesError, TimeConverter, WeatherDocument,
    daily_min_max_temperature, hourly_temperature, project,
};
use serde_json::json;

fn utc_builder() -> SeriesBuilder {
    SeriesBuilder::new(TimeConverter::utc())
}

fn forecast_document() -> WeatherDocument {
    WeatherDocument::from_value(json!({
        "latitude": 49.2624389,
        "longitude": -123.1665417,
        "timezone": "America/Vancouver",
        "offset": -8,
        "currently": {"time": 1609459200, "summary": "Overcast", "temperature": 41.2},
        "hourly": {
            "summary": "Light rain throughout the day.",
            "data": [
                {"time": 1609459200, "temperature": 5.0, "apparentTemperature": 1.2, "summary": "Rain"},
                {"time": 1609462800, "temperature": 6.5, "apparentTemperature": 2.9, "summary": "Rain"}
            ]
        },
        "daily": {
            "data": [
                {"time": 1609401600, "temperatureMin": 33.1, "temperatureMax": 44.7},
                {"time": 1609488000, "temperatureMin": 35.0, "temperatureMax": 46.2},
                {"time": 1609574400, "temperatureMin": 31.8, "temperatureMax": 42.0}
            ]
        },
        "flags": {"units": "us"}
    }))
    .expect("fixture decodes")
}

#[test]
fn hourly_temperature_end_to_end() {
    let series = hourly_temperature(&forecast_document(), &utc_builder()).unwrap();

    assert_eq!(series.name(), "Hourly temperature");
    assert_eq!(series.values().collect::<Vec<_>>(), vec![5.0, 6.5]);
    assert_eq!(
        series.index().collect::<Vec<_>>(),
        vec!["01 Jan 2021 00:00:00 +0000", "01 Jan 2021 01:00:00 +0000"]
    );
}

#[test]
fn document_offset_localizes_index() {
    let doc = forecast_document();
    let clock = TimeConverter::from_hours(doc.offset.unwrap()).unwrap();

    let series = hourly_temperature(&doc, &SeriesBuilder::new(clock)).unwrap();

    assert_eq!(series.points()[0].timestamp, "31 Dec 2020 16:00:00 -0800");
}

#[test]
fn min_max_is_deterministic() {
    let doc = forecast_document();
    let builder = utc_builder();

    let first = daily_min_max_temperature(&doc, &builder).unwrap();
    let second = daily_min_max_temperature(&doc, &builder).unwrap();

    assert_eq!(first, second);
    let bits = |pair: &(forecast_core::TimeSeries, forecast_core::TimeSeries)| {
        pair.0
            .values()
            .chain(pair.1.values())
            .map(f64::to_bits)
            .collect::<Vec<_>>()
    };
    assert_eq!(bits(&first), bits(&second));
    assert_eq!(first.0.len(), 3);
    assert_eq!(first.1.len(), 3);
    assert_eq!(first.0.name(), "Daily minimum temperature");
    assert_eq!(first.1.name(), "Daily maximum temperature");
}

#[test]
fn time_machine_document_without_daily() {
    let doc = WeatherDocument::from_value(json!({
        "offset": 0,
        "hourly": {"data": [{"time": 946684800, "temperature": 28.0}]}
    }))
    .unwrap();

    assert_eq!(
        daily_min_max_temperature(&doc, &utc_builder()),
        Err(SeriesError::MissingBlock(BlockName::Daily))
    );
    assert_eq!(hourly_temperature(&doc, &utc_builder()).unwrap().len(), 1);
}

#[test]
fn hourly_missing_from_document() {
    let doc = WeatherDocument::from_value(json!({"daily": {"data": []}})).unwrap();
    assert_eq!(
        hourly_temperature(&doc, &utc_builder()),
        Err(SeriesError::MissingBlock(BlockName::Hourly))
    );
}

#[test]
fn record_without_time_fails_the_whole_series() {
    let doc = WeatherDocument::from_value(json!({
        "hourly": {"data": [{"time": 1000, "temperature": 1.0}, {"temperature": 10.0}]}
    }))
    .unwrap();

    assert_eq!(
        hourly_temperature(&doc, &utc_builder()),
        Err(SeriesError::MissingTimeField { index: 1 })
    );
}

#[test]
fn projecting_min_across_hourly_is_empty_not_an_error() {
    let series = project(
        &forecast_document(),
        &utc_builder(),
        BlockName::Hourly,
        "temperatureMin",
        "Nothing",
    )
    .unwrap();
    assert!(series.is_empty());
}

#[test]
fn series_serializes_to_json() {
    let series = hourly_temperature(&forecast_document(), &utc_builder()).unwrap();
    let value = serde_json::to_value(&series).unwrap();

    assert_eq!(value["name"], "Hourly temperature");
    assert_eq!(value["points"][1]["value"], 6.5);
    assert_eq!(value["points"][1]["timestamp"], "01 Jan 2021 01:00:00 +0000");
}
