use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use forecast_core::{BlockName, Field, Location, TimeSeries, Units, WeatherDocument};
use serde_json::json;

pub fn print_header(
    location: &Location,
    when: Option<DateTime<Utc>>,
    doc: &WeatherDocument,
    block: BlockName,
    units: Units,
) {
    for line in header_lines(location, when, doc, block, units) {
        println!("{line}");
    }
    println!();
}

fn header_lines(
    location: &Location,
    when: Option<DateTime<Utc>>,
    doc: &WeatherDocument,
    block: BlockName,
    units: Units,
) -> Vec<String> {
    let mut lines = vec![format!(
        "Weather for {} ({:.4}, {:.4})",
        location.display_name, location.latitude, location.longitude
    )];

    match when {
        Some(when) => lines.push(format!("Time machine: {}", when.format("%Y-%m-%d %H:%M UTC"))),
        None => lines.push("Forecast".to_string()),
    }

    if let Some(current) = doc.currently() {
        let summary = current.text("summary").unwrap_or("Unknown");
        match current.value(Field::Temperature) {
            Some(t) => lines.push(format!(
                "Currently: {summary}, {:.1}{}",
                units.convert(t),
                units.symbol()
            )),
            None => lines.push(format!("Currently: {summary}")),
        }
    }

    if let Some(summary) = doc.block_summary(block) {
        lines.push(format!("{block}: {summary}"));
    }

    lines
}

pub fn print_series(series: &[TimeSeries]) {
    for (i, s) in series.iter().enumerate() {
        if i > 0 {
            println!();
        }
        if s.is_empty() {
            println!("(no data) Name: {}", s.name());
        } else {
            println!("{s}");
        }
    }
}

pub fn print_json(
    location: &Location,
    when: Option<DateTime<Utc>>,
    series: &[TimeSeries],
) -> Result<()> {
    let out = json!({
        "location": location,
        "time": when,
        "series": series,
    });
    let text = serde_json::to_string_pretty(&out).context("Failed to serialize output as JSON")?;
    println!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn location() -> Location {
        Location {
            latitude: 49.2624389,
            longitude: -123.1665417,
            display_name: "Vancouver".into(),
        }
    }

    #[test]
    fn header_for_forecast_with_current_conditions() {
        let doc = WeatherDocument::from_value(json!({
            "currently": {"time": 1609459200, "summary": "Overcast", "temperature": 50.0},
            "hourly": {"summary": "Rain until evening.", "data": []}
        }))
        .unwrap();

        let lines = header_lines(&location(), None, &doc, BlockName::Hourly, Units::Celsius);

        assert_eq!(lines[0], "Weather for Vancouver (49.2624, -123.1665)");
        assert_eq!(lines[1], "Forecast");
        assert_eq!(lines[2], "Currently: Overcast, 10.0°C");
        assert_eq!(lines[3], "hourly: Rain until evening.");
    }

    #[test]
    fn header_for_time_machine_without_extras() {
        let doc = WeatherDocument::from_value(json!({"daily": {"data": []}})).unwrap();
        let when = Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap();

        let lines = header_lines(&location(), Some(when), &doc, BlockName::Daily, Units::Fahrenheit);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "Time machine: 2020-06-01 00:00 UTC");
    }
}
