use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{convert::TimeConverter, error::SeriesError, model::ObservationRecord};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub timestamp: String,
    pub value: f64,
}

/// One field projected across one block, indexed by formatted timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    name: String,
    points: Vec<Point>,
}

impl TimeSeries {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }

    pub fn push(&mut self, timestamp: String, value: f64) {
        self.points.push(Point { timestamp, value });
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn index(&self) -> impl Iterator<Item = &str> + '_ {
        self.points.iter().map(|p| p.timestamp.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// Same index and name, values passed through `f`.
    pub fn map_values(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            name: self.name.clone(),
            points: self
                .points
                .iter()
                .map(|p| Point {
                    timestamp: p.timestamp.clone(),
                    value: f(p.value),
                })
                .collect(),
        }
    }
}

/// Two-column table followed by the series name.
impl fmt::Display for TimeSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.points.iter().map(|p| p.timestamp.len()).max().unwrap_or(0);
        for point in &self.points {
            writeln!(f, "{:<width$}    {:>8.2}", point.timestamp, point.value)?;
        }
        write!(f, "Name: {}, Length: {}", self.name, self.points.len())
    }
}

/// Projects one numeric field of a record list into a [`TimeSeries`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesBuilder {
    clock: TimeConverter,
}

impl SeriesBuilder {
    pub fn new(clock: TimeConverter) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &TimeConverter {
        &self.clock
    }

    /// Records without `field` are skipped, but every record must carry `time`.
    pub fn build(
        &self,
        records: &[ObservationRecord],
        field: &str,
        label: &str,
    ) -> Result<TimeSeries, SeriesError> {
        let mut series = TimeSeries::new(label);

        for (index, record) in records.iter().enumerate() {
            let time = record.time().ok_or(SeriesError::MissingTimeField { index })?;
            let Some(value) = record.get(field) else {
                continue;
            };
            series.push(self.clock.format(time)?, value);
        }

        log::debug!(
            "built series '{label}' from `{field}`: {} of {} records",
            series.len(),
            records.len()
        );

        Ok(series)
    }
}
