use serde_json::Value;

use crate::{
    error::SeriesError,
    model::{BlockName, ObservationRecord, WeatherDocument},
};

/// Return the ordered `data` records of one block.
///
/// Record order is taken from the document as-is.
pub fn extract(
    doc: &WeatherDocument,
    block: BlockName,
) -> Result<Vec<ObservationRecord>, SeriesError> {
    let malformed = |reason: String| SeriesError::MalformedDocument { block, reason };

    let entry = doc
        .blocks
        .get(block.as_str())
        .ok_or(SeriesError::MissingBlock(block))?;

    let entry = entry
        .as_object()
        .ok_or_else(|| malformed("block is not an object".to_string()))?;

    let data = entry
        .get("data")
        .ok_or_else(|| malformed("missing `data`".to_string()))?;

    let items = match data {
        Value::Array(items) => items,
        _ => return Err(malformed("`data` is not a sequence".to_string())),
    };

    let records = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            ObservationRecord::from_json(item)
                .map_err(|reason| malformed(format!("record #{index}: {reason}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("extracted {} records from `{block}`", records.len());

    Ok(records)
}
