//! Inline CSV to chart data.
//!
//! Each non-empty line is one dataset: the first cell is its display
//! label, the rest are numeric data points. When the chart data carries no
//! label list, the first line supplies category labels instead (its first
//! cell, the label-column header, is dropped) and is consumed.

use serde_json::{Map, Value};

use crate::util::is_unset;

/// Applies `csv` to `data` in place.
///
/// Lines map positionally onto any datasets fragments already contributed,
/// overwriting their `label` and `data` but preserving every other
/// attribute. A label list present in `data`, even a partial one, means the
/// first line is a data row, never a header.
pub fn apply(data: &mut Map<String, Value>, csv: &str) {
    let mut lines = csv.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty());

    let mut first = lines.next();
    if is_unset(data.get("labels")) {
        if let Some(header) = first.take() {
            let labels = header.split(',')
                .skip(1)
                .map(|cell| Value::from(cell.trim()))
                .collect::<Vec<_>>();

            data.insert("labels".into(), labels.into());
        }
    }

    let datasets = data.entry("datasets").or_insert_with(|| Value::Array(vec![]));
    if !datasets.is_array() {
        *datasets = Value::Array(vec![]);
    }

    let datasets = datasets.as_array_mut().unwrap();
    for (j, line) in first.into_iter().chain(lines).enumerate() {
        if datasets.len() <= j {
            datasets.push(Value::Object(Map::new()));
        }

        if !datasets[j].is_object() {
            datasets[j] = Value::Object(Map::new());
        }

        let dataset = datasets[j].as_object_mut().unwrap();
        let mut cells = line.split(',');
        let label = cells.next().unwrap_or("").trim();
        dataset.insert("label".into(), label.into());
        dataset.insert("data".into(), cells.map(parse_cell).collect::<Vec<_>>().into());
    }
}

/// A cell that does not parse as a number becomes JSON null.
fn parse_cell(cell: &str) -> Value {
    cell.trim()
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
