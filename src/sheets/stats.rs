//! # Sheet Aggregates
//!
//! Computes [`SheetStats`] over a full row set. Used by stores that
//! aggregate in-process; remote stores compute the same shape server-side.

use std::collections::{BTreeMap, HashSet};

use serde_json::Value;

use super::filter::value_text;
use super::model::{ColumnStats, Row, SheetStats};

#[derive(Default)]
struct ColumnAccumulator {
    non_null: usize,
    numeric_count: usize,
    sum: f64,
    min: Option<f64>,
    max: Option<f64>,
    distinct: HashSet<String>,
}

impl ColumnAccumulator {
    fn push(&mut self, value: &Value) {
        let Some(text) = value_text(value) else {
            return;
        };
        self.non_null += 1;

        if let Some(n) = numeric_value(value) {
            self.numeric_count += 1;
            self.sum += n;
            self.min = Some(self.min.map_or(n, |m| m.min(n)));
            self.max = Some(self.max.map_or(n, |m| m.max(n)));
        }

        self.distinct.insert(text);
    }

    fn finish(self, row_count: usize) -> ColumnStats {
        let numeric = self.numeric_count > 0;
        ColumnStats {
            non_null: self.non_null,
            null_count: row_count - self.non_null,
            numeric_count: self.numeric_count,
            sum: numeric.then_some(self.sum),
            min: self.min,
            max: self.max,
            mean: numeric.then(|| self.sum / self.numeric_count as f64),
            distinct: self.distinct.len(),
        }
    }
}

/// Numbers and numeric strings count as numeric; booleans do not
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                s.parse::<f64>().ok().filter(|n| n.is_finite())
            }
        }
        _ => None,
    }
}

/// Aggregate every row of a sheet.
///
/// Returns `None` when there are no rows to aggregate.
pub fn compute(rows: &[Row]) -> Option<SheetStats> {
    if rows.is_empty() {
        return None;
    }

    let mut columns: BTreeMap<String, ColumnAccumulator> = BTreeMap::new();
    for row in rows {
        for (column, value) in row.iter() {
            columns.entry(column.clone()).or_default().push(value);
        }
    }

    let row_count = rows.len();
    let columns: BTreeMap<String, ColumnStats> = columns
        .into_iter()
        .map(|(name, acc)| (name, acc.finish(row_count)))
        .collect();

    Some(SheetStats {
        row_count,
        column_count: columns.len(),
        columns,
    })
}
