use serde_json::Value;
use std::io;

use super::table::{column_union, is_row_list};

/// Write output as CSV to stdout.
///
/// A measurement or summary becomes two-column field/value rows (nested
/// schedules are left out; request one with `--schedule`). A list of rows
/// becomes one record per row.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            if let Some(Value::Object(result)) = map.get("result") {
                write_fields(&mut wtr, result);
            } else if let Some(Value::Array(results)) = map.get("results") {
                write_array_csv(&mut wtr, results);
            } else {
                write_fields(&mut wtr, map);
            }
        }
        Value::Array(arr) => write_array_csv(&mut wtr, arr),
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_fields(
    wtr: &mut csv::Writer<io::StdoutLock<'_>>,
    map: &serde_json::Map<String, Value>,
) {
    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in map {
        if !is_row_list(val) {
            let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
        }
    }
}

fn write_array_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if arr.iter().all(Value::is_object) {
        let headers = column_union(arr);
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_csv_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
