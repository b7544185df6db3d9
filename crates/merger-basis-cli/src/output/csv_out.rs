use serde_json::Value;
use std::io;

/// Two-column field,value CSV for commands without a lot export.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let _ = wtr.write_record(["field", "value"]);
    match value {
        Value::Object(map) => {
            let fields = map
                .get("result")
                .and_then(Value::as_object)
                .unwrap_or(map);
            write_fields(&mut wtr, "", fields);
        }
        _ => {
            let _ = wtr.write_record(["value", &format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

/// Nested objects (e.g. merger terms) are flattened to dotted keys.
fn write_fields<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    prefix: &str,
    map: &serde_json::Map<String, Value>,
) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match val {
            Value::Object(inner) => write_fields(wtr, &name, inner),
            _ => {
                let _ = wtr.write_record([name.as_str(), &format_csv_value(val)]);
            }
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
