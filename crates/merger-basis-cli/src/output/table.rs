use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Lot columns shown in the batch summary table.
const LOT_COLUMNS: [&str; 11] = [
    "row_id",
    "type",
    "share",
    "acquire_date",
    "sold_date",
    "merged",
    "total_proceeds",
    "filing_cost_base",
    "total_capital_gain",
    "total_ordinary_income",
    "avgo_total_cost_base",
];

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_flat_object(value);
            }
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    match result.get("lots") {
        Some(Value::Array(lots)) => {
            print_lots_table(lots);
            if let Some(totals) = result.get("totals") {
                println!("\nTotals:");
                print_flat_object(totals);
            }
        }
        _ => print_flat_object(result),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    }
}

/// Lots omit fields that don't apply to them, so columns are fixed rather
/// than taken from the first row.
fn print_lots_table(lots: &[Value]) {
    if lots.is_empty() {
        println!("(no lots)");
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(LOT_COLUMNS);
    for lot in lots {
        if let Value::Object(map) = lot {
            let row: Vec<String> = LOT_COLUMNS
                .iter()
                .map(|col| map.get(*col).map(format_value).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
