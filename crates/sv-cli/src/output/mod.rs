use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod code;
pub mod page;
pub mod table;

/// Render a serializable response to a string in the requested format.
///
/// `Text` falls back to the table layout for responses without a page
/// renderer.
pub fn render<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table | OutputFormat::Text => render_value_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print a page: `text()` for the text format, `rows` as a table, and the
/// full `value` as JSON.
pub fn output_page<T, R, F>(value: &T, rows: &R, format: OutputFormat, text: F) -> anyhow::Result<()>
where
    T: Serialize,
    R: Serialize + ?Sized,
    F: FnOnce() -> String,
{
    match format {
        OutputFormat::Text => {
            println!("{}", text());
            Ok(())
        }
        OutputFormat::Table => output(rows, format),
        OutputFormat::Json | OutputFormat::Raw => output(value, format),
    }
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.color,
    }
}

fn render_value_table<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items)),
        Value::Object(map) => {
            // A single list field renders as that list.
            if map.len() == 1
                && let Some(Value::Array(items)) = map.values().next()
            {
                return Ok(render_array_table(items));
            }
            let headers = ["key", "value"];
            let mut entries = map.into_iter().collect::<Vec<_>>();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let rows = entries
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_table(&headers, &rows, table_options()))
        }
        scalar => Ok(table::render_table(
            &["value"],
            &[vec![value_to_cell(&scalar)]],
            table_options(),
        )),
    }
}

fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_table(&["value"], &rows, table_options());
    }

    // Column order follows the first row's field order.
    let mut headers = Vec::<String>::new();
    for item in items {
        if let Some(map) = item.as_object() {
            for key in map.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| {
                    map.get(header)
                        .map_or_else(|| String::from("-"), value_to_cell)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_table(&header_refs, &rows, table_options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.replace('\n', " "),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        id: i64,
        name: &'static str,
    }

    #[derive(Serialize)]
    struct Listing {
        users: Vec<Example>,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Example { id: 7, name: "x" };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], 7);
        assert_eq!(parsed["name"], "x");
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Example { id: 7, name: "x" };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_for_object_is_key_value() {
        let value = Example { id: 7, name: "x" };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.contains("key")));
        assert!(out.contains("name"));
    }

    #[test]
    fn single_list_field_renders_as_rows() {
        let value = Listing {
            users: vec![Example { id: 1, name: "Ada" }, Example { id: 2, name: "Grace" }],
        };
        let out = render(&value, OutputFormat::Text).expect("text render should work");
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("id") && lines[0].contains("name"));
        assert_eq!(lines.len(), 4);
        assert!(lines[3].contains("Grace"));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let value = Listing { users: Vec::new() };
        assert_eq!(render(&value, OutputFormat::Table).unwrap(), "(no rows)");
    }
}
