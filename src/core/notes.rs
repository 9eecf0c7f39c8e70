//! Renders message parameters as the notes block shown next to an asset in
//! the platform UI.

use crate::utils::error::Result;
use serde_json::Value;

const NBSP: char = '\u{a0}';

/// Dumps `parameters` as YAML, strips list markers and turns indentation into
/// non-breaking spaces so the UI keeps the nesting visible.
pub fn render_parameters(parameters: &Value) -> Result<String> {
    let yaml = serde_yaml::to_string(parameters)?;

    let lines: Vec<String> = yaml
        .lines()
        .filter(|line| *line != "---")
        .map(render_line)
        .collect();

    Ok(lines.join("\n"))
}

fn render_line(line: &str) -> String {
    let rest = line.trim_start_matches(' ');
    let indent = line.len() - rest.len();

    let mut rest = rest;
    loop {
        if let Some(stripped) = rest.strip_prefix("- ") {
            rest = stripped;
        } else if rest == "-" {
            rest = "";
        } else {
            break;
        }
    }

    let mut rendered: String = std::iter::repeat(NBSP).take(indent).collect();
    rendered.push_str(rest);
    rendered
}

/// Whether a metadata value carries nothing worth sending.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
