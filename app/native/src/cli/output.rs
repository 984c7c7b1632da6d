//! JSON output for the `--json` flags and `config show`.
//!
//! Reports are rendered from their `serde_json::Value` tree in the same
//! two-space layout as `serde_json::to_string_pretty`, with keys, strings,
//! numbers and literals colored.

use std::fmt::Write as _;

use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

use crate::error::PinboardError;

const INDENT: &str = "  ";

/// Prints a serializable report as highlighted JSON on stdout.
///
/// # Errors
///
/// Returns an error if the report cannot be converted to JSON.
pub fn print_json(report: &impl Serialize) -> Result<(), PinboardError> {
    println!("{}", highlight_json(&serde_json::to_value(report)?));
    Ok(())
}

/// Renders a JSON value with colors. Without colors the text is identical
/// to the pretty-printed JSON.
#[must_use]
pub fn highlight_json(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null => push_painted(out, "null".magenta()),
        Value::Bool(flag) => push_painted(out, flag.to_string().magenta()),
        Value::Number(number) => push_painted(out, number.to_string().yellow()),
        Value::String(text) => push_painted(out, quoted(text).green()),
        Value::Array(items) if items.is_empty() => push_painted(out, "[]".bold()),
        Value::Object(fields) if fields.is_empty() => push_painted(out, "{}".bold()),
        Value::Array(items) => {
            push_painted(out, "[".bold());
            for (index, item) in items.iter().enumerate() {
                open_line(out, index, depth + 1);
                write_value(out, item, depth + 1);
            }
            close_line(out, depth);
            push_painted(out, "]".bold());
        }
        Value::Object(fields) => {
            push_painted(out, "{".bold());
            for (index, (key, field)) in fields.iter().enumerate() {
                open_line(out, index, depth + 1);
                push_painted(out, quoted(key).cyan());
                out.push_str(": ");
                write_value(out, field, depth + 1);
            }
            close_line(out, depth);
            push_painted(out, "}".bold());
        }
    }
}

/// Separator and indentation before the `index`th entry of a container.
fn open_line(out: &mut String, index: usize, depth: usize) {
    if index > 0 {
        out.push(',');
    }
    out.push('\n');
    out.push_str(&INDENT.repeat(depth));
}

fn close_line(out: &mut String, depth: usize) {
    out.push('\n');
    out.push_str(&INDENT.repeat(depth));
}

fn push_painted(out: &mut String, text: colored::ColoredString) {
    let _ = write!(out, "{text}");
}

/// JSON string literal with escapes.
fn quoted(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{text}\""))
}

// ============================================================================
// Tests
// ============================================================================
