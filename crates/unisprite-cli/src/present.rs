use colored::*;
use std::fmt::Write;
use unisprite_core::ReplacementResult;

const LABEL_WIDTH: usize = 8;

/// Human-readable report: both sprites with their identifiers, then every
/// rewritten file.
pub fn render(result: &ReplacementResult) -> String {
    let mut out = String::new();

    let rows = [
        ("Before", &result.before_name, &result.before),
        ("After", &result.after_name, &result.after),
    ];
    for (label, name, id) in rows {
        let _ = writeln!(
            out,
            "{:<width$} {}  {}",
            label.bold(),
            id.to_string().cyan(),
            name,
            width = LABEL_WIDTH
        );
    }

    let _ = writeln!(
        out,
        "\nRewritten files ({} of {} in {}):",
        result.modified_paths.len(),
        result.scanned,
        result.scope
    );
    if result.modified_paths.is_empty() {
        let _ = writeln!(out, "  {}", "No matching references found".yellow());
    } else {
        for path in &result.modified_paths {
            let _ = writeln!(out, "  {}", path.green());
        }
    }

    out
}

pub fn render_json(result: &ReplacementResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}
