//! Self-contained HTML dashboard
//!
//! The snapshot is serialized into the page template and drawn client-side as
//! inline SVG, so the same document works served live, saved to disk, or
//! printed to a one-page PDF from the browser.

use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::constants::EXPORT_FILE_PREFIX;
use crate::dashboard::DashboardSnapshot;
use crate::types::{Scenario, Stream};

/// Page template with `__SNAPSHOT_JSON__`, `__STREAMS_JSON__`, `__SCENARIO__`,
/// `__SCENARIO_LABEL__` and `__GENERATED_AT__` placeholders.
static TEMPLATE: &str = include_str!("template.html");

#[derive(Serialize)]
struct StreamMeta {
    key: &'static str,
    label: &'static str,
    color: &'static str,
}

/// File name of the exported document for `scenario`.
pub fn export_file_name(scenario: Scenario) -> String {
    format!("{}-{}.html", EXPORT_FILE_PREFIX, scenario)
}

/// Escape `</` and `<!--` so JSON strings cannot close the surrounding
/// `<script>` or switch it into comment parsing. Both escapes stay valid JSON.
fn script_safe(json: String) -> String {
    json.replace("</", r"<\/").replace("<!--", r"\u003c!--")
}

/// Render the dashboard page for `snapshot`.
pub fn render_html(snapshot: &DashboardSnapshot) -> Result<String> {
    let streams: Vec<StreamMeta> = Stream::ALL
        .iter()
        .map(|s| StreamMeta {
            key: s.key(),
            label: s.label(),
            color: s.color(),
        })
        .collect();

    let snapshot_json = script_safe(serde_json::to_string(snapshot)?);
    let streams_json = script_safe(serde_json::to_string(&streams)?);

    // Scalars first so user-provided labels inside the JSON are never rewritten.
    Ok(TEMPLATE
        .replace("__SCENARIO_LABEL__", snapshot.scenario.label())
        .replace("__SCENARIO__", snapshot.scenario.as_str())
        .replace("__GENERATED_AT__", &snapshot.generated_at)
        .replacen("__STREAMS_JSON__", &streams_json, 1)
        .replacen("__SNAPSHOT_JSON__", &snapshot_json, 1))
}

/// Write the rendered page into `output_dir`, returning its path.
pub fn write_html_report(output_dir: &Path, snapshot: &DashboardSnapshot) -> Result<PathBuf> {
    let path = output_dir.join(export_file_name(snapshot.scenario));
    std::fs::write(&path, render_html(snapshot)?)?;
    Ok(path)
}
