//! CLI presentation: text tables and JSON documents for command output.

use crate::error::ApiError;
use crate::intercept::InstallReport;
use crate::tree::walker::Entry;
use crate::types::{NodeId, ResultCode};
use comfy_table::Table;
use serde::Serialize;
use serde_json::json;

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::ConfigError(format!("Failed to serialize output: {}", e)))
}

fn entry_label(entry: &Entry) -> String {
    if entry.detached {
        entry.path.join(" ")
    } else {
        format!("/{}", entry.path.join(" "))
    }
}

fn entry_kind(entry: &Entry) -> String {
    match (entry.shadow_of, entry.executable) {
        (Some(handle), _) => format!("shadow -> {}", handle),
        (None, true) => "command".to_string(),
        (None, false) => "group".to_string(),
    }
}

/// Tree listing as a table.
pub fn format_tree_text(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return "Command tree is empty.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Node", "Path", "Kind", "Variants"]);
    for entry in entries {
        let variants = if entry.variants.is_empty() {
            "-".to_string()
        } else {
            entry
                .variants
                .iter()
                .map(|(kind, id)| format!("{}={}", kind, id))
                .collect::<Vec<_>>()
                .join(", ")
        };
        table.add_row(vec![
            entry.id.to_string(),
            entry_label(entry),
            entry_kind(entry),
            variants,
        ]);
    }
    table.to_string()
}

/// Tree listing as JSON.
pub fn format_tree_json(entries: &[Entry]) -> Result<String, ApiError> {
    let nodes: Vec<serde_json::Value> = entries
        .iter()
        .map(|e| {
            let variants: serde_json::Map<String, serde_json::Value> = e
                .variants
                .iter()
                .map(|(kind, id)| (kind.as_str().to_string(), json!(id.0)))
                .collect();
            json!({
                "id": e.id.0,
                "path": e.path,
                "executable": e.executable,
                "shadow_of": e.shadow_of.map(|id| id.0),
                "detached": e.detached,
                "variants": variants,
            })
        })
        .collect();
    to_json(&json!({ "nodes": nodes }))
}

/// Result of `check`: every target resolved.
pub fn format_check_text(targets: &[String]) -> String {
    let mut out = format!("{} target(s) resolve to executable commands:\n", targets.len());
    for target in targets {
        out.push_str(&format!("  {}\n", target));
    }
    out.trim_end().to_string()
}

/// What `run` installed and what the dispatched command did.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub input: String,
    pub sender: String,
    pub mode: Option<String>,
    pub policy: Option<String>,
    pub targets: Vec<TargetSummary>,
    pub result: ResultCode,
    pub output: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TargetSummary {
    pub path: String,
    pub node: usize,
    pub nodes_written: usize,
    pub already_intercepted: bool,
}

impl RunSummary {
    pub fn targets_from(report: &InstallReport<NodeId>) -> Vec<TargetSummary> {
        report
            .targets
            .iter()
            .map(|t| TargetSummary {
                path: t.path.to_string(),
                node: t.node.0,
                nodes_written: t.written.len(),
                already_intercepted: t.already_intercepted,
            })
            .collect()
    }
}

pub fn format_run_text(summary: &RunSummary) -> String {
    let mut out = String::new();
    if let (Some(mode), Some(policy)) = (&summary.mode, &summary.policy) {
        out.push_str(&format!(
            "Intercepted {} target(s) ({} install, {} policy)\n",
            summary.targets.len(),
            mode,
            policy
        ));
        for t in &summary.targets {
            if t.already_intercepted {
                out.push_str(&format!("  {} -> #{} (already intercepted)\n", t.path, t.node));
            } else {
                out.push_str(&format!(
                    "  {} -> #{} ({} node(s) written)\n",
                    t.path, t.node, t.nodes_written
                ));
            }
        }
    }
    for line in &summary.output {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(&format!("Result: {}", summary.result));
    out
}

pub fn format_run_json(summary: &RunSummary) -> Result<String, ApiError> {
    to_json(summary)
}
