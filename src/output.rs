//! @ai:module:intent Format reports and extracted references as text or JSON
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, format_report, format_references, format_canonical_names, to_json
//! @ai:module:depends_on reconcile, directive
//! @ai:module:stateless true

use crate::directive::RawReference;
use crate::entry::CanonicalApi;
use crate::reconcile::{Report, Summary};
use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

#[derive(Serialize)]
struct ReportDocument<'a> {
    summary: Summary,
    #[serde(flatten)]
    report: &'a Report,
}

#[derive(Serialize)]
struct ReferencesDocument<'a> {
    path: &'a Path,
    references: &'a [RawReference],
}

#[derive(Serialize)]
struct CanonicalName<'a> {
    name: &'a str,
    canonical: &'a str,
}

/// @ai:intent Format any serializable value as JSON
/// @ai:effects pure
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(value).unwrap_or_default()
    } else {
        serde_json::to_string(value).unwrap_or_default()
    }
}

/// @ai:intent Format a reconciliation report as a string
/// @ai:effects pure
pub fn format_report(report: &Report, format: OutputFormat) -> String {
    let document = ReportDocument {
        summary: report.summary(),
        report,
    };

    match format {
        OutputFormat::Json => to_json(&document, false),
        OutputFormat::JsonPretty => to_json(&document, true),
        OutputFormat::Text => format_report_text(report),
    }
}

/// @ai:intent Render one report section: a header and the sorted identities, indented
/// @ai:effects pure
fn push_section(output: &mut String, header: impl std::fmt::Display, apis: &BTreeSet<CanonicalApi>) {
    output.push_str(&format!("{}\n", header));
    for api in apis {
        output.push_str(&format!("  {}\n", api));
    }
    output.push('\n');
}

/// @ai:intent Format a report as human-readable text
/// @ai:effects pure
fn format_report_text(report: &Report) -> String {
    let mut output = String::new();

    push_section(&mut output, "Good APIs:".green().bold(), &report.good);
    push_section(
        &mut output,
        "Private but documented APIs:".red().bold(),
        &report.private_documented,
    );
    push_section(
        &mut output,
        "Deprecated but documented APIs:".yellow().bold(),
        &report.deprecated_documented,
    );
    push_section(
        &mut output,
        "Undocumented Public APIs:".red().bold(),
        &report.undocumented_public,
    );
    push_section(
        &mut output,
        "Undocumented Deprecated Public APIs:".yellow().bold(),
        &report.undocumented_deprecated_public,
    );
    push_section(
        &mut output,
        "Public APIs with private names:".yellow().bold(),
        &report.public_but_private_name,
    );

    let summary = report.summary();
    if report.has_drift() {
        output.push_str(&format!(
            "{} good, {} undocumented public, {} private documented, {} deprecated documented, {} undocumented deprecated, {} private names\n",
            summary.good.to_string().green(),
            summary.undocumented_public.to_string().red().bold(),
            summary.private_documented.to_string().red(),
            summary.deprecated_documented.to_string().yellow(),
            summary.undocumented_deprecated_public.to_string().yellow(),
            summary.public_but_private_name.to_string().yellow(),
        ));
    } else {
        output.push_str(&format!(
            "{} {} APIs documented, no drift found\n",
            "OK".green().bold(),
            summary.good
        ));
    }

    output
}

/// @ai:intent Format the references extracted from one document
/// @ai:effects pure
pub fn format_references(path: &Path, references: &[RawReference], format: OutputFormat) -> String {
    let document = ReferencesDocument { path, references };

    match format {
        OutputFormat::Json => to_json(&document, false),
        OutputFormat::JsonPretty => to_json(&document, true),
        OutputFormat::Text => {
            let mut output = format!(
                "{} ({} references)\n",
                path.display().to_string().bold(),
                references.len()
            );
            for reference in references {
                output.push_str(&format!(
                    "  {:>5}  {:<8} {}\n",
                    reference.line.to_string().dimmed(),
                    reference.entry.kind().to_string(),
                    reference.entry.name().cyan()
                ));
            }
            output
        }
    }
}

/// @ai:intent Format raw names next to their canonical identities
/// @ai:effects pure
pub fn format_canonical_names(pairs: &[(String, String)], format: OutputFormat) -> String {
    let rows: Vec<CanonicalName<'_>> = pairs
        .iter()
        .map(|(name, canonical)| CanonicalName { name, canonical })
        .collect();

    match format {
        OutputFormat::Json => to_json(&rows, false),
        OutputFormat::JsonPretty => to_json(&rows, true),
        OutputFormat::Text => rows
            .iter()
            .map(|row| {
                if row.name == row.canonical {
                    format!("{} {}\n", row.name, "(unresolved)".dimmed())
                } else {
                    format!("{} -> {}\n", row.name, row.canonical.cyan())
                }
            })
            .collect(),
    }
}
