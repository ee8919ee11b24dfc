//! @ai:module:intent Format output for different formats (JSON, text)
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, format_group, format_report, format_rules, to_json
//! @ai:module:depends_on property, batch, registry
//! @ai:module:stateless true

use crate::batch::BatchReport;
use crate::property::PropertyGroup;
use crate::registry::{RuleInfo, RuleOrigin};
use crate::rule::PropertyRule;
use colored::Colorize;
use serde::Serialize;

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

/// @ai:intent Format a property group as a string
/// @ai:effects pure
pub fn format_group(group: &PropertyGroup, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(group, false),
        OutputFormat::JsonPretty => to_json(group, true),
        OutputFormat::Text => format_group_text(group),
    }
}

fn format_group_text(group: &PropertyGroup) -> String {
    let mut output = String::new();

    if group.is_empty() {
        output.push_str(&format!("{}\n", "(no properties)".dimmed()));
        return output;
    }

    for (index, prop) in group.simple_properties.iter().enumerate() {
        output.push_str(&format!(
            "  [{}] {} {}\n",
            index,
            prop.name.cyan(),
            format!("rule: {}", prop.rule.name()).dimmed()
        ));
    }

    for (index, prop) in group.complex_properties.iter().enumerate() {
        output.push_str(&format!(
            "  [{}] {}({}) {}\n",
            index,
            prop.name.cyan(),
            prop.sub_properties.join(", "),
            format!("rule: {}", prop.rule.name()).dimmed()
        ));
    }

    output
}

/// @ai:intent Format a batch report as a string
/// @ai:effects pure
pub fn format_report(report: &BatchReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(report, false),
        OutputFormat::JsonPretty => to_json(report, true),
        OutputFormat::Text => format_report_text(report),
    }
}

fn format_report_text(report: &BatchReport) -> String {
    let mut output = String::new();

    for entity in &report.entities {
        let kind = entity.kind.map(|k| k.name()).unwrap_or("?");

        match &entity.properties {
            Some(group) => {
                output.push_str(&format!(
                    "{} {} ({}) {}\n",
                    "OK".green().bold(),
                    entity.name.cyan(),
                    kind,
                    group.to_string().dimmed()
                ));
            }
            None => {
                output.push_str(&format!(
                    "{} {} ({}) - {} ({})\n",
                    "ERROR".red().bold(),
                    entity.name.cyan(),
                    kind,
                    entity.error.as_deref().unwrap_or_default(),
                    entity.error_kind.as_str().dimmed()
                ));
                output.push_str(&format!("  {} {}\n", "annotation:".dimmed(), entity.annotation));
            }
        }
    }

    output.push('\n');
    if report.failed > 0 {
        output.push_str(&format!(
            "{} entities, {} failed\n",
            report.entities.len(),
            report.failed.to_string().red().bold()
        ));
    } else {
        output.push_str(&format!(
            "{} {} entities parsed\n",
            "OK".green().bold(),
            report.passed
        ));
    }

    output
}

/// @ai:intent Format the rule listing as a string
/// @ai:effects pure
pub fn format_rules(rules: &[RuleInfo], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(rules, false),
        OutputFormat::JsonPretty => to_json(rules, true),
        OutputFormat::Text => {
            let mut output = String::new();
            for rule in rules {
                let origin = match rule.origin {
                    RuleOrigin::Native => "native".yellow(),
                    RuleOrigin::User => "user".normal(),
                };
                let kind = if rule.complex { "complex" } else { "simple" };

                output.push_str(&format!("{} [{}, {}]", rule.name.cyan(), origin, kind));
                if !rule.description.is_empty() {
                    output.push_str(&format!(" - {}", rule.description));
                }
                output.push('\n');
            }
            output
        }
    }
}

/// @ai:intent Format any serializable value as JSON
/// @ai:effects pure
pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(value).unwrap_or_default()
    } else {
        serde_json::to_string(value).unwrap_or_default()
    }
}
