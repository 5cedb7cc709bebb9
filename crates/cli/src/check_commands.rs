//! `zincsaver check`: validate the loaded configuration.

use {
    anyhow::Result,
    zincsaver_config::{Severity, ValidationResult, ZincConfig, validate},
};

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

pub fn handle_check(config: &ZincConfig) -> Result<()> {
    let report = validate(config);
    println!("{}", render(&report));

    if report.has_errors() {
        anyhow::bail!(
            "configuration has {} error(s)",
            report.count(Severity::Error)
        );
    }
    Ok(())
}

fn render(report: &ValidationResult) -> String {
    if report.diagnostics.is_empty() {
        return format!("{GREEN}ok{RESET} configuration is valid");
    }

    let mut lines: Vec<String> = report
        .diagnostics
        .iter()
        .map(|d| {
            let color = match d.severity {
                Severity::Error => RED,
                Severity::Warning => YELLOW,
            };
            format!("{color}{}{RESET} [{}] {}", d.severity, d.path, d.message)
        })
        .collect();
    lines.push(format!(
        "{} error(s), {} warning(s)",
        report.count(Severity::Error),
        report.count(Severity::Warning)
    ));
    lines.join("\n")
}
