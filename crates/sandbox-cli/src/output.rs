//! Terminal output: diffs, validation reports and catalog listings

use colored::*;
use sandbox_core::{
    DropdownOption, MessageTypeOption, ValidationIssue, ValidationVerdict, describe_request,
};
use serde::Serialize;
use similar::{ChangeTag, TextDiff};

/// Line diff between the original and formatted text
pub fn render_diff(original: &str, modified: &str) -> String {
    let diff = TextDiff::from_lines(original, modified);
    let mut output = String::new();

    for (idx, change) in diff.iter_all_changes().enumerate() {
        let line_num = idx + 1;
        let (marker, line) = match change.tag() {
            ChangeTag::Delete => ("- ".red(), change.value().red()),
            ChangeTag::Insert => ("+ ".green(), change.value().green()),
            ChangeTag::Equal => ("  ".normal(), change.value().normal()),
        };
        output.push_str(&format!("{marker}{line_num:>4} │ {line}"));

        if !change.value().ends_with('\n') {
            output.push('\n');
        }
    }

    output
}

/// Print an API request to stderr, ahead of the command output
pub fn print_request<B: Serialize + ?Sized>(url: &str, body: &B) {
    eprintln!("{}", "API Request:".bold());
    eprintln!("{}\n", describe_request(url, body).dimmed());
}

/// Human-readable validation result
pub fn print_verdict(verdict: &ValidationVerdict) {
    match verdict {
        ValidationVerdict::Valid => {
            println!("{} {}", "✓".green(), "Message is valid".green().bold());
        }
        ValidationVerdict::Invalid { issues, summary } => {
            println!("{} {}", "✗".red(), "Validation failed".red().bold());
            if let Some(summary) = summary {
                println!("  {summary}");
            }
            for (idx, issue) in issues.iter().enumerate() {
                print_issue(idx + 1, issue);
            }
            if !issues.is_empty() {
                println!(
                    "\n{}",
                    format!("{} found", utils::plural(issues.len(), "error")).red()
                );
            }
        }
    }
}

fn print_issue(number: usize, issue: &ValidationIssue) {
    println!("\n  {}. {}", number, issue.headline().yellow().bold());
    println!("     {}", issue.message);
    for (label, value) in issue.details() {
        println!("     {}: {}", label.dimmed(), value);
    }
}

pub fn print_message_types(title: &str, types: &[MessageTypeOption]) {
    println!("{} ({})", title.bold(), types.len());
    let width = types.iter().map(|t| t.value.len()).max().unwrap_or(0);
    for message_type in types {
        match message_type.description.as_deref().filter(|d| !d.is_empty()) {
            Some(description) => println!(
                "  {}  {}",
                format!("{:<width$}", message_type.value).cyan(),
                description
            ),
            None => println!("  {}", message_type.value.cyan()),
        }
    }
}

pub fn print_scenarios(title: &str, scenarios: &[DropdownOption]) {
    println!("{} ({})", title.bold(), scenarios.len());
    let width = scenarios.iter().map(|s| s.value.len()).max().unwrap_or(0);
    for scenario in scenarios {
        let source = scenario
            .source
            .as_deref()
            .map(|s| format!("  (source: {s})").dimmed().to_string())
            .unwrap_or_default();
        println!(
            "  {}  {}{}",
            format!("{:<width$}", scenario.value).cyan(),
            scenario.label,
            source
        );
    }
}

/// Utility functions for output formatting
pub mod utils {
    /// Format duration in human-readable format
    pub fn format_duration(duration: std::time::Duration) -> String {
        let total_ms = duration.as_millis();

        if total_ms < 1000 {
            format!("{total_ms}ms")
        } else if total_ms < 60_000 {
            format!("{:.1}s", total_ms as f64 / 1000.0)
        } else {
            let minutes = total_ms / 60_000;
            let seconds = (total_ms % 60_000) as f64 / 1000.0;
            format!("{minutes}m {seconds:.1}s")
        }
    }

    /// `"1 file"`, `"3 files"`
    pub fn plural(count: usize, noun: &str) -> String {
        if count == 1 {
            format!("{count} {noun}")
        } else {
            format!("{count} {noun}s")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_diff_marks_changes() {
        colored::control::set_override(false);
        let diff = render_diff("<a><b/></a>\n", "<a>\n  <b/>\n</a>\n");
        assert!(diff.contains("-    1 │ <a><b/></a>"));
        assert!(diff.contains("+    3 │   <b/>"));
    }

    #[test]
    fn test_plural() {
        assert_eq!(utils::plural(1, "file"), "1 file");
        assert_eq!(utils::plural(0, "error"), "0 errors");
    }

    #[test]
    fn test_format_duration() {
        use std::time::Duration;
        assert_eq!(utils::format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(utils::format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(utils::format_duration(Duration::from_secs(90)), "1m 30.0s");
    }
}
