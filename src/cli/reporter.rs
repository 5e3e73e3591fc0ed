use colored::Colorize;
use serde::Serialize;

use crate::cli::args::OutputFormat;
use crate::cli::driver::RelationOutcome;

pub struct Reporter {
    format: OutputFormat,
    color: bool,
}

#[derive(Serialize)]
struct OutcomeReport<'a> {
    relation: String,
    subject: &'a str,
    target: &'a str,
    holds: bool,
}

#[derive(Serialize)]
struct ErrorReport {
    error: String,
}

impl Reporter {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Reporter { format, color }
    }

    /// Render a result, newline-terminated.
    pub fn render(&self, outcome: &RelationOutcome) -> String {
        match self.format {
            OutputFormat::Text => {
                let verdict = if outcome.holds { "true" } else { "false" };
                if !self.color {
                    return format!("{verdict}\n");
                }
                let verdict = if outcome.holds {
                    verdict.green().bold()
                } else {
                    verdict.red().bold()
                };
                format!("{verdict}\n")
            }
            OutputFormat::Json => {
                let report = OutcomeReport {
                    relation: outcome.relation.to_string(),
                    subject: &outcome.subject,
                    target: &outcome.target,
                    holds: outcome.holds,
                };
                to_json_line(&report)
            }
        }
    }

    /// Render an error with its context chain, newline-terminated.
    pub fn render_error(&self, error: &anyhow::Error) -> String {
        let message = format!("{error:#}");
        match self.format {
            OutputFormat::Text => {
                let label = if self.color {
                    "error".red().bold().to_string()
                } else {
                    "error".to_owned()
                };
                format!("{label}: {message}\n")
            }
            OutputFormat::Json => to_json_line(&ErrorReport { error: message }),
        }
    }
}

fn to_json_line<T: Serialize>(report: &T) -> String {
    match serde_json::to_string(report) {
        Ok(mut line) => {
            line.push('\n');
            line
        }
        Err(err) => format!("{{\"error\":\"failed to serialize report: {err}\"}}\n"),
    }
}
