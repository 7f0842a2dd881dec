//! stock-check - Data-quality checks over a snapshot.
//!
//! Scans a snapshot for referential and master-data problems (unknown item
//! references, menu items sold without recipes, defaulted conversion
//! factors, stock below its thresholds) and reports coded findings. The
//! exit code is non-zero only for error-severity findings, so pipelines can
//! gate on broken inputs while tolerating warnings.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use stockledger_audit::{check_snapshot, Finding, Severity};
use stockledger_loader::load_snapshot;

/// Output format for findings.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// JSON output for tooling integration
    Json,
}

/// JSON output structure for all findings.
#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    findings: &'a [Finding],
    error_count: usize,
    warning_count: usize,
    info_count: usize,
}

/// Check a snapshot file for data-quality problems.
#[derive(Parser, Debug)]
#[command(name = "stock-check")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The snapshot file to check
    #[arg(value_name = "SNAPSHOT")]
    snapshot: PathBuf,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value = "text")]
    format: OutputFormat,

    /// Suppress all output (just use exit code)
    #[arg(short, long)]
    quiet: bool,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Main entry point for the check command.
pub fn main() -> ExitCode {
    let args = Args::parse();
    crate::cmd::init_tracing(args.verbose);

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let snapshot = load_snapshot(&args.snapshot)
        .with_context(|| format!("failed to load {}", args.snapshot.display()))?;

    let findings = check_snapshot(&snapshot);
    tracing::debug!(findings = findings.len(), "checks complete");
    let errors = count_severity(&findings, Severity::Error);
    let warnings = count_severity(&findings, Severity::Warning);
    let infos = count_severity(&findings, Severity::Info);

    if !args.quiet {
        let mut stdout = io::stdout().lock();
        match args.format {
            OutputFormat::Text => {
                report_findings(&findings, &mut stdout)?;
                print_summary(errors, warnings, &mut stdout)?;
            }
            OutputFormat::Json => {
                let output = JsonOutput {
                    findings: &findings,
                    error_count: errors,
                    warning_count: warnings,
                    info_count: infos,
                };
                serde_json::to_writer_pretty(&mut stdout, &output)?;
                writeln!(stdout)?;
            }
        }
    }

    Ok(if errors > 0 {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

fn count_severity(findings: &[Finding], severity: Severity) -> usize {
    findings.iter().filter(|f| f.severity() == severity).count()
}

/// Report findings to the given writer.
fn report_findings<W: Write>(findings: &[Finding], writer: &mut W) -> Result<()> {
    for finding in findings {
        write!(writer, "{}[{}]: {}", finding.severity(), finding.code, finding.message)?;
        if let Some(date) = finding.date {
            write!(writer, " ({date})")?;
        }
        writeln!(writer)?;
    }
    if !findings.is_empty() {
        writeln!(writer)?;
    }
    Ok(())
}

/// Print a summary of errors and warnings.
fn print_summary<W: Write>(errors: usize, warnings: usize, writer: &mut W) -> Result<()> {
    if errors == 0 && warnings == 0 {
        writeln!(writer, "\u{2713} No problems found")?;
    } else {
        let error_text = if errors == 1 { "error" } else { "errors" };
        let warning_text = if warnings == 1 { "warning" } else { "warnings" };

        if errors > 0 && warnings > 0 {
            writeln!(writer, "\u{2717} {errors} {error_text}, {warnings} {warning_text}")?;
        } else if errors > 0 {
            writeln!(writer, "\u{2717} {errors} {error_text}")?;
        } else {
            writeln!(writer, "\u{26A0} {warnings} {warning_text}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockledger_audit::FindingCode;

    #[test]
    fn summary_pluralizes() {
        let mut out = Vec::new();
        print_summary(0, 1, &mut out).unwrap();
        print_summary(2, 0, &mut out).unwrap();
        print_summary(0, 0, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("1 warning\n"));
        assert!(text.contains("2 errors\n"));
        assert!(text.contains("No problems found"));
    }

    #[test]
    fn findings_render_with_code_and_severity() {
        let findings = vec![Finding::new(
            FindingCode::MissingRecipe,
            "menu item 'x' is sold but has no recipe; its sales consume nothing",
        )];

        let mut out = Vec::new();
        report_findings(&findings, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("warning[R1002]:"));
    }
}
