//! stock-report - Generate cost-control reports from a snapshot.
//!
//! # Usage
//!
//! ```bash
//! stock-report snapshot.json ledger --from 2024-03-01 --to 2024-03-31
//! stock-report snapshot.json abc --from 2024-03-01 --to 2024-03-31
//! stock-report snapshot.json velocity --from 2024-03-01 --to 2024-03-31 --location branch-1
//! stock-report snapshot.json audit --from 2024-03-01 --to 2024-03-31
//! stock-report snapshot.json stats
//! ```
//!
//! # Reports
//!
//! - `ledger` - Period reconciliation per item with category subtotals
//! - `abc` - ABC/Pareto classification by consumption value
//! - `velocity` - Turnover, days of inventory, and velocity classes
//! - `audit` - Variance summary and discrepancy listing
//! - `stats` - Snapshot statistics

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use stockledger_analytics::{classify_abc, classify_velocity};
use stockledger_audit::{discrepancies, summarize};
use stockledger_core::{LocationFilter, PeriodWindow, Snapshot};
use stockledger_engine::{reconcile, LedgerReport};
use stockledger_loader::load_snapshot;

use crate::table;

/// Generate cost-control reports from a snapshot file.
#[derive(Parser, Debug)]
#[command(name = "stock-report")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The snapshot file to report over
    #[arg(value_name = "SNAPSHOT")]
    snapshot: PathBuf,

    /// The report to generate
    #[command(subcommand)]
    report: Report,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Shared period/location selection for the period-scoped reports.
#[derive(clap::Args, Debug)]
struct Scope {
    /// First day of the period (inclusive, YYYY-MM-DD)
    #[arg(long)]
    from: NaiveDate,

    /// Last day of the period (inclusive, YYYY-MM-DD)
    #[arg(long)]
    to: NaiveDate,

    /// Location id, or "all"
    #[arg(long, default_value = "all")]
    location: LocationFilter,
}

#[derive(Subcommand, Debug)]
enum Report {
    /// Period reconciliation ledger with category subtotals
    Ledger {
        #[command(flatten)]
        scope: Scope,

        /// Restrict to one category
        #[arg(long)]
        category: Option<String>,
    },
    /// ABC/Pareto classification by consumption value
    Abc {
        #[command(flatten)]
        scope: Scope,
    },
    /// Velocity, turnover, and days-of-inventory classification
    Velocity {
        #[command(flatten)]
        scope: Scope,
    },
    /// Variance summary and discrepancy listing
    Audit {
        #[command(flatten)]
        scope: Scope,
    },
    /// Snapshot statistics
    Stats,
}

/// Main entry point for the report command.
pub fn main() -> ExitCode {
    let args = Args::parse();
    crate::cmd::init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let mut stdout = io::stdout().lock();

    let snapshot = load_snapshot(&args.snapshot)
        .with_context(|| format!("failed to load {}", args.snapshot.display()))?;
    tracing::debug!(
        items = snapshot.items.len(),
        records = snapshot.record_count(),
        "snapshot loaded"
    );

    match &args.report {
        Report::Ledger { scope, category } => {
            let report = reconcile_scope(&snapshot, scope, category.as_deref())?;
            report_ledger(&report, &mut stdout)?;
        }
        Report::Abc { scope } => {
            let report = reconcile_scope(&snapshot, scope, None)?;
            report_abc(&report, &mut stdout)?;
        }
        Report::Velocity { scope } => {
            let report = reconcile_scope(&snapshot, scope, None)?;
            report_velocity(&report, &snapshot, &mut stdout)?;
        }
        Report::Audit { scope } => {
            let report = reconcile_scope(&snapshot, scope, None)?;
            report_audit(&report, &mut stdout)?;
        }
        Report::Stats => {
            report_stats(&snapshot, &args.snapshot, &mut stdout)?;
        }
    }

    Ok(())
}

/// Run the reconciliation for a CLI scope.
fn reconcile_scope(
    snapshot: &Snapshot,
    scope: &Scope,
    category: Option<&str>,
) -> Result<LedgerReport> {
    let period = PeriodWindow::new(scope.from, scope.to).context("invalid period")?;
    Ok(reconcile(snapshot, period, &scope.location, category))
}

/// Render the period ledger with category subtotals and a grand total.
fn report_ledger<W: Write>(report: &LedgerReport, writer: &mut W) -> Result<()> {
    writeln!(
        writer,
        "Inventory Ledger  {}  location: {}",
        report.period, report.location
    )?;
    writeln!(writer, "{}", table::rule(110))?;
    writeln!(
        writer,
        "{:<24} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "Item", "Opening", "Received", "Consumed", "Book", "Physical", "Variance"
    )?;
    writeln!(writer)?;

    let mut current_category: Option<&str> = None;
    for row in &report.rows {
        if current_category != Some(row.category.as_str()) {
            if current_category.is_some() {
                writeln!(writer)?;
            }
            writeln!(writer, "{}:", row.category)?;
            current_category = Some(row.category.as_str());
        }
        writeln!(
            writer,
            "  {:<22} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
            table::clip(&row.name, 22),
            table::qty(row.opening_qty),
            table::qty(row.receiving_qty),
            table::qty(row.consumption_qty),
            table::qty(row.closing_book_qty),
            table::qty(row.physical_qty),
            table::qty(row.variance_qty),
        )?;
    }

    writeln!(writer)?;
    for subtotal in &report.category_totals {
        writeln!(
            writer,
            "{:<24} {:>25} {:>25} {:>25}",
            table::clip(&subtotal.category, 24),
            table::value(subtotal.totals.consumption_value),
            table::value(subtotal.totals.closing_book_value),
            table::value(subtotal.totals.variance_value),
        )?;
    }
    writeln!(writer, "{}", table::rule(110))?;
    writeln!(
        writer,
        "{:<24} {:>25} {:>25} {:>25}",
        "Total (value)",
        table::value(report.grand_total.consumption_value),
        table::value(report.grand_total.closing_book_value),
        table::value(report.grand_total.variance_value),
    )?;

    Ok(())
}

/// Render the ABC classification.
fn report_abc<W: Write>(report: &LedgerReport, writer: &mut W) -> Result<()> {
    let classified = classify_abc(&report.rows);

    writeln!(
        writer,
        "ABC Classification  {}  location: {}",
        report.period, report.location
    )?;
    writeln!(writer, "{}", table::rule(80))?;
    writeln!(
        writer,
        "{:<24} {:>14} {:>14} {:>12} {:>6}",
        "Item", "Consumed", "Usage Value", "Cum. %", "Class"
    )?;
    writeln!(writer)?;

    for row in &classified {
        writeln!(
            writer,
            "{:<24} {:>14} {:>14} {:>12} {:>6}",
            table::clip(&row.name, 24),
            table::qty(row.consumption_qty),
            table::value(row.usage_value),
            table::qty(row.cumulative_share),
            row.class,
        )?;
    }

    Ok(())
}

/// Render the velocity classification.
fn report_velocity<W: Write>(
    report: &LedgerReport,
    snapshot: &Snapshot,
    writer: &mut W,
) -> Result<()> {
    let classified = classify_velocity(&report.rows, &snapshot.items, report.period.day_count());

    writeln!(
        writer,
        "Velocity  {}  location: {}",
        report.period, report.location
    )?;
    writeln!(writer, "{}", table::rule(96))?;
    writeln!(
        writer,
        "{:<24} {:>12} {:>12} {:>12} {:>12} {:>8}",
        "Item", "Consumed", "On Hand", "Turnover", "DOI", "Class"
    )?;
    writeln!(writer)?;

    for row in &classified {
        writeln!(
            writer,
            "{:<24} {:>12} {:>12} {:>12} {:>12} {:>8}",
            table::clip(&row.name, 24),
            table::qty(row.consumption_qty),
            table::qty(row.current_stock),
            table::qty(row.turnover_ratio),
            table::qty(row.days_of_inventory),
            row.velocity,
        )?;
    }

    Ok(())
}

/// Render the variance audit summary.
fn report_audit<W: Write>(report: &LedgerReport, writer: &mut W) -> Result<()> {
    let summary = summarize(report);

    writeln!(
        writer,
        "Variance Audit  {}  location: {}",
        report.period, report.location
    )?;
    writeln!(writer, "{}", table::rule(72))?;
    writeln!(writer)?;
    writeln!(writer, "Items audited:        {:>10}", summary.item_count)?;
    writeln!(writer, "Discrepancies:        {:>10}", summary.discrepancy_count)?;
    writeln!(
        writer,
        "Total variance value: {:>10}",
        table::value(summary.total_variance_value)
    )?;
    writeln!(
        writer,
        "Consumption value:    {:>10}",
        table::value(summary.grand_total.consumption_value)
    )?;
    writeln!(writer)?;

    let flagged = discrepancies(report);
    if flagged.is_empty() {
        writeln!(writer, "No discrepancies above the counting tolerance.")?;
    } else {
        writeln!(
            writer,
            "{:<24} {:>12} {:>12} {:>12} {:>14}",
            "Item", "Book", "Physical", "Variance", "Value"
        )?;
        for row in flagged {
            writeln!(
                writer,
                "{:<24} {:>12} {:>12} {:>12} {:>14}",
                table::clip(&row.name, 24),
                table::qty(row.closing_book_qty),
                table::qty(row.physical_qty),
                table::qty(row.variance_qty),
                table::value(row.variance_value),
            )?;
        }
    }

    Ok(())
}

/// Record tallies for the stats report.
#[derive(Default)]
struct SnapshotStats {
    posted: usize,
    drafts: usize,
    by_kind: std::collections::BTreeMap<&'static str, usize>,
    first_date: Option<NaiveDate>,
    last_date: Option<NaiveDate>,
}

/// Render snapshot statistics.
fn report_stats<W: Write>(snapshot: &Snapshot, path: &Path, writer: &mut W) -> Result<()> {
    let mut stats = SnapshotStats::default();
    for record in snapshot.records() {
        if record.is_posted() {
            stats.posted += 1;
        } else {
            stats.drafts += 1;
        }
        *stats.by_kind.entry(record.type_name()).or_default() += 1;
        let date = record.date();
        if stats.first_date.is_none() || Some(date) < stats.first_date {
            stats.first_date = Some(date);
        }
        if stats.last_date.is_none() || Some(date) > stats.last_date {
            stats.last_date = Some(date);
        }
    }

    writeln!(writer, "Snapshot Statistics")?;
    writeln!(writer, "{}", table::rule(40))?;
    writeln!(writer)?;
    writeln!(writer, "File: {}", path.display())?;
    writeln!(writer)?;
    writeln!(writer, "Date Range:")?;
    if let (Some(first), Some(last)) = (stats.first_date, stats.last_date) {
        writeln!(writer, "  First: {first}")?;
        writeln!(writer, "  Last:  {last}")?;
    } else {
        writeln!(writer, "  (no records)")?;
    }
    writeln!(writer)?;
    writeln!(writer, "Master data:")?;
    writeln!(writer, "  Stock items:        {:>6}", snapshot.items.len())?;
    writeln!(
        writer,
        "  Active items:       {:>6}",
        snapshot.active_items().count()
    )?;
    writeln!(writer, "  Recipes:            {:>6}", snapshot.recipes.len())?;
    writeln!(writer, "  Branches:           {:>6}", snapshot.branches.len())?;
    writeln!(writer, "  Warehouses:         {:>6}", snapshot.warehouses.len())?;
    writeln!(writer)?;
    writeln!(writer, "Records:")?;
    for (kind, count) in &stats.by_kind {
        writeln!(writer, "  {:<18} {:>6}", format!("{kind}:"), count)?;
    }
    writeln!(writer)?;
    writeln!(
        writer,
        "Total records:        {:>6}  ({} posted, {} draft)",
        snapshot.record_count(),
        stats.posted,
        stats.drafts
    )?;

    Ok(())
}
