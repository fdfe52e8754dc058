//! Report writing.
//!
//! A report is a directory of CSV tabs, the same tabs as one workbook, and a
//! JSON run summary:
//!
//! | File | Content |
//! |------|---------|
//! | `trade_level.csv` | One row per priced trade, native and USD figures |
//! | `portfolio_summary.csv` | Grand totals |
//! | `risk_by_<selectors>.csv` | One tab per configured grouping |
//! | `rejected_trades.csv` | One row per rejected record, with its raw columns |
//! | `fxrisk_report.xlsx` | Every tab above as a worksheet |
//! | `run_summary.json` | Counts, totals, implied rates |
//!
//! Every tab is written with its header even when it has no rows.

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use csv::Writer;
use pricer_core::conventions::REPORTING_CURRENCY;
use pricer_core::types::Currency;
use pricer_models::validation::RawValue;
use pricer_pricing::DegeneratePolicy;
use pricer_risk::aggregation::{PortfolioSummary, ALL_GROUP};
use pricer_risk::pipeline::PortfolioRun;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;

/// Trade-level tab.
pub const TRADE_LEVEL_FILE: &str = "trade_level.csv";
/// Grand totals tab.
pub const PORTFOLIO_SUMMARY_FILE: &str = "portfolio_summary.csv";
/// Rejections tab.
pub const REJECTED_TRADES_FILE: &str = "rejected_trades.csv";
/// Workbook holding every tab.
pub const REPORT_WORKBOOK_FILE: &str = "fxrisk_report.xlsx";
/// Run summary document.
pub const RUN_SUMMARY_FILE: &str = "run_summary.json";

/// Excel's limit on worksheet names.
const SHEET_NAME_LIMIT: usize = 31;

const TRADE_LEVEL_HEADER: [&str; 13] = [
    "trade_id",
    "currency_pair",
    "option_type",
    "notional",
    "notional_currency",
    "pv_currency",
    "pv",
    "delta",
    "vega",
    "pv_usd",
    "delta_usd",
    "vega_usd",
    "status",
];

const REJECTED_HEADER: [&str; 5] = ["trade_id", "row_index", "rule", "code", "reason"];

/// File name of the tab for a grouping.
pub fn grouping_file_name(summary: &PortfolioSummary) -> String {
    format!("risk_by_{}.csv", summary.name())
}

/// A single report cell.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(v) => write!(f, "{}", v),
        }
    }
}

impl From<&RawValue> for Cell {
    fn from(value: &RawValue) -> Self {
        match value {
            RawValue::Number(v) => Cell::Number(*v),
            other => Cell::Text(other.to_string()),
        }
    }
}

/// A header row and its data rows, written as a CSV file or a worksheet.
#[derive(Debug, Clone, PartialEq)]
struct Tab {
    header: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Tab {
    fn new<'a>(header: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            header: header.into_iter().map(str::to_string).collect(),
            rows: Vec::new(),
        }
    }

    fn write_csv<W: io::Write>(&self, out: W) -> Result<()> {
        let mut wtr = Writer::from_writer(out);
        wtr.write_record(&self.header)?;
        for row in &self.rows {
            wtr.write_record(row.iter().map(Cell::to_string))?;
        }
        wtr.flush()?;
        Ok(())
    }

    fn write_sheet(&self, sheet: &mut Worksheet) -> std::result::Result<(), XlsxError> {
        let bold = Format::new().set_bold();
        for (col, name) in self.header.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, name.as_str(), &bold)?;
        }
        for (row, cells) in self.rows.iter().enumerate() {
            let row = row as u32 + 1;
            for (col, cell) in cells.iter().enumerate() {
                let col = col as u16;
                match cell {
                    Cell::Number(v) if v.is_finite() => sheet.write_number(row, col, *v)?,
                    other => sheet.write_string(row, col, other.to_string().as_str())?,
                };
            }
        }
        Ok(())
    }
}

fn trade_level_tab(run: &PortfolioRun) -> Tab {
    let mut tab = Tab::new(TRADE_LEVEL_HEADER);
    for normalized in &run.trades {
        let priced = normalized.priced();
        let trade = priced.trade();
        let status = if priced.is_zero_risk() { "zero_risk" } else { "success" };
        tab.rows.push(vec![
            Cell::text(trade.trade_id()),
            Cell::text(trade.currency_pair().code()),
            Cell::text(trade.option_type().to_string()),
            Cell::Number(trade.notional()),
            Cell::text(trade.notional_currency().to_string()),
            Cell::text(priced.pv_currency().to_string()),
            Cell::Number(priced.pv()),
            Cell::Number(priced.delta()),
            Cell::Number(priced.vega()),
            Cell::Number(normalized.pv_usd()),
            Cell::Number(normalized.delta_usd()),
            Cell::Number(normalized.vega_usd()),
            Cell::text(status),
        ]);
    }
    tab
}

fn portfolio_summary_tab(run: &PortfolioRun) -> Tab {
    let mut tab = Tab::new(["metric", "value"]);
    for (metric, value) in [
        ("total_pv_usd", run.total.pv_usd),
        ("total_delta_usd", run.total.delta_usd),
        ("total_vega_usd", run.total.vega_usd),
        ("valid_trades", run.valid_count() as f64),
        ("rejected_trades", run.rejected_count() as f64),
    ] {
        tab.rows.push(vec![Cell::text(metric), Cell::Number(value)]);
    }
    tab
}

fn grouping_tab(summary: &PortfolioSummary) -> Tab {
    let mut header: Vec<&str> = summary.selectors().iter().map(|k| k.as_str()).collect();
    if header.is_empty() {
        header.push("group");
    }
    header.extend(["pv_usd", "delta_usd", "vega_usd", "trade_count"]);
    let mut tab = Tab::new(header);

    for group in summary.groups() {
        let mut row: Vec<Cell> = group.key.iter().map(|k| Cell::text(k.as_str())).collect();
        row.extend([
            Cell::Number(group.totals.pv_usd),
            Cell::Number(group.totals.delta_usd),
            Cell::Number(group.totals.vega_usd),
            Cell::Number(group.totals.trade_count as f64),
        ]);
        tab.rows.push(row);
    }
    tab
}

/// Fixed columns, then every raw column in the order first seen across the
/// rejected records.
fn rejected_tab(run: &PortfolioRun) -> Tab {
    let mut raw_columns: Vec<&str> = Vec::new();
    for entry in &run.rejected {
        for (name, _) in entry.record.fields() {
            if !raw_columns.contains(&name) {
                raw_columns.push(name);
            }
        }
    }

    let mut tab = Tab::new(REJECTED_HEADER.into_iter().chain(raw_columns.iter().copied()));
    for entry in &run.rejected {
        let mut row = vec![
            Cell::text(entry.trade_id.as_str()),
            Cell::Number(entry.row_index as f64),
            Cell::text(entry.reason.rule().map_or("", |r| r.as_str())),
            Cell::text(entry.reason.code().as_str()),
            Cell::text(entry.reason.detail()),
        ];
        row.extend(raw_columns.iter().map(|column| {
            entry
                .record
                .fields()
                .find(|(name, _)| name == column)
                .map_or(Cell::Text(String::new()), |(_, value)| Cell::from(value))
        }));
        tab.rows.push(row);
    }
    tab
}

/// Worksheet name for a grouping, unique within `taken`.
fn grouping_sheet_name(summary: &PortfolioSummary, index: usize, taken: &[String]) -> String {
    let name: String = format!("Risk by {}", summary.name())
        .chars()
        .take(SHEET_NAME_LIMIT)
        .collect();
    if taken.contains(&name) {
        format!("Risk {}", index + 1)
    } else {
        name
    }
}

/// Implied FX rate entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpliedRate {
    /// Currency.
    pub currency: Currency,
    /// USD per unit.
    pub rate_to_usd: f64,
}

/// Machine-readable summary of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Reporting currency of every aggregate.
    pub reporting_currency: Currency,
    /// Records read.
    pub input_count: usize,
    /// Trades priced and aggregated.
    pub valid_count: usize,
    /// Records rejected.
    pub rejected_count: usize,
    /// Rejection counts per code.
    pub rejections_by_code: BTreeMap<String, usize>,
    /// Total PV in USD.
    pub total_pv_usd: f64,
    /// Total Delta in USD.
    pub total_delta_usd: f64,
    /// Total Vega in USD.
    pub total_vega_usd: f64,
    /// Degenerate input policy in force.
    pub degenerate_policy: DegeneratePolicy,
    /// Rates implied from trade spots.
    pub implied_rates: Vec<ImpliedRate>,
}

impl RunSummary {
    /// Summarises a run.
    pub fn from_run(run: &PortfolioRun, policy: DegeneratePolicy) -> Self {
        let mut rejections_by_code = BTreeMap::new();
        for entry in &run.rejected {
            *rejections_by_code
                .entry(entry.reason.code().as_str().to_string())
                .or_insert(0) += 1;
        }

        Self {
            reporting_currency: REPORTING_CURRENCY,
            input_count: run.input_count,
            valid_count: run.valid_count(),
            rejected_count: run.rejected_count(),
            rejections_by_code,
            total_pv_usd: run.total.pv_usd,
            total_delta_usd: run.total.delta_usd,
            total_vega_usd: run.total.vega_usd,
            degenerate_policy: policy,
            implied_rates: run
                .implied_rates
                .iter()
                .map(|&(currency, rate_to_usd)| ImpliedRate {
                    currency,
                    rate_to_usd,
                })
                .collect(),
        }
    }
}

/// Writes the trade-level tab.
pub fn write_trade_level<W: io::Write>(out: W, run: &PortfolioRun) -> Result<()> {
    trade_level_tab(run).write_csv(out)
}

/// Writes the grand totals tab.
pub fn write_portfolio_summary<W: io::Write>(out: W, run: &PortfolioRun) -> Result<()> {
    portfolio_summary_tab(run).write_csv(out)
}

/// Writes one grouping tab.
pub fn write_grouping<W: io::Write>(out: W, summary: &PortfolioSummary) -> Result<()> {
    grouping_tab(summary).write_csv(out)
}

/// Writes the rejections tab.
///
/// After the fixed columns come the raw input columns of the rejected
/// records, blank where a record lacks one.
pub fn write_rejected<W: io::Write>(out: W, run: &PortfolioRun) -> Result<()> {
    rejected_tab(run).write_csv(out)
}

/// Writes every tab as a worksheet of one workbook at `path`.
pub fn write_workbook(path: &Path, run: &PortfolioRun) -> Result<()> {
    let mut sheets = vec![
        ("Trade Level".to_string(), trade_level_tab(run)),
        ("Portfolio Summary".to_string(), portfolio_summary_tab(run)),
    ];
    for (index, summary) in run.summaries.iter().enumerate() {
        let taken: Vec<String> = sheets.iter().map(|(name, _)| name.clone()).collect();
        sheets.push((grouping_sheet_name(summary, index, &taken), grouping_tab(summary)));
    }
    sheets.push(("Rejected Trades".to_string(), rejected_tab(run)));

    let mut workbook = Workbook::new();
    for (name, tab) in &sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(name.as_str())?;
        tab.write_sheet(sheet)?;
        debug!(sheet = %name, rows = tab.rows.len(), "Worksheet written");
    }
    workbook.save(path)?;
    Ok(())
}

/// Writes every tab, the workbook and the run summary into `dir`, creating
/// it if needed.
///
/// Returns the paths written.
pub fn write_report(
    dir: &Path,
    run: &PortfolioRun,
    policy: DegeneratePolicy,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    let path = dir.join(TRADE_LEVEL_FILE);
    write_trade_level(fs::File::create(&path)?, run)?;
    written.push(path);

    let path = dir.join(PORTFOLIO_SUMMARY_FILE);
    write_portfolio_summary(fs::File::create(&path)?, run)?;
    written.push(path);

    for summary in &run.summaries {
        let path = dir.join(grouping_file_name(summary));
        write_grouping(fs::File::create(&path)?, summary)?;
        written.push(path);
    }

    let path = dir.join(REJECTED_TRADES_FILE);
    write_rejected(fs::File::create(&path)?, run)?;
    written.push(path);

    let path = dir.join(REPORT_WORKBOOK_FILE);
    write_workbook(&path, run)?;
    written.push(path);

    let path = dir.join(RUN_SUMMARY_FILE);
    let summary = RunSummary::from_run(run, policy);
    fs::write(&path, serde_json::to_string_pretty(&summary)?)?;
    written.push(path);

    info!(dir = %dir.display(), files = written.len(), "Report written");
    Ok(written)
}

/// Renders a plain-text summary for the terminal.
pub fn render_table(run: &PortfolioRun) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Trades: {} read, {} priced, {} rejected",
        run.input_count,
        run.valid_count(),
        run.rejected_count()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{:<32} {:>18} {:>18} {:>18} {:>6}", "Group", "PV (USD)", "Delta (USD)", "Vega (USD)", "Count");

    for summary in &run.summaries {
        let _ = writeln!(out, "-- by {} --", summary.name());
        for group in summary.groups() {
            let _ = writeln!(
                out,
                "{:<32} {:>18.2} {:>18.2} {:>18.2} {:>6}",
                group.label(),
                group.totals.pv_usd,
                group.totals.delta_usd,
                group.totals.vega_usd,
                group.totals.trade_count
            );
        }
    }

    let _ = writeln!(
        out,
        "{:<32} {:>18.2} {:>18.2} {:>18.2} {:>6}",
        ALL_GROUP,
        run.total.pv_usd,
        run.total.delta_usd,
        run.total.vega_usd,
        run.total.trade_count
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_models::validation::RawRecord;
    use pricer_risk::aggregation::GroupKey;
    use pricer_risk::normalization::FxRateTable;
    use pricer_risk::pipeline::{run_portfolio, PipelineConfig};

    fn sample_run() -> PortfolioRun {
        let records = vec![
            RawRecord::new(0)
                .with("trade_id", "T1")
                .with("currency_pair", "EUR/USD")
                .with("notional", 1_000_000.0)
                .with("notional_currency", "EUR")
                .with("strike", 1.10)
                .with("spot", 1.08)
                .with("volatility", 0.08)
                .with("domestic_rate", 0.04)
                .with("foreign_rate", 0.03)
                .with("time_to_expiry", 1.0)
                .with("option_type", "Call"),
            RawRecord::new(1).with("trade_id", "T2"),
        ];
        let config = PipelineConfig {
            groupings: vec![vec![GroupKey::CurrencyPair], vec![]],
            ..PipelineConfig::default()
        };
        run_portfolio(&records, &FxRateTable::new(), &config)
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_trade_level_tab() {
        let run = sample_run();
        let text = render(|buf| write_trade_level(buf, &run));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("trade_id,currency_pair,option_type"));
        assert!(lines[1].starts_with("T1,EUR/USD,Call,1000000,EUR,USD,"));
        assert!(lines[1].ends_with(",success"));
    }

    #[test]
    fn test_grouping_tabs() {
        let run = sample_run();
        let by_pair = render(|buf| write_grouping(buf, &run.summaries[0]));
        assert!(by_pair.starts_with("currency_pair,pv_usd,delta_usd,vega_usd,trade_count\n"));
        assert!(by_pair.lines().nth(1).unwrap().starts_with("EUR/USD,"));
        assert_eq!(grouping_file_name(&run.summaries[0]), "risk_by_currency_pair.csv");

        let all = render(|buf| write_grouping(buf, &run.summaries[1]));
        assert!(all.starts_with("group,pv_usd"));
        assert!(all.lines().nth(1).unwrap().starts_with("ALL,"));
        assert_eq!(grouping_file_name(&run.summaries[1]), "risk_by_all.csv");
    }

    #[test]
    fn test_rejected_tab() {
        let run = sample_run();
        let text = render(|buf| write_rejected(buf, &run));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "trade_id,row_index,rule,code,reason,trade_id");
        assert_eq!(
            lines[1],
            "T2,1,required-fields,MISSING_FIELD,missing required field 'currency_pair',T2"
        );
    }

    #[test]
    fn test_rejected_tab_appends_raw_columns_in_first_seen_order() {
        let records = vec![
            RawRecord::new(0).with("TradeID", "A").with("Spot", 1.08),
            RawRecord::new(1)
                .with("Underlying", "EURUSD")
                .with("TradeID", "B")
                .with("Comment", "late booking"),
        ];
        let run = run_portfolio(&records, &FxRateTable::new(), &PipelineConfig::default());
        let text = render(|buf| write_rejected(buf, &run));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "trade_id,row_index,rule,code,reason,TradeID,Spot,Underlying,Comment");
        assert!(lines[1].starts_with("A,0,required-fields,MISSING_FIELD,"));
        assert!(lines[1].ends_with(",A,1.08,,"));
        assert!(lines[2].starts_with("B,1,"));
        assert!(lines[2].ends_with(",B,,EURUSD,late booking"));
    }

    #[test]
    fn test_grouping_sheet_names() {
        let run = sample_run();
        assert_eq!(grouping_sheet_name(&run.summaries[0], 0, &[]), "Risk by currency_pair");
        assert_eq!(grouping_sheet_name(&run.summaries[1], 1, &[]), "Risk by all");

        let config = PipelineConfig {
            groupings: vec![
                vec![GroupKey::CurrencyPair, GroupKey::OptionType, GroupKey::NotionalCurrency],
                vec![GroupKey::CurrencyPair, GroupKey::OptionType, GroupKey::QuoteCurrency],
            ],
            ..PipelineConfig::default()
        };
        let run = run_portfolio(&[], &FxRateTable::new(), &config);
        let first = grouping_sheet_name(&run.summaries[0], 0, &[]);
        assert_eq!(first.chars().count(), SHEET_NAME_LIMIT);
        let taken = vec![first];
        assert_eq!(grouping_sheet_name(&run.summaries[1], 1, &taken), "Risk 2");
    }

    #[test]
    fn test_tab_cells() {
        let tab = portfolio_summary_tab(&sample_run());
        assert_eq!(tab.header, ["metric", "value"]);
        assert_eq!(tab.rows[3], vec![Cell::text("valid_trades"), Cell::Number(1.0)]);
        assert_eq!(Cell::from(&RawValue::Missing), Cell::text(""));
        assert_eq!(Cell::from(&RawValue::Number(2.5)), Cell::Number(2.5));
    }

    #[test]
    fn test_empty_tabs_keep_headers() {
        let run = run_portfolio(&[], &FxRateTable::new(), &PipelineConfig::default());
        assert_eq!(render(|buf| write_trade_level(buf, &run)).lines().count(), 1);
        assert_eq!(render(|buf| write_rejected(buf, &run)).lines().count(), 1);
        assert_eq!(render(|buf| write_grouping(buf, &run.summaries[0])).lines().count(), 1);
    }

    #[test]
    fn test_run_summary() {
        let run = sample_run();
        let summary = RunSummary::from_run(&run, DegeneratePolicy::Reject);
        assert_eq!(summary.input_count, 2);
        assert_eq!(summary.valid_count, 1);
        assert_eq!(summary.rejections_by_code.get("MISSING_FIELD"), Some(&1));
        assert_eq!(summary.implied_rates[0].currency, Currency::EUR);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["reporting_currency"], "USD");
        assert_eq!(json["degenerate_policy"], "reject");
    }

    #[test]
    fn test_render_table() {
        let text = render_table(&sample_run());
        assert!(text.starts_with("Trades: 2 read, 1 priced, 1 rejected"));
        assert!(text.contains("-- by currency_pair --"));
        assert!(text.contains("EUR/USD"));
    }
}
