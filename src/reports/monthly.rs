//! Monthly Report
//!
//! A printable statement of one month: branding header, the income and
//! expense tables, and the three totals. Rendered as plain text, CSV or a
//! standalone HTML page that can embed a logo image.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDate;

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, MonthKey, Record, RecordKind};
use crate::services::{MonthView, Summary};
use crate::storage::{write_bytes_atomic, LedgerStore};

/// Output format of a monthly report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    Text,
    Csv,
    #[default]
    Html,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Csv => "csv",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Csv => write!(f, "csv"),
            Self::Html => write!(f, "html"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            "html" | "htm" => Ok(Self::Html),
            other => Err(format!("Unknown report format: {}", other)),
        }
    }
}

/// Monthly Report
#[derive(Debug, Clone)]
pub struct MonthlyReport {
    pub key: MonthKey,
    pub generated_on: NaiveDate,
    /// Income records sorted by date
    pub income: Vec<Record>,
    /// Expense records sorted by date
    pub expenses: Vec<Record>,
    pub summary: Summary,
    settings: Settings,
}

impl MonthlyReport {
    /// Build the report for one month
    pub fn generate(
        store: &LedgerStore,
        key: MonthKey,
        today: NaiveDate,
        settings: &Settings,
    ) -> LedgerResult<Self> {
        let view = MonthView::of(store, key)?;

        Ok(Self {
            key,
            generated_on: today,
            income: view.bucket.income().to_vec(),
            expenses: view.bucket.expenses().to_vec(),
            summary: view.summary,
            settings: settings.clone(),
        })
    }

    pub fn subtitle(&self) -> String {
        format!(
            "Monthly Report: {} {}",
            self.key.month_name(),
            self.key.year()
        )
    }

    /// `{prefix}_Report_{MonthName}_{Year}.{ext}`
    pub fn file_name(&self, format: ReportFormat) -> String {
        format!(
            "{}_Report_{}_{}.{}",
            self.settings.report.file_prefix,
            self.key.month_name(),
            self.key.year(),
            format.extension()
        )
    }

    fn records(&self, kind: RecordKind) -> &[Record] {
        match kind {
            RecordKind::Income => &self.income,
            RecordKind::Expense => &self.expenses,
        }
    }

    fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.settings.currency_symbol)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let branding = &self.settings.report;
        let mut output = String::new();

        output.push_str(&format!("{}\n", branding.title));
        if let Some(author) = &branding.author {
            output.push_str(&format!("Prepared by: {}\n", author));
        }
        if let Some(tagline) = &branding.tagline {
            output.push_str(&format!("{}\n", tagline));
        }
        output.push_str(&format!("{}\n", self.subtitle()));
        output.push_str(&format!("Generated on: {}\n", self.settings.format_date(self.generated_on)));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        for kind in RecordKind::ALL {
            let records = self.records(kind);
            output.push_str(&format!("\n{}\n", section_title(kind)));

            if records.is_empty() {
                output.push_str(&format!("{}\n", empty_notice(kind)));
                continue;
            }

            output.push_str(&format!(
                "{:<12} {:<30} {:>14}\n",
                "Date",
                kind.label_title(),
                "Amount"
            ));
            output.push_str(&"-".repeat(60));
            output.push('\n');

            for record in records {
                output.push_str(&format!(
                    "{:<12} {:<30} {:>14}\n",
                    self.settings.format_date(record.date),
                    truncate(&record.label, 30),
                    self.money(record.amount)
                ));
            }
        }

        output.push_str("\nSummary\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!("Total Income: {}\n", self.money(self.summary.total_income)));
        output.push_str(&format!(
            "Total Expenses: {}\n",
            self.money(self.summary.total_expenses)
        ));
        output.push_str(&format!("Final Balance: {}\n", self.money(self.summary.balance)));

        output
    }

    /// Export the report to CSV format
    ///
    /// One row per record, followed by the three totals. Amounts are plain
    /// decimals so spreadsheets can sum them.
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> LedgerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| LedgerError::Export(e.to_string());

        csv.write_record(["Month", "Section", "Date", "Label", "Amount"])
            .map_err(export_err)?;

        let month = self.key.display_name();
        for kind in RecordKind::ALL {
            for record in self.records(kind) {
                let date = record.date.format("%Y-%m-%d").to_string();
                let amount = record.amount.to_string();
                csv.write_record([
                    month.as_str(),
                    section_title(kind),
                    date.as_str(),
                    record.label.as_str(),
                    amount.as_str(),
                ])
                .map_err(export_err)?;
            }
        }

        for (label, amount) in [
            ("Total Income", self.summary.total_income),
            ("Total Expenses", self.summary.total_expenses),
            ("Final Balance", self.summary.balance),
        ] {
            let amount = amount.to_string();
            csv.write_record([month.as_str(), "Summary", "", label, amount.as_str()])
                .map_err(export_err)?;
        }

        csv.flush()
            .map_err(|e| LedgerError::Export(e.to_string()))?;
        Ok(())
    }

    /// Render a standalone HTML page
    ///
    /// When `logo` is given the image is read and embedded as a data URI. A
    /// logo that cannot be loaded fails the whole render.
    pub fn render_html(&self, logo: Option<&Path>) -> LedgerResult<String> {
        let logo_uri = logo.map(load_logo_data_uri).transpose()?;
        let branding = &self.settings.report;
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!(
            "<title>{} - {}</title>\n",
            escape_html(&branding.title),
            escape_html(&self.subtitle())
        ));
        html.push_str(STYLE);
        html.push_str("</head>\n<body>\n<header>\n");
        html.push_str(&format!("<h1>{}</h1>\n", escape_html(&branding.title)));

        if logo_uri.is_some() || branding.author.is_some() || branding.tagline.is_some() {
            html.push_str("<div class=\"credit\">\n");
            if let Some(author) = &branding.author {
                html.push_str("<span class=\"muted\">Prepared by:</span>\n");
                html.push_str(&format!("<strong class=\"author\">{}</strong>\n", escape_html(author)));
            }
            if let Some(tagline) = &branding.tagline {
                html.push_str(&format!("<em class=\"tagline\">{}</em>\n", escape_html(tagline)));
            }
            if let Some(uri) = &logo_uri {
                html.push_str(&format!("<img class=\"logo\" src=\"{}\" alt=\"logo\">\n", uri));
            }
            html.push_str("</div>\n");
        }

        html.push_str("</header>\n");
        html.push_str(&format!("<p class=\"muted\">{}</p>\n", escape_html(&self.subtitle())));
        html.push_str(&format!(
            "<p class=\"muted\">Generated on: {}</p>\n",
            escape_html(&self.settings.format_date(self.generated_on))
        ));

        for kind in RecordKind::ALL {
            let records = self.records(kind);
            html.push_str(&format!("<h2>{}</h2>\n", section_title(kind)));

            if records.is_empty() {
                html.push_str(&format!("<p>{}</p>\n", empty_notice(kind)));
                continue;
            }

            html.push_str(&format!(
                "<table class=\"{}\">\n<thead><tr><th>Date</th><th>{}</th><th>Amount</th></tr></thead>\n<tbody>\n",
                kind.collection_name(),
                kind.label_title()
            ));
            for record in records {
                html.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td><td class=\"amount\">{}</td></tr>\n",
                    escape_html(&self.settings.format_date(record.date)),
                    escape_html(&record.label),
                    escape_html(&self.money(record.amount))
                ));
            }
            html.push_str("</tbody>\n</table>\n");
        }

        html.push_str("<h2>Summary</h2>\n<ul class=\"summary\">\n");
        html.push_str(&format!(
            "<li>Total Income: {}</li>\n",
            escape_html(&self.money(self.summary.total_income))
        ));
        html.push_str(&format!(
            "<li>Total Expenses: {}</li>\n",
            escape_html(&self.money(self.summary.total_expenses))
        ));
        html.push_str(&format!(
            "<li class=\"balance\"><strong>Final Balance: {}</strong></li>\n",
            escape_html(&self.money(self.summary.balance))
        ));
        html.push_str("</ul>\n</body>\n</html>\n");

        Ok(html)
    }

    /// Render the whole document in memory
    pub fn render(&self, format: ReportFormat, logo: Option<&Path>) -> LedgerResult<Vec<u8>> {
        match format {
            ReportFormat::Text => Ok(self.format_terminal().into_bytes()),
            ReportFormat::Csv => {
                let mut buffer = Vec::new();
                self.export_csv(&mut buffer)?;
                Ok(buffer)
            }
            ReportFormat::Html => Ok(self.render_html(logo)?.into_bytes()),
        }
    }

    /// Render and write the report into `dir`, returning the file path
    ///
    /// Nothing is written unless rendering succeeds.
    pub fn save(
        &self,
        format: ReportFormat,
        dir: &Path,
        logo: Option<&Path>,
    ) -> LedgerResult<PathBuf> {
        let bytes = self.render(format, logo)?;

        fs::create_dir_all(dir).map_err(|e| {
            LedgerError::Io(format!("Failed to create report directory: {}", e))
        })?;

        let path = dir.join(self.file_name(format));
        write_bytes_atomic(&path, &bytes)?;

        tracing::info!(path = %path.display(), %format, "report written");
        Ok(path)
    }
}

const STYLE: &str = "<style>
body { font-family: sans-serif; margin: 2em; color: #264653; }
header { display: flex; justify-content: space-between; align-items: center; }
h1 { color: #2A9D8F; }
.credit { display: flex; flex-direction: column; align-items: flex-end; }
.author { color: #E76F51; font-size: 1.2em; }
.logo { width: 96px; height: 96px; margin-top: 0.5em; }
.muted { color: #777; }
table { border-collapse: collapse; width: 100%; margin-bottom: 1em; }
th, td { padding: 0.4em 0.6em; text-align: left; }
tbody tr:nth-child(odd) { background: #f4f4f4; }
table.income th { background: #2A9D8F; color: #fff; }
table.expenses th { background: #264653; color: #fff; }
.amount { text-align: right; }
.summary { list-style: none; padding: 0; }
</style>
";

fn section_title(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Income => "Income",
        RecordKind::Expense => "Expenses",
    }
}

fn empty_notice(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Income => "No income data for this month.",
        RecordKind::Expense => "No expenses data for this month.",
    }
}

/// Read an image and encode it as a `data:` URI
fn load_logo_data_uri(path: &Path) -> LedgerResult<String> {
    let mime = match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => {
            return Err(LedgerError::Report(format!(
                "Unsupported logo image type: {}",
                path.display()
            )))
        }
    };

    let bytes = fs::read(path).map_err(|e| {
        LedgerError::Report(format!("Failed to load logo {}: {}", path.display(), e))
    })?;

    if bytes.is_empty() {
        return Err(LedgerError::Report(format!(
            "Logo file is empty: {}",
            path.display()
        )));
    }

    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
