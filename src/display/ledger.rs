//! Ledger display formatting
//!
//! Month views as tables: one for income, one for expenses, then the totals.

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::{Record, RecordKind};
use crate::services::{MonthOverview, MonthView, Summary};

use super::theme::Palette;

/// Format one kind of record as a table
pub fn format_record_table(kind: RecordKind, records: &[Record], settings: &Settings) -> String {
    if records.is_empty() {
        return match kind {
            RecordKind::Income => "No income recorded.\n".to_string(),
            RecordKind::Expense => "No expenses recorded.\n".to_string(),
        };
    }

    let mut builder = Builder::default();
    builder.push_record(["Date", kind.label_title(), "Amount", "ID"]);

    for record in records {
        builder.push_record([
            settings.format_date(record.date),
            record.label.clone(),
            record.amount.format_with_symbol(&settings.currency_symbol),
            record.id.to_string(),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .modify(Columns::single(2), Alignment::right());

    format!("{}\n", table)
}

/// Format the three totals, colouring the balance
pub fn format_summary(summary: &Summary, settings: &Settings, palette: &Palette) -> String {
    let symbol = &settings.currency_symbol;
    let balance = summary.balance.format_with_symbol(symbol);

    let mut output = String::new();
    output.push_str(&format!(
        "Total Income:   {:>14}\n",
        summary.total_income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Total Expenses: {:>14}\n",
        summary.total_expenses.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Balance:        {}\n",
        palette.paint(&format!("{:>14}", balance), palette.balance_color(summary.balance))
    ));
    output
}

/// Format a whole month: heading, both tables and the totals
pub fn format_month_view(view: &MonthView, settings: &Settings, palette: &Palette) -> String {
    let mut output = String::new();

    output.push_str(&palette.heading(&view.key.display_name()));
    output.push_str("\n\n");

    for kind in RecordKind::ALL {
        output.push_str(&format!("{}\n", kind));
        output.push_str(&format_record_table(kind, view.bucket.records(kind), settings));
        output.push('\n');
    }

    output.push_str(&format_summary(&view.summary, settings, palette));
    output
}

#[derive(Tabled)]
struct OverviewRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

/// Format the list of populated months
pub fn format_month_overview(months: &[MonthOverview], settings: &Settings) -> String {
    if months.is_empty() {
        return "No entries recorded yet.\n".to_string();
    }

    let symbol = &settings.currency_symbol;
    let rows = months.iter().map(|m| OverviewRow {
        key: m.key.to_string(),
        month: m.key.display_name(),
        income: format!(
            "{} ({})",
            m.summary.total_income.format_with_symbol(symbol),
            m.income_count
        ),
        expenses: format!(
            "{} ({})",
            m.summary.total_expenses.format_with_symbol(symbol),
            m.expense_count
        ),
        balance: m.summary.balance.format_with_symbol(symbol),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::new(2..), Alignment::right());

    format!("{}\n", table)
}
