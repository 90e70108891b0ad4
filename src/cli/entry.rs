//! Income and expense CLI commands
//!
//! The two kinds share one set of subcommands; only the label differs
//! (an income *source*, an expense *description*).

use chrono::Local;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_record_table, format_summary, Palette};
use crate::error::LedgerResult;
use crate::models::RecordKind;
use crate::services::EntryDraft;
use crate::storage::Storage;

use super::ledger::MonthArgs;

/// Income or expense subcommands
#[derive(Subcommand, Debug)]
pub enum EntryCommands {
    /// Record a new entry
    Add {
        /// Income source or expense description
        label: String,

        /// Amount (e.g., "1200" or "₹1,200.50")
        amount: String,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List the entries of one month
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        month: MonthArgs,
    },
}

/// Handle an income or expense command
pub fn handle_entry_command(
    storage: &mut Storage,
    settings: &Settings,
    kind: RecordKind,
    cmd: EntryCommands,
) -> LedgerResult<()> {
    let palette = Palette::for_stdout(settings.theme);

    match cmd {
        EntryCommands::Add {
            label,
            amount,
            date,
        } => {
            let date = date.unwrap_or_else(|| {
                Local::now()
                    .date_naive()
                    .format("%Y-%m-%d")
                    .to_string()
            });
            let draft = EntryDraft::new(kind, label, amount, date);

            let outcome = storage.service().add_entry(&draft)?;
            let record = &outcome.record;

            println!(
                "Added {} '{}' of {} on {}",
                kind.to_string().to_lowercase(),
                record.label,
                record.amount.format_with_symbol(&settings.currency_symbol),
                settings.format_date(record.date)
            );
            println!("ID: {}", record.id);
            println!();
            println!("{}", palette.heading(&outcome.view.key.display_name()));
            print!("{}", format_summary(&outcome.view.summary, settings, &palette));
        }

        EntryCommands::List { month } => {
            let key = month.resolve()?;
            let view = storage.service().month_view(key)?;

            println!("{}", palette.heading(&format!("{} for {}", kind, key.display_name())));
            print!("{}", format_record_table(kind, view.bucket.records(kind), settings));
            println!(
                "Total: {}",
                view.summary
                    .total(kind)
                    .format_with_symbol(&settings.currency_symbol)
            );
        }
    }

    Ok(())
}
