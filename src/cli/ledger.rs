//! Ledger CLI commands
//!
//! Month views, totals, the list of populated months, deletion and the audit
//! history.

use clap::Args;

use crate::config::paths::LedgerPaths;
use crate::config::settings::Settings;
use crate::display::{format_month_overview, format_month_view, format_summary, Palette};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{MonthKey, RecordId, RecordKind};
use crate::storage::Storage;

/// Selects a month by calendar month and year
///
/// Both default to the current month in local time.
#[derive(Args, Debug, Clone, Default)]
pub struct MonthArgs {
    /// Calendar month, 1-12
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Four-digit year
    #[arg(short, long)]
    pub year: Option<i32>,
}

impl MonthArgs {
    pub fn resolve(&self) -> LedgerResult<MonthKey> {
        let current = MonthKey::current();
        let year = self.year.unwrap_or(current.year());

        let key = match self.month {
            Some(month) => MonthKey::from_calendar_month(year, month),
            None => MonthKey::new(year, current.month_index()),
        };
        key.map_err(|e| LedgerError::Validation(e.to_string()))
    }
}

/// Arguments of the delete command
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Id of the record to delete
    pub id: String,

    /// Only delete if the record is of this kind (income or expense)
    #[arg(short, long)]
    pub kind: Option<RecordKind>,

    /// Month key as listed by `months`, e.g. 2024-2 for March 2024
    #[arg(short, long)]
    pub month: Option<String>,
}

/// Arguments of the history command
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Number of entries to show
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,

    /// Only changes to this month, as a key such as 2024-2
    #[arg(short, long)]
    pub month: Option<String>,
}

fn parse_month_key(key: Option<&str>) -> LedgerResult<Option<MonthKey>> {
    key.map(str::parse::<MonthKey>)
        .transpose()
        .map_err(|e| LedgerError::Validation(e.to_string()))
}

/// Show both tables and the totals for a month
pub fn handle_show(storage: &mut Storage, settings: &Settings, args: &MonthArgs) -> LedgerResult<()> {
    let key = args.resolve()?;
    let view = storage.service().month_view(key)?;

    print!(
        "{}",
        format_month_view(&view, settings, &Palette::for_stdout(settings.theme))
    );
    Ok(())
}

/// Show only the totals for a month
pub fn handle_summary(
    storage: &mut Storage,
    settings: &Settings,
    args: &MonthArgs,
) -> LedgerResult<()> {
    let key = args.resolve()?;
    let view = storage.service().month_view(key)?;
    let palette = Palette::for_stdout(settings.theme);

    println!("{}", palette.heading(&format!("Summary for {}", key.display_name())));
    print!("{}", format_summary(&view.summary, settings, &palette));
    Ok(())
}

/// List every month that holds records
pub fn handle_months(storage: &mut Storage, settings: &Settings) -> LedgerResult<()> {
    let overview = storage.service().overview()?;
    print!("{}", format_month_overview(&overview, settings));
    Ok(())
}

/// Delete a record by id
///
/// With neither `--kind` nor `--month` the record is looked up anywhere in the
/// ledger and an unknown id is an error. Either flag narrows the delete to
/// that kind or month, and a record outside them is left alone.
pub fn handle_delete(storage: &mut Storage, settings: &Settings, args: DeleteArgs) -> LedgerResult<()> {
    let id: RecordId = args
        .id
        .parse()
        .map_err(|_| LedgerError::Validation("Record id cannot be empty".to_string()))?;
    let month = parse_month_key(args.month.as_deref())?;

    let outcome = match (args.kind, month) {
        (None, None) => Some(storage.service().delete_by_id(&id)?),
        (kind, month) => {
            let found = storage
                .ledger
                .find_record(&id)
                .map(|(key, record)| (key, record.kind));
            match found {
                Some((found_key, found_kind)) => storage.service().delete_entry(
                    kind.unwrap_or(found_kind),
                    &id,
                    month.unwrap_or(found_key),
                )?,
                None => None,
            }
        }
    };

    match outcome {
        Some(outcome) => {
            let record = &outcome.record;
            println!(
                "Deleted {} '{}' of {} from {}",
                record.kind.to_string().to_lowercase(),
                record.label,
                record.amount.format_with_symbol(&settings.currency_symbol),
                outcome.view.key.display_name()
            );
            print!(
                "{}",
                format_summary(
                    &outcome.view.summary,
                    settings,
                    &Palette::for_stdout(settings.theme)
                )
            );
        }
        None => println!("No matching record with id {} was found; nothing deleted.", id),
    }

    Ok(())
}

/// Print the most recent audit entries, oldest first
pub fn handle_history(storage: &Storage, args: &HistoryArgs) -> LedgerResult<()> {
    let month = parse_month_key(args.month.as_deref())?;
    let entries = storage.audit().recent(args.limit, month)?;

    if entries.is_empty() {
        match month {
            Some(key) => println!("No changes recorded for {}.", key.display_name()),
            None => println!("No changes recorded yet."),
        }
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry);
    }
    Ok(())
}

/// Print paths and settings
pub fn handle_config(storage: &Storage, paths: &LedgerPaths, settings: &Settings) {
    println!("budget-ledger Configuration");
    println!("===========================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Ledger file:      {}", storage.ledger.location());
    println!("Settings file:    {}", paths.settings_file().display());
    println!("Audit log:        {}", paths.audit_log().display());
    println!("Reports:          {}", paths.reports_dir().display());
    println!();
    println!("Settings:");
    println!("  Theme:          {}", settings.theme);
    println!("  Currency:       {}", settings.currency_symbol);
    println!("  Date format:    {}", settings.date_format);
    println!("  Report title:   {}", settings.report.title);
    println!("  Report prefix:  {}", settings.report.file_prefix);
    match &settings.report.logo_path {
        Some(logo) => println!("  Report logo:    {}", logo.display()),
        None => println!("  Report logo:    (none)"),
    }
    println!();
    println!(
        "Ledger: {} records in {} months",
        storage.ledger.record_count(),
        storage.ledger.month_keys().len()
    );

    let report = storage.ledger.load_report();
    if report.unreadable {
        println!("Ledger file was unreadable and has been set aside; started empty.");
    } else if report.has_repairs() {
        println!(
            "Repaired on load: {} dropped, {} ids reissued, {} moved to their month",
            report.dropped, report.reissued_ids, report.rebucketed
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_args_resolve() {
        let args = MonthArgs {
            month: Some(3),
            year: Some(2024),
        };
        assert_eq!(args.resolve().unwrap(), MonthKey::new(2024, 2).unwrap());
    }

    #[test]
    fn test_month_args_default_to_current() {
        let current = MonthKey::current();
        assert_eq!(MonthArgs::default().resolve().unwrap(), current);

        let args = MonthArgs {
            month: None,
            year: Some(2020),
        };
        let key = args.resolve().unwrap();
        assert_eq!(key.year(), 2020);
        assert_eq!(key.month_index(), current.month_index());
    }
}
