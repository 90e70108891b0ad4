use anyhow::Result;
use clap::{Parser, Subcommand};

use budget_ledger::cli::{
    handle_config, handle_delete, handle_entry_command, handle_export_command, handle_history,
    handle_months, handle_report_command, handle_show, handle_summary, handle_theme_command,
    DeleteArgs, EntryCommands, ExportArgs, HistoryArgs, MonthArgs, ReportArgs, ThemeCommands,
    REPORT_FAILURE_NOTICE,
};
use budget_ledger::config::{paths::LedgerPaths, settings::Settings};
use budget_ledger::models::RecordKind;
use budget_ledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "budget",
    author = "Kaylee Beyene",
    version,
    about = "Month-by-month income and expense tracker",
    long_about = "budget keeps a ledger of income and expenses grouped by calendar \
                  month, shows each month's totals and balance, and produces \
                  printable monthly reports."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Income commands
    #[command(subcommand)]
    Income(EntryCommands),

    /// Expense commands
    #[command(subcommand, alias = "expenses")]
    Expense(EntryCommands),

    /// Delete a record by id
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// Show a month's income, expenses and balance
    Show(MonthArgs),

    /// Show a month's totals
    Summary(MonthArgs),

    /// List months that hold records
    Months,

    /// Generate a monthly report
    Report(ReportArgs),

    /// Export the whole ledger
    Export(ExportArgs),

    /// Dark or light theme
    #[command(subcommand)]
    Theme(ThemeCommands),

    /// Show recent changes from the audit log
    History(HistoryArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    budget_ledger::init_tracing();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::open(paths.clone())?;

    match cli.command {
        Some(Commands::Income(cmd)) => {
            handle_entry_command(&mut storage, &settings, RecordKind::Income, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_entry_command(&mut storage, &settings, RecordKind::Expense, cmd)?;
        }
        Some(Commands::Delete(args)) => handle_delete(&mut storage, &settings, args)?,
        Some(Commands::Show(args)) => handle_show(&mut storage, &settings, &args)?,
        Some(Commands::Summary(args)) => handle_summary(&mut storage, &settings, &args)?,
        Some(Commands::Months) => handle_months(&mut storage, &settings)?,
        Some(Commands::Report(args)) => {
            if let Err(e) = handle_report_command(&storage, &paths, &settings, args) {
                tracing::error!(error = %e, "report generation failed");
                eprintln!("{}", REPORT_FAILURE_NOTICE);
                std::process::exit(1);
            }
        }
        Some(Commands::Export(args)) => handle_export_command(&storage, args)?,
        Some(Commands::Theme(cmd)) => handle_theme_command(&paths, &mut settings, cmd)?,
        Some(Commands::History(args)) => handle_history(&storage, &args)?,
        Some(Commands::Config) => handle_config(&storage, &paths, &settings),
        None => {
            println!("budget - Month-by-month income and expense tracker");
            println!();
            println!("Run 'budget --help' for usage information.");
            println!("Run 'budget show' to see the current month.");
        }
    }

    Ok(())
}
