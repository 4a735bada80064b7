use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use spendcap::cli::{handle_expense_command, handle_user_command, run_menu};
use spendcap::config::{Settings, TrackerPaths};
use spendcap::display::format_full_report;
use spendcap::storage::Storage;

#[derive(Parser)]
#[command(
    name = "spendcap",
    author = "Kaylee Beyene",
    version,
    about = "Track personal and shared expenses against per-user spending limits",
    long_about = "spendcap records what each person spends, splits shared expenses \
                  equally between participants, and refuses any expense that would \
                  take someone over their spending limit."
)]
struct Cli {
    /// Directory holding users.csv, expenses.csv and config.json
    #[arg(long, global = true, env = "SPENDCAP_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu (default)
    Menu,

    /// User management commands
    #[command(subcommand)]
    User(spendcap::cli::UserCommands),

    /// Expense commands
    #[command(subcommand)]
    Expense(spendcap::cli::ExpenseCommands),

    /// Show users, spending and every expense
    Report,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => TrackerPaths::with_base_dir(dir),
        None => TrackerPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let storage = Storage::new(paths)?;
    let mut tracker = storage.load_tracker()?;

    match cli.command {
        None | Some(Commands::Menu) => {
            let stdin = io::stdin();
            run_menu(&storage, &mut tracker, stdin.lock(), io::stdout())?;
        }
        Some(Commands::User(cmd)) => {
            handle_user_command(&storage, &mut tracker, &settings, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &mut tracker, cmd)?;
        }
        Some(Commands::Report) => {
            print!("{}", format_full_report(&tracker, &settings.currency_symbol));
        }
        Some(Commands::Config) => {
            let paths = storage.paths();
            println!("spendcap Configuration");
            println!("======================");
            println!("Data directory: {}", paths.base_dir().display());
            println!("Users file:     {}", paths.users_file().display());
            println!("Expenses file:  {}", paths.expenses_file().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!(
                "Initialized:    {}",
                if storage.is_initialized() { "yes" } else { "no" }
            );
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Log level:       {}", settings.log_level);
        }
    }

    Ok(())
}
