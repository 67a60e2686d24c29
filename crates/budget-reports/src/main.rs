//! Budget Reports
//!
//! Reads a YNAB budget and prints a retirement income projection (safe
//! withdrawal rate applied to retirement account balances) and a monthly
//! expense summary (essential and total spending by category group).

mod accounts;
mod categories;
mod config;
mod constants;
mod error;
mod expenditure;
mod month;
mod pipeline;
mod reports;
mod retirement;
mod units;
mod ynab;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use config::{AccountingMode, Classification, Config, FileConfig};
use month::MonthSelector;
use pipeline::ReportKind;
use ynab::{BudgetService, YnabClient};

/// Load config file or exit with helpful message
fn load_config_file(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        anyhow::bail!(
            "Config file '{}' not found.\n\n\
            To get started:\n\
            1. Copy config.toml.example to config.toml\n\
            2. Fill in your YNAB personal access token and budget name\n\n\
            See config.toml.example for the required format.",
            path.display()
        );
    }

    FileConfig::load(path)
}

#[derive(Parser, Debug)]
#[command(name = "budget-reports")]
#[command(about = "Retirement income and monthly expense reports from a YNAB budget")]
struct Args {
    /// Path to config file
    #[arg(short, long, default_value = constants::CONFIG_FILENAME, global = true)]
    config: PathBuf,

    /// YNAB access token (overrides api_keys.ynab)
    #[arg(long, global = true)]
    access_token: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// Which reports to print
    #[arg(long, value_enum, default_value_t = ReportKind::All)]
    report: ReportKind,

    /// Month for the expense report: "current", YYYY-MM or YYYY-MM-DD
    #[arg(long, conflicts_with = "pick_month")]
    month: Option<MonthSelector>,

    /// Prompt for the expense report month
    #[arg(long)]
    pick_month: bool,

    /// Print reports as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List budgets visible to the access token
    Budgets,

    /// Validate config.toml and show what will be reported
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let file_config = load_config_file(&args.config)?;
    let config = Config::from_file(&file_config, args.access_token.clone())?;

    match args.command {
        Some(Command::Budgets) => list_budgets(&config).await,
        Some(Command::CheckConfig) => {
            check_config(&config);
            Ok(())
        }
        None => run_reports(&args, &config).await,
    }
}

/// Log to stderr; RUST_LOG wins over --verbose
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "budget_reports=debug" } else { "budget_reports=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run the main report workflow
async fn run_reports(args: &Args, config: &Config) -> Result<()> {
    let month = if args.pick_month {
        Some(month::prompt_for_month()?)
    } else {
        args.month
    };

    let client = YnabClient::new(config)?;
    let output = pipeline::run(&client, config, args.report, month).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("\n============================================================");
        println!("              {}", config.budget_name);
        println!("============================================================");
        reports::print_all(&output);
    }

    Ok(())
}

/// Print the budgets the token can see
async fn list_budgets(config: &Config) -> Result<()> {
    let client = YnabClient::new(config)?;
    let budgets = client.list_budgets().await?;

    if budgets.is_empty() {
        println!("No budgets visible to this access token.");
        return Ok(());
    }

    println!("{:<40} Name", "ID");
    println!("{}", "-".repeat(70));
    for budget in &budgets {
        let marker = if budget.name == config.budget_name { "  <- configured" } else { "" };
        println!("{:<40} {}{}", budget.id, budget.name, marker);
    }
    println!("\n{} budget(s)", budgets.len());

    Ok(())
}

/// Summarize the validated configuration
fn check_config(config: &Config) {
    println!("Budget: {}", config.budget_name);
    println!("API: {} (token {})", config.base_url, config::mask_token(&config.access_token));
    println!("Safe withdrawal rate: {}", config.safe_withdrawal_rate);

    println!("\nRetirement accounts:");
    if config.retirement_account_names.is_empty() {
        println!("  (none)");
    }
    for name in &config.retirement_account_names {
        println!("  {}", name);
    }

    println!("\nCategory groups:");
    println!("  {:<30} {:<10} {}", "Name", "Mode", "Classification");
    println!("  {}", "-".repeat(56));
    for group in &config.category_groups {
        let mode = match group.accounting_mode {
            AccountingMode::Budgeted => "budgeted",
            AccountingMode::Activity => "activity",
        };
        let classification = match group.classification {
            Classification::Essential => "essential",
            Classification::Nonessential => "nonessential",
        };
        println!("  {:<30} {:<10} {}", group.name, mode, classification);
    }

    let warnings = config.naming_warnings();
    if warnings.is_empty() {
        println!("\nConfig OK.");
    } else {
        println!();
        for warning in &warnings {
            println!("  Warning: {}", warning);
        }
    }
}
