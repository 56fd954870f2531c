use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "arl",
    about = "Asset Registry Ledger — dealer records on a permissioned ledger",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML server/network configuration
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the REST record gateway
    Serve(ServeArgs),
    /// Create (or overwrite) a record
    Create(CreateArgs),
    /// Show a record
    Query(QueryArgs),
    /// Set the balance and status of a record
    Update(UpdateArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Override the configured bind address
    #[arg(long)]
    pub bind: Option<String>,
    /// Answer 404 for missing records instead of 500
    #[arg(long)]
    pub not_found_404: bool,
}

#[derive(Args)]
pub struct CreateArgs {
    pub dealer_id: String,
    #[arg(long, default_value = "")]
    pub msisdn: String,
    #[arg(long, default_value = "")]
    pub mpin: String,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub balance: i64,
    #[arg(long, default_value = "")]
    pub status: String,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub trans_amount: i64,
    #[arg(long, default_value = "")]
    pub trans_type: String,
    #[arg(long, default_value = "")]
    pub remarks: String,
}

#[derive(Args)]
pub struct QueryArgs {
    pub dealer_id: String,
}

#[derive(Args)]
pub struct UpdateArgs {
    pub dealer_id: String,
    #[arg(long, allow_negative_numbers = true)]
    pub balance: i64,
    #[arg(long)]
    pub status: String,
}
