use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;

use arl_gateway::{Gateway, GatewayResult, LedgerEndpoint, RecordClient};
use arl_peer::{Peer, StateConfig};
use arl_server::{ArlServer, ServerConfig};
use arl_types::Record;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Serve(args) => cmd_serve(config, args),
        Command::Create(args) => cmd_create(&config, args, &cli.format),
        Command::Query(args) => cmd_query(&config, args, &cli.format),
        Command::Update(args) => cmd_update(&config, args, &cli.format),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ServerConfig> {
    match path {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(ServerConfig::default()),
    }
}

/// Open the configured network and run `f` in one gateway session.
fn with_records<T>(
    config: &ServerConfig,
    f: impl FnOnce(&RecordClient<'_>) -> GatewayResult<T>,
) -> anyhow::Result<T> {
    if config.network.state == StateConfig::Memory {
        tracing::warn!("network uses in-memory state; changes end with this process");
    }
    let peer: Arc<dyn LedgerEndpoint> = Arc::new(Peer::open(&config.network)?);
    let gateway = Gateway::connect(peer, config.identity.clone())?;
    let network = gateway.network(&config.channel)?;
    let records = RecordClient::new(network.contract(&config.contract));
    Ok(f(&records)?)
}

fn cmd_serve(mut config: ServerConfig, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(bind) = args.bind {
        config.bind_addr = bind
            .parse()
            .with_context(|| format!("invalid bind address {bind}"))?;
    }
    if args.not_found_404 {
        config.not_found_as_404 = true;
    }
    let server = ArlServer::new(config)?;
    println!(
        "{} ARL record gateway on {} (channel: {}, contract: {})",
        "✓".green().bold(),
        server.config().bind_addr.to_string().bold(),
        server.config().channel.cyan(),
        server.config().contract.cyan()
    );
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn cmd_create(config: &ServerConfig, args: CreateArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let record = Record {
        dealer_id: args.dealer_id,
        msisdn: args.msisdn,
        mpin: args.mpin,
        balance: args.balance,
        status: args.status,
        trans_amount: args.trans_amount,
        trans_type: args.trans_type,
        remarks: args.remarks,
    };
    with_records(config, |records| records.create(&record))?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
        OutputFormat::Text => println!(
            "{} Created record {}",
            "✓".green().bold(),
            record.dealer_id.yellow()
        ),
    }
    Ok(())
}

fn cmd_query(config: &ServerConfig, args: QueryArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let record = with_records(config, |records| records.query(&args.dealer_id))?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
        OutputFormat::Text => print_record(&record),
    }
    Ok(())
}

fn cmd_update(config: &ServerConfig, args: UpdateArgs, format: &OutputFormat) -> anyhow::Result<()> {
    with_records(config, |records| {
        records.update(&args.dealer_id, args.balance, &args.status)
    })?;
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "dealerId": args.dealer_id,
                "balance": args.balance,
                "status": args.status,
            })
        ),
        OutputFormat::Text => println!(
            "{} Updated {}: balance {}, status {}",
            "✓".green().bold(),
            args.dealer_id.yellow(),
            args.balance.to_string().bold(),
            args.status.cyan()
        ),
    }
    Ok(())
}

fn print_record(record: &Record) {
    println!("Record {}", record.dealer_id.yellow().bold());
    println!("  MSISDN:  {}", record.msisdn);
    println!("  Balance: {}", record.balance.to_string().bold());
    println!("  Status:  {}", record.status.cyan());
    println!(
        "  Last tx: {} {}",
        record.trans_type,
        record.trans_amount.to_string().dimmed()
    );
    if !record.remarks.is_empty() {
        println!("  Remarks: {}", record.remarks);
    }
}
