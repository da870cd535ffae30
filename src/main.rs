use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{error, info};
use std::fs;
use std::path::PathBuf;

use toolbridge::BridgeError;
use toolbridge::cli::{Cli, Commands, parse_tool_args, tool_command};
use toolbridge::config::{Config, GATEWAY_URL_ENV};
use toolbridge::driver::InvocationDriver;
use toolbridge::schema::ToolCatalog;
use toolbridge::transport::{DEFAULT_TIMEOUT_MS, HttpTransport};

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("toolbridge")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("toolbridge.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.apply_env(std::env::var(GATEWAY_URL_ENV).ok());
    config.apply_cli(cli.gateway.as_deref(), cli.timeout_ms);
    Ok(config)
}

async fn run_application(cli: &Cli) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        eprintln!("{}", "Verbose mode enabled".yellow());
    }

    let config = load_config(cli)?;
    let catalog = config.load_catalog().context("Failed to load tool catalog")?;

    match &cli.command {
        Commands::Call { server, tool, args } => handle_call_command(server, tool, args, &config, &catalog).await,
        Commands::List { server } => handle_list_command(server.as_deref(), &catalog),
        Commands::Show { server, tool } => handle_show_command(server, tool, &config, &catalog),
    }
}

async fn handle_call_command(
    server: &str,
    tool: &str,
    args: &[String],
    config: &Config,
    catalog: &ToolCatalog,
) -> Result<()> {
    let bound = catalog.bind(server, tool)?;

    let input = match parse_tool_args(server, bound.schema, args) {
        Ok(input) => input,
        Err(e) if !e.use_stderr() => {
            // --help for the tool itself
            e.print()?;
            return Ok(());
        }
        Err(e) => return Err(usage_error(&e).into()),
    };

    let transport = HttpTransport::new(config.gateway_config())?;
    let driver = InvocationDriver::new(transport);
    let output = driver.run(&bound, &input).await?;

    println!("{}", output);
    Ok(())
}

fn handle_list_command(server: Option<&str>, catalog: &ToolCatalog) -> Result<()> {
    info!("Listing tools - server: {:?}", server);

    let servers: Vec<&str> = match server {
        Some(name) if catalog.tools(name).is_empty() => {
            return Err(BridgeError::UnknownServer(name.to_string()).into());
        }
        Some(name) => vec![name],
        None => catalog.servers(),
    };

    for name in servers {
        println!("{}", name.cyan().bold());
        for schema in catalog.tools(name) {
            match &schema.description {
                Some(description) => println!("  {:<28} {}", schema.name.green(), description),
                None => println!("  {}", schema.name.green()),
            }
        }
    }
    Ok(())
}

fn handle_show_command(server: &str, tool: &str, config: &Config, catalog: &ToolCatalog) -> Result<()> {
    let bound = catalog.bind(server, tool)?;
    let timeout_ms = bound.schema.effective_timeout_ms(config.gateway.timeout_ms);

    println!("{} {}/{}", "Tool:".green(), bound.server, bound.name());
    if timeout_ms != DEFAULT_TIMEOUT_MS {
        println!("{} {} ms", "Timeout:".green(), timeout_ms);
    }
    println!();
    println!("{}", tool_command(server, bound.schema).render_long_help());
    Ok(())
}

/// One-line usage message from a clap error
fn usage_error(e: &clap::Error) -> BridgeError {
    let rendered = e.render().to_string();
    let line = rendered.lines().next().unwrap_or_default();
    BridgeError::Usage(line.trim_start_matches("error: ").to_string())
}

fn report_error(report: &eyre::Report) -> i32 {
    let message = report.chain().map(|e| e.to_string()).collect::<Vec<_>>().join(": ");
    let (class, code) = match report.downcast_ref::<BridgeError>() {
        Some(err) => (err.class(), err.exit_code()),
        None => ("internal", 1),
    };

    error!("{} error: {}", class, message);
    eprintln!("{} {}", "Error:".red(), message);
    code
}

#[tokio::main]
async fn main() {
    // Parse CLI arguments; help and version exit 0, usage errors exit 1
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    // Setup logging first
    if let Err(e) = setup_logging(cli.is_verbose()).context("Failed to setup logging") {
        std::process::exit(report_error(&e));
    }

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    if let Err(e) = run_application(&cli).await {
        std::process::exit(report_error(&e));
    }
}
