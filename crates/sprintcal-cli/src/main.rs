mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use sprintcal_core::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("SPRINTCAL_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "sprintcal", &mut std::io::stdout());
        return Ok(());
    }

    let config = AppConfig::load();
    let file_path = cli
        .file
        .clone()
        .unwrap_or_else(|| config.effective_data_file());
    tracing::debug!("Using sprint file {}", file_path.display());

    let mut ctx = CliContext::load(&file_path, config);

    if let Err(e) = run(&mut ctx, cli.command).await {
        output::output_error(&e.to_string(), ctx.take_notices());
    }

    Ok(())
}

async fn run(ctx: &mut CliContext, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Sprint(sprint_cmd) => handlers::sprint::handle(ctx, sprint_cmd.action),
        Commands::Owner(args) => handlers::calendar::handle_owner(ctx, args),
        Commands::Select(args) => handlers::calendar::handle_select(ctx, args),
        Commands::Calendar(calendar_cmd) => handlers::calendar::handle(ctx, calendar_cmd.action),
        Commands::Export(args) => handlers::transfer::handle_export(ctx, args),
        Commands::Import(args) => handlers::transfer::handle_import(ctx, args).await,
        Commands::Completions { .. } => Ok(()),
    }
}
