mod cli;
mod context;
mod handlers;
mod output;
mod prompt;
mod ticker;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("TASKBOARD_DEBUG_LOG") {
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
        clap_complete::generate(shell, &mut Cli::command(), "taskboard", &mut std::io::stdout());
        return Ok(());
    }

    let mut ctx = CliContext::load(cli.file, cli.user).await?;

    match cli.command {
        Commands::Board(board_cmd) => {
            handlers::board::handle(&mut ctx, board_cmd.action).await?;
        }
        Commands::Card(card_cmd) => {
            handlers::card::handle(&mut ctx, card_cmd.action).await?;
        }
        Commands::Timer(timer_cmd) => {
            handlers::timer::handle(&mut ctx, timer_cmd.action).await?;
        }
        Commands::Checklist(checklist_cmd) => {
            handlers::checklist::handle(&mut ctx, checklist_cmd.action).await?;
        }
        Commands::Comment(comment_cmd) => {
            handlers::comment::handle(&mut ctx, comment_cmd.action).await?;
        }
        Commands::History { card } => {
            handlers::history::handle(&ctx, card).await?;
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}
