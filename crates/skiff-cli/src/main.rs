//! skiff CLI - repository sync and branch publishing for automated fix loops.

use clap::Parser;

mod commands;
mod output;

use commands::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    init_logging();
    output::set_quiet(cli.quiet);

    let result = commands::engine(cli.auth_file.as_deref()).and_then(|engine| match cli.command {
        Commands::Sync { remote_url, path } => commands::sync::run(&engine, &remote_url, &path),
        Commands::Commit { path, message } => {
            commands::commit::run(&engine, &path, message.as_deref())
        }
        Commands::Branch { path, name, json } => commands::branch::run(&engine, &path, &name, json),
        Commands::Push {
            path,
            branch,
            remote_url,
        } => commands::push::run(&engine, &path, &remote_url, &branch),
        Commands::Publish {
            path,
            remote_url,
            branch,
            message,
            json,
        } => commands::publish::run(
            &engine,
            &path,
            &remote_url,
            branch.as_deref(),
            message.as_deref(),
            json,
        ),
    });

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Route library tracing to stderr, filtered by `RUST_LOG` (default: warnings).
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
