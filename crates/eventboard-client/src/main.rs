//! eventboard CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use eventboard_client::actions;
use eventboard_client::cli::{Cli, Command, ConfigAction};
use eventboard_client::commands::{config as config_cmd, events};
use eventboard_client::config::ClientConfig;
use eventboard_client::error::{ClientError, ClientResult};
use eventboard_core::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::cli()
    };
    if let Err(e) = init_tracing(tracing_config.with_format(cli.log_format)) {
        eprintln!("warning: failed to initialize logging: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let (mut config, config_path) = load_config(&cli)?;
    cli.apply_overrides(&mut config);

    match cli.command {
        Some(Command::Config { ref action }) => match action {
            ConfigAction::Dump => config_cmd::dump(&config, &config_path),
            ConfigAction::Validate => config_cmd::validate(&config),
            ConfigAction::Path => config_cmd::path(&config_path),
        },
        None => show_events(&cli, &config).await,
    }
}

/// Loads the file named by `--config`, or the default file if it exists.
fn load_config(cli: &Cli) -> ClientResult<(ClientConfig, PathBuf)> {
    match cli.config {
        Some(ref path) => {
            let config = ClientConfig::load_from(path).map_err(ClientError::Config)?;
            Ok((config, path.clone()))
        }
        None => {
            let config = ClientConfig::load().map_err(ClientError::Config)?;
            Ok((config, ClientConfig::default_path()))
        }
    }
}

async fn show_events(cli: &Cli, config: &ClientConfig) -> ClientResult<()> {
    let source = events::build_source(&config.calendar)?;
    debug!(source = source.name(), "using event source");

    let records = events::upcoming(source.as_ref(), &config.calendar).await?;

    if cli.has_action() {
        if let Some(position) = cli.open {
            actions::open_event_link(&records, position)?;
        }
        if let Some(position) = cli.open_map {
            actions::open_map(&records, position)?;
        }
        return Ok(());
    }

    let output = events::render(&records, &config.display, cli.output_format())?;
    println!("{}", output);
    Ok(())
}
