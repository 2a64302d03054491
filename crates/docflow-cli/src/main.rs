//! Docflow CLI entry point.
//!
//! Binary name: `docflow`
//!
//! Parses CLI arguments, sets up tracing, loads builder configuration from
//! the data directory, then dispatches to the command handlers.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use docflow_infra::config::resolve_data_dir;
use docflow_observe::tracing_setup::{init_tracing, shutdown_tracing, verbosity_filter};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(verbosity_filter(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need config
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "docflow", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(resolve_data_dir(cli.data_dir.as_deref())).await;

    match cli.command {
        Commands::Steps { mode } => {
            cli::steps::list_steps(mode.unwrap_or(state.config.default_mode), cli.json)?;
        }

        Commands::Kinds => {
            cli::steps::list_kinds(cli.json)?;
        }

        Commands::Check {
            file,
            mode,
            workflows_dir,
        } => {
            let mode = mode.unwrap_or(state.config.default_mode);
            cli::check::check_draft(&state, &file, mode, workflows_dir.as_deref(), cli.json)
                .await?;
        }

        Commands::Summary { file } => {
            cli::summary::show_summary(&file, cli.json).await?;
        }

        Commands::Templates { key } => match key {
            Some(key) => cli::templates::show_template(&state, &key, cli.json).await?,
            None => cli::templates::list_templates(&state, cli.json).await?,
        },

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check_with_mode() {
        let cli = Cli::try_parse_from(["docflow", "--json", "check", "draft.yaml", "--mode", "simple"])
            .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Check { file, mode, .. } => {
                assert_eq!(file, std::path::PathBuf::from("draft.yaml"));
                assert_eq!(mode, Some(docflow_types::wizard::WizardMode::Simple));
            }
            _ => panic!("expected check command"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["docflow", "steps", "--mode", "expert"]).is_err());
    }

    #[test]
    fn test_quiet_only_lowers_log_filter() {
        let cli = Cli::try_parse_from(["docflow", "--quiet", "kinds"]).unwrap();
        assert!(cli.quiet);
        assert_eq!(verbosity_filter(cli.verbose, cli.quiet), "error");
    }
}
