//! `laps` command-line entry point
//!
//! Reads LAPS local administrator passwords and their expiration from Active
//! Directory, or from a JSON fixture when `--fixture` is given.
//!
//! Results go to stdout; logs and errors go to stderr. Exit code is 0 on
//! success and 1 on any failure.

mod cli;
mod config;
mod output;

use std::process::ExitCode;

use anyhow::Context;
use cli::{CommandLine, Commands};
use config::LapsConfig;
use laps_core::{ComputerAccountService, CoreError};
use laps_directory::{DirectoryError, create_searcher};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match CommandLine::parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            // --help / --version 走 stdout 并成功退出
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if is_expected(&e) {
                tracing::warn!("{e:#}");
            } else {
                tracing::error!("{e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing to stderr; `RUST_LOG` overrides the `-v` level.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(false)
                .with_ansi(false),
        )
        .with(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .init();
}

async fn run(cli: CommandLine) -> anyhow::Result<()> {
    let config = LapsConfig::load(cli.config.as_deref()).await?;
    let searcher = create_searcher(config.backend(cli.fixture))
        .await
        .context("failed to set up directory access")?;
    tracing::debug!("Using {} directory backend", searcher.id());
    let service = ComputerAccountService::new(searcher);

    let rendered = match cli.command {
        Commands::Get {
            computer_name,
            target,
        } => {
            let target = config.target(target, true)?;
            let account = service
                .get_computer_account(&computer_name, &target)
                .await?;
            output::render_account(&account, cli.output)?
        }
        Commands::List { target } => {
            let target = config.target(target, false)?;
            let accounts = service.get_computer_accounts(&target).await?;
            output::render_accounts(&accounts, cli.output)?
        }
    };

    if !rendered.is_empty() {
        println!("{rendered}");
    }
    Ok(())
}

/// 预期错误（计算机不存在、凭证错误等）记为 warn，其余记为 error。
fn is_expected(err: &anyhow::Error) -> bool {
    if let Some(e) = err.downcast_ref::<CoreError>() {
        return e.is_expected();
    }
    err.downcast_ref::<DirectoryError>()
        .is_some_and(DirectoryError::is_expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_expected() {
        let err = anyhow::Error::from(CoreError::ComputerNotFound("HOST01".to_string()));
        assert!(is_expected(&err));
    }

    #[test]
    fn context_does_not_hide_classification() {
        let err = anyhow::Error::from(DirectoryError::FixtureError {
            detail: "bad".to_string(),
        })
        .context("failed to set up directory access");
        assert!(!is_expected(&err));

        let err = anyhow::Error::from(DirectoryError::InvalidConfig {
            detail: "bad".to_string(),
        })
        .context("failed to set up directory access");
        assert!(is_expected(&err));
    }

    #[test]
    fn other_errors_are_unexpected() {
        assert!(!is_expected(&anyhow::anyhow!("boom")));
    }
}
