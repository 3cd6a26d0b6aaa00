use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    portfolio::logging::init().context("init logging")?;

    let cli = portfolio::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        portfolio::cli::Command::List(args) => {
            portfolio::view::list(args).await.context("list")?;
        }
        portfolio::cli::Command::Detail(args) => {
            portfolio::view::detail(args).await.context("detail")?;
        }
        portfolio::cli::Command::Build(args) => {
            portfolio::build::run(args).await.context("build")?;
        }
        portfolio::cli::Command::Check(args) => {
            portfolio::check::run(args).await.context("check")?;
        }
    }

    Ok(())
}
