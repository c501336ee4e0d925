#![allow(clippy::exit)]

mod cli;
mod commands;
mod config;
mod context;
mod output;
mod render;
mod timing;

use anyhow::Result;
use clap::Parser as _;

use crate::cli::{Cli, Commands};
use crate::commands::{
    ListArgs, generate_completions, run_add, run_delete, run_edit, run_list, run_show,
};
use crate::context::AppContext;
use crate::output::Output;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    timing::init_tracing(cli.verbose, cli.timing);

    if let Err(err) = run(cli).await {
        tracing::debug!("{err:?}");
        Output::new().error(format!("{err:#}"));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Completions { shell } = cli.command {
        generate_completions(shell)?;
        return Ok(());
    }

    let ctx = AppContext::from_cli(cli.api_url)?;

    match cli.command {
        Commands::List {
            search,
            sort,
            page,
            per_page,
            interactive,
        } => {
            run_list(
                ctx,
                ListArgs {
                    search,
                    sort,
                    page,
                    per_page,
                    interactive,
                },
            )
            .await
        }
        Commands::Show { id } => run_show(ctx, id).await,
        Commands::Add { name, email } => run_add(ctx, name, email).await,
        Commands::Edit { id, name, email } => run_edit(ctx, id, name, email).await,
        Commands::Delete { id, yes } => run_delete(ctx, id, yes).await,
        Commands::Completions { .. } => Ok(()),
    }
}
