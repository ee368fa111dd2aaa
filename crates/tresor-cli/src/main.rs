//! Tresor CLI - per-user secrets encrypted under a password-derived key
//!
//! This is the command-line interface for Tresor. It is a thin layer over
//! the core library: it resolves paths, prompts for passwords and prints
//! results.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod output;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use app::AppContext;
use cli::{Cli, Commands};
use errors::{exit_code_for, user_facing};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(&cli) {
        tracing::debug!(error = ?err, "command failed");
        let err = user_facing(err);
        eprintln!("Error: {}", err);
        std::process::exit(exit_code_for(&err));
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if let Commands::Completions(args) = &cli.command {
        let mut cmd = Cli::command();
        generate(args.shell, &mut cmd, "tresor", &mut std::io::stdout());
        return Ok(());
    }

    let ctx = AppContext::load(cli)?;
    match &cli.command {
        Commands::Init(args) => commands::handle_init(&ctx, args),
        Commands::Add(args) => commands::handle_add(&ctx, args),
        Commands::List(args) => commands::handle_list(&ctx, args),
        Commands::Show(args) => commands::handle_show(&ctx, args),
        Commands::Delete(args) => commands::handle_delete(&ctx, args),
        Commands::Completions(_) => Ok(()),
    }
}
