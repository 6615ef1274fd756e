//! Logframe CLI - Logical Framework Generator
//!
//! Command-line interface for building and exporting logframe matrices.

use clap::Parser;
use env_logger::Env;
use log::info;

use logframe::cli::{commands, Cli, Commands};
use logframe::Result;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    info!("Logframe Generator v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd, &cli.dir),
        None => {
            println!("Logframe Generator v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands, dir: &std::path::Path) -> Result<()> {
    match cmd {
        Commands::SetInfo {
            title,
            organization,
            donor,
            duration,
        } => commands::set_info(
            dir,
            title.as_deref(),
            organization.as_deref(),
            donor.as_deref(),
            duration.as_deref(),
        ),
        Commands::Add { level_type } => commands::add(dir, level_type.into()),
        Commands::Remove { id, yes } => commands::remove(dir, &id, yes),
        Commands::Update { id, field, value } => commands::update(dir, &id, field.into(), &value),
        Commands::Show => commands::show(dir),
        Commands::Export { format, out } => commands::export(dir, format, out.as_deref()),
        Commands::Lang { code } => commands::lang(dir, code.into()),
        Commands::Clear { yes } => commands::clear(dir, yes),
    }
}
