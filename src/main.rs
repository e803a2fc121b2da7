// ============================================================================
// rustfileops - Batch Directory File Operations
// Main Entry Point
//
// Re-encodes text files between named encodings, renames files to their
// zero-padded numeric suffix, and merges a directory's text files into one.
// Every operation works on the immediate entries of a single directory and
// stops at the first failing entry.
// ============================================================================

use clap::Parser; // Command-line argument parsing with derive macros
use log::{error, info}; // Structured logging for debugging and monitoring
use std::process::ExitCode;

use rustfileops::cli::{Cli, Commands}; // CLI structure and command enumeration
use rustfileops::commands::CommandHandler; // Command processing and orchestration
use rustfileops::logging::Logger; // File-backed logger

fn main() -> ExitCode {
    let cli = Cli::parse();

    // env_logger by default, the file-backed logger when log files are requested
    let level = cli.log_level();
    if cli.log_file.is_some() || cli.error_file.is_some() {
        if let Err(e) = Logger::init(cli.log_file.as_deref(), cli.error_file.as_deref(), level) {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    } else {
        env_logger::builder().filter_level(level).init();
    }

    info!("rustfileops starting up");

    let result = match cli.command {
        Commands::Recode(ref args) => CommandHandler::handle_recode(&cli, args.clone()),
        Commands::Rename(ref args) => CommandHandler::handle_rename(&cli, args.clone()),
        Commands::Merge(ref args) => CommandHandler::handle_merge(&cli, args.clone()),
        Commands::GenerateConfig(ref args) => CommandHandler::handle_generate_config(args.clone()),
        Commands::GuidedSetup(ref args) => CommandHandler::handle_guided_setup(args.clone()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if log::log_enabled!(log::Level::Error) {
                error!("{:#}", e);
            } else {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}
