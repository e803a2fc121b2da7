// Import required dependencies
use anyhow::{anyhow, Context, Result}; // For error handling
use log::info; // For logging

// Import local modules
use crate::{
    cli::{Cli, CommonArgs, GenerateConfigArgs, GuidedSetupArgs, MergeArgs, RecodeArgs, RenameArgs},
    config::Config,
    core::FileOps,
    file_utils::ListOrder,
};

// Command handler for processing CLI commands
pub struct CommandHandler;

impl CommandHandler {
    // Handle the recode command - re-encode matching files in place
    pub fn handle_recode(cli: &Cli, args: RecodeArgs) -> Result<()> {
        let config = Self::load_config(&args.common)?;

        // Command-line values win over the config file
        let suffix = args
            .suffix
            .or_else(|| config.suffix.clone())
            .ok_or_else(|| anyhow!("No suffix specified (use --suffix or a config file)"))?;
        let from = args
            .from_encoding
            .or_else(|| config.from_encoding.clone())
            .ok_or_else(|| anyhow!("No source encoding specified (use --from)"))?;
        let to = args
            .to_encoding
            .or_else(|| config.to_encoding.clone())
            .ok_or_else(|| anyhow!("No target encoding specified (use --to)"))?;

        Self::file_ops(cli, &args.common, &config)
            .recode(&args.dir, &suffix, &from, &to)
            .with_context(|| format!("Recode of {} failed", args.dir.display()))?;

        info!("Recode completed");
        Ok(())
    }

    // Handle the rename command - move entries to their padded suffix
    pub fn handle_rename(cli: &Cli, args: RenameArgs) -> Result<()> {
        let config = Self::load_config(&args.common)?;

        Self::file_ops(cli, &args.common, &config)
            .rename(&args.src, &args.dest)
            .with_context(|| format!("Rename of {} failed", args.src.display()))?;

        info!("Rename completed");
        Ok(())
    }

    // Handle the merge command - concatenate a directory into one file
    pub fn handle_merge(cli: &Cli, args: MergeArgs) -> Result<()> {
        let config = Self::load_config(&args.common)?;

        Self::file_ops(cli, &args.common, &config)
            .merge(&args.src, &args.dest)
            .with_context(|| format!("Merge of {} failed", args.src.display()))?;

        info!("Merge completed, output written to {}", args.dest.display());
        Ok(())
    }

    // Handle configuration file generation
    pub fn handle_generate_config(args: GenerateConfigArgs) -> Result<()> {
        info!("Generating configuration file");

        Config::template()
            .save(&args.output)
            .with_context(|| format!("Could not write {}", args.output.display()))?;

        info!("Configuration file generated at: {}", args.output.display());
        Ok(())
    }

    // Handle interactive setup process
    pub fn handle_guided_setup(args: GuidedSetupArgs) -> Result<()> {
        info!("Starting guided setup");

        let config = Config::guided_setup()?;
        config
            .save(&args.output)
            .with_context(|| format!("Could not write {}", args.output.display()))?;

        info!("Configuration saved to: {}", args.output.display());
        Ok(())
    }

    // Load the config named on the command line, or fall back to defaults
    fn load_config(common: &CommonArgs) -> Result<Config> {
        match &common.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("Could not load config {}", path.display())),
            None => Ok(Config::default()),
        }
    }

    fn file_ops(cli: &Cli, common: &CommonArgs, config: &Config) -> FileOps {
        let order = if common.sort {
            ListOrder::Name
        } else {
            config.list_order()
        };

        FileOps::new()
            .with_order(order)
            .with_progress(config.show_progress && !cli.no_progress)
    }
}
