use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;

use clustergen::{
    commands::{CommandHandler, ValidateArgs},
    config::OutputFormat,
    ctx::AppContext,
};

/// Validate CoreOS cluster generator forms.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Configuration file (defaults to .clustergen.toml when present).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate form values and print the normalized record.
    Validate {
        /// Mode tag: `arm` or `cloudconfig`.
        #[arg(short, long)]
        mode: String,
        /// Form values file (.json or .toml).
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Override a field, e.g. `--set node-count=3`.
        #[arg(short, long, value_name = "FIELD=VALUE")]
        set: Vec<String>,
        /// Output format.
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
        /// Write the record to a file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List node sizes and their data disk ranges.
    Sizes,
    /// Show data disk choices for a node size.
    Disks {
        size: String,
    },
    /// List storage tier choices.
    Tiers,
    /// Show IOPS and prefix requirement for a disk type.
    Tier {
        key: String,
    },
    /// List the fields applicable to a mode.
    Fields {
        #[arg(short, long)]
        mode: String,
    },
    /// Print the JSON schema of the configuration record.
    Schema,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let workdir = std::env::current_dir()?;
    let mut ctx = AppContext::new(cli.config.as_deref(), workdir)?;

    match cli.command {
        Command::Validate {
            mode,
            input,
            set,
            format,
            output,
        } => {
            let args = ValidateArgs {
                mode,
                input,
                set,
                format,
                output,
            };
            CommandHandler::handle_validate(&mut ctx, &args)?;
        }
        Command::Sizes => CommandHandler::handle_sizes(&ctx),
        Command::Disks { size } => CommandHandler::handle_disks(&ctx, &size),
        Command::Tiers => CommandHandler::handle_tiers(&ctx),
        Command::Tier { key } => CommandHandler::handle_tier(&ctx, &key)?,
        Command::Fields { mode } => CommandHandler::handle_fields(&mode),
        Command::Schema => CommandHandler::handle_schema()?,
    }

    Ok(())
}
