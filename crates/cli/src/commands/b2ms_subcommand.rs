use clap::Subcommand;
use std::path::PathBuf;

use super::common::{ChainCliArgs, OutputCliArgs};
use super::deploy::DeployCliArgs;
use super::run::RunCliArgs;

#[derive(Debug, Subcommand)]
pub enum B2msSubcommand {
    #[command(
        name = "run",
        long_about = "Send donation updates, then blood compares, one at a time; then export metrics and charts."
    )]
    Run {
        #[command(flatten)]
        args: Box<RunCliArgs>,
    },

    #[command(
        name = "report",
        long_about = "Regenerate the summary and charts for a run saved in the output directory."
    )]
    Report {
        #[command(flatten)]
        args: OutputCliArgs,
    },

    #[command(
        name = "deploy",
        long_about = "Deploy the contract bytecode from the interface artifact and save the deployment record (--deployment-file, default deployment/<chain_id>.json)."
    )]
    Deploy {
        #[command(flatten)]
        args: Box<DeployCliArgs>,
    },

    #[command(
        name = "setup",
        long_about = "Register the signer as a donor (one registerDonor() call)."
    )]
    Setup {
        #[command(flatten)]
        args: Box<ChainCliArgs>,
    },

    #[command(name = "init-config", about = "Write a default config file")]
    InitConfig {
        /// Where to write the config file.
        #[arg(default_value = super::common::DEFAULT_CONFIG_FILE)]
        path: PathBuf,

        /// Overwrite the file if it already exists.
        #[arg(long, short)]
        force: bool,
    },
}
