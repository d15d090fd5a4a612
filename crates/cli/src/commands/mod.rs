mod b2ms_subcommand;
pub mod common;
pub mod deploy;
pub mod init_config;
pub mod report;
pub mod run;
pub mod setup;

use clap::Parser;

pub use b2ms_subcommand::B2msSubcommand;
pub use deploy::deploy;
pub use init_config::init_config;
pub use report::report;
pub use run::run;
pub use setup::setup;

#[derive(Parser, Debug)]
#[command(
    name = "b2ms",
    version,
    about = "Load harness for the blood-matching smart contract"
)]
pub struct B2msCli {
    #[command(subcommand)]
    pub command: B2msSubcommand,
}

impl B2msCli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
