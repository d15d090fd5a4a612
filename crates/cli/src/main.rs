mod commands;
mod error;
mod util;

use commands::{B2msCli, B2msSubcommand};

#[tokio::main]
async fn main() -> miette::Result<()> {
    util::init_tracing();
    let args = B2msCli::parse_args();

    match args.command {
        B2msSubcommand::Run { args } => commands::run(*args).await?,

        B2msSubcommand::Report { args } => commands::report(args)?,

        B2msSubcommand::Deploy { args } => commands::deploy(*args).await?,

        B2msSubcommand::Setup { args } => commands::setup(*args).await?,

        B2msSubcommand::InitConfig { path, force } => commands::init_config(path, force)?,
    }

    Ok(())
}
