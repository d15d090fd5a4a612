use super::common::{ChainCliArgs, OutputCliArgs};
use crate::error::CliError;
use b2ms_core::{
    config::ConfigFile,
    deploy::{read_totals, ContractTotals, TOTALS_FNS},
    driver::Driver,
    interface::ContractInterface,
    record::CallKind,
    sender::TxSender,
    submitter::RpcSubmitter,
};
use b2ms_report::export::{RunMetadata, METRICS_FILENAME};
use tracing::{debug, info, warn};

#[derive(Clone, Debug, clap::Args)]
pub struct RunCliArgs {
    #[command(flatten)]
    pub chain: ChainCliArgs,

    /// Number of updateDonation calls (default 1000).
    #[arg(long, visible_alias = "nd")]
    pub donations: Option<u64>,

    /// Number of compareBlood calls (default 500).
    #[arg(long, visible_alias = "nm")]
    pub matches: Option<u64>,

    #[command(flatten)]
    pub output: OutputCliArgs,
}

pub async fn run(args: RunCliArgs) -> Result<(), CliError> {
    let config = args
        .chain
        .config_file()?
        .merge(ConfigFile {
            n_donations: args.donations,
            n_matches: args.matches,
            ..Default::default()
        })
        .resolve()?;
    let contract = config.contract_address()?;

    let interface = ContractInterface::from_file(&config.interface_file)?;
    interface.ensure_functions(CallKind::ALL.iter().map(CallKind::function_name))?;

    let out_dir = &args.output.out_dir;
    if out_dir.join(METRICS_FILENAME).exists() {
        warn!(
            "{} already holds a run; it will be overwritten",
            out_dir.display()
        );
    }

    let sender = TxSender::connect(&config).await?;
    info!(
        "sending {} donation updates and {} blood compares from {} to {contract}",
        config.n_donations,
        config.n_matches,
        sender.address()
    );

    let driver = Driver::new(RpcSubmitter::new(sender, contract, interface))
        .with_receipt_timeout(config.receipt_timeout);
    let run = driver.run(config.n_donations, config.n_matches).await?;
    let totals = contract_totals(driver.submitter()).await;

    let metadata = RunMetadata::new(&run, config.rpc_url.as_str(), &contract.to_string())
        .with_totals(totals);
    b2ms_report::command::report(&run, &metadata, out_dir, args.output.open)?;

    Ok(())
}

/// Reads the contract's counters after the run. A failed read is logged and
/// left out of the report.
async fn contract_totals(submitter: &RpcSubmitter) -> Option<ContractTotals> {
    if submitter.interface().ensure_functions(TOTALS_FNS).is_err() {
        debug!("interface has no total view functions; skipping readback");
        return None;
    }
    match read_totals(submitter.sender(), submitter.contract(), submitter.interface()).await {
        Ok(totals) => {
            totals.log();
            Some(totals)
        }
        Err(e) => {
            warn!("failed to read contract totals: {e}");
            None
        }
    }
}
