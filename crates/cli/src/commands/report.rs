use super::common::OutputCliArgs;
use crate::error::CliError;
use b2ms_report::command::report_saved_run;

pub fn report(args: OutputCliArgs) -> Result<(), CliError> {
    report_saved_run(&args.out_dir, args.open)?;
    Ok(())
}
