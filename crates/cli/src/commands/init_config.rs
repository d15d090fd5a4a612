use crate::error::CliError;
use crate::util::bold;
use b2ms_core::config::ConfigFile;
use std::path::PathBuf;
use tracing::info;

/// Writes [`ConfigFile::template`] to `path`.
pub fn init_config(path: PathBuf, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        return Err(CliError::ConfigExists(path));
    }
    ConfigFile::template().save_toml(&path)?;
    info!(
        "wrote {}; fill in {} before running",
        path.display(),
        bold("signer_key")
    );
    Ok(())
}
