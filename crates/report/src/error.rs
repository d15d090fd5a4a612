use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("core error")]
    Core(#[from] b2ms_core::Error),

    #[error("csv error")]
    Csv(#[from] csv::Error),

    #[error("handlebars encountered an error while rendering")]
    HandlebarsRender(#[from] handlebars::RenderError),

    #[error("io error")]
    Io(#[from] io::Error),

    #[error("no saved run found in {}; expected {} and {}", .dir.display(), crate::export::METRICS_FILENAME, crate::export::RUN_FILENAME)]
    RunNotFound { dir: PathBuf },

    #[error("serde_json error")]
    SerdeJson(#[from] serde_json::Error),
}
