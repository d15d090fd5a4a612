pub mod chart;
pub mod command;
pub mod error;
pub mod export;
pub mod gen_html;
pub mod summary;
pub mod util;

pub use error::Error;

pub type Result<T> = std::result::Result<T, Error>;
