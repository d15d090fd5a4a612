pub mod config;
pub mod deploy;
pub mod driver;
pub mod error;
pub mod interface;
pub mod record;
pub mod sender;
pub mod submitter;

pub use error::Error;

pub type Result<T> = std::result::Result<T, Error>;
