//! Crate-level error type.

use crate::charts::ChartError;
use crate::config::ConfigError;
use crate::data::{LoaderError, ProcessorError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Process(#[from] ProcessorError),
    #[error(transparent)]
    Chart(#[from] ChartError),
}

pub type Result<T> = std::result::Result<T, Error>;
