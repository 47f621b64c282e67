pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, CliConfig, RunConfig};
pub use core::{
    etl::{EtlEngine, EtlSummary},
    pipeline::CustomerPipeline,
};
pub use domain::model::CustomerRecord;
pub use utils::error::{EtlError, Result};
