pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::pipelines::capitals_pipeline::CapitalsPipeline;
pub use config::{cli::LocalStorage, CliConfig};
pub use core::etl::EtlEngine;
pub use domain::model::Capital;
pub use utils::error::{EtlError, Result};
