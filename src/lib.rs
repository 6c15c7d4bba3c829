pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HttpReachability, OpenAiClassifier};
pub use app::pipelines::color_pipeline::ColorPipeline;
pub use config::{ApiCredential, LocalStorage, RunSettings, TomlConfig};
pub use core::etl::EtlEngine;
pub use domain::model::ColorResult;
pub use utils::error::{AnnotateError, Result};
