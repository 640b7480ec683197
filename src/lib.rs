pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, upload::UploadSettings, RunConfig};

pub use adapters::ipfs::IpfsUploader;
pub use core::{
    etl::{PublishReceipt, RefinerEngine, RunSummary},
    pipeline::RefinePipeline,
    schema::validate_preferences_input,
    transformer::PreferencesTransformer,
};
pub use domain::model::{PreferencesData, RawPreferencesInput, RefinedPreferencesRecord};
pub use utils::error::{RefinerError, Result};
