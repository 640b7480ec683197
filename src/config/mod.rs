pub mod cli;
pub mod toml_config;
pub mod upload;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_name, validate_path, Validate};
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use toml_config::RefinerConfig;

pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const DEFAULT_OUTPUT_FILE: &str = "refined_preferences.json";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "prefs-refiner")]
#[command(about = "Validate a preferences document and refine it into a storable record")]
pub struct CliConfig {
    #[arg(long, help = "Input JSON document")]
    pub input: String,

    #[arg(long, help = "Output directory [default: ./output]")]
    pub output_path: Option<String>,

    #[arg(long, help = "Output file name [default: refined_preferences.json]")]
    pub output_file: Option<String>,

    #[arg(long, help = "TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Publish the refined output to IPFS")]
    pub upload: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Command line flags take precedence over the TOML file, which takes
    /// precedence over the built-in defaults.
    pub fn resolve(&self, file: Option<&RefinerConfig>) -> RunConfig {
        let output_path = self
            .output_path
            .clone()
            .or_else(|| file.and_then(|f| f.output_path()).map(str::to_string))
            .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string());
        let output_file = self
            .output_file
            .clone()
            .or_else(|| file.and_then(|f| f.output_file()).map(str::to_string))
            .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string());

        RunConfig {
            input_path: self.input.clone(),
            output_path,
            output_file,
        }
    }
}

/// Fully resolved settings for one refinement run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub input_path: String,
    pub output_path: String,
    pub output_file: String,
}

impl RunConfig {
    pub fn new(input_path: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
        }
    }
}

impl ConfigProvider for RunConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input_path)?;
        validate_path("output_path", &self.output_path)?;
        validate_file_name("output_file", &self.output_file)?;
        Ok(())
    }
}
