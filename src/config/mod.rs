pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_range, Validate,
};
use clap::Parser;
use toml_config::TomlConfig;

pub const DEFAULT_INPUT_PATH: &str = "customers.xlsx";
pub const DEFAULT_OUTPUT_PATH: &str = "backend/database/seeders/customers.json";
pub const DEFAULT_INDENT: usize = 4;

pub const INPUT_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods", "csv"];
const MAX_INDENT: usize = 8;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "customer-etl", version)]
#[command(about = "Converts the customers spreadsheet into the backend customer seed file")]
pub struct CliConfig {
    #[arg(long, help = "Input spreadsheet [default: customers.xlsx]")]
    pub input: Option<String>,

    #[arg(long, help = "Output JSON file [default: backend/database/seeders/customers.json]")]
    pub output: Option<String>,

    #[arg(long, help = "Worksheet to read [default: first sheet]")]
    pub sheet: Option<String>,

    #[arg(long, help = "Spaces per JSON indentation level [default: 4]")]
    pub indent: Option<usize>,

    #[arg(long, help = "Optional TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage after each phase")]
    pub monitor: bool,

    #[arg(long, help = "Read and transform without writing the output file")]
    pub dry_run: bool,
}

/// Effective settings for one run: CLI flag, then config file, then default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input_path: String,
    pub output_path: String,
    pub sheet: Option<String>,
    pub indent: usize,
    pub monitor: bool,
    pub dry_run: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_path: DEFAULT_INPUT_PATH.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            sheet: None,
            indent: DEFAULT_INDENT,
            monitor: false,
            dry_run: false,
        }
    }
}

impl RunConfig {
    pub fn from_cli(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };
        Ok(Self::merge(cli, file))
    }

    pub fn merge(cli: &CliConfig, file: TomlConfig) -> Self {
        let defaults = Self::default();
        let monitor = cli.monitor || file.monitoring_enabled();

        Self {
            input_path: cli
                .input
                .clone()
                .or(file.source.path)
                .unwrap_or(defaults.input_path),
            output_path: cli
                .output
                .clone()
                .or(file.load.output_path)
                .unwrap_or(defaults.output_path),
            sheet: cli.sheet.clone().or(file.source.sheet),
            indent: cli.indent.or(file.load.indent).unwrap_or(defaults.indent),
            monitor,
            dry_run: cli.dry_run,
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

    fn sheet_name(&self) -> Option<&str> {
        self.sheet.as_deref()
    }

    fn indent_width(&self) -> usize {
        self.indent
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input_path)?;
        validate_file_extension("input", &self.input_path, INPUT_EXTENSIONS)?;
        validate_path("output", &self.output_path)?;
        validate_file_extension("output", &self.output_path, &["json"])?;
        validate_range("indent", self.indent, 0, MAX_INDENT)?;
        if let Some(sheet) = &self.sheet {
            validate_non_empty_string("sheet", sheet)?;
        }
        Ok(())
    }
}
