//! Inspection settings read from the process environment.
use std::env;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    pub scenario: String,
    /// Farmer whose crafting view is reported; every farmer when unset.
    pub farmer: Option<String>,
    pub format: OutputFormat,
}

impl CliConfig {
    pub const DEFAULT_SCENARIO: &'static str = "farm";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `STORAGE_DATA_DIR` - Content directory (default: platform data directory)
    /// - `STORAGE_SCENARIO` - Scenario name under `scenarios/` (default: farm)
    /// - `STORAGE_FARMER` - Only report crafting for this farmer
    /// - `STORAGE_OUTPUT` - `text` or `json` (default: text)
    pub fn from_env() -> Self {
        let data_dir = env::var_os("STORAGE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        let scenario =
            env::var("STORAGE_SCENARIO").unwrap_or_else(|_| Self::DEFAULT_SCENARIO.to_owned());
        let format = match env::var("STORAGE_OUTPUT").as_deref() {
            Ok(value) if value.eq_ignore_ascii_case("json") => OutputFormat::Json,
            _ => OutputFormat::Text,
        };

        Self {
            data_dir,
            scenario,
            farmer: env::var("STORAGE_FARMER").ok(),
            format,
        }
    }
}

/// Platform data directory, `./data` when none can be determined.
fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "storage")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./data"))
}
