pub mod cli;
pub mod credentials;
pub mod toml_config;

pub use self::cli::LocalStorage;
pub use self::credentials::ApiCredential;
pub use self::toml_config::{RunSettings, TomlConfig};

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "color-annotator")]
#[command(about = "Tag product images in a CSV with their dominant colors")]
pub struct CliConfig {
    /// Input CSV with `ID` and `Image Src` columns
    pub input: Option<String>,

    /// Directory the input path is resolved against [default: the executable's directory]
    #[arg(long)]
    pub base_dir: Option<String>,

    /// Optional TOML settings file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Vision model used for classification
    #[arg(long)]
    pub model: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long)]
    pub api_base: Option<String>,

    /// Pause before each row, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Timeout of the image HEAD request, in seconds
    #[arg(long)]
    pub head_timeout: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Log process CPU and memory usage per phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Layers the settings file (if any) and then the command line flags over the defaults.
    pub fn resolve(&self, input: String) -> Result<RunSettings> {
        let file_config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading settings from: {}", path);
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        let mut settings = file_config.into_settings();
        settings.input = input;
        settings.base_dir = match &self.base_dir {
            Some(dir) => dir.clone(),
            None => executable_dir()?,
        };

        // 命令列參數覆蓋設定檔
        if let Some(model) = &self.model {
            settings.model = model.clone();
        }
        if let Some(api_base) = &self.api_base {
            settings.api_base = api_base.clone();
        }
        if let Some(delay_ms) = self.delay_ms {
            settings.row_delay_ms = delay_ms;
        }
        if let Some(head_timeout) = self.head_timeout {
            settings.head_timeout_seconds = head_timeout;
        }

        Ok(settings)
    }
}

/// Directory holding the running executable; relative input paths resolve against it.
#[cfg(feature = "cli")]
pub fn executable_dir() -> Result<String> {
    let exe = std::env::current_exe()?;
    let dir = exe
        .parent()
        .ok_or_else(|| crate::utils::error::AnnotateError::ConfigError {
            message: format!("executable path has no parent: {}", exe.display()),
        })?;
    Ok(dir.to_string_lossy().into_owned())
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_positional_input() {
        let config = CliConfig::parse_from(["color-annotator", "products.csv", "--delay-ms", "0"]);
        assert_eq!(config.input.as_deref(), Some("products.csv"));
        assert_eq!(config.delay_ms, Some(0));
        assert!(config.base_dir.is_none());
    }

    #[test]
    fn test_missing_input_parses_as_none() {
        let config = CliConfig::parse_from(["color-annotator"]);
        assert!(config.input.is_none());
    }

    #[test]
    fn test_base_dir_defaults_to_executable_dir() {
        let config = CliConfig::parse_from(["color-annotator", "products.csv"]);
        let settings = config.resolve("products.csv".to_string()).unwrap();

        let exe = std::env::current_exe().unwrap();
        let expected = exe.parent().unwrap().to_string_lossy().into_owned();
        assert_eq!(settings.base_dir, expected);
    }

    #[test]
    fn test_base_dir_flag_overrides_default() {
        let config = CliConfig::parse_from(["color-annotator", "products.csv", "--base-dir", "/data"]);
        let settings = config.resolve("products.csv".to_string()).unwrap();
        assert_eq!(settings.base_dir, "/data");
    }

    #[test]
    fn test_flags_override_settings_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[classifier]\nmodel = \"from-file\"\n\n[batch]\nrow_delay_ms = 500\n")
            .unwrap();

        let config = CliConfig {
            config: Some(temp_file.path().to_str().unwrap().to_string()),
            model: Some("from-flag".to_string()),
            base_dir: Some("/data".to_string()),
            ..CliConfig::default()
        };

        let settings = config.resolve("products.csv".to_string()).unwrap();
        assert_eq!(settings.model, "from-flag");
        assert_eq!(settings.row_delay_ms, 500);
        assert_eq!(settings.input, "products.csv");
        assert_eq!(settings.base_dir, "/data");
    }
}
