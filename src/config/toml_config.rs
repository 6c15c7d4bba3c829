use crate::core::ConfigProvider;
use crate::utils::error::{AnnotateError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4.1-nano";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_ROW_DELAY_MS: u64 = 1000;
pub const DEFAULT_HEAD_TIMEOUT_SECONDS: u64 = 5;
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 60;

/// Optional settings file, every key may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub classifier: Option<ClassifierSection>,
    pub batch: Option<BatchSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifierSection {
    pub model: Option<String>,
    pub api_base: Option<String>,
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSection {
    pub row_delay_ms: Option<u64>,
    pub head_timeout_seconds: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AnnotateError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AnnotateError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_BASE})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| AnnotateError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn into_settings(self) -> RunSettings {
        let classifier = self.classifier.unwrap_or_default();
        let batch = self.batch.unwrap_or_default();
        let defaults = RunSettings::default();

        RunSettings {
            model: classifier.model.unwrap_or(defaults.model),
            api_base: classifier.api_base.unwrap_or(defaults.api_base),
            request_timeout_seconds: classifier
                .request_timeout_seconds
                .unwrap_or(defaults.request_timeout_seconds),
            row_delay_ms: batch.row_delay_ms.unwrap_or(defaults.row_delay_ms),
            head_timeout_seconds: batch
                .head_timeout_seconds
                .unwrap_or(defaults.head_timeout_seconds),
            ..defaults
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSettings {
    pub input: String,
    pub base_dir: String,
    pub model: String,
    pub api_base: String,
    pub request_timeout_seconds: u64,
    pub row_delay_ms: u64,
    pub head_timeout_seconds: u64,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            input: String::new(),
            base_dir: ".".to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            row_delay_ms: DEFAULT_ROW_DELAY_MS,
            head_timeout_seconds: DEFAULT_HEAD_TIMEOUT_SECONDS,
        }
    }
}

impl RunSettings {
    pub fn head_timeout(&self) -> Duration {
        Duration::from_secs(self.head_timeout_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl ConfigProvider for RunSettings {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn base_dir(&self) -> &str {
        &self.base_dir
    }

    fn row_delay(&self) -> Duration {
        Duration::from_millis(self.row_delay_ms)
    }
}

impl Validate for RunSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_path("base_dir", &self.base_dir)?;
        validation::validate_non_empty_string("classifier.model", &self.model)?;
        validation::validate_url("classifier.api_base", &self.api_base)?;
        validation::validate_positive_number(
            "classifier.request_timeout_seconds",
            self.request_timeout_seconds,
            1,
        )?;
        validation::validate_positive_number(
            "batch.head_timeout_seconds",
            self.head_timeout_seconds,
            1,
        )?;
        Ok(())
    }
}
