use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matching::{
    CriterionWeights, DEFAULT_MAX_ALTERNATIVES, DEFAULT_MAX_RECOMMENDATIONS,
    DEFAULT_TEMPLATE_BASE_COST, MAX_RECOMMENDATIONS_LIMIT,
};

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub scoring: ScoringConfig,
    pub pipeline: PipelineConfig,
    pub llm: LlmConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoringConfig {
    pub weights: CriterionWeights,
    pub template_base_cost: f64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    pub max_recommendations: usize,
    pub max_alternatives: usize,
    pub customize: bool,
    pub predict_performance: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LlmConfig {
    pub timeout_secs: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
    pub max_recommendations: Option<usize>,
    pub template_base_cost: Option<f64>,
    pub customize: Option<bool>,
    pub predict_performance: Option<bool>,
    pub llm_timeout_secs: Option<u64>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: CriterionWeights::default(),
            template_base_cost: DEFAULT_TEMPLATE_BASE_COST,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_recommendations: DEFAULT_MAX_RECOMMENDATIONS,
            max_alternatives: DEFAULT_MAX_ALTERNATIVES,
            customize: true,
            predict_performance: true,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: LogFormat::Compact }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            pipeline: PipelineConfig::default(),
            llm: LlmConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    /// Defaults, then the TOML file, then `SITEFIT_*` variables, then `overrides`.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("sitefit.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(scoring) = patch.scoring {
            if let Some(weights) = scoring.weights {
                self.scoring.weights = weights;
            }
            if let Some(template_base_cost) = scoring.template_base_cost {
                self.scoring.template_base_cost = template_base_cost;
            }
        }

        if let Some(pipeline) = patch.pipeline {
            if let Some(max_recommendations) = pipeline.max_recommendations {
                self.pipeline.max_recommendations = max_recommendations;
            }
            if let Some(max_alternatives) = pipeline.max_alternatives {
                self.pipeline.max_alternatives = max_alternatives;
            }
            if let Some(customize) = pipeline.customize {
                self.pipeline.customize = customize;
            }
            if let Some(predict_performance) = pipeline.predict_performance {
                self.pipeline.predict_performance = predict_performance;
            }
        }

        if let Some(llm) = patch.llm {
            if let Some(timeout_secs) = llm.timeout_secs {
                self.llm.timeout_secs = timeout_secs;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("SITEFIT_SCORING_TEMPLATE_BASE_COST") {
            self.scoring.template_base_cost =
                parse_f64("SITEFIT_SCORING_TEMPLATE_BASE_COST", &value)?;
        }

        if let Some(value) = read_env("SITEFIT_PIPELINE_MAX_RECOMMENDATIONS") {
            self.pipeline.max_recommendations =
                parse_usize("SITEFIT_PIPELINE_MAX_RECOMMENDATIONS", &value)?;
        }
        if let Some(value) = read_env("SITEFIT_PIPELINE_MAX_ALTERNATIVES") {
            self.pipeline.max_alternatives =
                parse_usize("SITEFIT_PIPELINE_MAX_ALTERNATIVES", &value)?;
        }
        if let Some(value) = read_env("SITEFIT_PIPELINE_CUSTOMIZE") {
            self.pipeline.customize = parse_bool("SITEFIT_PIPELINE_CUSTOMIZE", &value)?;
        }
        if let Some(value) = read_env("SITEFIT_PIPELINE_PREDICT_PERFORMANCE") {
            self.pipeline.predict_performance =
                parse_bool("SITEFIT_PIPELINE_PREDICT_PERFORMANCE", &value)?;
        }

        if let Some(value) = read_env("SITEFIT_LLM_TIMEOUT_SECS") {
            self.llm.timeout_secs = parse_u64("SITEFIT_LLM_TIMEOUT_SECS", &value)?;
        }

        let log_level = read_env("SITEFIT_LOGGING_LEVEL").or_else(|| read_env("SITEFIT_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("SITEFIT_LOGGING_FORMAT").or_else(|| read_env("SITEFIT_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
        if let Some(max_recommendations) = overrides.max_recommendations {
            self.pipeline.max_recommendations = max_recommendations;
        }
        if let Some(template_base_cost) = overrides.template_base_cost {
            self.scoring.template_base_cost = template_base_cost;
        }
        if let Some(customize) = overrides.customize {
            self.pipeline.customize = customize;
        }
        if let Some(predict_performance) = overrides.predict_performance {
            self.pipeline.predict_performance = predict_performance;
        }
        if let Some(timeout_secs) = overrides.llm_timeout_secs {
            self.llm.timeout_secs = timeout_secs;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_scoring(&self.scoring)?;
        validate_pipeline(&self.pipeline)?;
        validate_llm(&self.llm)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("sitefit.toml"), PathBuf::from("config/sitefit.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_scoring(scoring: &ScoringConfig) -> Result<(), ConfigError> {
    if !scoring.weights.is_normalized() {
        return Err(ConfigError::Validation(format!(
            "scoring.weights must be non-negative and sum to 1.0 (got {:.3})",
            scoring.weights.sum()
        )));
    }

    if !scoring.template_base_cost.is_finite() || scoring.template_base_cost <= 0.0 {
        return Err(ConfigError::Validation(
            "scoring.template_base_cost must be a positive number".to_string(),
        ));
    }

    Ok(())
}

fn validate_pipeline(pipeline: &PipelineConfig) -> Result<(), ConfigError> {
    if pipeline.max_recommendations == 0
        || pipeline.max_recommendations > MAX_RECOMMENDATIONS_LIMIT
    {
        return Err(ConfigError::Validation(format!(
            "pipeline.max_recommendations must be in range 1..={MAX_RECOMMENDATIONS_LIMIT}"
        )));
    }

    Ok(())
}

fn validate_llm(llm: &LlmConfig) -> Result<(), ConfigError> {
    if llm.timeout_secs == 0 || llm.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "llm.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn invalid_override(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidEnvOverride { key: key.to_string(), value: value.to_string() }
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.parse::<usize>().map_err(|_| invalid_override(key, value))
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| invalid_override(key, value))
}

fn parse_f64(key: &str, value: &str) -> Result<f64, ConfigError> {
    value.parse::<f64>().map_err(|_| invalid_override(key, value))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.parse::<bool>().map_err(|_| invalid_override(key, value))
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    scoring: Option<ScoringPatch>,
    pipeline: Option<PipelinePatch>,
    llm: Option<LlmPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct ScoringPatch {
    weights: Option<CriterionWeights>,
    template_base_cost: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct PipelinePatch {
    max_recommendations: Option<usize>,
    max_alternatives: Option<usize>,
    customize: Option<bool>,
    predict_performance: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct LlmPatch {
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::sync::{Mutex, OnceLock};

    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    #[test]
    fn defaults_are_valid() -> Result<(), String> {
        let config = AppConfig::default();
        config.validate().map_err(|err| err.to_string())?;

        ensure(config.pipeline.max_recommendations == 5, "default max recommendations is 5")?;
        ensure(config.pipeline.max_alternatives == 3, "default max alternatives is 3")?;
        ensure(config.scoring.template_base_cost == 5000.0, "default base cost is 5000")?;
        ensure(config.llm.timeout_secs == 30, "default llm timeout is 30s")?;
        ensure(
            matches!(config.logging.format, LogFormat::Compact),
            "default logging format should be compact",
        )
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_SITEFIT_BASE_COST", "7500");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("sitefit.toml");
            fs::write(
                &path,
                r#"
[scoring]
template_base_cost = ${TEST_SITEFIT_BASE_COST}

[pipeline]
max_alternatives = 2
customize = false
"#,
            )
            .map_err(|err| err.to_string())?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.scoring.template_base_cost == 7500.0,
                "base cost should be interpolated from environment",
            )?;
            ensure(config.pipeline.max_alternatives == 2, "file should set max alternatives")?;
            ensure(!config.pipeline.customize, "file should disable customization")?;
            Ok(())
        })();

        clear_vars(&["TEST_SITEFIT_BASE_COST"]);
        result
    }

    #[test]
    fn missing_interpolation_variable_is_reported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(&["TEST_SITEFIT_UNSET_VALUE"]);

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = dir.path().join("sitefit.toml");
        fs::write(&path, "[llm]\ntimeout_secs = ${TEST_SITEFIT_UNSET_VALUE}\n")
            .map_err(|err| err.to_string())?;

        let error =
            match AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
            {
                Ok(_) => return Err("expected interpolation failure".to_string()),
                Err(error) => error,
            };
        ensure(
            matches!(
                error,
                ConfigError::MissingEnvInterpolation { ref var }
                    if var == "TEST_SITEFIT_UNSET_VALUE"
            ),
            "interpolation failure should name the variable",
        )
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("SITEFIT_LOG_LEVEL", "warn");
        env::set_var("SITEFIT_LOG_FORMAT", "json");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "warning log level should be set from env var")?;
            ensure(
                matches!(config.logging.format, LogFormat::Json),
                "json logging format should be set from env var",
            )?;
            Ok(())
        })();

        clear_vars(&["SITEFIT_LOG_LEVEL", "SITEFIT_LOG_FORMAT"]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("SITEFIT_PIPELINE_MAX_RECOMMENDATIONS", "8");
        env::set_var("SITEFIT_LLM_TIMEOUT_SECS", "45");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("sitefit.toml");
            fs::write(
                &path,
                r#"
[pipeline]
max_recommendations = 3

[llm]
timeout_secs = 10

[logging]
level = "warn"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    max_recommendations: Some(12),
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.pipeline.max_recommendations == 12, "override should win")?;
            ensure(config.logging.level == "debug", "overridden log level should be debug")?;
            ensure(config.llm.timeout_secs == 45, "env timeout should win over file")?;
            Ok(())
        })();

        clear_vars(&["SITEFIT_PIPELINE_MAX_RECOMMENDATIONS", "SITEFIT_LLM_TIMEOUT_SECS"]);
        result
    }

    #[test]
    fn invalid_env_override_is_rejected() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("SITEFIT_PIPELINE_CUSTOMIZE", "sometimes");

        let result = match AppConfig::load(LoadOptions::default()) {
            Ok(_) => Err("expected invalid override to fail".to_string()),
            Err(error) => ensure(
                matches!(
                    error,
                    ConfigError::InvalidEnvOverride { ref key, .. }
                        if key == "SITEFIT_PIPELINE_CUSTOMIZE"
                ),
                "error should name the offending variable",
            ),
        };

        clear_vars(&["SITEFIT_PIPELINE_CUSTOMIZE"]);
        result
    }

    #[test]
    fn validation_rejects_unnormalized_weights() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = dir.path().join("sitefit.toml");
        fs::write(
            &path,
            r#"
[scoring.weights]
industry = 0.5
audience = 0.5
goal = 0.15
technical = 0.15
budget = 0.1
trend = 0.1
brand = 0.1
"#,
        )
        .map_err(|err| err.to_string())?;

        let error =
            match AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
            {
                Ok(_) => return Err("expected validation failure".to_string()),
                Err(error) => error,
            };
        ensure(
            matches!(
                error,
                ConfigError::Validation(ref message) if message.contains("scoring.weights")
            ),
            "validation failure should mention scoring.weights",
        )
    }

    #[test]
    fn validation_bounds_max_recommendations() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        for value in [0, 51] {
            let result = AppConfig::load(LoadOptions {
                overrides: ConfigOverrides {
                    max_recommendations: Some(value),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            });
            ensure(
                matches!(
                    result,
                    Err(ConfigError::Validation(ref message))
                        if message.contains("pipeline.max_recommendations")
                ),
                "out-of-range max recommendations should fail validation",
            )?;
        }
        Ok(())
    }

    #[test]
    fn required_file_must_exist() -> Result<(), String> {
        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = dir.path().join("absent.toml");

        let result = AppConfig::load(LoadOptions {
            config_path: Some(path.clone()),
            require_file: true,
            ..LoadOptions::default()
        });
        ensure(
            matches!(result, Err(ConfigError::MissingConfigFile(ref missing)) if *missing == path),
            "missing required file should be reported",
        )
    }
}
