use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;
use crate::error::{Result, SmithError};
use crate::lint::{Severity, ValidationConfig};

/// Name of the per-project config file, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = ".skillsmith.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub validation: ValidationSettings,
    #[serde(default)]
    pub package: PackageConfig,
    #[serde(default)]
    pub smoke: SmokeConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    pub fn load(explicit_path: Option<&Path>, project_root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("SKILLSMITH_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(project_root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Parse a config document from TOML text (used by tests and fixtures).
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let patch: ConfigPatch = toml::from_str(raw)
            .map_err(|err| SmithError::Config(format!("parse config: {err}")))?;
        let mut config = Self::default();
        config.merge_patch(patch);
        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            tracing::debug!("no platform config directory; skipping global config");
            return Ok(None);
        };
        Self::load_patch(&dir.join("skillsmith/config.toml"))
    }

    fn load_project(project_root: &Path) -> Result<Option<ConfigPatch>> {
        Self::load_patch(&project_root.join(PROJECT_CONFIG_FILE))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path).map_err(|err| {
            SmithError::Config(format!("read config {}: {err}", path.display()))
        })?;
        let patch = toml::from_str(&raw).map_err(|err| {
            SmithError::Config(format!("parse config {}: {err}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.validation {
            self.validation.merge(patch);
        }
        if let Some(patch) = patch.package {
            self.package.merge(patch);
        }
        if let Some(patch) = patch.smoke {
            self.smoke.merge(patch);
        }
        if let Some(patch) = patch.output {
            self.output.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var("SKILLSMITH_FORMAT") {
            self.output.format = OutputFormat::parse_name(&value)?;
        }
        if env_bool("SKILLSMITH_ROBOT").unwrap_or(false) {
            self.output.format = OutputFormat::Json;
        }
        if let Some(value) = env_bool("SKILLSMITH_STRICT") {
            self.validation.strict = value;
        }
        if let Some(values) = env_list("SKILLSMITH_DISABLED_RULES") {
            self.validation.disabled_rules.extend(values);
        }
        if let Ok(raw) = std::env::var("SKILLSMITH_SEVERITY_OVERRIDES") {
            self.validation
                .severity_overrides
                .extend(parse_severity_overrides(&raw)?);
        }

        if let Some(values) = env_list("SKILLSMITH_PACKAGE_EXCLUDE_DIRS") {
            self.package.exclude_dirs = merge_unique(values, &self.package.exclude_dirs);
        }
        if let Some(values) = env_list("SKILLSMITH_PACKAGE_EXCLUDE_SUFFIXES") {
            self.package.exclude_suffixes = merge_unique(values, &self.package.exclude_suffixes);
        }
        if let Some(values) = env_list("SKILLSMITH_PACKAGE_EXCLUDE_NAMES") {
            self.package.exclude_names = merge_unique(values, &self.package.exclude_names);
        }

        if let Some(value) = env_usize("SKILLSMITH_SMOKE_MIN_PROMPTS")? {
            self.smoke.min_example_prompts = value;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationSettings {
    #[serde(default)]
    pub disabled_rules: HashSet<String>,
    #[serde(default)]
    pub severity_overrides: HashMap<String, Severity>,
    #[serde(default)]
    pub strict: bool,
}

impl ValidationSettings {
    fn merge(&mut self, patch: ValidationPatch) {
        if let Some(values) = patch.disabled_rules {
            self.disabled_rules.extend(values);
        }
        if let Some(values) = patch.severity_overrides {
            self.severity_overrides.extend(values);
        }
        if let Some(value) = patch.strict {
            self.strict = value;
        }
    }

    /// Build the engine configuration these settings describe.
    pub fn to_validation_config(&self) -> ValidationConfig {
        let mut config = ValidationConfig::new();
        for rule_id in &self.disabled_rules {
            config = config.disable_rule(rule_id.clone());
        }
        for (rule_id, severity) in &self.severity_overrides {
            config = config.override_severity(rule_id.clone(), *severity);
        }
        if self.strict {
            config = config.strict();
        }
        config
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageConfig {
    #[serde(default)]
    pub exclude_dirs: Vec<String>,
    #[serde(default)]
    pub exclude_suffixes: Vec<String>,
    #[serde(default)]
    pub exclude_names: Vec<String>,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            exclude_dirs: vec!["__pycache__".to_string()],
            exclude_suffixes: vec![".pyc".to_string(), ".pyo".to_string()],
            exclude_names: vec![".DS_Store".to_string()],
        }
    }
}

impl PackageConfig {
    fn merge(&mut self, patch: PackagePatch) {
        if let Some(values) = patch.exclude_dirs {
            self.exclude_dirs = values;
        }
        if let Some(values) = patch.exclude_suffixes {
            self.exclude_suffixes = values;
        }
        if let Some(values) = patch.exclude_names {
            self.exclude_names = values;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmokeConfig {
    #[serde(default)]
    pub min_example_prompts: usize,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            min_example_prompts: 2,
        }
    }
}

impl SmokeConfig {
    const fn merge(&mut self, patch: SmokePatch) {
        if let Some(value) = patch.min_example_prompts {
            self.min_example_prompts = value;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

impl OutputConfig {
    const fn merge(&mut self, patch: OutputPatch) {
        if let Some(value) = patch.format {
            self.format = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub validation: Option<ValidationPatch>,
    pub package: Option<PackagePatch>,
    pub smoke: Option<SmokePatch>,
    pub output: Option<OutputPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ValidationPatch {
    pub disabled_rules: Option<Vec<String>>,
    pub severity_overrides: Option<HashMap<String, Severity>>,
    pub strict: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PackagePatch {
    pub exclude_dirs: Option<Vec<String>>,
    pub exclude_suffixes: Option<Vec<String>>,
    pub exclude_names: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SmokePatch {
    pub min_example_prompts: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct OutputPatch {
    pub format: Option<OutputFormat>,
}

fn merge_unique(values: Vec<String>, existing: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for value in values.into_iter().chain(existing.iter().cloned()) {
        if seen.insert(value.clone()) {
            out.push(value);
        }
    }
    out
}

/// Parse `rule=level` pairs separated by commas, e.g. `second-person=warning`.
fn parse_severity_overrides(raw: &str) -> Result<HashMap<String, Severity>> {
    let mut overrides = HashMap::new();
    for pair in raw.split(',').map(str::trim).filter(|pair| !pair.is_empty()) {
        let (rule, level) = pair.split_once('=').ok_or_else(|| {
            SmithError::Config(format!("severity override '{pair}' is not rule=level"))
        })?;
        let severity = Severity::parse_name(level).ok_or_else(|| {
            SmithError::Config(format!("unknown severity '{}' for rule {}", level.trim(), rule.trim()))
        })?;
        overrides.insert(rule.trim().to_string(), severity);
    }
    Ok(overrides)
}

/// Output format chosen through the environment alone, used when the
/// config files cannot be loaded.
pub fn env_output_format() -> Option<OutputFormat> {
    if env_bool("SKILLSMITH_ROBOT").unwrap_or(false) {
        return Some(OutputFormat::Json);
    }
    std::env::var("SKILLSMITH_FORMAT")
        .ok()
        .and_then(|value| OutputFormat::parse_name(&value).ok())
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

fn env_usize(key: &str) -> Result<Option<usize>> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<usize>()
            .map(Some)
            .map_err(|err| SmithError::Config(format!("invalid {key} value {value}: {err}"))),
        Err(_) => Ok(None),
    }
}

fn env_list(key: &str) -> Option<Vec<String>> {
    std::env::var(key).ok().map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    })
}
