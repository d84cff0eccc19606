//! # Generator Configuration
//!
//! Options consumed by the builders and emitters, read from a `tsgen.toml`
//! that sits next to the symbol export or in any parent directory of it.
//! Every option has a default, so an empty or missing file is valid.
//!
//! ## Example
//!
//! ```toml
//! output_folder = "src/app/generated/"
//! default_module_name = "shop-api"
//!
//! [path_overrides]
//! "com.acme.shop" = "shop"
//!
//! [exclude_classes]
//! internal = "com\\.acme\\.internal\\..*"
//!
//! [type_overrides]
//! "java.util.UUID" = "string"
//! ```
//!
//! ## Environment Variables
//!
//! * `TSGEN_OUTPUT_FOLDER` - overrides `output_folder`
//! * `TSGEN_INDENT_WIDTH` - overrides `indent_width`

use anyhow::Context;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

/// File name searched for when no explicit config path is given
pub const CONFIG_FILE: &str = "tsgen.toml";

/// Target types for the `java.time` family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeTypes {
    pub zoned_date_time: String,
    pub local_date_time: String,
    pub local_time: String,
    pub local_date: String,
}

impl Default for TimeTypes {
    fn default() -> Self {
        TimeTypes {
            zoned_date_time: "string".to_string(),
            local_date_time: "string".to_string(),
            local_time: "string".to_string(),
            local_date: "string".to_string(),
        }
    }
}

/// Where generated artifacts go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// Write files below the output folder
    #[default]
    File,
    /// Keep artifacts in memory (dry runs)
    Memory,
}

/// Immutable configuration snapshot for one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    /// Root folder of generated files, always ends with `/`
    pub output_folder: String,
    /// Appended to every generated file name before `.ts`
    pub generated_suffix: String,
    /// File holding the shared service-api declarations
    pub std_api_file_name: String,
    /// File holding the default request manager implementation
    pub request_manager_file_name: String,
    /// Module used for endpoints without an explicit module name
    pub default_module_name: String,
    /// Class injected into every generated service
    pub http_service_class: String,
    /// Import path of `http_service_class`; the generated request manager when unset
    pub http_service_include: Option<String>,
    /// Extra import lines prepended to every service file
    pub service_includes: Vec<String>,
    pub enable_time_integration: bool,
    pub time: TimeTypes,
    /// Package prefix to folder; the longest matching prefix wins
    pub path_overrides: BTreeMap<String, String>,
    /// Named regular expressions; matching qualified names resolve to `any`
    pub exclude_classes: BTreeMap<String, String>,
    /// Qualified type name to generated name
    pub type_overrides: BTreeMap<String, String>,
    pub indent_width: usize,
    /// Emit `name?:` for properties without a not-null marker
    pub optional_nullable_properties: bool,
    pub storage: StorageKind,
}

impl Default for GenConfig {
    fn default() -> Self {
        GenConfig {
            output_folder: "sys-gen/".to_string(),
            generated_suffix: ".generated".to_string(),
            std_api_file_name: "sys-std".to_string(),
            request_manager_file_name: "sys-request-manager".to_string(),
            default_module_name: "service-api".to_string(),
            http_service_class: "ServiceRequestManager".to_string(),
            http_service_include: None,
            service_includes: Vec::new(),
            enable_time_integration: true,
            time: TimeTypes::default(),
            path_overrides: BTreeMap::new(),
            exclude_classes: BTreeMap::new(),
            type_overrides: BTreeMap::new(),
            indent_width: 2,
            optional_nullable_properties: false,
            storage: StorageKind::File,
        }
    }
}

impl GenConfig {
    /// Normalise values and apply environment overrides
    pub fn finish(mut self) -> anyhow::Result<Self> {
        if let Ok(folder) = env::var("TSGEN_OUTPUT_FOLDER") {
            self.output_folder = folder;
        }
        if let Ok(width) = env::var("TSGEN_INDENT_WIDTH") {
            self.indent_width = width
                .trim()
                .parse()
                .with_context(|| format!("Invalid TSGEN_INDENT_WIDTH value: {}", width))?;
        }
        if !self.output_folder.ends_with('/') {
            self.output_folder.push('/');
        }
        ExclusionRules::compile(&self.exclude_classes)?;
        Ok(self)
    }

    /// Indentation unit used by the emitters
    pub fn indent(&self) -> String {
        " ".repeat(self.indent_width)
    }
}

/// Compiled `exclude_classes` patterns
///
/// A pattern must match the whole qualified name.
#[derive(Debug, Clone, Default)]
pub struct ExclusionRules {
    patterns: Vec<(String, Regex)>,
}

impl ExclusionRules {
    pub fn compile(patterns: &BTreeMap<String, String>) -> anyhow::Result<Self> {
        let mut compiled = Vec::with_capacity(patterns.len());
        for (name, pattern) in patterns {
            if pattern.trim().is_empty() {
                continue;
            }
            let regex = Regex::new(&format!("^(?:{})$", pattern))
                .with_context(|| format!("Invalid exclude_classes pattern '{}': {}", name, pattern))?;
            compiled.push((name.clone(), regex));
        }
        Ok(ExclusionRules { patterns: compiled })
    }

    /// Name of the first rule excluding `type_name`
    pub fn matching_rule(&self, type_name: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|(_, r)| r.is_match(type_name))
            .map(|(n, _)| n.as_str())
    }

    pub fn is_excluded(&self, type_name: &str) -> bool {
        self.matching_rule(type_name).is_some()
    }
}

/// Load the generator configuration from a TOML file
///
/// # Arguments
///
/// * `config_path` - Path to a `tsgen.toml`
///
/// # Returns
///
/// Returns `Ok(Some(config))` if the file exists and parses successfully,
/// `Ok(None)` if it does not exist,
/// `Err` if it exists but fails to parse.
pub fn load_config(config_path: &Path) -> anyhow::Result<Option<GenConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read generator config: {}", config_path.display()))?;

    let config: GenConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse generator config: {}", config_path.display()))?;

    Ok(Some(config.finish()?))
}

/// Find `tsgen.toml` in the directory of `symbols_path` or any parent of it
pub fn auto_detect_config_path(symbols_path: &Path) -> Option<PathBuf> {
    let mut dir = symbols_path.parent();
    while let Some(current) = dir {
        let candidate = current.join(CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "Found generator config");
            return Some(candidate);
        }
        dir = current.parent();
    }
    None
}

/// Resolve the config path
///
/// Priority:
/// 1. Explicitly provided path (via CLI)
/// 2. Auto-detected next to the symbol export or above it
/// 3. None (defaults)
pub fn resolve_config_path(explicit_path: Option<&Path>, symbols_path: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        tracing::warn!(path = %path.display(), "Config file not found, falling back to auto-detection");
    }

    auto_detect_config_path(symbols_path)
}

/// Resolve and load the configuration, falling back to defaults
///
/// Defaults go through [`GenConfig::finish`] like a loaded file, so
/// environment overrides apply either way.
pub fn load_or_default(explicit_path: Option<&Path>, symbols_path: &Path) -> anyhow::Result<GenConfig> {
    let loaded = match resolve_config_path(explicit_path, symbols_path) {
        Some(path) => load_config(&path)?,
        None => None,
    };
    match loaded {
        Some(config) => Ok(config),
        None => GenConfig::default().finish(),
    }
}
