// src/config/mod.rs

//! Layered configuration for the admin client
//!
//! Layers are merged lowest priority first:
//! - built-in defaults
//! - an optional YAML, JSON or TOML file
//! - environment variables (`STOREFRONT_ADMIN_` prefix, `__` separates nesting)
//! - in-memory overrides (command line flags)
//!
//! The merged result is validated once and frozen into a [`ClientConfig`]
//! that every store and controller receives by `Arc`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use tokio::sync::RwLock;
use url::Url;

use crate::error::{Error, ErrorKind, Result};

pub const ENV_PREFIX: &str = "STOREFRONT_ADMIN";

const PRIORITY_DEFAULTS: u32 = 0;
const PRIORITY_FILE: u32 = 10;
const PRIORITY_ENV: u32 = 100;
const PRIORITY_OVERRIDES: u32 = 1000;

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub key: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation error for '{}': {}", self.key, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ConfigSource {
    File { path: PathBuf, format: ConfigFormat },
    Environment { prefix: String },
    Memory { data: Value },
}

#[derive(Debug, Clone)]
pub struct ConfigLayer {
    pub name: String,
    pub source: ConfigSource,
    pub priority: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub api: ApiConfig,
    pub uploads: UploadConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Origin of the REST API, including any path prefix such as `/api`
    pub base_url: String,
    /// Origin serving uploaded images and the upload endpoint
    pub image_server_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            image_server_url: "http://localhost:3001".to_string(),
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub upload_path_prefix: String,
    pub category_logo_prefix: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            upload_path_prefix: "/uploads/products".to_string(),
            category_logo_prefix: "/images/logo".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub console: ConsoleLogConfig,
    pub file: Option<FileLogConfig>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
            console: ConsoleLogConfig::default(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleLogConfig {
    pub enabled: bool,
    pub colored: bool,
}

impl Default for ConsoleLogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileLogConfig {
    pub path: PathBuf,
}

impl Default for FileLogConfig {
    fn default() -> Self {
        Self {
            path: dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("storefront-admin")
                .join("admin.log"),
        }
    }
}

/// Immutable view of the merged configuration handed to the API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    image_server_url: String,
    request_timeout: Duration,
    upload_path_prefix: String,
    category_logo_prefix: String,
}

impl ClientConfig {
    pub fn from_admin_config(config: &AdminConfig) -> Result<Self> {
        let errors = validate_admin_config(config);
        if !errors.is_empty() {
            let first_key = errors[0].key.clone();
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            return Err(Error::config_key(
                first_key,
                messages.clone(),
                format!("Invalid configuration: {}", messages.join("; ")),
            ));
        }

        Ok(Self {
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            image_server_url: config.api.image_server_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(config.api.request_timeout_secs),
            upload_path_prefix: config.uploads.upload_path_prefix.trim_end_matches('/').to_string(),
            category_logo_prefix: config
                .uploads
                .category_logo_prefix
                .trim_end_matches('/')
                .to_string(),
        })
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Absolute URL of an API path such as `/products/admin/all`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn upload_endpoint(&self) -> String {
        format!("{}/api/upload/image", self.image_server_url)
    }

    /// Display URL for a server-relative image path
    pub fn image_url(&self, relative_path: &str) -> String {
        format!("{}{}", self.image_server_url, relative_path)
    }

    /// Stored path of a freshly uploaded file
    pub fn uploaded_image_path(&self, filename: &str) -> String {
        format!("{}/{}", self.upload_path_prefix, filename)
    }

    /// Stored path of a category logo; empty filename stays empty
    pub fn category_logo_path(&self, filename: &str) -> String {
        let filename = filename.trim();
        if filename.is_empty() {
            String::new()
        } else {
            format!("{}/{}", self.category_logo_prefix, filename)
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn image_server_url(&self) -> &str {
        &self.image_server_url
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        let defaults = AdminConfig::default();
        Self {
            base_url: defaults.api.base_url,
            image_server_url: defaults.api.image_server_url,
            request_timeout: Duration::from_secs(defaults.api.request_timeout_secs),
            upload_path_prefix: defaults.uploads.upload_path_prefix,
            category_logo_prefix: defaults.uploads.category_logo_prefix,
        }
    }
}

pub fn validate_admin_config(config: &AdminConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (key, value) in [
        ("api.base_url", &config.api.base_url),
        ("api.image_server_url", &config.api.image_server_url),
    ] {
        match Url::parse(value) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ValidationError {
                key: key.to_string(),
                message: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => errors.push(ValidationError {
                key: key.to_string(),
                message: format!("'{}' is not a valid URL: {}", value, e),
            }),
        }
    }

    if config.api.request_timeout_secs == 0 {
        errors.push(ValidationError {
            key: "api.request_timeout_secs".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }

    for (key, value) in [
        ("uploads.upload_path_prefix", &config.uploads.upload_path_prefix),
        ("uploads.category_logo_prefix", &config.uploads.category_logo_prefix),
    ] {
        if !value.starts_with('/') {
            errors.push(ValidationError {
                key: key.to_string(),
                message: "must be an absolute path starting with '/'".to_string(),
            });
        }
    }

    errors
}

pub struct ConfigManager {
    layers: Vec<ConfigLayer>,
    merged_config: Arc<RwLock<Value>>,
    env_prefix: String,
}

impl fmt::Debug for ConfigManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigManager")
            .field("layers", &self.layers.len())
            .field("env_prefix", &self.env_prefix)
            .finish()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            merged_config: Arc::new(RwLock::new(Value::Object(Map::new()))),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Defaults, optional file, then environment
    pub fn standard(config_file: Option<&Path>) -> Result<Self> {
        let mut manager = Self::new();
        let defaults = serde_json::to_value(AdminConfig::default())?;
        manager.add_memory_layer("defaults", defaults, PRIORITY_DEFAULTS);

        match config_file {
            Some(path) => manager.add_file_layer("file", path, PRIORITY_FILE)?,
            None => {
                if let Some(path) = default_config_path().filter(|p| p.exists()) {
                    manager.add_file_layer("file", path, PRIORITY_FILE)?;
                }
            }
        }

        let prefix = manager.env_prefix.clone();
        manager.add_env_layer("env", prefix, PRIORITY_ENV);
        Ok(manager)
    }

    pub fn add_file_layer<P: AsRef<Path>>(
        &mut self,
        name: impl Into<String>,
        path: P,
        priority: u32,
    ) -> Result<()> {
        let path = path.as_ref().to_path_buf();
        let format = ConfigFormat::from_extension(&path)
            .ok_or_else(|| Error::config("Unsupported configuration file format"))?;

        self.push_layer(ConfigLayer {
            name: name.into(),
            source: ConfigSource::File { path, format },
            priority,
        });
        Ok(())
    }

    pub fn add_env_layer(&mut self, name: impl Into<String>, prefix: impl Into<String>, priority: u32) {
        self.push_layer(ConfigLayer {
            name: name.into(),
            source: ConfigSource::Environment {
                prefix: prefix.into(),
            },
            priority,
        });
    }

    pub fn add_memory_layer(&mut self, name: impl Into<String>, data: Value, priority: u32) {
        self.push_layer(ConfigLayer {
            name: name.into(),
            source: ConfigSource::Memory { data },
            priority,
        });
    }

    /// Command line overrides, applied above every other layer
    pub fn add_overrides(&mut self, data: Value) {
        self.add_memory_layer("overrides", data, PRIORITY_OVERRIDES);
    }

    fn push_layer(&mut self, layer: ConfigLayer) {
        self.layers.push(layer);
        self.layers.sort_by_key(|l| l.priority);
    }

    pub async fn initialize(&mut self) -> Result<()> {
        self.merge_configurations().await?;
        tracing::debug!(layers = self.layers.len(), "configuration merged");
        Ok(())
    }

    pub async fn get<T>(&self, key: &str) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let config = self.merged_config.read().await;
        let value = get_nested_value(&config, key).ok_or_else(|| {
            Error::new(
                ErrorKind::Configuration {
                    key: Some(key.to_string()),
                    validation_errors: vec![format!("Configuration key '{}' not found", key)],
                },
                "Configuration key not found",
            )
        })?;

        serde_json::from_value(value).map_err(|e| {
            Error::config_key(
                key,
                vec![format!("Failed to deserialize config value: {}", e)],
                format!("Failed to deserialize config value: {}", e),
            )
        })
    }

    pub async fn get_config(&self) -> Result<AdminConfig> {
        let config = self.merged_config.read().await;
        serde_json::from_value(config.clone())
            .map_err(|e| Error::config(format!("Failed to deserialize config: {}", e)))
    }

    pub async fn validate(&self) -> Result<Vec<ValidationError>> {
        let config = self.get_config().await?;
        Ok(validate_admin_config(&config))
    }

    pub async fn client_config(&self) -> Result<ClientConfig> {
        let config = self.get_config().await?;
        ClientConfig::from_admin_config(&config)
    }

    pub async fn debug_config(&self) -> Value {
        self.merged_config.read().await.clone()
    }

    async fn merge_configurations(&self) -> Result<()> {
        let mut merged = Value::Object(Map::new());

        // Process layers in priority order (lowest to highest)
        for layer in &self.layers {
            let layer_config = self.load_layer_config(layer)?;
            merge_values(&mut merged, layer_config);
        }

        *self.merged_config.write().await = merged;
        Ok(())
    }

    fn load_layer_config(&self, layer: &ConfigLayer) -> Result<Value> {
        match &layer.source {
            ConfigSource::File { path, format } => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    Error::config(format!("Failed to read config file {}: {}", path.display(), e))
                })?;

                match format {
                    ConfigFormat::Json => serde_json::from_str(&content)
                        .map_err(|e| Error::config(format!("Failed to parse JSON config: {}", e))),
                    ConfigFormat::Yaml => serde_yaml::from_str(&content)
                        .map_err(|e| Error::config(format!("Failed to parse YAML config: {}", e))),
                    ConfigFormat::Toml => toml::from_str(&content)
                        .map_err(|e| Error::config(format!("Failed to parse TOML config: {}", e))),
                }
            }
            ConfigSource::Environment { prefix } => Ok(env_layer_value(prefix, std::env::vars())),
            ConfigSource::Memory { data } => Ok(data.clone()),
        }
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("storefront-admin").join("config.toml"))
}

fn env_layer_value(prefix: &str, vars: impl Iterator<Item = (String, String)>) -> Value {
    let mut env_config = Map::new();
    let marker = format!("{}_", prefix);

    for (key, value) in vars {
        if let Some(rest) = key.strip_prefix(&marker) {
            let config_key = rest.to_lowercase();
            let nested_keys: Vec<&str> = config_key.split("__").filter(|k| !k.is_empty()).collect();
            set_nested_env_value(&mut env_config, &nested_keys, value);
        }
    }

    Value::Object(env_config)
}

fn merge_values(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            for (key, source_value) in source_map {
                match target_map.get_mut(&key) {
                    Some(target_value) => merge_values(target_value, source_value),
                    None => {
                        target_map.insert(key, source_value);
                    }
                }
            }
        }
        (target, source) => {
            *target = source;
        }
    }
}

fn get_nested_value(config: &Value, key: &str) -> Option<Value> {
    let mut current = config;
    for k in key.split('.') {
        current = current.get(k)?;
    }
    Some(current.clone())
}

fn set_nested_env_value(config: &mut Map<String, Value>, keys: &[&str], value: String) {
    let Some((first, rest)) = keys.split_first() else {
        return;
    };

    if rest.is_empty() {
        let parsed_value = if let Ok(bool_val) = value.parse::<bool>() {
            Value::Bool(bool_val)
        } else if let Ok(int_val) = value.parse::<i64>() {
            Value::Number(Number::from(int_val))
        } else {
            Value::String(value)
        };

        config.insert(first.to_string(), parsed_value);
        return;
    }

    let entry = config
        .entry(first.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    if let Value::Object(nested_map) = entry {
        set_nested_env_value(nested_map, rest, value);
    }
}
