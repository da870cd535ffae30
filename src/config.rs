use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::schema::ToolCatalog;
use crate::transport::{DEFAULT_GATEWAY_URL, DEFAULT_TIMEOUT_MS, GatewayConfig};

/// Environment variable overriding the gateway base URL
pub const GATEWAY_URL_ENV: &str = "MCP_REST_URL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gateway: GatewaySettings,
    pub catalog: CatalogSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewaySettings {
    pub url: Option<String>,
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            url: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Include the compiled-in server catalogs
    pub builtin: bool,
    /// Extra catalog files or directories, loaded last
    pub paths: Vec<PathBuf>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            builtin: true,
            paths: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let project_name = env!("CARGO_PKG_NAME");

        // Project config first: ./.<project>.yml
        let project_config = PathBuf::from(format!(".{}.yml", project_name));
        if project_config.exists() {
            match Self::load_from_file(&project_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", project_config.display(), e);
                }
            }
        }

        // Then user config: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Apply the `MCP_REST_URL` value, which beats the config file
    pub fn apply_env(&mut self, gateway_url: Option<String>) {
        if let Some(url) = gateway_url.filter(|u| !u.trim().is_empty()) {
            log::debug!("Gateway URL from {}: {}", GATEWAY_URL_ENV, url);
            self.gateway.url = Some(url);
        }
    }

    /// Apply command line overrides, which beat everything else
    pub fn apply_cli(&mut self, gateway_url: Option<&str>, timeout_ms: Option<u64>) {
        if let Some(url) = gateway_url {
            self.gateway.url = Some(url.to_string());
        }
        if let Some(ms) = timeout_ms {
            self.gateway.timeout_ms = ms;
        }
    }

    /// Resolved gateway connection settings
    pub fn gateway_config(&self) -> GatewayConfig {
        let url = self.gateway.url.as_deref().unwrap_or(DEFAULT_GATEWAY_URL);
        GatewayConfig::with_url(url).timeout(Duration::from_millis(self.gateway.timeout_ms))
    }

    /// Standard catalog directories, lowest precedence first
    pub fn catalog_dirs() -> Vec<PathBuf> {
        let project_name = env!("CARGO_PKG_NAME");
        let mut dirs_found = Vec::new();
        if let Some(config_dir) = dirs::config_dir() {
            dirs_found.push(config_dir.join(project_name).join("tools"));
        }
        dirs_found.push(PathBuf::from(format!(".{}", project_name)).join("tools"));
        dirs_found
    }

    /// Load the tool catalog from the standard locations
    pub fn load_catalog(&self) -> Result<ToolCatalog> {
        self.load_catalog_from(&Self::catalog_dirs())
    }

    /// Load the tool catalog: built-ins, then `search_dirs`, then `catalog.paths`
    ///
    /// Later definitions replace earlier ones. Missing search directories are
    /// skipped; an explicitly configured path that fails to load is an error.
    pub fn load_catalog_from(&self, search_dirs: &[PathBuf]) -> Result<ToolCatalog> {
        let mut catalog = if self.catalog.builtin {
            ToolCatalog::builtin().context("Failed to load built-in catalog")?
        } else {
            ToolCatalog::new()
        };

        for dir in search_dirs.iter().filter(|d| d.is_dir()) {
            let loaded = catalog
                .merge_dir(dir)
                .context(format!("Failed to read catalog directory {}", dir.display()))?;
            log::debug!("Loaded {} catalog file(s) from {}", loaded, dir.display());
        }

        for path in &self.catalog.paths {
            if path.is_dir() {
                catalog
                    .merge_dir(path)
                    .context(format!("Failed to read catalog directory {}", path.display()))?;
            } else {
                catalog
                    .merge_file(path)
                    .context(format!("Failed to load catalog {}", path.display()))?;
            }
        }

        log::info!("Catalog has {} tool(s) across {} server(s)", catalog.len(), catalog.servers().len());
        Ok(catalog)
    }
}
