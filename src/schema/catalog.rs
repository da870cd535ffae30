//! Tool catalog loading from YAML
//!
//! A catalog file describes one server namespace and the tools it exposes:
//!
//! ```yaml
//! server: chrome-devtools
//! tools:
//!   - name: click
//!     options:
//!       - key: uid
//!         required: true
//! ```
//!
//! Built-in catalogs are compiled in; user and project catalogs are layered on
//! top, later definitions replacing earlier ones.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{BridgeError, Result};

use super::definition::ToolSchema;

const BUILTIN_CATALOGS: &[(&str, &str)] = &[
    ("chrome-devtools.yml", include_str!("builtin/chrome-devtools.yml")),
    ("figma-desktop.yml", include_str!("builtin/figma-desktop.yml")),
];

/// YAML file structure
#[derive(Debug, Deserialize)]
struct CatalogFile {
    server: String,
    #[serde(default)]
    tools: Vec<ToolSchema>,
}

/// A tool schema bound to the server namespace it is called on
#[derive(Debug, Clone, Copy)]
pub struct BoundTool<'a> {
    pub server: &'a str,
    pub schema: &'a ToolSchema,
}

impl BoundTool<'_> {
    pub fn name(&self) -> &str {
        &self.schema.name
    }
}

/// Catalog of tool schemas grouped by server namespace
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    servers: BTreeMap<String, BTreeMap<String, ToolSchema>>,
}

impl ToolCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding only the compiled-in server definitions
    pub fn builtin() -> Result<Self> {
        let mut catalog = Self::new();
        for (name, content) in BUILTIN_CATALOGS {
            catalog
                .merge_yaml(content)
                .map_err(|e| BridgeError::Catalog(format!("built-in catalog {}: {}", name, e)))?;
        }
        Ok(catalog)
    }

    /// Load catalog from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let mut catalog = Self::new();
        catalog.merge_yaml(content)?;
        Ok(catalog)
    }

    /// Load catalog from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut catalog = Self::new();
        catalog.merge_file(path)?;
        Ok(catalog)
    }

    /// Add every tool from a YAML document, replacing same-named tools
    pub fn merge_yaml(&mut self, content: &str) -> Result<()> {
        let file: CatalogFile = serde_yaml::from_str(content)?;
        if file.server.trim().is_empty() {
            return Err(BridgeError::Catalog("server name is empty".to_string()));
        }

        // Check the whole file first so a bad tool leaves the catalog untouched
        let mut seen = HashSet::new();
        for tool in &file.tools {
            if !seen.insert(tool.name.as_str()) {
                return Err(BridgeError::Catalog(format!(
                    "tool '{}' defined twice for server '{}'",
                    tool.name, file.server
                )));
            }
            tool.validate()?;
        }

        for tool in file.tools {
            self.add(&file.server, tool)?;
        }
        Ok(())
    }

    /// Add every tool from a YAML file
    pub fn merge_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| BridgeError::Catalog(format!("Failed to read {}: {}", path.display(), e)))?;
        self.merge_yaml(&content)
            .map_err(|e| BridgeError::Catalog(format!("{}: {}", path.display(), e)))?;
        log::debug!("Loaded tool catalog from {}", path.display());
        Ok(())
    }

    /// Add every `*.yml`/`*.yaml` file in a directory; unreadable files are skipped
    pub fn merge_dir(&mut self, dir: &Path) -> Result<usize> {
        let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "yml" || ext == "yaml"))
            .collect();
        entries.sort();

        let mut loaded = 0;
        for path in entries {
            match self.merge_file(&path) {
                Ok(()) => loaded += 1,
                Err(e) => log::warn!("Skipping catalog {}: {}", path.display(), e),
            }
        }
        Ok(loaded)
    }

    /// Add a tool to a server namespace after checking its invariants
    pub fn add(&mut self, server: &str, tool: ToolSchema) -> Result<()> {
        tool.validate()?;
        let tools = self.servers.entry(server.to_string()).or_default();
        if tools.insert(tool.name.clone(), tool).is_some() {
            log::debug!("Replaced existing tool definition in server '{}'", server);
        }
        Ok(())
    }

    /// Get a tool by server and name
    pub fn get(&self, server: &str, tool: &str) -> Option<&ToolSchema> {
        self.servers.get(server)?.get(tool)
    }

    /// Resolve a tool, distinguishing an unknown server from an unknown tool
    pub fn bind<'a>(&'a self, server: &'a str, tool: &str) -> Result<BoundTool<'a>> {
        let tools = self
            .servers
            .get(server)
            .ok_or_else(|| BridgeError::UnknownServer(server.to_string()))?;
        let schema = tools.get(tool).ok_or_else(|| BridgeError::UnknownTool {
            server: server.to_string(),
            tool: tool.to_string(),
        })?;
        Ok(BoundTool { server, schema })
    }

    /// List server namespaces in sorted order
    pub fn servers(&self) -> Vec<&str> {
        self.servers.keys().map(String::as_str).collect()
    }

    /// Tools of one server in sorted order
    pub fn tools(&self, server: &str) -> Vec<&ToolSchema> {
        self.servers
            .get(server)
            .map(|tools| tools.values().collect())
            .unwrap_or_default()
    }

    /// Get total number of tools
    pub fn len(&self) -> usize {
        self.servers.values().map(BTreeMap::len).sum()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
