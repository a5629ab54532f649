use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Scene and prefab extensions scanned for sprite references.
pub const DEFAULT_EXTENSIONS: [&str; 2] = [".prefab", ".unity"];

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_project_root")]
    pub project_root: String,
    #[serde(default = "default_asset_roots")]
    pub asset_roots: Vec<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            project_root: default_project_root(),
            asset_roots: default_asset_roots(),
            extensions: default_extensions(),
            ignore_patterns: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn for_project(root: impl AsRef<Path>) -> Self {
        Self {
            project_root: root.as_ref().to_string_lossy().into_owned(),
            ..Self::default()
        }
    }

    /// Extensions normalized to a leading dot and lowercase.
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.extensions
            .iter()
            .map(|ext| {
                let ext = ext.trim().to_ascii_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{}", ext)
                }
            })
            .collect()
    }
}

fn default_project_root() -> String {
    ".".to_string()
}

fn default_asset_roots() -> Vec<String> {
    vec!["Assets".to_string()]
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

/// Reads `Unisprite.toml` from the working directory (if present) and
/// `UNISPRITE_*` environment variables.
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    load_with_environment(environment())
}

/// `UNISPRITE_*` variables. List fields take comma-separated values, e.g.
/// `UNISPRITE_ASSET_ROOTS=Assets,Packages`.
fn environment() -> Environment {
    Environment::with_prefix("UNISPRITE")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("asset_roots")
        .with_list_parse_key("extensions")
        .with_list_parse_key("ignore_patterns")
}

fn load_with_environment(env: Environment) -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Unisprite").required(false))
        .add_source(env)
        .build()?;
    builder.try_deserialize::<AppConfig>()
}
