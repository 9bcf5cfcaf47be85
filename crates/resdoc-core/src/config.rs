use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Project configuration loaded from `.resdoc.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResdocConfig {
    pub input: String,
    /// Output file. `None` writes to stdout.
    pub output: Option<String>,
    pub format: OutputFormat,
    pub pretty: bool,
    pub strict: bool,
}

impl Default for ResdocConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            output: None,
            format: OutputFormat::Json,
            pretty: true,
            strict: false,
        }
    }
}

/// Serialization of the resulting design.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Encoding of the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// `.json` files are JSON; anything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
            _ => InputFormat::Yaml,
        }
    }
}

/// Looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".resdoc.yaml";

/// Read the config at `path`. A missing file is not an error.
pub fn load_config(path: &Path) -> Result<Option<ResdocConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let config = serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded config from {}", path.display());
    Ok(Some(config))
}

/// Starter `.resdoc.yaml` written by `resdoc init`.
pub fn default_config_content() -> &'static str {
    r#"# resdoc configuration
input: openapi.yaml
# output: design.json   # omit to print to stdout
format: json            # json | yaml
pretty: true
strict: false           # fail on malformed schema nodes and custom HTTP methods
"#
}
