//! Toolchain configuration: which executables the checker and the
//! build-and-run wrapper launch. Every field has a default, so the binaries
//! work without any configuration; embedding callers can override the paths
//! directly or load them from TOML.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file at {path}: {source}")]
    IoError { source: io::Error, path: String },

    /// Failed to parse the configuration content
    #[error("Failed to parse config: {0}")]
    ParseError(String),
}

/// Executables used to check snippets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ToolchainConfig {
    /// Compiler that type-checks a program without running it
    pub compile_only: PathBuf,

    /// Interpreter that compiles and executes a program
    pub compile_and_run: PathBuf,

    /// Argument telling either tool to read the program from stdin
    pub stdin_arg: String,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            compile_only: PathBuf::from("bin").join("neonc"),
            compile_and_run: PathBuf::from("bin").join("neon"),
            stdin_arg: "-".to_string(),
        }
    }
}

/// Settings for the `neon-run` wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BuildRunConfig {
    /// Toolchain executable that runs the builder script
    pub neon: PathBuf,

    /// Script that turns a source file into an executable
    pub builder_script: PathBuf,
}

impl Default for BuildRunConfig {
    fn default() -> Self {
        Self {
            neon: PathBuf::from("bin").join("neon"),
            builder_script: PathBuf::from("tools").join("neonbuild.neon"),
        }
    }
}

impl ToolchainConfig {
    /// Parse from TOML text; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&read_config(path)?)
    }
}

impl BuildRunConfig {
    /// Parse from TOML text; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&read_config(path)?)
    }
}

fn read_config(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::IoError {
        source,
        path: path.display().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_toolchain() {
        let config = ToolchainConfig::default();
        assert_eq!(config.compile_only, Path::new("bin/neonc"));
        assert_eq!(config.compile_and_run, Path::new("bin/neon"));
        assert_eq!(config.stdin_arg, "-");
    }

    #[test]
    fn test_default_build_run() {
        let config = BuildRunConfig::default();
        assert_eq!(config.neon, Path::new("bin/neon"));
        assert_eq!(config.builder_script, Path::new("tools/neonbuild.neon"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ToolchainConfig::from_toml_str(r#"compile-and-run = "/opt/neon/bin/neon""#)
            .expect("Failed to parse TOML");
        assert_eq!(config.compile_and_run, Path::new("/opt/neon/bin/neon"));
        assert_eq!(config.compile_only, Path::new("bin/neonc"));
    }

    #[test]
    fn test_full_build_run_toml() {
        let toml = r#"
neon = "build/neon"
builder-script = "scripts/build.neon"
"#;
        let config = BuildRunConfig::from_toml_str(toml).expect("Failed to parse TOML");
        assert_eq!(config.neon, Path::new("build/neon"));
        assert_eq!(config.builder_script, Path::new("scripts/build.neon"));
    }

    #[test]
    fn test_invalid_toml() {
        let result = ToolchainConfig::from_toml_str("compile-only = [");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("toolchain.toml");
        fs::write(&path, "compile-only = \"neonc\"\nstdin-arg = \"--stdin\"\n").unwrap();

        let config = ToolchainConfig::load(&path).unwrap();
        assert_eq!(config.compile_only, Path::new("neonc"));
        assert_eq!(config.stdin_arg, "--stdin");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ToolchainConfig::load(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::IoError { .. })));
    }
}
