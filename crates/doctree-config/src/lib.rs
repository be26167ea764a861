//! Configuration management for doctree.
//!
//! Parses `doctree.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "doctree.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only set values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override package source directory.
    pub source_dir: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override LaTeX math rendering.
    pub latex_math: Option<bool>,
    /// Override source-order member listing.
    pub source_order: Option<bool>,
    /// Override docstring inheritance.
    pub inherit_docstrings: Option<bool>,
    /// Additional known-absent module names.
    pub absent_modules: Vec<String>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Package section (paths are relative strings from TOML).
    package: PackageConfigRaw,
    /// Output section (paths are relative strings from TOML).
    output: OutputConfigRaw,
    /// Rendering options.
    pub render: RenderConfig,
    /// Module loading and linking options.
    pub modules: ModulesConfig,

    /// Resolved paths (set after loading).
    #[serde(skip)]
    pub paths: PathsConfig,
    /// Package name override (set after loading).
    #[serde(skip)]
    pub package_name: Option<String>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw package section as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct PackageConfigRaw {
    name: Option<String>,
    source_dir: Option<String>,
}

/// Raw output section as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct OutputConfigRaw {
    dir: Option<String>,
}

/// Resolved filesystem paths.
#[derive(Debug, Default, Clone)]
pub struct PathsConfig {
    /// Package source directory.
    pub source_dir: PathBuf,
    /// Directory the HTML tree is written to.
    pub output_dir: PathBuf,
}

/// Rendering options section.
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Render `$..$` / `$$..$$` as LaTeX math.
    pub latex_math: bool,
    /// List members in declaration order instead of sorted by name.
    pub source_order: bool,
}

/// Module loading and linking section.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModulesConfig {
    /// Fill missing member docstrings from `inherits` targets.
    pub inherit_docstrings: bool,
    /// Filename for package metadata sidecar files.
    pub meta_filename: String,
    /// Module names known to be absent; requirements on them become
    /// placeholder pages instead of load failures.
    pub absent: Vec<String>,
}

impl Default for ModulesConfig {
    fn default() -> Self {
        Self {
            inherit_docstrings: false,
            meta_filename: "module.yaml".to_owned(),
            absent: Vec::new(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `doctree.toml` in the current directory and parents,
    /// falling back to defaults.
    ///
    /// CLI settings are applied after loading and path resolution, so CLI
    /// arguments take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist, parsing
    /// fails, or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.paths.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.paths.output_dir.clone_from(output_dir);
        }
        if let Some(latex_math) = settings.latex_math {
            self.render.latex_math = latex_math;
        }
        if let Some(source_order) = settings.source_order {
            self.render.source_order = source_order;
        }
        if let Some(inherit) = settings.inherit_docstrings {
            self.modules.inherit_docstrings = inherit;
        }
        self.modules
            .absent
            .extend(settings.absent_modules.iter().cloned());
    }

    /// Search for the config file in the current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to the working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to a base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            package: PackageConfigRaw::default(),
            output: OutputConfigRaw::default(),
            render: RenderConfig::default(),
            modules: ModulesConfig::default(),
            paths: PathsConfig {
                source_dir: base.join("docs"),
                output_dir: base.join("site"),
            },
            package_name: None,
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;
        Ok(config)
    }

    /// Resolve raw path strings relative to the config file's directory.
    fn resolve_paths(&mut self, base: &Path) {
        let source = self.package.source_dir.as_deref().unwrap_or("docs");
        let output = self.output.dir.as_deref().unwrap_or("site");
        self.paths.source_dir = resolve_relative(base, source);
        self.paths.output_dir = resolve_relative(base, output);
        self.package_name = self.package.name.clone();
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.package.source_dir.as_deref() == Some("") {
            return Err(ConfigError::Validation(
                "package.source_dir cannot be empty".to_owned(),
            ));
        }
        if self.output.dir.as_deref() == Some("") {
            return Err(ConfigError::Validation(
                "output.dir cannot be empty".to_owned(),
            ));
        }
        if self.modules.meta_filename.is_empty() {
            return Err(ConfigError::Validation(
                "modules.meta_filename cannot be empty".to_owned(),
            ));
        }
        if self.modules.meta_filename.contains('/') {
            return Err(ConfigError::Validation(
                "modules.meta_filename must be a bare filename".to_owned(),
            ));
        }
        for name in &self.modules.absent {
            if name.is_empty() || name.contains(['/', '.']) {
                return Err(ConfigError::Validation(format!(
                    "modules.absent entry '{name}' is not a valid module name"
                )));
            }
        }
        if let Some(name) = &self.package_name
            && name.is_empty()
        {
            return Err(ConfigError::Validation(
                "package.name cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Join a possibly-relative path string onto a base directory.
fn resolve_relative(base: &Path, value: &str) -> PathBuf {
    let path = Path::new(value);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
