//! Configuration management for lightbox builds.
//!
//! Reads `lightbox.toml`, found in the working directory or the nearest
//! parent that has one:
//!
//! ```toml
//! [docs]
//! source_dir = "docs"
//!
//! [build]
//! output_dir = "_build"
//! images_dir = "_images"
//! targets = ["html", "latex"]
//! ```
//!
//! Relative paths resolve against the file's directory. Command-line values
//! override the file through [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `${VAR}` fails when VAR is unset; `${VAR:-default}` falls back to the
//! default. Expanded fields:
//! - `docs.source_dir`
//! - `build.output_dir`
//! - `build.images_dir`

mod expand;

use std::path::{Component, Path, PathBuf};

use lightbox_renderer::{DEFAULT_IMAGES_DIR, Target};
use serde::Deserialize;

/// Command-line overrides. `None` keeps the configured value.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override build output directory.
    pub output_dir: Option<PathBuf>,
    /// Override the targets to build.
    pub targets: Option<Vec<Target>>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "lightbox.toml";

/// Targets built when none are configured.
const DEFAULT_TARGETS: [Target; 2] = [Target::Html, Target::Latex];

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Build configuration (strings from TOML).
    build: BuildConfigRaw,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved build configuration (set after loading).
    #[serde(skip)]
    pub build_resolved: BuildConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Source tree root. Image references may not escape it.
    pub source_dir: PathBuf,
}

/// Raw build configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    output_dir: Option<String>,
    images_dir: Option<String>,
    targets: Option<Vec<String>>,
}

/// Resolved build configuration.
#[derive(Debug)]
pub struct BuildConfig {
    /// Output root; each target writes into `<output_dir>/<target>`.
    pub output_dir: PathBuf,
    /// Image directory of interactive output, relative to the output root.
    pub images_dir: String,
    /// Targets to build, in configured order.
    pub targets: Vec<Target>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("_build"),
            images_dir: DEFAULT_IMAGES_DIR.to_owned(),
            targets: DEFAULT_TARGETS.to_vec(),
        }
    }
}

impl BuildConfig {
    /// Output directory of one target.
    #[must_use]
    pub fn target_dir(&self, target: Target) -> PathBuf {
        self.output_dir.join(target.name())
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
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`build.output_dir`").
        field: String,
        /// Error message (e.g., "${`OUT_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load `config_path`, or the discovered `lightbox.toml`, or defaults
    /// rooted at the working directory when there is none.
    ///
    /// `cli_settings` are applied last and the result is validated again.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the resulting configuration is invalid.
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
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.build_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(targets) = &settings.targets {
            self.build_resolved.targets.clone_from(targets);
        }
    }

    /// Nearest `lightbox.toml` walking up from the working directory.
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

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Defaults rooted at `base`.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            build: BuildConfigRaw::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
            },
            build_resolved: BuildConfig {
                output_dir: base.join("_build"),
                ..BuildConfig::default()
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Check build settings: a relative `images_dir` that stays inside the
    /// output directory and at least one target.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_build()
    }

    fn validate_build(&self) -> Result<(), ConfigError> {
        let build = &self.build_resolved;

        require_non_empty(&build.images_dir, "build.images_dir")?;
        let images_dir = Path::new(&build.images_dir);
        if images_dir.is_absolute()
            || images_dir
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(ConfigError::Validation(format!(
                "build.images_dir must be a relative path inside the output directory, got '{}'",
                build.images_dir
            )));
        }

        if build.targets.is_empty() {
            return Err(ConfigError::Validation(
                "build.targets must name at least one target".to_owned(),
            ));
        }

        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref source_dir) = self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(source_dir, "docs.source_dir")?);
        }
        if let Some(ref output_dir) = self.build.output_dir {
            self.build.output_dir = Some(expand::expand_env(output_dir, "build.output_dir")?);
        }
        if let Some(ref images_dir) = self.build.images_dir {
            self.build.images_dir = Some(expand::expand_env(images_dir, "build.images_dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory and parse targets.
    fn resolve(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
        };

        let targets = match &self.build.targets {
            Some(names) => names
                .iter()
                .map(|name| name.parse::<Target>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| ConfigError::Validation(format!("build.targets: {e}")))?,
            None => DEFAULT_TARGETS.to_vec(),
        };

        self.build_resolved = BuildConfig {
            output_dir: resolve(self.build.output_dir.as_deref(), "_build"),
            images_dir: self
                .build
                .images_dir
                .clone()
                .unwrap_or_else(|| DEFAULT_IMAGES_DIR.to_owned()),
            targets,
        };

        Ok(())
    }
}
