#[macro_use]
extern crate tracing;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use layout_tree_ipc::Orientation;
use miette::{Context, IntoDiagnostic};

/// Key given to the window of a freshly created tree.
pub const DEFAULT_WINDOW_KEY: &str = "scratch";

#[derive(knuffel::Decode, Debug, Default, Clone, PartialEq)]
pub struct Config {
    #[knuffel(child, default)]
    pub layout: Layout,
}

/// Shape of the tree created when there is nothing to restore.
#[derive(knuffel::Decode, Debug, Clone, PartialEq)]
pub struct Layout {
    #[knuffel(child, unwrap(argument), default = String::from(DEFAULT_WINDOW_KEY))]
    pub default_window: String,
    #[knuffel(child, unwrap(argument, str), default)]
    pub default_orientation: Orientation,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            default_window: String::from(DEFAULT_WINDOW_KEY),
            default_orientation: Orientation::Vertical,
        }
    }
}

impl Config {
    /// `$XDG_CONFIG_HOME/layout-tree/config.kdl` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        let dirs = ProjectDirs::from("", "", "layout-tree")?;
        Some(dirs.config_dir().join("config.kdl"))
    }

    pub fn load(path: &Path) -> miette::Result<Self> {
        let _span = tracing::debug_span!("Config::load").entered();

        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("error reading {path:?}"))?;

        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("config.kdl");
        let config = Self::parse(filename, &contents).context("error parsing")?;
        debug!("loaded config from {path:?}");
        Ok(config)
    }

    /// Loads `path` if given, otherwise the default path if that file exists.
    ///
    /// An explicitly requested file must exist; a missing default file yields the default
    /// config.
    pub fn load_or_default(path: Option<&Path>) -> miette::Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn parse(filename: &str, text: &str) -> Result<Self, knuffel::Error> {
        let _span = tracing::debug_span!("Config::parse").entered();
        knuffel::parse(filename, text)
    }
}
