//! Application configuration.
//!
//! The configuration is read from `$XDG_CONFIG_HOME/wintile/config.json`
//! (falling back to `~/.config`).  Every section is optional: a minimal
//! `{}` file is valid and everything falls back to compiled-in defaults.
//!
//! # Example
//!
//! ```json
//! {
//!   "border": { "max_horizontal": 12.0, "max_vertical": 6.0 },
//!   "grid": {
//!     "columns": 3,
//!     "rows": 2,
//!     "names": { "browser": { "row": 0, "col": 0 }, "term": { "row": 1, "col": 2 } }
//!   },
//!   "socket_path": "/run/user/1000/wintile.sock",
//!   "bindings": {
//!     "super+l": { "Move": "Right" },
//!     "super+shift+l": { "Extend": "Right" },
//!     "super+b": { "MoveTo": "browser" },
//!     "super+e": "EnterSandbox"
//!   }
//! }
//! ```

use crate::command::Command;
use crate::grid::{Grid, TileId};
use crate::layout::Layout;
use crate::manager::native::BorderPolicy;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Caps for the window decoration compensation.
    #[serde(default)]
    pub border: BorderPolicy,

    /// Initial grid.
    #[serde(default)]
    pub grid: GridConfig,

    /// Override for the command socket.  Defaults to
    /// `$XDG_RUNTIME_DIR/wintile.sock`.
    #[serde(default)]
    pub socket_path: Option<PathBuf>,

    /// Hotkey name to command.
    #[serde(default)]
    pub bindings: BTreeMap<String, Command>,
}

/// Shape of the uniform grid the daemon starts with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub columns: usize,
    pub rows: usize,
    /// Tile names for `MoveTo`.
    pub names: BTreeMap<String, TileId>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 2,
            rows: 1,
            names: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/wintile/config.json`.
    pub fn default_path() -> PathBuf {
        let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
            format!("{}/.config", home)
        });
        PathBuf::from(base).join("wintile").join("config.json")
    }

    /// Where the command listener binds.
    pub fn socket_path(&self) -> PathBuf {
        self.socket_path.clone().unwrap_or_else(|| {
            let runtime = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".into());
            PathBuf::from(runtime).join("wintile.sock")
        })
    }

    /// The layout described by the `grid` and `bindings` sections.  Names
    /// of tiles outside the grid are skipped.
    pub fn layout(&self) -> Layout {
        let mut layout = Layout::new(Grid::uniform(self.grid.columns, self.grid.rows));
        for (name, &tile) in &self.grid.names {
            if let Err(e) = layout.grid_mut().name_tile(tile, name.as_str()) {
                warn!("ignoring tile name {:?}: {}", name, e);
            }
        }
        for (hotkey, command) in &self.bindings {
            layout.bind(hotkey.clone(), command.clone());
        }
        layout
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
