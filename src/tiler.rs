//! The orchestrator that ties the layout, the window manager backends and
//! incoming commands together.
//!
//! [`Tiler`] owns the [`Layout`] and the tile selection, and reacts to
//! [`Command`]s by building the matching strategy for one invocation or by
//! mutating the grid.  Window operations always go through a
//! [`CompositeWindowManager`], so entering the sandbox redirects them
//! without any strategy noticing.

use crate::command::Command;
use crate::grid::{GridError, TileId};
use crate::layout::Layout;
use crate::manager::composite::CompositeWindowManager;
use crate::manager::sandbox::SandboxWindowManager;
use crate::strategy::{ExtendStrategy, FocusStrategy, MoveStrategy, SelectStrategy};
use crate::traits::{WindowManager, WmError};
use log::{debug, info};
use std::fmt;
use std::sync::Arc;

/// Possible errors from [`Tiler::handle`].
#[derive(Debug, thiserror::Error)]
pub enum TilerError {
    /// The active window manager failed; the command had no effect.
    #[error("window manager error: {0}")]
    WindowManager(#[from] WmError),

    /// A grid edit was rejected; the grid is unchanged.
    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error("no tile named {0:?}")]
    UnknownTile(String),

    #[error("no command bound to hotkey {0:?}")]
    UnboundHotkey(String),

    /// A hotkey bound to another `Trigger`.
    #[error("hotkey {0:?} is bound to a trigger")]
    NestedTrigger(String),

    /// The command needs a selected tile and none is selected.
    #[error("no tile selected")]
    NoSelection,
}

/// Which backend window operations are routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Native,
    Sandbox,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Native => write!(f, "native"),
            Mode::Sandbox => write!(f, "sandbox"),
        }
    }
}

/// Dispatches commands against a layout and a switchable backend.
///
/// # Typical usage
///
/// ```ignore
/// let native: Arc<dyn WindowManager> = Arc::new(converter);
/// let mut tiler = Tiler::new(Layout::new(Grid::uniform(2, 1)), native);
/// tiler.handle(Command::Move(Direction::Right))?;
/// ```
pub struct Tiler {
    layout: Layout,
    wm: Arc<CompositeWindowManager>,
    native: Arc<dyn WindowManager>,
    sandbox: Arc<SandboxWindowManager>,
    selected: Option<TileId>,
}

impl Tiler {
    /// Create a tiler in [`Mode::Native`].  `native` is expected to speak
    /// percent of the work area.
    pub fn new(layout: Layout, native: Arc<dyn WindowManager>) -> Self {
        Self {
            layout,
            wm: Arc::new(CompositeWindowManager::new(native.clone())),
            native,
            sandbox: Arc::new(SandboxWindowManager::new()),
            selected: None,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut Layout {
        &mut self.layout
    }

    /// The virtual windows shown while in [`Mode::Sandbox`].
    pub fn sandbox(&self) -> &Arc<SandboxWindowManager> {
        &self.sandbox
    }

    /// The window manager all strategies run against.
    pub fn window_manager(&self) -> &Arc<CompositeWindowManager> {
        &self.wm
    }

    /// The tile currently selected for layout editing.
    pub fn selected(&self) -> Option<TileId> {
        self.selected
    }

    pub fn mode(&self) -> Mode {
        let sandbox: Arc<dyn WindowManager> = self.sandbox.clone();
        if self.wm.is_current(&sandbox) {
            Mode::Sandbox
        } else {
            Mode::Native
        }
    }

    /// Run the command bound to `hotkey` in the layout.
    pub fn trigger(&mut self, hotkey: &str) -> Result<(), TilerError> {
        let command = self
            .layout
            .binding(hotkey)
            .cloned()
            .ok_or_else(|| TilerError::UnboundHotkey(hotkey.to_string()))?;
        if matches!(command, Command::Trigger(_)) {
            return Err(TilerError::NestedTrigger(hotkey.to_string()));
        }
        debug!("hotkey {:?} -> {:?}", hotkey, command);
        self.handle(command)
    }

    /// Process a single [`Command`].
    ///
    /// A rejected grid edit leaves the grid unchanged.  A window manager
    /// error aborts the command; the backend may already have changed the
    /// window's state (Hyprland floats a window before placing it).
    pub fn handle(&mut self, cmd: Command) -> Result<(), TilerError> {
        let wm: &dyn WindowManager = &*self.wm;
        let grid = self.layout.grid();

        match cmd {
            Command::Move(dir) => {
                MoveStrategy::new(grid, wm).apply(dir)?;
            }

            Command::Extend(dir) => {
                ExtendStrategy::new(grid, wm).apply(dir)?;
            }

            Command::Focus(dir) => {
                FocusStrategy::new(wm).apply(dir)?;
            }

            Command::Select(dir) => {
                SelectStrategy::new(grid).apply(&mut self.selected, dir);
            }

            Command::MoveTo(name) => {
                let tile = grid
                    .tile_named(&name)
                    .map(|t| t.id)
                    .ok_or(TilerError::UnknownTile(name))?;
                MoveStrategy::new(grid, wm).to_tile(tile)?;
            }

            Command::CutVertical => {
                let grid = self.layout.grid_mut();
                let position = match self.selected {
                    Some(tile) if grid.tile(tile).is_some() => grid.cut_vertical_at(tile)?,
                    _ => grid.cut_vertical()?,
                };
                info!("cut vertical at {:.4}", position);
            }

            Command::CutHorizontal => {
                let grid = self.layout.grid_mut();
                let position = match self.selected {
                    Some(tile) if grid.tile(tile).is_some() => grid.cut_horizontal_at(tile)?,
                    _ => grid.cut_horizontal()?,
                };
                info!("cut horizontal at {:.4}", position);
            }

            Command::InsertHandle { axis, position } => {
                let index = self.layout.grid_mut().insert_handle(axis, position)?;
                info!("inserted {} handle {} at {:.4}", axis, index, position);
            }

            Command::MoveHandle {
                axis,
                index,
                position,
            } => {
                self.layout.grid_mut().move_handle(axis, index, position)?;
                info!("moved {} handle {} to {:.4}", axis, index, position);
            }

            Command::NameTile { name, tile } => {
                let tile = tile.or(self.selected).ok_or(TilerError::NoSelection)?;
                self.layout.grid_mut().name_tile(tile, name.as_str())?;
                info!("named tile {} {:?}", tile, name);
            }

            Command::RemoveHandle { axis, index } => {
                let removed = self.layout.grid_mut().remove_handle(axis, index)?;
                info!("removed {} handle {} at {:.4}", axis, index, removed.position());
                if let Some(tile) = self.selected {
                    if self.layout.grid().tile(tile).is_none() {
                        debug!("selection {} merged away", tile);
                        self.selected = None;
                    }
                }
            }

            Command::EnterSandbox => self.switch_mode(Mode::Sandbox),

            Command::LeaveSandbox => self.switch_mode(Mode::Native),

            Command::Trigger(hotkey) => {
                self.trigger(&hotkey)?;
            }
        }

        Ok(())
    }

    fn switch_mode(&self, mode: Mode) {
        if self.mode() == mode {
            debug!("already in {} mode", mode);
            return;
        }
        let next: Arc<dyn WindowManager> = match mode {
            Mode::Native => self.native.clone(),
            Mode::Sandbox => self.sandbox.clone(),
        };
        self.wm.switch_to(next);
        info!("switched to {} mode", mode);
    }
}
