//! Snap the focused window onto a neighbouring tile.

use super::focused_rect;
use crate::command::Direction;
use crate::geometry::Rect;
use crate::grid::{Grid, TileId};
use crate::manager::convert::PERCENT;
use crate::navigation::closest_in_direction;
use crate::traits::{WindowManager, WmError};
use log::{debug, info};

pub struct MoveStrategy<'a> {
    tiles: Vec<(TileId, Rect)>,
    wm: &'a dyn WindowManager,
}

impl<'a> MoveStrategy<'a> {
    pub fn new(grid: &Grid, wm: &'a dyn WindowManager) -> Self {
        Self {
            tiles: grid.tiles_scaled(PERCENT).collect(),
            wm,
        }
    }

    pub fn left(&self) -> Result<bool, WmError> {
        self.apply(Direction::Left)
    }

    pub fn right(&self) -> Result<bool, WmError> {
        self.apply(Direction::Right)
    }

    pub fn up(&self) -> Result<bool, WmError> {
        self.apply(Direction::Up)
    }

    pub fn down(&self) -> Result<bool, WmError> {
        self.apply(Direction::Down)
    }

    /// Move the focused window onto the next tile in `direction`.
    ///
    /// The search starts from the tile the window covers most, so a window
    /// that only partly fills its tile still moves to the *neighbouring*
    /// tile.  A window that overlaps no tile searches from its own rect.
    pub fn apply(&self, direction: Direction) -> Result<bool, WmError> {
        let Some((window, rect)) = focused_rect(self.wm)? else {
            debug!("move {}: no focused window", direction);
            return Ok(false);
        };
        let origin = occupied_tile(&self.tiles, &rect).map_or(rect, |(_, r)| r);
        match closest_in_direction(origin, direction, self.tiles.iter().copied()) {
            Some((tile, target)) => {
                info!("move {} {}: tile {} {:?}", window, direction, tile, target);
                self.wm.position_window(window, target)?;
                Ok(true)
            }
            None => {
                debug!("move {} {}: no tile in that direction", window, direction);
                Ok(false)
            }
        }
    }

    /// Move the focused window onto `tile` directly.
    pub fn to_tile(&self, tile: TileId) -> Result<bool, WmError> {
        let Some((_, target)) = self.tiles.iter().find(|(id, _)| *id == tile) else {
            return Ok(false);
        };
        let Some(window) = self.wm.focused_window()? else {
            debug!("move to {}: no focused window", tile);
            return Ok(false);
        };
        info!("move {} to tile {} {:?}", window, tile, target);
        self.wm.position_window(window, *target)?;
        Ok(true)
    }
}

/// The tile sharing the largest area with `rect` (first one on ties).
fn occupied_tile(tiles: &[(TileId, Rect)], rect: &Rect) -> Option<(TileId, Rect)> {
    let mut best: Option<(f64, (TileId, Rect))> = None;
    for &(id, tile) in tiles {
        let area = tile.overlap_area(rect);
        if area > 0.0 && best.map_or(true, |(a, _)| area > a) {
            best = Some((area, (id, tile)));
        }
    }
    best.map(|(_, t)| t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::sandbox::SandboxWindowManager;
    use crate::strategy::testing::focused_sandbox;
    use crate::traits::WindowHandle;

    fn two_columns() -> Grid {
        Grid::from_handles(&[0.5], &[]).unwrap()
    }

    #[test]
    fn window_in_left_half_moves_to_right_half() {
        let grid = two_columns();
        let (wm, h) = focused_sandbox(Rect::new(10.0, 10.0, 40.0, 90.0));
        assert!(MoveStrategy::new(&grid, &wm).right().unwrap());
        assert_eq!(wm.window_rect(h).unwrap(), Rect::new(50.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn move_past_the_edge_is_noop() {
        let grid = two_columns();
        let start = Rect::new(50.0, 0.0, 100.0, 100.0);
        let (wm, h) = focused_sandbox(start);
        let strategy = MoveStrategy::new(&grid, &wm);
        assert!(!strategy.right().unwrap());
        assert!(!strategy.up().unwrap());
        assert!(!strategy.down().unwrap());
        assert_eq!(wm.window_rect(h).unwrap(), start);
        assert!(strategy.left().unwrap());
        assert_eq!(wm.window_rect(h).unwrap(), Rect::new(0.0, 0.0, 50.0, 100.0));
    }

    #[test]
    fn moves_down_in_a_two_by_two_grid() {
        let grid = Grid::uniform(2, 2);
        let (wm, h) = focused_sandbox(Rect::new(55.0, 5.0, 95.0, 45.0));
        assert!(MoveStrategy::new(&grid, &wm).down().unwrap());
        assert_eq!(wm.window_rect(h).unwrap(), Rect::new(50.0, 50.0, 100.0, 100.0));
    }

    #[test]
    fn window_outside_every_tile_searches_from_itself() {
        let grid = two_columns();
        let (wm, h) = focused_sandbox(Rect::new(-60.0, 10.0, -20.0, 90.0));
        assert!(MoveStrategy::new(&grid, &wm).right().unwrap());
        assert_eq!(wm.window_rect(h).unwrap(), Rect::new(0.0, 0.0, 50.0, 100.0));
    }

    #[test]
    fn no_focused_window_is_noop() {
        let grid = two_columns();
        let wm = SandboxWindowManager::new();
        assert!(!MoveStrategy::new(&grid, &wm).right().unwrap());
    }

    #[test]
    fn to_tile_places_window() {
        let grid = Grid::uniform(2, 2);
        let (wm, h) = focused_sandbox(Rect::new(1.0, 1.0, 2.0, 2.0));
        let strategy = MoveStrategy::new(&grid, &wm);
        assert!(strategy.to_tile(TileId::new(1, 1)).unwrap());
        assert_eq!(wm.window_rect(h).unwrap(), Rect::new(50.0, 50.0, 100.0, 100.0));
        assert!(!strategy.to_tile(TileId::new(5, 5)).unwrap());
    }

    #[test]
    fn stale_focused_window_aborts_without_write() {
        /// Reports a focused window that no longer exists.
        struct Stale(SandboxWindowManager);

        impl WindowManager for Stale {
            fn focused_window(&self) -> Result<Option<WindowHandle>, WmError> {
                Ok(Some(WindowHandle(404)))
            }
            fn set_focused_window(&self, h: WindowHandle) -> Result<(), WmError> {
                self.0.set_focused_window(h)
            }
            fn visible_windows(&self) -> Result<Vec<WindowHandle>, WmError> {
                self.0.visible_windows()
            }
            fn window_rect(&self, h: WindowHandle) -> Result<Rect, WmError> {
                self.0.window_rect(h)
            }
            fn position_window(&self, h: WindowHandle, r: Rect) -> Result<(), WmError> {
                self.0.position_window(h, r)
            }
        }

        let grid = two_columns();
        let (inner, other) = focused_sandbox(Rect::new(0.0, 0.0, 50.0, 100.0));
        let wm = Stale(inner);
        let err = MoveStrategy::new(&grid, &wm).right().unwrap_err();
        assert_eq!(err, WmError::WindowNotFound(WindowHandle(404)));
        assert_eq!(wm.0.window_rect(other).unwrap(), Rect::new(0.0, 0.0, 50.0, 100.0));
    }

    #[test]
    fn occupied_tile_prefers_largest_overlap() {
        let tiles: Vec<(TileId, Rect)> = two_columns().tiles_scaled(PERCENT).collect();
        let (id, _) = occupied_tile(&tiles, &Rect::new(40.0, 0.0, 70.0, 100.0)).unwrap();
        assert_eq!(id, TileId::new(1, 0));
        assert!(occupied_tile(&tiles, &Rect::new(200.0, 0.0, 300.0, 10.0)).is_none());
    }
}
