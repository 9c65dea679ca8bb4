//! Grow the focused window one edge at a time.
//!
//! Unlike the other strategies this is a one-dimensional search: for
//! `Left`, every tile's left edge is a candidate boundary, and the nearest
//! one strictly beyond the window's own left edge wins.  Only that edge of
//! the window moves.

use super::focused_rect;
use crate::command::Direction;
use crate::geometry::Rect;
use crate::grid::Grid;
use crate::manager::convert::PERCENT;
use crate::navigation::EDGE_MARGIN;
use crate::traits::{WindowManager, WmError};
use log::{debug, info};

pub struct ExtendStrategy<'a> {
    boundaries: Vec<Rect>,
    wm: &'a dyn WindowManager,
}

impl<'a> ExtendStrategy<'a> {
    pub fn new(grid: &Grid, wm: &'a dyn WindowManager) -> Self {
        Self::from_rects(grid.tiles_scaled(PERCENT).map(|(_, r)| r), wm)
    }

    /// Use the edges of arbitrary rects as boundaries.
    pub fn from_rects(rects: impl IntoIterator<Item = Rect>, wm: &'a dyn WindowManager) -> Self {
        Self {
            boundaries: rects.into_iter().collect(),
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

    /// Push the focused window's edge facing `direction` out to the next
    /// boundary.
    pub fn apply(&self, direction: Direction) -> Result<bool, WmError> {
        let Some((window, rect)) = focused_rect(self.wm)? else {
            debug!("extend {}: no focused window", direction);
            return Ok(false);
        };
        let current = edge(&rect, direction);
        let Some(target) = self.next_boundary(current, direction) else {
            debug!("extend {} {}: already at the outermost boundary", window, direction);
            return Ok(false);
        };
        let extended = with_edge(&rect, direction, target);
        info!("extend {} {}: {:?} -> {:?}", window, direction, rect, extended);
        self.wm.position_window(window, extended)?;
        Ok(true)
    }

    /// Nearest boundary more than [`EDGE_MARGIN`] beyond `current`.
    fn next_boundary(&self, current: f64, direction: Direction) -> Option<f64> {
        let edges = self.boundaries.iter().map(|r| edge(r, direction));
        match direction {
            Direction::Left | Direction::Up => edges
                .filter(|e| e + EDGE_MARGIN < current)
                .max_by(f64::total_cmp),
            Direction::Right | Direction::Down => edges
                .filter(|e| e - EDGE_MARGIN > current)
                .min_by(f64::total_cmp),
        }
    }
}

/// The coordinate of the edge of `rect` facing `direction`.
fn edge(rect: &Rect, direction: Direction) -> f64 {
    match direction {
        Direction::Left => rect.left,
        Direction::Right => rect.right,
        Direction::Up => rect.top,
        Direction::Down => rect.bottom,
    }
}

fn with_edge(rect: &Rect, direction: Direction, value: f64) -> Rect {
    let Rect { left, top, right, bottom } = *rect;
    match direction {
        Direction::Left => Rect::new(value, top, right, bottom),
        Direction::Right => Rect::new(left, top, value, bottom),
        Direction::Up => Rect::new(left, value, right, bottom),
        Direction::Down => Rect::new(left, top, right, value),
    }
}
