//! Grid layout model.
//!
//! A [`Grid`] is two sorted lists of [`Handle`]s (boundary positions in
//! normalized `[0, 1]` space), one for rows and one for columns.  The tiles
//! are always the cartesian product of the intervals between consecutive
//! boundaries, so a grid with `r` row handles and `c` column handles has
//! exactly `(r + 1) * (c + 1)` tiles.
//!
//! Tiles are derived data: they are recomputed after every mutation and
//! handed out read-only.  Because they are normalized, a layout does not
//! depend on the monitor resolution.

use crate::geometry::Rect;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Two handles closer than this are considered to share a position.
const HANDLE_EPSILON: f64 = 1e-9;

/// Which list of handles an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Horizontal grid lines at y positions, separating rows.
    Row,
    /// Vertical grid lines at x positions, separating columns.
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// A movable grid line at a normalized position in `(0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Handle(f64);

impl Handle {
    pub fn position(self) -> f64 {
        self.0
    }
}

/// Position of a tile in the grid.
///
/// Ordering is row-major, which is also the order of [`Grid::tiles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId {
    pub row: usize,
    pub col: usize,
}

impl TileId {
    pub fn new(col: usize, row: usize) -> Self {
        Self { row, col }
    }

    fn index(self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.row,
            Axis::Column => self.col,
        }
    }

    fn with_index(self, axis: Axis, index: usize) -> Self {
        match axis {
            Axis::Row => Self { row: index, ..self },
            Axis::Column => Self { col: index, ..self },
        }
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// One cell of the grid, in normalized coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub id: TileId,
    pub rect: Rect,
    /// User-assigned name used for direct selection.
    pub name: Option<String>,
}

/// Errors from grid mutations.  A failed mutation leaves the grid unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// The position is outside `(0, 1)`, collides with an existing handle,
    /// or would reorder the handles.
    #[error("invalid {axis} handle position {position}")]
    InvalidHandlePosition { axis: Axis, position: f64 },

    #[error("no {axis} handle at index {index}")]
    HandleOutOfRange { axis: Axis, index: usize },

    #[error("no tile at {0}")]
    TileOutOfRange(TileId),
}

/// Row and column handles plus the tiles derived from them.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: Vec<Handle>,
    columns: Vec<Handle>,
    names: BTreeMap<TileId, String>,
    /// Cached derivation of the handles; rebuilt by [`Grid::recompute`].
    tiles: Vec<Tile>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// A grid with no handles: one tile covering the whole area.
    pub fn new() -> Self {
        let mut grid = Self {
            rows: Vec::new(),
            columns: Vec::new(),
            names: BTreeMap::new(),
            tiles: Vec::new(),
        };
        grid.recompute();
        grid
    }

    /// A grid of `columns × rows` equally sized tiles.  Zero counts are
    /// treated as one.
    pub fn uniform(columns: usize, rows: usize) -> Self {
        let even = |n: usize| -> Vec<Handle> {
            let n = n.max(1);
            (1..n).map(|i| Handle(i as f64 / n as f64)).collect()
        };
        let mut grid = Self {
            rows: even(rows),
            columns: even(columns),
            names: BTreeMap::new(),
            tiles: Vec::new(),
        };
        grid.recompute();
        grid
    }

    /// Build a grid from explicit handle positions (any order).
    pub fn from_handles(columns: &[f64], rows: &[f64]) -> Result<Self, GridError> {
        let mut grid = Self::new();
        for &x in columns {
            grid.insert_handle(Axis::Column, x)?;
        }
        for &y in rows {
            grid.insert_handle(Axis::Row, y)?;
        }
        Ok(grid)
    }

    //  Accessors

    /// Handles of `axis`, in ascending order.
    pub fn handles(&self, axis: Axis) -> &[Handle] {
        match axis {
            Axis::Row => &self.rows,
            Axis::Column => &self.columns,
        }
    }

    /// Grid dimensions as `(cols, rows)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.columns.len() + 1, self.rows.len() + 1)
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        let (cols, rows) = self.dimensions();
        if id.col >= cols || id.row >= rows {
            return None;
        }
        self.tiles.get(id.row * cols + id.col)
    }

    pub fn tile_named(&self, name: &str) -> Option<&Tile> {
        self.tiles
            .iter()
            .find(|t| t.name.as_deref() == Some(name))
    }

    /// Tile rects multiplied by `factor`, e.g. `100.0` for percent space.
    pub fn tiles_scaled(&self, factor: f64) -> impl Iterator<Item = (TileId, Rect)> + '_ {
        self.tiles.iter().map(move |t| (t.id, t.rect.scale(factor)))
    }

    /// The `[start, end)` spans between consecutive boundaries of `axis`,
    /// including the outer `0` and `1`.
    pub fn intervals(&self, axis: Axis) -> Vec<(f64, f64)> {
        let handles = self.handles(axis);
        let mut bounds = Vec::with_capacity(handles.len() + 2);
        bounds.push(0.0);
        bounds.extend(handles.iter().map(|h| h.0));
        bounds.push(1.0);
        bounds.windows(2).map(|w| (w[0], w[1])).collect()
    }

    //  Handle mutation

    /// Insert a handle at `position`, returning its index.
    ///
    /// The interval containing `position` is split in two; names stay with
    /// the lower part.
    pub fn insert_handle(&mut self, axis: Axis, position: f64) -> Result<usize, GridError> {
        let invalid = GridError::InvalidHandlePosition { axis, position };
        if !position.is_finite() || position <= 0.0 || position >= 1.0 {
            return Err(invalid);
        }
        let handles = self.handles(axis);
        if handles
            .iter()
            .any(|h| (h.0 - position).abs() < HANDLE_EPSILON)
        {
            return Err(invalid);
        }
        let index = handles.partition_point(|h| h.0 < position);

        self.handles_mut(axis).insert(index, Handle(position));
        self.remap_names(axis, |c| if c > index { c + 1 } else { c });
        self.recompute();
        Ok(index)
    }

    /// Remove the handle at `index`, merging the two intervals it
    /// separated.  If both merged tiles carry a name, the lower one wins.
    pub fn remove_handle(&mut self, axis: Axis, index: usize) -> Result<Handle, GridError> {
        if index >= self.handles(axis).len() {
            return Err(GridError::HandleOutOfRange { axis, index });
        }
        let removed = self.handles_mut(axis).remove(index);
        self.remap_names(axis, |c| if c <= index { c } else { c - 1 });
        self.recompute();
        Ok(removed)
    }

    /// Move the handle at `index` to `position`.  The position must stay
    /// strictly between the neighbouring handles (or the outer bounds).
    pub fn move_handle(&mut self, axis: Axis, index: usize, position: f64) -> Result<(), GridError> {
        let handles = self.handles(axis);
        if index >= handles.len() {
            return Err(GridError::HandleOutOfRange { axis, index });
        }
        let lower = if index == 0 { 0.0 } else { handles[index - 1].0 };
        let upper = handles.get(index + 1).map_or(1.0, |h| h.0);
        if !position.is_finite()
            || position - lower < HANDLE_EPSILON
            || upper - position < HANDLE_EPSILON
        {
            return Err(GridError::InvalidHandlePosition { axis, position });
        }
        self.handles_mut(axis)[index] = Handle(position);
        self.recompute();
        Ok(())
    }

    /// Add a column by splitting the widest column at its midpoint.
    /// Returns the new handle position.
    pub fn cut_vertical(&mut self) -> Result<f64, GridError> {
        let widest = self.widest_interval(Axis::Column);
        self.cut(Axis::Column, widest)
    }

    /// Add a row by splitting the tallest row at its midpoint.
    pub fn cut_horizontal(&mut self) -> Result<f64, GridError> {
        let tallest = self.widest_interval(Axis::Row);
        self.cut(Axis::Row, tallest)
    }

    /// Split the column containing `tile` at its midpoint.
    pub fn cut_vertical_at(&mut self, tile: TileId) -> Result<f64, GridError> {
        if self.tile(tile).is_none() {
            return Err(GridError::TileOutOfRange(tile));
        }
        self.cut(Axis::Column, tile.col)
    }

    /// Split the row containing `tile` at its midpoint.
    pub fn cut_horizontal_at(&mut self, tile: TileId) -> Result<f64, GridError> {
        if self.tile(tile).is_none() {
            return Err(GridError::TileOutOfRange(tile));
        }
        self.cut(Axis::Row, tile.row)
    }

    //  Names

    /// Give `tile` a name.  The name is taken away from any other tile.
    pub fn name_tile(&mut self, tile: TileId, name: impl Into<String>) -> Result<(), GridError> {
        if self.tile(tile).is_none() {
            return Err(GridError::TileOutOfRange(tile));
        }
        let name = name.into();
        self.names.retain(|_, n| *n != name);
        self.names.insert(tile, name);
        self.recompute();
        Ok(())
    }

    /// Remove the name of `tile`, returning it.
    pub fn clear_name(&mut self, tile: TileId) -> Option<String> {
        let removed = self.names.remove(&tile);
        if removed.is_some() {
            self.recompute();
        }
        removed
    }

    //  Internal

    fn handles_mut(&mut self, axis: Axis) -> &mut Vec<Handle> {
        match axis {
            Axis::Row => &mut self.rows,
            Axis::Column => &mut self.columns,
        }
    }

    fn widest_interval(&self, axis: Axis) -> usize {
        let mut best = (0, f64::NEG_INFINITY);
        for (i, (start, end)) in self.intervals(axis).into_iter().enumerate() {
            if end - start > best.1 {
                best = (i, end - start);
            }
        }
        best.0
    }

    fn cut(&mut self, axis: Axis, interval: usize) -> Result<f64, GridError> {
        let intervals = self.intervals(axis);
        let (start, end) = intervals[interval.min(intervals.len() - 1)];
        let position = (start + end) / 2.0;
        self.insert_handle(axis, position)?;
        Ok(position)
    }

    /// Re-key tile names after the intervals of `axis` were renumbered.
    /// When two names land on the same tile the first one (row-major) is
    /// kept.
    fn remap_names(&mut self, axis: Axis, map: impl Fn(usize) -> usize) {
        let old = std::mem::take(&mut self.names);
        for (id, name) in old {
            let id = id.with_index(axis, map(id.index(axis)));
            self.names.entry(id).or_insert(name);
        }
    }

    fn recompute(&mut self) {
        let rows = self.intervals(Axis::Row);
        let cols = self.intervals(Axis::Column);
        self.tiles = rows
            .iter()
            .enumerate()
            .flat_map(|(row, &(top, bottom))| {
                cols.iter().enumerate().map(move |(col, &(left, right))| {
                    (TileId { row, col }, Rect::new(left, top, right, bottom))
                })
            })
            .map(|(id, rect)| Tile {
                id,
                rect,
                name: self.names.get(&id).cloned(),
            })
            .collect();
    }
}

//  Tests
