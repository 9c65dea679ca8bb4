//! Move the tile selection of the layout editor.
//!
//! Same navigation as [`MoveStrategy`](super::MoveStrategy), but the result
//! is a new selected [`TileId`] rather than a moved window.  The selection
//! itself belongs to the caller.

use crate::command::Direction;
use crate::geometry::Rect;
use crate::grid::{Grid, TileId};
use crate::manager::convert::PERCENT;
use crate::navigation::closest_in_direction;
use log::debug;

pub struct SelectStrategy {
    tiles: Vec<(TileId, Rect)>,
}

impl SelectStrategy {
    pub fn new(grid: &Grid) -> Self {
        Self {
            tiles: grid.tiles_scaled(PERCENT).collect(),
        }
    }

    /// Update `selected` to the neighbouring tile in `direction`.
    ///
    /// With no selection, or one that no longer exists in the grid, the
    /// first tile is selected.  Returns whether the selection changed.
    pub fn apply(&self, selected: &mut Option<TileId>, direction: Direction) -> bool {
        let current = selected.and_then(|id| self.tiles.iter().find(|(t, _)| *t == id));
        let next = match current {
            Some(&(_, rect)) => closest_in_direction(rect, direction, self.tiles.iter().copied())
                .map(|(id, _)| id),
            None => self.tiles.first().map(|(id, _)| *id),
        };
        match next {
            Some(id) if Some(id) != *selected => {
                debug!("select {}: {:?} -> {}", direction, selected, id);
                *selected = Some(id);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_around_a_two_by_two_grid() {
        let grid = Grid::uniform(2, 2);
        let select = SelectStrategy::new(&grid);
        let mut selected = Some(TileId::new(0, 0));

        assert!(select.apply(&mut selected, Direction::Right));
        assert_eq!(selected, Some(TileId::new(1, 0)));
        assert!(select.apply(&mut selected, Direction::Down));
        assert_eq!(selected, Some(TileId::new(1, 1)));
        assert!(select.apply(&mut selected, Direction::Left));
        assert_eq!(selected, Some(TileId::new(0, 1)));
        assert!(select.apply(&mut selected, Direction::Up));
        assert_eq!(selected, Some(TileId::new(0, 0)));
    }

    #[test]
    fn edge_of_grid_keeps_selection() {
        let grid = Grid::uniform(2, 1);
        let select = SelectStrategy::new(&grid);
        let mut selected = Some(TileId::new(0, 0));
        assert!(!select.apply(&mut selected, Direction::Left));
        assert!(!select.apply(&mut selected, Direction::Up));
        assert_eq!(selected, Some(TileId::new(0, 0)));
    }

    #[test]
    fn missing_or_stale_selection_picks_first_tile() {
        let grid = Grid::uniform(3, 1);
        let select = SelectStrategy::new(&grid);
        let mut selected = None;
        assert!(select.apply(&mut selected, Direction::Right));
        assert_eq!(selected, Some(TileId::new(0, 0)));

        let mut stale = Some(TileId::new(7, 3));
        assert!(select.apply(&mut stale, Direction::Down));
        assert_eq!(stale, Some(TileId::new(0, 0)));
    }

    #[test]
    fn finds_named_tile_below() {
        let mut grid = Grid::from_handles(&[0.5], &[0.5]).unwrap();
        grid.name_tile(TileId::new(1, 1), "target").unwrap();
        let select = SelectStrategy::new(&grid);
        let mut selected = Some(TileId::new(1, 0));
        assert!(select.apply(&mut selected, Direction::Down));
        assert_eq!(selected, grid.tile_named("target").map(|t| t.id));
    }
}
