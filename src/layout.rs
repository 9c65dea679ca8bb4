//! A [`Layout`] is a [`Grid`] together with its hotkey bindings.
//!
//! Hotkeys are opaque names here; whatever registers them with the
//! operating system calls [`Tiler::trigger`](crate::tiler::Tiler::trigger)
//! with the name when one fires.

use crate::command::Command;
use crate::grid::Grid;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct Layout {
    grid: Grid,
    bindings: BTreeMap<String, Command>,
}

impl Layout {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            bindings: BTreeMap::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Bind `hotkey` to `command`, returning the previous binding.
    pub fn bind(&mut self, hotkey: impl Into<String>, command: Command) -> Option<Command> {
        self.bindings.insert(hotkey.into(), command)
    }

    pub fn unbind(&mut self, hotkey: &str) -> Option<Command> {
        self.bindings.remove(hotkey)
    }

    pub fn binding(&self, hotkey: &str) -> Option<&Command> {
        self.bindings.get(hotkey)
    }

    /// All `(hotkey, command)` pairs, sorted by hotkey.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &Command)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Direction;

    #[test]
    fn bind_and_unbind() {
        let mut layout = Layout::new(Grid::uniform(2, 1));
        assert!(layout.bind("super+l", Command::Move(Direction::Right)).is_none());
        let prev = layout.bind("super+l", Command::Extend(Direction::Right));
        assert_eq!(prev, Some(Command::Move(Direction::Right)));
        assert_eq!(
            layout.binding("super+l"),
            Some(&Command::Extend(Direction::Right))
        );
        assert_eq!(layout.bindings().count(), 1);
        layout.unbind("super+l");
        assert!(layout.binding("super+l").is_none());
    }

    #[test]
    fn grid_mut_changes_tiles() {
        let mut layout = Layout::default();
        layout.grid_mut().cut_vertical().unwrap();
        assert_eq!(layout.grid().tiles().len(), 2);
    }
}
